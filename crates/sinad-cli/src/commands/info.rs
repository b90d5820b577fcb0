//! WAV file metadata and level summary.

use clap::Args;
use sinad_io::{WavFormat, read_wav, read_wav_info};

use super::common::power_db;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!(
        "Sample Rate: {} Hz (Nyquist {:.1} Hz)",
        info.sample_rate,
        f64::from(info.sample_rate) / 2.0
    );
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let (samples, _) = read_wav(&args.file)?;
    if !samples.is_empty() {
        let peak = samples.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        let mean_square = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
        println!("Peak:        {:.2} dBFS", power_db(peak * peak));
        println!("RMS:         {:.2} dBFS", power_db(mean_square));
    }

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

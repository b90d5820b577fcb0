//! Spectrum inspection command.

use clap::Args;
use sinad_analysis::{Signal, SpectrumBuilder, Window};
use sinad_io::{ChannelMode, read_wav_with};
use std::fmt::Write as _;
use std::path::PathBuf;

use super::common::power_db;

/// Show the strongest bins of a file's power spectrum.
#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Window function
    #[arg(long, default_value = "hann")]
    pub window: Window,

    /// Channel to analyze: 'mix' or a zero-based index
    #[arg(long, default_value = "mix")]
    pub channel: ChannelMode,

    /// Show top N bins
    #[arg(long, default_value = "10")]
    pub peaks: usize,

    /// Output CSV file (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the spectrum command.
pub fn run(args: SpectrumArgs) -> anyhow::Result<()> {
    let (samples, spec) = read_wav_with(&args.input, args.channel)?;
    let signal = Signal::new(&samples, spec.sample_rate)?;
    let spectrum = SpectrumBuilder::new().with_window(args.window).build(&signal)?;

    println!(
        "{}: {} samples, {} Hz, {:.2}s, {} window, {:.3} Hz/bin",
        args.input.display(),
        signal.len(),
        spec.sample_rate,
        signal.duration_secs(),
        args.window,
        spectrum.bin_spacing()
    );

    let powers = spectrum.powers();
    let mut order: Vec<usize> = (0..powers.len()).collect();
    order.sort_by(|&a, &b| powers[b].total_cmp(&powers[a]));

    println!("\nTop {} bins:", args.peaks);
    println!("  {:>6}  {:>10}  {:>10}", "Bin", "Freq (Hz)", "Power (dB)");
    println!("  {:>6}  {:>10}  {:>10}", "---", "---------", "----------");
    for &bin in order.iter().take(args.peaks) {
        println!(
            "  {:>6}  {:>10.2}  {:>10.2}",
            bin,
            spectrum.frequencies()[bin],
            power_db(powers[bin])
        );
    }

    if let Some(output_path) = args.output {
        let mut csv = String::from("frequency_hz,magnitude,power\n");
        for ((freq, magnitude), power) in spectrum
            .frequencies()
            .iter()
            .zip(spectrum.magnitudes())
            .zip(powers)
        {
            writeln!(csv, "{freq:.4},{magnitude:e},{power:e}")?;
        }
        std::fs::write(&output_path, csv)?;
        println!("\nWrote spectrum to {}", output_path.display());
    }

    Ok(())
}

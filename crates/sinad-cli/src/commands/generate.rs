//! Test-tone generation command.

use clap::Args;
use sinad_io::{WavSpec, write_wav};
use std::path::PathBuf;

use super::common::load_profile;

/// Generate a test tone WAV file.
#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Frequency in Hz
    #[arg(long)]
    pub freq: Option<f64>,

    /// Duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Sample rate
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Tone amplitude before normalization
    #[arg(long)]
    pub amplitude: Option<f64>,

    /// Add Gaussian noise for this SINAD in dB
    #[arg(long)]
    pub target_sinad: Option<f64>,

    /// Noise seed for a reproducible file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bit depth (8, 16, 24, or 32 for float)
    #[arg(long)]
    pub bits: Option<u16>,

    /// Profile name or path
    #[arg(long)]
    pub profile: Option<String>,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let mut settings = load_profile(args.profile.as_deref())?.generator;

    if let Some(freq) = args.freq {
        settings.frequency = freq;
    }
    if let Some(duration) = args.duration {
        settings.duration_secs = duration;
    }
    if let Some(sample_rate) = args.sample_rate {
        settings.sample_rate = sample_rate;
    }
    if let Some(amplitude) = args.amplitude {
        settings.amplitude = amplitude;
    }
    if let Some(target) = args.target_sinad {
        settings.target_sinad_db = Some(target);
    }
    if let Some(bits) = args.bits {
        settings.bits_per_sample = bits;
    }
    settings.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "rendering test tone");

    let samples = settings.tone().render_seeded(seed);

    let spec = WavSpec {
        channels: 1,
        sample_rate: settings.sample_rate,
        bits_per_sample: settings.bits_per_sample,
    };
    write_wav(&args.output, &samples, spec)?;

    let noise = match settings.target_sinad_db {
        Some(target) => format!("{target:.1} dB SINAD, seed {seed}"),
        None => "no noise".to_string(),
    };
    println!(
        "Generated {:.1} Hz tone, {:.2}s at {} Hz, {}-bit ({noise})",
        settings.frequency, settings.duration_secs, settings.sample_rate, settings.bits_per_sample
    );
    println!("Wrote {}", args.output.display());

    Ok(())
}

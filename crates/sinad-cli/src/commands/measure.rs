//! SINAD measurement command.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use sinad_analysis::{SinadAnalyzer, SinadResult, Window};
use sinad_io::{ChannelMode, read_wav_with};
use std::path::{Path, PathBuf};

use super::common::load_profile;

/// Measure SINAD of WAV files.
#[derive(Args)]
pub struct MeasureArgs {
    /// Input WAV files
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Highest harmonic order removed from the noise (1 = none)
    #[arg(long)]
    pub harmonics: Option<usize>,

    /// Bins on each side of a peak counted as its power
    #[arg(long)]
    pub bin_half_width: Option<usize>,

    /// Window function (hann, hamming, blackman-harris, rectangular)
    #[arg(long)]
    pub window: Option<Window>,

    /// Channel to measure: 'mix' or a zero-based index
    #[arg(long, default_value = "mix")]
    pub channel: ChannelMode,

    /// Profile name or path
    #[arg(long)]
    pub profile: Option<String>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Per-file measurement report.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    sample_rate: u32,
    num_samples: usize,
    sinad_db: f64,
    enob: f64,
    thd_db: Option<f64>,
    signal_power: f64,
    harmonic_power: f64,
    noise_power: f64,
    fundamental_hz: f64,
    fundamental_bin: usize,
    harmonics: Vec<HarmonicReport>,
}

#[derive(Debug, Serialize)]
struct HarmonicReport {
    order: usize,
    frequency_hz: f64,
    bin: usize,
    power: f64,
}

impl FileReport {
    fn new(path: &Path, sample_rate: u32, num_samples: usize, result: &SinadResult) -> Self {
        Self {
            path: path.display().to_string(),
            sample_rate,
            num_samples,
            sinad_db: result.sinad_db,
            enob: result.enob(),
            thd_db: result.thd_db(),
            signal_power: result.signal_power,
            harmonic_power: result.harmonic_power,
            noise_power: result.noise_power,
            fundamental_hz: result.fundamental.refined_frequency,
            fundamental_bin: result.fundamental.bin_index,
            harmonics: result
                .harmonics
                .iter()
                .map(|h| HarmonicReport {
                    order: h.order,
                    frequency_hz: h.expected_frequency,
                    bin: h.matched_bin_index,
                    power: h.power,
                })
                .collect(),
        }
    }

    fn print(&self) {
        println!("File:           {}", self.path);
        println!("SINAD: {:.2} dB", self.sinad_db);
        println!(
            "  Fundamental:    {:.2} Hz (bin {})",
            self.fundamental_hz, self.fundamental_bin
        );
        println!("  Signal power:   {:.6e}", self.signal_power);
        println!("  Harmonic power: {:.6e}", self.harmonic_power);
        println!("  Noise power:    {:.6e}", self.noise_power);
        match self.thd_db {
            Some(thd) => println!("  THD:            {thd:.2} dB"),
            None => println!("  THD:            n/a"),
        }
        println!("  ENOB:           {:.2} bits", self.enob);
    }
}

/// Build the analyzer from the profile with command-line overrides applied.
fn build_analyzer(args: &MeasureArgs) -> anyhow::Result<SinadAnalyzer> {
    let mut settings = load_profile(args.profile.as_deref())?.analysis;

    if let Some(harmonics) = args.harmonics {
        settings.num_harmonics = harmonics;
    }
    if let Some(width) = args.bin_half_width {
        settings.bin_half_width = width;
    }
    if let Some(window) = args.window {
        settings.window = window.name().to_string();
    }

    Ok(settings.analyzer()?)
}

fn measure_file(
    analyzer: &SinadAnalyzer,
    path: &Path,
    channel: ChannelMode,
) -> anyhow::Result<FileReport> {
    let (samples, spec) = read_wav_with(path, channel)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let result = analyzer
        .analyze(&samples, spec.sample_rate)
        .with_context(|| format!("failed to measure '{}'", path.display()))?;

    tracing::info!(
        path = %path.display(),
        sinad_db = result.sinad_db,
        fundamental_hz = result.fundamental.refined_frequency,
        "measured"
    );

    Ok(FileReport::new(path, spec.sample_rate, samples.len(), &result))
}

/// Run the measure command.
pub fn run(args: MeasureArgs) -> anyhow::Result<()> {
    let analyzer = build_analyzer(&args)?;

    let pb = if args.inputs.len() > 1 {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("##-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<anyhow::Result<FileReport>> = args
        .inputs
        .par_iter()
        .map(|path| {
            let report = measure_file(&analyzer, path, args.channel);
            pb.inc(1);
            report
        })
        .collect();
    pb.finish_and_clear();

    let reports = results.into_iter().collect::<anyhow::Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            report.print();
        }
    }

    Ok(())
}

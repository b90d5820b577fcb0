//! sinad - measure SINAD of captured test tones and generate fixtures.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sinad")]
#[command(author, version, about = "SINAD measurement for captured test tones", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure SINAD of one or more WAV files
    Measure(commands::measure::MeasureArgs),

    /// Generate a test tone, optionally with noise for a target SINAD
    Generate(commands::generate::GenerateArgs),

    /// Show the strongest spectral bins of a WAV file
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Measure(args) => commands::measure::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}

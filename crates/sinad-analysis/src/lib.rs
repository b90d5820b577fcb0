//! SINAD Analysis - Signal-to-noise-and-distortion measurement for captured tones
//!
//! This crate turns a mono sample buffer and its sample rate into a SINAD
//! figure in dB, the usual dynamic-quality metric for an ADC or DAC path:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`signal`] - Validated sample buffer
//! - [`spectrum`] - Window-compensated magnitude and power spectrum
//! - [`fundamental`] - Peak detection with sub-bin interpolation
//! - [`band`] - Power aggregation around a bin
//! - [`harmonics`] - Harmonic projection and measurement
//! - [`noise`] - Smoothed noise-floor estimation
//! - [`sinad`] - The measurement pipeline
//! - [`generator`] - Test tones with noise scaled to a target SINAD
//!
//! ## Example Workflow
//!
//! ```rust
//! use sinad_analysis::{SinadAnalyzer, TestTone};
//!
//! // 1. Render a 1 kHz tone with noise for 12 dB SINAD
//! let tone = TestTone::new(44100, 1000.0, 1.0).with_target_sinad(12.0);
//! let samples = tone.render_seeded(42);
//!
//! // 2. Measure it
//! let result = SinadAnalyzer::new().analyze(&samples, 44100).unwrap();
//! assert!((result.sinad_db - 12.0).abs() < 1.0);
//! println!("SINAD: {:.2} dB ({:.1} ENOB)", result.sinad_db, result.enob());
//! ```
//!
//! ## Step-by-step
//!
//! ```rust,ignore
//! use sinad_analysis::{Signal, SpectrumBuilder, FundamentalDetector, HarmonicTracker, band_power};
//!
//! let signal = Signal::new(&samples, 48000)?;
//! let spectrum = SpectrumBuilder::new().build(&signal)?;
//! let fundamental = FundamentalDetector::new().detect(&spectrum);
//! let signal_power = band_power(&spectrum, fundamental.bin_index, 3);
//! let harmonics = HarmonicTracker::new(5, 3).track(&spectrum, fundamental.refined_frequency);
//! ```

pub mod band;
pub mod error;
pub mod fft;
pub mod fundamental;
pub mod generator;
pub mod harmonics;
pub mod noise;
pub mod signal;
pub mod sinad;
pub mod spectrum;

// Re-export main types
pub use band::{DEFAULT_BIN_HALF_WIDTH, band_power};
pub use error::{Result, SinadError};
pub use fft::{Fft, Window};
pub use fundamental::{DEFAULT_THRESHOLD_RATIO, FundamentalDetector, FundamentalEstimate};
pub use generator::TestTone;
pub use harmonics::{DEFAULT_NUM_HARMONICS, HarmonicEstimate, HarmonicTracker, harmonic_power};
pub use noise::{NoiseFloorEstimator, POWER_FLOOR, moving_average};
pub use signal::{MIN_SAMPLES, Signal};
pub use sinad::{SinadAnalyzer, SinadResult, compute_sinad};
pub use spectrum::{Spectrum, SpectrumBuilder};

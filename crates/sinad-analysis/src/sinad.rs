//! SINAD measurement pipeline.
//!
//! [`SinadAnalyzer`] runs the stages in a fixed order, each producing an
//! immutable value for the next:
//!
//! ```text
//! Signal ─► SpectrumBuilder ─► Spectrum ─┬─► FundamentalDetector ─► FundamentalEstimate
//!                                        ├─► band_power (fundamental)      ─► signal power
//!                                        ├─► HarmonicTracker               ─► harmonic power
//!                                        └─► NoiseFloorEstimator           ─► noise power
//! ```
//!
//! `SINAD = 10 · log10(signal / noise)`. Both powers are floored at
//! [`POWER_FLOOR`], so once the signal normalizes the result is finite.

use crate::band::{DEFAULT_BIN_HALF_WIDTH, band_power};
use crate::error::{Result, SinadError};
use crate::fft::Window;
use crate::fundamental::{DEFAULT_THRESHOLD_RATIO, FundamentalDetector, FundamentalEstimate};
use crate::harmonics::{DEFAULT_NUM_HARMONICS, HarmonicEstimate, HarmonicTracker, harmonic_power};
use crate::noise::{NoiseFloorEstimator, POWER_FLOOR};
use crate::signal::Signal;
use crate::spectrum::{Spectrum, SpectrumBuilder};

/// Result of a SINAD measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SinadResult {
    /// Power in the band around the fundamental (floored, always > 0).
    pub signal_power: f64,
    /// Summed power of the included harmonics.
    pub harmonic_power: f64,
    /// Residual noise + distortion power (floored, always > 0).
    pub noise_power: f64,
    /// Sum of the smoothed power spectrum.
    pub total_smoothed_power: f64,
    /// `10 · log10(signal_power / noise_power)`.
    pub sinad_db: f64,
    /// Detected fundamental.
    pub fundamental: FundamentalEstimate,
    /// Harmonics at or below Nyquist, in ascending order.
    pub harmonics: Vec<HarmonicEstimate>,
}

impl SinadResult {
    /// Effective number of bits, `(SINAD − 1.76) / 6.02`.
    pub fn enob(&self) -> f64 {
        (self.sinad_db - 1.76) / 6.02
    }

    /// Harmonic-to-signal ratio in dB, or `None` without harmonic power.
    pub fn thd_db(&self) -> Option<f64> {
        (self.harmonic_power > 0.0)
            .then(|| 10.0 * (self.harmonic_power / self.signal_power).log10())
    }
}

/// SINAD analyzer.
///
/// ```rust
/// use sinad_analysis::SinadAnalyzer;
/// use std::f64::consts::PI;
///
/// let samples: Vec<f64> = (0..44100)
///     .map(|i| (2.0 * PI * 1000.0 * i as f64 / 44100.0).sin())
///     .collect();
///
/// let result = SinadAnalyzer::new().analyze(&samples, 44100).unwrap();
/// assert!(result.sinad_db > 60.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SinadAnalyzer {
    window: Window,
    num_harmonics: usize,
    bin_half_width: usize,
    threshold_ratio: f64,
}

impl Default for SinadAnalyzer {
    fn default() -> Self {
        Self {
            window: Window::Hann,
            num_harmonics: DEFAULT_NUM_HARMONICS,
            bin_half_width: DEFAULT_BIN_HALF_WIDTH,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl SinadAnalyzer {
    /// Create an analyzer with a Hann window, 5 harmonics and a 3-bin half-width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest harmonic order (1 disables harmonic tracking).
    pub fn with_harmonics(mut self, num_harmonics: usize) -> Self {
        self.num_harmonics = num_harmonics;
        self
    }

    /// Set the band half-width in bins.
    pub fn with_bin_half_width(mut self, bin_half_width: usize) -> Self {
        self.bin_half_width = bin_half_width;
        self
    }

    /// Set the window function
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Set the fundamental peak threshold as a fraction of the spectral maximum.
    pub fn with_threshold_ratio(mut self, ratio: f64) -> Self {
        self.threshold_ratio = ratio;
        self
    }

    /// Highest harmonic order.
    pub fn num_harmonics(&self) -> usize {
        self.num_harmonics
    }

    /// Band half-width in bins.
    pub fn bin_half_width(&self) -> usize {
        self.bin_half_width
    }

    /// Window function.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Peak threshold ratio.
    pub fn threshold_ratio(&self) -> f64 {
        self.threshold_ratio
    }

    /// Check parameters that the types do not already constrain.
    pub fn validate(&self) -> Result<()> {
        if self.num_harmonics < 1 {
            return Err(SinadError::invalid("num_harmonics", "must be at least 1"));
        }
        if !(self.threshold_ratio > 0.0 && self.threshold_ratio <= 1.0) {
            return Err(SinadError::invalid(
                "threshold_ratio",
                format!("must be in (0, 1], got {}", self.threshold_ratio),
            ));
        }
        Ok(())
    }

    /// Build the window-compensated spectrum of `samples`.
    pub fn spectrum(&self, samples: &[f64], sample_rate: u32) -> Result<Spectrum> {
        let signal = Signal::new(samples, sample_rate)?;
        SpectrumBuilder::new().with_window(self.window).build(&signal)
    }

    /// Measure SINAD of a mono buffer.
    ///
    /// All parameter and buffer checks run before any spectral work.
    pub fn analyze(&self, samples: &[f64], sample_rate: u32) -> Result<SinadResult> {
        self.validate()?;
        let spectrum = self.spectrum(samples, sample_rate)?;
        Ok(self.analyze_spectrum(&spectrum))
    }

    /// Run the measurement stages on an already built spectrum.
    pub fn analyze_spectrum(&self, spectrum: &Spectrum) -> SinadResult {
        let fundamental = FundamentalDetector::new()
            .with_threshold_ratio(self.threshold_ratio)
            .detect(spectrum);

        let signal_power =
            band_power(spectrum, fundamental.bin_index, self.bin_half_width).max(POWER_FLOOR);

        let harmonics = HarmonicTracker::new(self.num_harmonics, self.bin_half_width)
            .track(spectrum, fundamental.refined_frequency);
        let harmonic_power = harmonic_power(&harmonics);

        let noise = NoiseFloorEstimator::new();
        let total_smoothed_power = noise.total_smoothed_power(spectrum);
        let noise_power = noise.residual(total_smoothed_power, signal_power, harmonic_power);

        let sinad_db = 10.0 * (signal_power / noise_power).log10();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            signal_power,
            harmonic_power,
            noise_power,
            sinad_db,
            "sinad computed"
        );

        SinadResult {
            signal_power,
            harmonic_power,
            noise_power,
            total_smoothed_power,
            sinad_db,
            fundamental,
            harmonics,
        }
    }
}

/// Measure SINAD with explicit harmonic count and band half-width.
///
/// Uses a Hann window and the default peak threshold.
pub fn compute_sinad(
    samples: &[f64],
    sample_rate: u32,
    num_harmonics: usize,
    bin_half_width: usize,
) -> Result<SinadResult> {
    SinadAnalyzer::new()
        .with_harmonics(num_harmonics)
        .with_bin_half_width(bin_half_width)
        .analyze(samples, sample_rate)
}

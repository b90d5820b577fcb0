//! Harmonic bin tracking.

use crate::band::band_power;
use crate::spectrum::Spectrum;

/// Default highest harmonic order considered (the fundamental is order 1).
pub const DEFAULT_NUM_HARMONICS: usize = 5;

/// Power measured around one harmonic of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicEstimate {
    /// Harmonic order, 2 or higher.
    pub order: usize,
    /// `order × refined fundamental` in Hz.
    pub expected_frequency: f64,
    /// Bin closest to `expected_frequency`.
    pub matched_bin_index: usize,
    /// Band power around `matched_bin_index`.
    pub power: f64,
}

/// Projects harmonics 2..=K from the refined fundamental and measures each.
///
/// Harmonics above Nyquist are excluded; there is no aliasing lookup.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicTracker {
    num_harmonics: usize,
    bin_half_width: usize,
}

impl Default for HarmonicTracker {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_HARMONICS, crate::band::DEFAULT_BIN_HALF_WIDTH)
    }
}

impl HarmonicTracker {
    /// Create a tracker for orders `2..=num_harmonics`.
    pub fn new(num_harmonics: usize, bin_half_width: usize) -> Self {
        Self {
            num_harmonics,
            bin_half_width,
        }
    }

    /// Highest harmonic order considered.
    pub fn num_harmonics(&self) -> usize {
        self.num_harmonics
    }

    /// Measure every harmonic at or below Nyquist, in ascending order.
    pub fn track(&self, spectrum: &Spectrum, refined_frequency: f64) -> Vec<HarmonicEstimate> {
        let nyquist = spectrum.nyquist();

        (2..=self.num_harmonics)
            .filter_map(|order| {
                let expected_frequency = refined_frequency * order as f64;
                if expected_frequency > nyquist {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(order, expected_frequency, nyquist, "harmonic above nyquist, skipped");
                    return None;
                }

                let matched_bin_index = spectrum.nearest_bin(expected_frequency);
                Some(HarmonicEstimate {
                    order,
                    expected_frequency,
                    matched_bin_index,
                    power: band_power(spectrum, matched_bin_index, self.bin_half_width),
                })
            })
            .collect()
    }
}

/// Total power of a set of harmonics.
pub fn harmonic_power(harmonics: &[HarmonicEstimate]) -> f64 {
    harmonics.iter().map(|h| h.power).sum()
}

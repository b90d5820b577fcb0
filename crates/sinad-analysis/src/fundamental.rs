//! Fundamental-frequency detection with sub-bin refinement.

use crate::spectrum::Spectrum;

/// Fraction of the global magnitude maximum a peak must exceed.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.1;

/// Location of the dominant tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalEstimate {
    /// Bin holding the detected peak, in `[0, N/2)`.
    pub bin_index: usize,
    /// Frequency of that bin in Hz.
    pub raw_frequency: f64,
    /// Interpolated frequency in Hz; may lie between bins.
    pub refined_frequency: f64,
}

/// Finds the lowest-frequency significant peak of a magnitude spectrum.
///
/// A bin qualifies when it is a local maximum (strictly above its left
/// neighbour, at least equal to its right one) and its magnitude exceeds
/// `threshold_ratio` times the global maximum. The first bin and the last bin
/// are never local maxima. With no qualifying bin the global maximum is used.
#[derive(Debug, Clone, Copy)]
pub struct FundamentalDetector {
    threshold_ratio: f64,
}

impl Default for FundamentalDetector {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl FundamentalDetector {
    /// Create a detector with the default 0.1 threshold ratio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the peak threshold as a fraction of the global maximum.
    pub fn with_threshold_ratio(mut self, ratio: f64) -> Self {
        self.threshold_ratio = ratio;
        self
    }

    /// The configured threshold ratio.
    pub fn threshold_ratio(&self) -> f64 {
        self.threshold_ratio
    }

    /// Detect and refine the fundamental.
    pub fn detect(&self, spectrum: &Spectrum) -> FundamentalEstimate {
        let mags = spectrum.magnitudes();
        let global_max = mags.iter().copied().fold(0.0_f64, f64::max);
        let threshold = self.threshold_ratio * global_max;

        let bin_index = (1..mags.len().saturating_sub(1))
            .find(|&i| mags[i] > threshold && mags[i] > mags[i - 1] && mags[i] >= mags[i + 1])
            .unwrap_or_else(|| spectrum.peak_bin());

        let raw_frequency = spectrum.frequencies()[bin_index];
        let refined_frequency = match interpolation_offset(mags, bin_index) {
            Some(offset) => raw_frequency + offset * spectrum.bin_spacing(),
            None => raw_frequency,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            bin_index,
            raw_frequency,
            refined_frequency,
            "fundamental detected"
        );

        FundamentalEstimate {
            bin_index,
            raw_frequency,
            refined_frequency,
        }
    }
}

/// Sub-bin offset of a peak from its two neighbours.
///
/// `(right − left) / (2 · (2·center − left − right))`. Returns `None` for the
/// first and last bin and for a flat top where the denominator vanishes.
fn interpolation_offset(mags: &[f64], bin: usize) -> Option<f64> {
    if bin == 0 || bin + 1 >= mags.len() {
        return None;
    }

    let left = mags[bin - 1];
    let center = mags[bin];
    let right = mags[bin + 1];
    let denom = 2.0 * (2.0 * center - left - right);
    if denom == 0.0 {
        return None;
    }

    Some((right - left) / denom)
}

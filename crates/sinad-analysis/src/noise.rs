//! Noise-floor estimation from a smoothed power spectrum.

use crate::spectrum::Spectrum;

/// Moving-average length used to smooth the power spectrum.
pub const DEFAULT_SMOOTHING_LEN: usize = 5;

/// Lower bound on estimated powers, keeping the final logarithm finite.
pub const POWER_FLOOR: f64 = 1e-12;

/// Centred moving average with the same length as the input.
///
/// Each output bin is the mean of the bins within `len / 2` of it; near the
/// edges the mean is taken over the bins that exist.
pub fn moving_average(values: &[f64], len: usize) -> Vec<f64> {
    let half = len / 2;
    let n = values.len();

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            values[start..end].iter().sum::<f64>() / (end - start) as f64
        })
        .collect()
}

/// Derives residual (noise + distortion) power from a spectrum.
#[derive(Debug, Clone, Copy)]
pub struct NoiseFloorEstimator {
    smoothing_len: usize,
    floor: f64,
}

impl Default for NoiseFloorEstimator {
    fn default() -> Self {
        Self {
            smoothing_len: DEFAULT_SMOOTHING_LEN,
            floor: POWER_FLOOR,
        }
    }
}

impl NoiseFloorEstimator {
    /// Create an estimator with a 5-bin moving average and a 1e-12 floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed copy of the spectrum's power sequence.
    pub fn smooth(&self, spectrum: &Spectrum) -> Vec<f64> {
        moving_average(spectrum.powers(), self.smoothing_len)
    }

    /// Total smoothed power of the spectrum.
    pub fn total_smoothed_power(&self, spectrum: &Spectrum) -> f64 {
        self.smooth(spectrum).iter().sum()
    }

    /// `max(total_smoothed − (signal + harmonic), floor)`.
    pub fn residual(&self, total_smoothed_power: f64, signal_power: f64, harmonic_power: f64) -> f64 {
        let residual = total_smoothed_power - (signal_power + harmonic_power);
        if residual < self.floor {
            #[cfg(feature = "tracing")]
            tracing::debug!(residual, floor = self.floor, "noise power clamped to floor");
            return self.floor;
        }
        residual
    }

    /// Noise power left after removing signal and harmonic power.
    pub fn estimate(&self, spectrum: &Spectrum, signal_power: f64, harmonic_power: f64) -> f64 {
        self.residual(self.total_smoothed_power(spectrum), signal_power, harmonic_power)
    }
}

//! Power aggregation over a band of bins.
//!
//! Spectral leakage spreads a tone over neighbouring bins even after
//! windowing, so a tone's power is the sum over `center ± half_width`.

use crate::spectrum::Spectrum;

/// Default half-width of the aggregation band, in bins.
pub const DEFAULT_BIN_HALF_WIDTH: usize = 3;

/// Sum of power over bins `[center − half_width, center + half_width]`.
///
/// The band is clipped to the spectrum; bins outside it are skipped rather
/// than treated as an error. A `center` past the end yields only the bins
/// that fall inside.
pub fn band_power(spectrum: &Spectrum, center: usize, half_width: usize) -> f64 {
    let powers = spectrum.powers();
    let start = center.saturating_sub(half_width);
    let end = center.saturating_add(half_width).saturating_add(1).min(powers.len());
    if start >= end {
        return 0.0;
    }
    powers[start..end].iter().sum()
}

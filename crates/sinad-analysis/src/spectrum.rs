//! Window-compensated one-sided spectrum.
//!
//! [`SpectrumBuilder`] turns a [`Signal`] into an immutable [`Spectrum`]:
//!
//! 1. normalize by the peak absolute sample,
//! 2. apply the window,
//! 3. take the magnitude of bins `0..N/2` of an `N`-point FFT,
//! 4. scale power as `|X[k]|² / (c · N)` where `c = Σ w² / N`.
//!
//! The `c` correction restores the energy the window removes; without it
//! every downstream power figure would be biased low by the same factor.

use crate::error::{Result, SinadError};
use crate::fft::{Fft, Window};
use crate::signal::Signal;

/// One-sided magnitude and power spectrum of a [`Signal`].
///
/// Bin `k` sits at `k · sample_rate / N`. Shared read-only by every later
/// pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    powers: Vec<f64>,
    sample_rate: u32,
    fft_size: usize,
}

impl Spectrum {
    /// Assemble a spectrum from magnitudes and the window energy gain.
    pub(crate) fn from_magnitudes(
        magnitudes: Vec<f64>,
        sample_rate: u32,
        fft_size: usize,
        window_gain: f64,
    ) -> Self {
        let bin_spacing = sample_rate as f64 / fft_size as f64;
        let scale = window_gain * fft_size as f64;
        let frequencies = (0..magnitudes.len())
            .map(|k| k as f64 * bin_spacing)
            .collect();
        let powers = magnitudes.iter().map(|m| m * m / scale).collect();

        Self {
            frequencies,
            magnitudes,
            powers,
            sample_rate,
            fft_size,
        }
    }

    /// Bin center frequencies in Hz, strictly increasing.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Linear bin magnitudes.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Window-compensated bin powers.
    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    /// Number of bins (`N / 2`).
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Transform length `N`.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Sample rate of the analysed signal in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Distance between adjacent bins in Hz.
    pub fn bin_spacing(&self) -> f64 {
        self.sample_rate as f64 / self.fft_size as f64
    }

    /// Half the sample rate in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Sum of all bin powers.
    pub fn total_power(&self) -> f64 {
        self.powers.iter().sum()
    }

    /// Index of the largest magnitude (first one on ties).
    pub fn peak_bin(&self) -> usize {
        let mut best = 0;
        for (i, &mag) in self.magnitudes.iter().enumerate() {
            if mag > self.magnitudes[best] {
                best = i;
            }
        }
        best
    }

    /// Index of the bin whose frequency is closest to `freq`.
    ///
    /// Ties go to the lower bin. Frequencies outside the spectrum map to the
    /// first or last bin.
    pub fn nearest_bin(&self, freq: f64) -> usize {
        let last = self.len().saturating_sub(1);
        let position = freq / self.bin_spacing();
        if position.is_nan() || position <= 0.0 {
            return 0;
        }

        let lower = (position.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let lower_dist = (self.frequencies[lower] - freq).abs();
        let upper_dist = (self.frequencies[upper] - freq).abs();
        if upper_dist < lower_dist { upper } else { lower }
    }
}

/// Builds a [`Spectrum`] from a [`Signal`] using a fixed window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumBuilder {
    window: Window,
}

impl SpectrumBuilder {
    /// Create a builder with the default Hann window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window function
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// The configured window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Normalize, window and transform `signal`.
    ///
    /// Fails with [`SinadError::DegenerateSignal`] when every sample is zero.
    pub fn build(&self, signal: &Signal<'_>) -> Result<Spectrum> {
        let peak = signal.peak();
        if peak == 0.0 {
            return Err(SinadError::DegenerateSignal);
        }

        let fft = Fft::new(signal.len());
        let n = fft.size();
        let mut windowed: Vec<f64> = signal.samples().iter().map(|s| s / peak).collect();
        self.window.apply(&mut windowed);

        let bins = fft.forward(&windowed);
        let magnitudes: Vec<f64> = bins.iter().take(n / 2).map(|c| c.norm()).collect();

        Ok(Spectrum::from_magnitudes(
            magnitudes,
            signal.sample_rate(),
            n,
            self.window.energy_gain(n),
        ))
    }
}

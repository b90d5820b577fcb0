//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Hann window (raised cosine)
    #[default]
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman-Harris window (better sidelobe suppression)
    BlackmanHarris,
}

impl Window {
    /// Window value at position `i` of an `n`-point periodic window.
    fn value(&self, i: usize, n: usize) -> f64 {
        let x = 2.0 * PI * i as f64 / n as f64;
        match self {
            Window::Rectangular => 1.0,
            Window::Hann => 0.5 * (1.0 - x.cos()),
            Window::Hamming => 0.54 - 0.46 * x.cos(),
            Window::BlackmanHarris => {
                0.35875 - 0.48829 * x.cos() + 0.14128 * (2.0 * x).cos()
                    - 0.01168 * (3.0 * x).cos()
            }
        }
    }

    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f64]) {
        if *self == Window::Rectangular {
            return;
        }
        let n = buffer.len();
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.value(i, n);
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        (0..size).map(|i| self.value(i, size)).collect()
    }

    /// Mean squared window value, `Σ w[i]² / n`.
    ///
    /// Windowing scales the energy of a broadband signal by this factor, so
    /// dividing a power spectrum by it restores the unwindowed level.
    /// Returns 0.0 for an empty window.
    pub fn energy_gain(&self, size: usize) -> f64 {
        if size == 0 {
            return 0.0;
        }
        let sum_sq: f64 = (0..size).map(|i| self.value(i, size).powi(2)).sum();
        sum_sq / size as f64
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Rectangular => "rectangular",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::BlackmanHarris => "blackman-harris",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Ok(Window::Rectangular),
            "hann" | "hanning" => Ok(Window::Hann),
            "hamming" => Ok(Window::Hamming),
            "blackman-harris" | "blackmanharris" => Ok(Window::BlackmanHarris),
            other => Err(format!(
                "unknown window '{other}' (expected rectangular, hann, hamming or blackman-harris)"
            )),
        }
    }
}

/// Planned forward FFT of a fixed size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input
    ///
    /// Returns complex spectrum (size/2 + 1 bins for positive frequencies)
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .collect();

        // Pad or truncate to FFT size
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hann() {
        let mut buffer = vec![1.0; 100];
        Window::Hann.apply(&mut buffer);

        // Hann window should be 0 at edges, 1 at center
        assert!(buffer[0] < 0.01);
        assert!(buffer[99] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_energy_gain() {
        // Periodic Hann: mean of w² is exactly 3/8
        assert!((Window::Hann.energy_gain(1024) - 0.375).abs() < 1e-12);
        assert_eq!(Window::Rectangular.energy_gain(64), 1.0);
        assert_eq!(Window::Hann.energy_gain(0), 0.0);
    }

    #[test]
    fn test_coefficients_match_apply() {
        let coeffs = Window::BlackmanHarris.coefficients(32);
        let mut ones = vec![1.0; 32];
        Window::BlackmanHarris.apply(&mut ones);
        assert_eq!(coeffs, ones);
    }

    #[test]
    fn test_window_names_parse() {
        for window in [
            Window::Rectangular,
            Window::Hann,
            Window::Hamming,
            Window::BlackmanHarris,
        ] {
            assert_eq!(window.name().parse::<Window>(), Ok(window));
        }
        assert_eq!("Hanning".parse::<Window>(), Ok(Window::Hann));
        assert!("kaiser".parse::<Window>().is_err());
    }

    #[test]
    fn test_dc_detection() {
        let fft = Fft::new(256);

        let input = vec![1.0; 256];
        let spectrum = fft.forward(&input);

        assert_eq!(spectrum.len(), 129);
        let dc_mag = spectrum[0].norm();
        let other_mag: f64 = spectrum[1..].iter().map(|c| c.norm()).sum();
        assert!(dc_mag > other_mag * 10.0);
    }

    #[test]
    fn test_non_power_of_two_size() {
        // 441 points at 44.1 kHz gives 100 Hz bins; a 1 kHz tone lands on bin 10
        let fft = Fft::new(441);
        assert_eq!(fft.size(), 441);
        let input: Vec<f64> = (0..441)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / 44100.0).sin())
            .collect();
        let spectrum = fft.forward(&input);
        assert_eq!(spectrum.len(), 441 / 2 + 1);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(10));
    }
}

//! Test-tone fixtures with noise scaled to a target SINAD.
//!
//! The noise scale follows `k = sqrt(Ps / (10^(S/10) · Pn))`, where `Ps` and
//! `Pn` are the mean-square powers of the rendered tone and of the raw
//! Gaussian noise draw, so the mixture has SINAD `S` by construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

/// Sine tone, optionally mixed with white Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestTone {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Peak amplitude of the tone before noise and normalization.
    pub amplitude: f64,
    /// SINAD the added noise should produce, in dB. `None` renders a clean tone.
    pub target_sinad_db: Option<f64>,
    /// Rescale the output so its peak absolute value is 1.
    pub normalize: bool,
}

impl Default for TestTone {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            frequency: 1000.0,
            duration_secs: 5.0,
            amplitude: 1.0,
            target_sinad_db: None,
            normalize: true,
        }
    }
}

impl TestTone {
    /// Create a clean tone.
    pub fn new(sample_rate: u32, frequency: f64, duration_secs: f64) -> Self {
        Self {
            sample_rate,
            frequency,
            duration_secs,
            ..Self::default()
        }
    }

    /// Set the tone amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Add noise for the given SINAD in dB.
    pub fn with_target_sinad(mut self, sinad_db: f64) -> Self {
        self.target_sinad_db = Some(sinad_db);
        self
    }

    /// Enable or disable peak normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Number of samples rendered.
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).max(0.0) as usize
    }

    /// Render the tone, drawing noise from `rng`.
    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let fs = self.sample_rate as f64;
        let mut samples: Vec<f64> = (0..self.num_samples())
            .map(|i| self.amplitude * (2.0 * PI * self.frequency * i as f64 / fs).sin())
            .collect();

        if let Some(target_db) = self.target_sinad_db {
            let noise: Vec<f64> = (0..samples.len())
                .map(|_| -> f64 { StandardNormal.sample(rng) })
                .collect();
            let k = noise_scale(&samples, &noise, target_db);
            for (s, n) in samples.iter_mut().zip(&noise) {
                *s += k * n;
            }
        }

        if self.normalize {
            normalize_peak(&mut samples);
        }
        samples
    }

    /// Render with a seeded generator for reproducible fixtures.
    pub fn render_seeded(&self, seed: u64) -> Vec<f64> {
        self.render(&mut StdRng::seed_from_u64(seed))
    }
}

/// Noise gain giving `target_db` of tone power over noise power.
///
/// Returns 0.0 when either buffer has no power.
pub fn noise_scale(signal: &[f64], noise: &[f64], target_db: f64) -> f64 {
    let signal_power = mean_square(signal);
    let noise_power = mean_square(noise);
    if signal_power == 0.0 || noise_power == 0.0 {
        return 0.0;
    }
    (signal_power / (10.0_f64.powf(target_db / 10.0) * noise_power)).sqrt()
}

fn mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64
}

/// Divide by the peak absolute value; silent buffers are left alone.
pub fn normalize_peak(samples: &mut [f64]) {
    let peak = samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}

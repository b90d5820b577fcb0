//! Validated mono sample buffer.

use crate::error::{Result, SinadError};

/// Smallest buffer accepted for measurement.
///
/// Two samples give a one-bin one-sided spectrum; a single sample gives none.
pub const MIN_SAMPLES: usize = 2;

/// A borrowed, single-channel sample buffer with its sample rate.
///
/// Construction validates the buffer, so every `Signal` is non-empty, finite
/// and has a positive sample rate. Channel reduction happens before this point.
#[derive(Debug, Clone, Copy)]
pub struct Signal<'a> {
    samples: &'a [f64],
    sample_rate: u32,
}

impl<'a> Signal<'a> {
    /// Validate a sample buffer.
    ///
    /// Checks run in order: sample rate, emptiness, length, finiteness.
    pub fn new(samples: &'a [f64], sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SinadError::invalid("sample_rate", "must be greater than 0 Hz"));
        }
        if samples.is_empty() {
            return Err(SinadError::EmptySignal);
        }
        if samples.len() < MIN_SAMPLES {
            return Err(SinadError::SignalTooShort {
                len: samples.len(),
                min: MIN_SAMPLES,
            });
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(SinadError::NonFiniteSample { index });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// The samples.
    pub fn samples(&self) -> &'a [f64] {
        self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Maximum absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }
}

//! Error types for SINAD measurement.

use thiserror::Error;

/// Errors raised before any spectral work begins.
///
/// Once a [`Signal`](crate::Signal) has been normalized, every later numerical
/// hazard is handled locally (clamp, skip, or fallback) and never surfaces here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinadError {
    /// The input buffer has zero length.
    #[error("signal is empty")]
    EmptySignal,

    /// The input buffer is too short to produce a usable one-sided spectrum.
    #[error("signal has {len} samples, at least {min} are required")]
    SignalTooShort {
        /// Number of samples supplied.
        len: usize,
        /// Minimum number of samples accepted.
        min: usize,
    },

    /// A sample is NaN or infinite.
    #[error("sample {index} is not finite")]
    NonFiniteSample {
        /// Position of the first offending sample.
        index: usize,
    },

    /// The maximum absolute sample value is zero, so amplitude normalization
    /// is undefined.
    #[error("signal is silent (peak amplitude is zero)")]
    DegenerateSignal,

    /// A measurement parameter is out of range.
    #[error("invalid configuration for '{parameter}': {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SinadError {
    /// Create an invalid configuration error.
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        SinadError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for SINAD measurement.
pub type Result<T> = std::result::Result<T, SinadError>;

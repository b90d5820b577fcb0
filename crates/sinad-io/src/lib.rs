//! Audio file I/O for SINAD measurement.
//!
//! This crate provides:
//!
//! - **WAV reading**: [`read_wav`] decodes to `f64` in `[-1, 1]` and mixes down
//!   to mono; [`read_wav_with`] selects a [`ChannelMode`] instead
//! - **WAV writing**: [`write_wav`] and [`write_wav_interleaved`]
//! - **Metadata**: [`read_wav_info`] reads the header only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sinad_io::{read_wav, write_wav, WavSpec};
//!
//! let (samples, spec) = read_wav("capture.wav")?;
//! let result = sinad_analysis::SinadAnalyzer::new().analyze(&samples, spec.sample_rate)?;
//! println!("SINAD: {:.2} dB", result.sinad_db);
//! ```

mod wav;

pub use wav::{
    ChannelMode, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_with, write_wav,
    write_wav_interleaved,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested channel does not exist in the file.
    #[error("channel {channel} out of range (file has {channels} channels)")]
    ChannelOutOfRange {
        /// Requested zero-based channel.
        channel: u16,
        /// Channels present in the file.
        channels: u16,
    },

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

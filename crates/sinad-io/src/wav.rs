//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / spec.channels as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16, 24 or 32; 32 is written as float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// How a multi-channel file is reduced to the single channel measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Average all channels.
    #[default]
    Mix,
    /// Take one zero-based channel.
    Channel(u16),
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelMode::Mix => f.write_str("mix"),
            ChannelMode::Channel(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for ChannelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mix" | "mono" => Ok(ChannelMode::Mix),
            "left" => Ok(ChannelMode::Channel(0)),
            "right" => Ok(ChannelMode::Channel(1)),
            other => other
                .parse::<u16>()
                .map(ChannelMode::Channel)
                .map_err(|_| format!("invalid channel '{s}' (expected 'mix' or a channel index)")),
        }
    }
}

/// Decode every sample of a reader to `f64` in `[-1, 1]`, interleaved.
fn decode_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<f64>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "{}-bit integer PCM",
                    spec.bits_per_sample
                )));
            }
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file as mono `f64` samples along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("capture.wav")?;
/// println!("Loaded {} samples at {} Hz", samples.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, WavSpec)> {
    read_wav_with(path, ChannelMode::Mix)
}

/// Read a WAV file and reduce it to one channel with `mode`.
pub fn read_wav_with<P: AsRef<Path>>(path: P, mode: ChannelMode) -> Result<(Vec<f64>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels.max(1) as usize;

    if let ChannelMode::Channel(channel) = mode
        && channel >= spec.channels
    {
        return Err(Error::ChannelOutOfRange {
            channel,
            channels: spec.channels,
        });
    }

    let samples = decode_samples(reader)?;

    let mono = match mode {
        _ if channels == 1 => samples,
        ChannelMode::Mix => samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect(),
        ChannelMode::Channel(channel) => samples
            .chunks(channels)
            .filter_map(|frame| frame.get(channel as usize).copied())
            .collect(),
    };

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = mono.len(),
        mode = %mode,
        "decoded wav"
    );

    Ok((mono, spec))
}

/// Write mono samples to a WAV file.
///
/// `spec.channels` is forced to 1. 32-bit output is IEEE float; other depths
/// are integer PCM scaled by `2^(bits-1) - 1` and truncated toward zero.
/// Samples are clamped to `[-1, 1]` first.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f64; 44100]; // 1 second of silence
/// write_wav("output.wav", &samples, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], spec: WavSpec) -> Result<()> {
    let mono_spec = WavSpec { channels: 1, ..spec };
    write_wav_interleaved(path, samples, mono_spec)
}

/// Write interleaved samples for `spec.channels` channels.
pub fn write_wav_interleaved<P: AsRef<Path>>(
    path: P,
    samples: &[f64],
    spec: WavSpec,
) -> Result<()> {
    if !matches!(spec.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (expected 8, 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }

    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample.clamp(-1.0, 1.0) as f32)?;
        }
    } else {
        let max_val = ((1i32 << (spec.bits_per_sample - 1)) - 1) as f64;
        for &sample in samples {
            writer.write_sample((sample.clamp(-1.0, 1.0) * max_val) as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 / 1000.0).sin()).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded.len(), samples.len());

        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_i16_truncates_toward_zero() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[1.0, -1.0, 0.5, -0.5, 2.0], WavSpec::default()).unwrap();

        let raw: Vec<i16> = WavReader::open(file.path())
            .unwrap()
            .into_samples::<i16>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        // 0.5 * 32767 = 16383.5 truncates to 16383; 2.0 clamps to full scale
        assert_eq!(raw, vec![32767, -32767, 16383, -16383, 32767]);
    }

    #[test]
    fn test_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 12,
            ..WavSpec::default()
        };
        let err = write_wav(file.path(), &[0.0], spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_channel_mode_parse() {
        assert_eq!("mix".parse::<ChannelMode>(), Ok(ChannelMode::Mix));
        assert_eq!("right".parse::<ChannelMode>(), Ok(ChannelMode::Channel(1)));
        assert_eq!("3".parse::<ChannelMode>(), Ok(ChannelMode::Channel(3)));
        assert!("centre".parse::<ChannelMode>().is_err());
        assert_eq!(ChannelMode::Channel(2).to_string(), "2");
    }
}

//! Measurement profile file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sinad_analysis::{
    DEFAULT_BIN_HALF_WIDTH, DEFAULT_NUM_HARMONICS, DEFAULT_THRESHOLD_RATIO, SinadAnalyzer,
    TestTone, Window,
};

use crate::error::ConfigError;

/// Bit depths the WAV writer accepts.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// A named set of analysis and generator settings.
///
/// Every section and field falls back to its default when absent, so an
/// empty file is a valid profile.
///
/// # TOML Format
///
/// ```toml
/// name = "bench"
/// description = "ADC bench capture"
///
/// [analysis]
/// num_harmonics = 5
/// bin_half_width = 3
/// window = "hann"
/// threshold_ratio = 0.1
///
/// [generator]
/// sample_rate = 44100
/// frequency = 1000.0
/// duration_secs = 5.0
/// amplitude = 1.0
/// target_sinad_db = 12.0
/// bits_per_sample = 16
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Name of the profile.
    pub name: String,

    /// Optional description of the profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Measurement settings.
    pub analysis: AnalysisSettings,

    /// Test-tone settings.
    pub generator: GeneratorSettings,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("default")
    }
}

impl Profile {
    /// Create a profile with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            analysis: AnalysisSettings::default(),
            generator: GeneratorSettings::default(),
        }
    }

    /// Create a profile with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Load a profile from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a profile from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let profile: Profile = toml::from_str(toml_str)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Save the profile to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the profile to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check both sections for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.generator.validate()
    }
}

/// Settings for [`SinadAnalyzer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Highest harmonic order tracked (1 = fundamental only).
    pub num_harmonics: usize,
    /// Bins on each side of a peak summed into its power.
    pub bin_half_width: usize,
    /// Window name (`hann`, `hamming`, `blackman-harris`, `rectangular`).
    pub window: String,
    /// Fraction of the spectral peak a bin must reach to count as a candidate.
    pub threshold_ratio: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            num_harmonics: DEFAULT_NUM_HARMONICS,
            bin_half_width: DEFAULT_BIN_HALF_WIDTH,
            window: Window::default().name().to_string(),
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl AnalysisSettings {
    /// Parse the configured window name.
    pub fn window(&self) -> Result<Window, ConfigError> {
        self.window
            .parse()
            .map_err(|e: String| ConfigError::invalid("analysis.window", e))
    }

    /// Check the settings for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_harmonics == 0 {
            return Err(ConfigError::invalid(
                "analysis.num_harmonics",
                "must be at least 1",
            ));
        }
        if !(self.threshold_ratio > 0.0 && self.threshold_ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "analysis.threshold_ratio",
                format!("{} is outside (0, 1]", self.threshold_ratio),
            ));
        }
        self.window().map(|_| ())
    }

    /// Build the analyzer these settings describe.
    pub fn analyzer(&self) -> Result<SinadAnalyzer, ConfigError> {
        self.validate()?;
        Ok(SinadAnalyzer::new()
            .with_harmonics(self.num_harmonics)
            .with_bin_half_width(self.bin_half_width)
            .with_window(self.window()?)
            .with_threshold_ratio(self.threshold_ratio))
    }
}

/// Settings for [`TestTone`] and the file it is written to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Tone amplitude before noise and normalization.
    pub amplitude: f64,
    /// SINAD the added noise should produce; no noise when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sinad_db: Option<f64>,
    /// Output bit depth (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let tone = TestTone::default();
        Self {
            sample_rate: tone.sample_rate,
            frequency: tone.frequency,
            duration_secs: tone.duration_secs,
            amplitude: tone.amplitude,
            target_sinad_db: tone.target_sinad_db,
            bits_per_sample: 16,
        }
    }
}

impl GeneratorSettings {
    /// Check the settings for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid(
                "generator.sample_rate",
                "must be positive",
            ));
        }
        let nyquist = f64::from(self.sample_rate) / 2.0;
        if !(self.frequency > 0.0 && self.frequency < nyquist) {
            return Err(ConfigError::invalid(
                "generator.frequency",
                format!("{} Hz is outside (0, {nyquist}) Hz", self.frequency),
            ));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(ConfigError::invalid(
                "generator.duration_secs",
                "must be a positive number of seconds",
            ));
        }
        if !(self.amplitude.is_finite() && self.amplitude > 0.0) {
            return Err(ConfigError::invalid(
                "generator.amplitude",
                "must be positive",
            ));
        }
        if let Some(target) = self.target_sinad_db
            && !target.is_finite()
        {
            return Err(ConfigError::invalid(
                "generator.target_sinad_db",
                "must be finite",
            ));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(ConfigError::invalid(
                "generator.bits_per_sample",
                format!(
                    "{} is not one of {SUPPORTED_BIT_DEPTHS:?}",
                    self.bits_per_sample
                ),
            ));
        }
        Ok(())
    }

    /// Build the tone these settings describe.
    pub fn tone(&self) -> TestTone {
        let tone = TestTone::new(self.sample_rate, self.frequency, self.duration_secs)
            .with_amplitude(self.amplitude);
        match self.target_sinad_db {
            Some(target) => tone.with_target_sinad(target),
            None => tone,
        }
    }
}

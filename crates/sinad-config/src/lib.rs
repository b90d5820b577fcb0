//! Measurement profiles for SINAD analysis.
//!
//! A [`Profile`] is a TOML file holding the settings for a measurement run
//! ([`AnalysisSettings`]) and for rendering a test tone ([`GeneratorSettings`]).
//!
//! # Features
//!
//! - **Profiles**: Load, save and validate TOML profiles
//! - **Conversion**: Turn settings into a [`sinad_analysis::SinadAnalyzer`] or
//!   [`sinad_analysis::TestTone`]
//! - **Paths**: Platform-specific config directory and profile lookup
//!
//! # Example
//!
//! ```rust,no_run
//! use sinad_config::{Profile, default_profile_path};
//!
//! let profile = Profile::load(default_profile_path()).unwrap();
//! let analyzer = profile.analysis.analyzer().unwrap();
//! let samples = profile.generator.tone().render_seeded(1);
//! let result = analyzer.analyze(&samples, profile.generator.sample_rate).unwrap();
//! println!("SINAD: {:.2} dB", result.sinad_db);
//! ```

mod error;
mod profile;

/// Platform-specific paths for profiles and configuration.
pub mod paths;

pub use error::ConfigError;
pub use paths::{default_profile_path, find_profile, user_config_dir, user_profiles_dir};
pub use profile::{AnalysisSettings, GeneratorSettings, Profile, SUPPORTED_BIT_DEPTHS};

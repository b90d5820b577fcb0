//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use sinad_config::{ConfigError, Profile, default_profile_path, find_profile};

/// Load the measurement profile for a run.
///
/// With a name or path, the profile must exist. Without one, the default
/// profile is used when present and built-in defaults otherwise.
pub fn load_profile(name: Option<&str>) -> anyhow::Result<Profile> {
    if let Some(name) = name {
        let path = find_profile(name).ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
        tracing::info!(path = %path.display(), "loading profile");
        return Profile::load(&path)
            .with_context(|| format!("failed to load profile '{}'", path.display()));
    }

    let default_path = default_profile_path();
    if default_path.is_file() {
        tracing::info!(path = %default_path.display(), "loading default profile");
        return Profile::load(&default_path)
            .with_context(|| format!("failed to load profile '{}'", default_path.display()));
    }

    Ok(Profile::default())
}

/// Power in dB, floored for empty bins.
pub fn power_db(power: f64) -> f64 {
    if power > 0.0 {
        10.0 * power.log10()
    } else {
        -200.0
    }
}

//! Platform-specific paths for measurement profiles.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/sinad/` (Linux), `~/Library/Application Support/sinad/` (macOS), `%APPDATA%\sinad\` (Windows)
//! - **Profiles**: `<user config>/profiles/`
//! - **Default profile**: `<user config>/profile.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use sinad_config::paths;
//!
//! if let Some(path) = paths::find_profile("bench") {
//!     println!("Found profile at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "sinad";

/// Subdirectory name for named profiles.
const PROFILES_SUBDIR: &str = "profiles";

/// File name of the profile loaded when none is given.
const DEFAULT_PROFILE_FILE: &str = "profile.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the directory holding named profiles.
pub fn user_profiles_dir() -> PathBuf {
    user_config_dir().join(PROFILES_SUBDIR)
}

/// Returns the path of the default profile, `<user config>/profile.toml`.
pub fn default_profile_path() -> PathBuf {
    user_config_dir().join(DEFAULT_PROFILE_FILE)
}

/// Find a profile file by name or path.
///
/// Searches in the following order:
/// 1. The name as a path, if it is an existing file
/// 2. The user profiles directory (`.toml` appended when missing)
pub fn find_profile(name: &str) -> Option<PathBuf> {
    find_profile_in(name, &user_profiles_dir())
}

fn find_profile_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

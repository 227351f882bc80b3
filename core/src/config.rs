//! Configuration management (`splitscreen.toml`)
//!
//! Settings are read once at startup and stay immutable for the lifetime of
//! the controller. The file lives in the platform-specific config directory
//! and uses a single `[splitscreen]` section:
//!
//! ```toml
//! [splitscreen]
//! split_threshold = 1000.0
//! merge_threshold = 800.0
//! force_always_split = false
//! default_layout = "Automatic"
//! follow_rate = 5.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_FOLLOW_RATE;
use crate::error::ConfigError;
use crate::layout::LayoutPreference;

/// File name of the config inside the config directory
pub const CONFIG_FILE_NAME: &str = "splitscreen.toml";

/// Top-level config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Split-screen behavior
    #[serde(default)]
    pub splitscreen: SplitScreenConfig,
}

/// Split-screen settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitScreenConfig {
    /// Distance above which the view splits (default: 1000)
    #[serde(default = "default_split_threshold")]
    pub split_threshold: f32,
    /// Distance below which a split view merges again; should be below
    /// `split_threshold` (default: 800)
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: f32,
    /// Always split, regardless of distance (default: false)
    #[serde(default)]
    pub force_always_split: bool,
    /// Preferred layout when split (default: Automatic)
    #[serde(default)]
    pub default_layout: LayoutPreference,
    /// How quickly pane cameras catch up with their player, per second (default: 5)
    #[serde(default = "default_follow_rate")]
    pub follow_rate: f32,
}

fn default_split_threshold() -> f32 {
    1000.0
}
fn default_merge_threshold() -> f32 {
    800.0
}
fn default_follow_rate() -> f32 {
    DEFAULT_FOLLOW_RATE
}

impl Default for SplitScreenConfig {
    fn default() -> Self {
        Self {
            split_threshold: default_split_threshold(),
            merge_threshold: default_merge_threshold(),
            force_always_split: false,
            default_layout: LayoutPreference::default(),
            follow_rate: default_follow_rate(),
        }
    }
}

impl SplitScreenConfig {
    /// Check the settings for values that will misbehave at runtime.
    ///
    /// Returns one message per problem. Values are never corrected: a merge
    /// threshold at or above the split threshold simply inverts the
    /// hysteresis band.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, value) in [
            ("split_threshold", self.split_threshold),
            ("merge_threshold", self.merge_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                warnings.push(format!("{name} should be a non-negative number (got {value})"));
            }
        }

        if self.merge_threshold >= self.split_threshold {
            warnings.push(format!(
                "merge_threshold ({}) should be less than split_threshold ({}); \
                 views may flicker between split and merged",
                self.merge_threshold, self.split_threshold
            ));
        }

        if !self.follow_rate.is_finite() || self.follow_rate <= 0.0 {
            warnings.push(format!(
                "follow_rate should be positive (got {}); pane cameras will not move",
                self.follow_rate
            ));
        }

        warnings
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\SplitScreen\config`
/// On macOS: `~/Library/Application Support/rs.splitscreen.SplitScreen`
/// On Linux: `~/.config/SplitScreen`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("rs.splitscreen", "", "SplitScreen")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) else {
        return Config::default();
    };

    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Io { .. }) => Config::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
            Config::default()
        }
    }
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the configuration to a specific file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(io_err)
}

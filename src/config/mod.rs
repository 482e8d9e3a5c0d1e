//! Configuration system for charcount
//!
//! Loads settings from ~/.config/charcount/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Budget used when nothing is configured
pub const DEFAULT_MAX: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
}

/// Input field settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    /// Weighted character budget (default: 10)
    pub max: usize,
    /// Log every filter decision at debug level (default: false)
    pub debug_filter: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            debug_filter: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Get the config file path
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("charcount").join("config.toml"))
}

/// Get the default config template with documentation
fn default_config_template() -> &'static str {
    r#"# charcount configuration
# Every ASCII character counts 0.5, everything else counts 1.
# Emoji outside the BMP count 2 (one per UTF-16 unit).

[input]
# max = 10              # Weighted character budget
# debug_filter = false  # Log filter decisions (run with RUST_LOG=debug)
"#
}

/// Ensure config directory and template file exist
fn ensure_config_exists() {
    let Some(path) = config_path() else {
        return;
    };

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    if !path.exists() {
        if let Err(e) = std::fs::write(&path, default_config_template()) {
            log::debug!("could not write config template to {}: {}", path.display(), e);
        }
    }
}

/// Load settings from a specific file
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml_str(&content)
}

/// Load settings from the config file
/// Returns default settings if the file doesn't exist or can't be parsed
pub fn load_config() -> Settings {
    // Ensure config file exists (creates template if not)
    ensure_config_exists();

    let Some(path) = config_path() else {
        return Settings::default();
    };

    if !path.exists() {
        return Settings::default();
    }

    match load_config_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Settings::default()
        }
    }
}

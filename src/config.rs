//! Engine and batch configuration.
//!
//! Configuration is a single optional TOML file. Stock defaults are the base
//! layer and the user file is merged on top, so a file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Sizes resolved by `respsize batch`, one output per entry.
//! sizes = [320, 640, 1280]
//!
//! [engine]
//! default_function = "contain"  # Used when a size names no function
//! max_steps = 64                # Upper bound on scaling steps per size
//! separator = "X"               # Splits "WxH" strings: "50X25"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sizing::RawSizeSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Construction-time settings of a [`SizeEngine`](crate::sizing::SizeEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Function used when a size names none, and in place of unknown names.
    pub default_function: String,
    /// Maximum number of scaling steps one calculation may run.
    pub max_steps: usize,
    /// Separator between width and height in pair strings.
    pub separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_function: "contain".to_string(),
            max_steps: 64,
            separator: 'X',
        }
    }
}

/// Characters the dimension grammar itself uses.
const RESERVED: &str = "0123456789.xpc%";

impl EngineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::Validation(
                "engine.max_steps must be at least 1".into(),
            ));
        }
        if self.default_function.is_empty() {
            return Err(ConfigError::Validation(
                "engine.default_function must not be empty".into(),
            ));
        }
        if RESERVED.contains(self.separator) || self.separator.is_whitespace() {
            return Err(ConfigError::Validation(format!(
                "engine.separator '{}' clashes with the dimension syntax",
                self.separator
            )));
        }
        Ok(())
    }
}

/// Whole config file: engine settings plus the sizes to resolve per asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizesConfig {
    /// Sizes resolved by the `batch` command.
    pub sizes: Vec<RawSizeSpec>,
    pub engine: EngineConfig,
}

impl Default for SizesConfig {
    fn default() -> Self {
        Self {
            sizes: vec![320u32.into(), 640u32.into(), 1280u32.into()],
            engine: EngineConfig::default(),
        }
    }
}

impl SizesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation("sizes must not be empty".into()));
        }
        self.engine.validate()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SizesConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SizesConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SizesConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, merged over stock defaults.
///
/// A missing file is an error; pass `None` to
/// [`load_config_or_default`] for the stock config.
pub fn load_config(path: &Path) -> Result<SizesConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

pub fn load_config_or_default(path: Option<&Path>) -> Result<SizesConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => resolve_config(stock_defaults_value()?, None),
    }
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# respsize configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Sizes
# ---------------------------------------------------------------------------
# Sizes resolved per asset by `respsize batch`. Each entry is one of:
#   320                      width in pixels (also "320px")
#   "50%"                    width relative to the source ("0.5x", "50pc")
#   "640X480"                width and height, uppercase X in between
#   { width = "0.5x", height = "0.25x", function = "cover" }
# The function is one of 'contain', 'cover', 'exact', 'check', or a chain
# such as ["check", "exact"].
sizes = [320, 640, 1280]

# ---------------------------------------------------------------------------
# Engine
# ---------------------------------------------------------------------------
[engine]
# Size function used when none is named, and in place of unknown names.
default_function = "contain"

# Maximum scaling steps per size before giving up.
max_steps = 64

# Separator between width and height in "WxH" strings.
separator = "X"
"##
}

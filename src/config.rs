//! Conversion options and the persisted config file
//!
//! The config file lives at `~/.flac2mp3` and holds a YAML mapping with any of
//! `silent`, `delete` and `encoding`. Options given for a single call override
//! the file, and the file overrides the built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Name of the per-user config file in the home directory
pub const CONFIG_FILE: &str = ".flac2mp3";

/// Encoder arguments used when neither the call nor the config sets any
pub const DEFAULT_ENCODING: &str = "--preset standard";

/// Options that may be set per call or in the config file.
///
/// `None` means "not given here" and falls through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Remove the source file after a successful conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    /// Suppress output of the external tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
    /// Encoder arguments, e.g. `--preset fast standard`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl ConversionOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Fully resolved options for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub delete: bool,
    pub silent: bool,
    pub encoding: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&ConversionOptions::default(), &ConversionOptions::default())
    }
}

impl Settings {
    /// Merge per-call options over the loaded config over the defaults
    pub fn resolve(config: &ConversionOptions, options: &ConversionOptions) -> Self {
        Self {
            delete: options.delete.or(config.delete).unwrap_or(false),
            silent: options.silent.or(config.silent).unwrap_or(false),
            encoding: options
                .encoding
                .clone()
                .or_else(|| config.encoding.clone())
                .unwrap_or_else(|| DEFAULT_ENCODING.to_string()),
        }
    }

    /// Encoder arguments as separate words
    pub fn encoding_args(&self) -> Vec<String> {
        self.encoding.split_whitespace().map(str::to_string).collect()
    }
}

/// Path of the per-user config file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

/// Load the per-user config file, or an empty config if there is none
pub fn load_config() -> Result<ConversionOptions> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            log::debug!("No home directory, using empty config");
            Ok(ConversionOptions::default())
        }
    }
}

/// Load a config file from `path`.
///
/// A missing file is an empty config. A file that exists but cannot be parsed
/// is an error.
pub fn load_config_from(path: &Path) -> Result<ConversionOptions> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config file at {:?}", path);
            return Ok(ConversionOptions::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = parse_config(&contents).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })?;
    log::debug!("Loaded config from {:?}: {:?}", path, config);
    Ok(config)
}

/// Parse config file contents.
///
/// Keys are canonicalized before use, so `silent`, `SILENT` and the
/// symbol-style `:silent` all name the same option.
pub fn parse_config(contents: &str) -> std::result::Result<ConversionOptions, String> {
    if contents.trim().is_empty() {
        return Ok(ConversionOptions::default());
    }

    let raw: Option<BTreeMap<String, Value>> =
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))?;
    let Some(raw) = raw else {
        return Ok(ConversionOptions::default());
    };

    let mut canonical = serde_yaml::Mapping::new();
    for (key, value) in raw {
        let key = canonical_key(&key);
        match key.as_str() {
            "delete" | "silent" | "encoding" => {
                canonical.insert(Value::String(key), value);
            }
            _ => log::debug!("Ignoring unknown config key: {}", key),
        }
    }

    serde_yaml::from_value(Value::Mapping(canonical))
        .map_err(|e| format!("Invalid config value: {}", e))
}

fn canonical_key(key: &str) -> String {
    key.trim().trim_start_matches(':').to_lowercase()
}

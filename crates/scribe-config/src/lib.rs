//! Scribe configuration system
//!
//! Loads pipeline settings from `scribe.toml`, with environment variables
//! taking precedence over file values.

use std::path::{Path, PathBuf};

use serde::de::{DeserializeOwned, IntoDeserializer, value::StrDeserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use scribe_text::{
    ParagraphOptions, Pipeline, PipelineConfig, ReorderOptions, ShapingOptions,
};

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "scribe.toml";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure for Scribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScribeConfig {
    /// Letter and digit shaping
    pub shaping: ShapingOptions,
    /// Base direction and nesting policy
    pub paragraph: ParagraphOptions,
    /// Output mirroring and control removal
    pub reorder: ReorderOptions,
}

impl ScribeConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from `scribe.toml` in the current directory, or
    /// return the defaults if it is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source, keyed by environment
    /// variable name. Unparseable values are logged and skipped.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Shaping settings
        override_enum(&lookup, "SCRIBE_LETTERS", &mut self.shaping.letters);
        override_enum(&lookup, "SCRIBE_DIGITS", &mut self.shaping.digits);
        override_enum(
            &lookup,
            "SCRIBE_DIGIT_CONVERSION",
            &mut self.shaping.digit_conversion,
        );
        override_enum(
            &lookup,
            "SCRIBE_TEXT_DIRECTION",
            &mut self.shaping.direction_assumption,
        );

        // Paragraph settings
        override_enum(
            &lookup,
            "SCRIBE_PARAGRAPH_DIRECTION",
            &mut self.paragraph.direction,
        );
        override_bool(
            &lookup,
            "SCRIBE_STRICT_NESTING",
            &mut self.paragraph.strict_nesting,
        );

        // Reorder settings
        override_bool(&lookup, "SCRIBE_MIRRORING", &mut self.reorder.mirroring);
        override_bool(
            &lookup,
            "SCRIBE_REMOVE_CONTROLS",
            &mut self.reorder.remove_controls,
        );
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from scribe.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        debug!(?config, "loaded scribe configuration");
        config
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            shaping: self.shaping,
            paragraph: self.paragraph,
            reorder: self.reorder,
        }
    }

    /// Build a pipeline from this configuration.
    pub fn pipeline(&self) -> scribe_text::Result<Pipeline> {
        Pipeline::new(self.pipeline_config())
    }
}

impl From<PipelineConfig> for ScribeConfig {
    fn from(config: PipelineConfig) -> Self {
        Self {
            shaping: config.shaping,
            paragraph: config.paragraph,
            reorder: config.reorder,
        }
    }
}

fn parse_enum<T: DeserializeOwned>(value: &str) -> Option<T> {
    let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
    let deserializer: StrDeserializer<'_, serde::de::value::Error> =
        normalized.as_str().into_deserializer();
    T::deserialize(deserializer).ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no")
    {
        Some(false)
    } else {
        None
    }
}

fn override_enum<T, F>(lookup: &F, name: &str, target: &mut T)
where
    T: DeserializeOwned,
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(name) {
        match parse_enum(&value) {
            Some(parsed) => *target = parsed,
            None => warn!(variable = name, value = %value, "ignoring unrecognized value"),
        }
    }
}

fn override_bool<F>(lookup: &F, name: &str, target: &mut bool)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(name) {
        match parse_bool(&value) {
            Some(parsed) => *target = parsed,
            None => warn!(variable = name, value = %value, "ignoring unrecognized value"),
        }
    }
}

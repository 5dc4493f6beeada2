//! Source readers: environment, `.env` files and config documents.
//!
//! Each reader yields a flat map from setting key to raw value. Text-level
//! parsing is delegated to `dotenvy`, `serde_json` and `toml`.

use crate::config::schema::{Schema, SettingName};
use crate::config::value::RawValue;
use crate::errors::ConfigError;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Setting key (snake_case) -> raw value.
pub type SourceMap = BTreeMap<String, RawValue>;

/// Environment lookup: values from an explicit `.env` file win over the
/// process environment. Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file_values: HashMap<String, String>,
    process_values: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the process environment, layered under `file_values`.
    pub fn from_process(file_values: HashMap<String, String>) -> Self {
        let process_values = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self {
            file_values,
            process_values,
        }
    }

    /// Process environment layered under an optional `.env` file.
    ///
    /// A `.env` file that cannot be read is logged and ignored.
    pub fn with_env_file(path: Option<&Path>) -> Self {
        let file_values = match path.map(load_env_file) {
            Some(Ok(values)) => values,
            Some(Err(e)) => {
                warn!(
                    event = "core.config.source_unavailable",
                    error = %e,
                    "Env file unavailable, continuing with the process environment"
                );
                HashMap::new()
            }
            None => HashMap::new(),
        };
        Self::from_process(file_values)
    }

    pub fn from_maps(
        file_values: HashMap<String, String>,
        process_values: HashMap<String, String>,
    ) -> Self {
        Self {
            file_values,
            process_values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        [&self.file_values, &self.process_values]
            .into_iter()
            .filter_map(|values| values.get(key))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    /// Collect every environment-settable key of `schema` that has a value.
    pub fn source_map<N: SettingName>(&self, schema: &Schema<N>) -> SourceMap {
        schema
            .settings
            .iter()
            .filter(|spec| spec.from_env)
            .filter_map(|spec| {
                let value = self.get(&schema.env_key(spec.name))?;
                Some((spec.name.key().to_string(), RawValue::from(value)))
            })
            .collect()
    }
}

/// Read `KEY=VALUE` pairs from a `.env` file.
///
/// Lines `dotenvy` cannot parse are skipped with a warning.
///
/// # Errors
///
/// Returns `ConfigError::SourceUnavailable` when the file cannot be opened.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigError::SourceUnavailable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut values = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => {
                warn!(
                    event = "core.config.env_file_line_skipped",
                    path = %path.display(),
                    error = %e
                );
            }
        }
    }

    debug!(
        event = "core.config.env_file_loaded",
        path = %path.display(),
        keys = values.len()
    );
    Ok(values)
}

/// Config document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse a config document into a flat source map.
///
/// The top level must be an object/table; nested values are kept as
/// `RawValue::Unsupported` and rejected only if a setting reads them.
///
/// # Errors
///
/// Returns `ConfigError::ConfigParseError` for invalid syntax or a
/// non-object top level.
pub fn parse_config_document(
    path: &Path,
    text: &str,
    format: ConfigFormat,
) -> Result<SourceMap, ConfigError> {
    let parse_error = |message: String| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message,
    };

    match format {
        ConfigFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            let serde_json::Value::Object(object) = value else {
                return Err(parse_error("config must be a JSON object".to_string()));
            };
            Ok(object
                .into_iter()
                .map(|(k, v)| (k, RawValue::from(v)))
                .collect())
        }
        ConfigFormat::Toml => {
            let table: toml::Table =
                toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            Ok(table
                .into_iter()
                .map(|(k, v)| (k, RawValue::from(v)))
                .collect())
        }
    }
}

/// Loads a config document from wherever config documents live.
pub trait ConfigLoader {
    /// # Errors
    ///
    /// `ConfigError::SourceUnavailable` when the document cannot be read;
    /// `ConfigError::ConfigParseError` when it cannot be parsed.
    fn load(&self, path: &Path) -> Result<SourceMap, ConfigError>;
}

/// Reads config documents from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsConfigLoader;

impl ConfigLoader for FsConfigLoader {
    fn load(&self, path: &Path) -> Result<SourceMap, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::SourceUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_config_document(path, &text, ConfigFormat::from_path(path))
    }
}

//! The full resolution phase: defaults, CLI, environment, config file.

use crate::config::merge::apply_source;
use crate::config::provenance::compute_provenance;
use crate::config::record::{Origin, SettingsRecord};
use crate::config::schema::{Schema, SettingName};
use crate::config::sources::{ConfigLoader, EnvSource};
use crate::config::value::{RawValue, SettingValue, coerce};
use crate::errors::ConfigError;
use tracing::{debug, info, warn};

/// What the argument parser saw for one invocation.
#[derive(Debug, Clone)]
pub struct Invocation<N> {
    /// Raw argument tokens, without the program name.
    pub tokens: Vec<String>,
    /// Values the parser produced for options present on the command line.
    pub values: Vec<(N, SettingValue)>,
    /// Whether the primary positional argument was given.
    pub positional_supplied: bool,
}

impl<N> Invocation<N> {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            values: Vec::new(),
            positional_supplied: false,
        }
    }

    pub fn with_value(mut self, name: N, value: SettingValue) -> Self {
        self.values.push((name, value));
        self
    }

    pub fn with_positional(mut self, name: N, value: SettingValue) -> Self {
        self.values.push((name, value));
        self.positional_supplied = true;
        self
    }
}

impl<N: SettingName> Invocation<N> {
    /// Build an invocation from what the argument parser saw.
    ///
    /// `typed` returns a setting's raw value only when it was given on the
    /// command line. Values go through the same coercion as every other
    /// source; an empty typed value still counts as explicit but sets nothing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigValueError` for a typed value that does
    /// not fit its setting.
    pub fn from_parsed<F>(
        schema: &Schema<N>,
        tokens: Vec<String>,
        mut typed: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(N) -> Option<RawValue>,
    {
        let mut invocation = Self::new(tokens);
        for spec in schema.settings {
            let Some(raw) = typed(spec.name) else {
                continue;
            };
            let positional = schema.positional == Some(spec.name);
            if positional {
                invocation.positional_supplied = true;
            }
            if raw.is_absent() {
                continue;
            }
            let value = coerce(spec.name.key(), spec.kind(), &raw)?;
            invocation.values.push((spec.name, value));
        }
        Ok(invocation)
    }
}

/// Resolve every setting of `schema` with precedence
/// CLI > environment > config file > default.
///
/// The config-file path is itself a setting and is resolved (CLI > env) before
/// the file is read. A config file that cannot be read is logged and skipped.
///
/// # Errors
///
/// Returns `ConfigError::ConfigValueError` for a present value that does not
/// fit its setting, and `ConfigError::ConfigParseError` for a config document
/// that exists but cannot be parsed.
pub fn resolve<N: SettingName>(
    schema: &Schema<N>,
    invocation: &Invocation<N>,
    env: &EnvSource,
    loader: &dyn ConfigLoader,
) -> Result<SettingsRecord<N>, ConfigError> {
    let provenance = compute_provenance(invocation.tokens.as_slice())
        .with_positional(invocation.positional_supplied);
    let mut record = SettingsRecord::from_schema(schema);

    for (name, value) in &invocation.values {
        record.set(*name, value.clone(), Origin::Cli)?;
    }

    let env_map = env.source_map(schema);
    let from_env = apply_source(schema, &mut record, &env_map, &provenance, Origin::Env)?;

    let config_path = match schema.config_path {
        Some(name) => record.path(name)?,
        None => None,
    };

    let mut from_file = 0;
    if let Some(path) = config_path {
        match loader.load(&path) {
            Ok(file_map) => {
                for key in file_map.keys() {
                    if schema.lookup_key(key).is_none() {
                        debug!(
                            event = "core.config.unknown_key_ignored",
                            tool = schema.tool,
                            key = key.as_str()
                        );
                    }
                }
                from_file =
                    apply_source(schema, &mut record, &file_map, &provenance, Origin::File)?;
            }
            Err(e @ ConfigError::SourceUnavailable { .. }) => {
                warn!(
                    event = "core.config.source_unavailable",
                    tool = schema.tool,
                    path = %path.display(),
                    error = %e,
                    "Config file unavailable, continuing without it"
                );
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        event = "core.config.resolved",
        tool = schema.tool,
        explicit = invocation.values.len(),
        from_env = from_env,
        from_file = from_file
    );

    Ok(record)
}

//! Applying one source map onto a settings record.

use crate::config::provenance::Provenance;
use crate::config::record::{Origin, SettingsRecord};
use crate::config::schema::{Schema, SettingName};
use crate::config::sources::SourceMap;
use crate::config::value::coerce;
use crate::errors::ConfigError;
use tracing::debug;

/// Apply `source` onto `record` as the given `origin`.
///
/// A setting is left untouched when it was typed on the command line, when a
/// higher-priority source already set it, when the schema does not allow this
/// origin to supply it, or when the source has no (or an empty) value for it.
/// Sources are applied highest priority first, so each later call only fills
/// what is still at its default.
///
/// Returns the number of settings that were overwritten.
///
/// # Errors
///
/// Returns `ConfigError::ConfigValueError` when a present value cannot be
/// coerced to its setting's kind. Nothing is silently dropped.
pub fn apply_source<N: SettingName>(
    schema: &Schema<N>,
    record: &mut SettingsRecord<N>,
    source: &SourceMap,
    provenance: &Provenance,
    origin: Origin,
) -> Result<usize, ConfigError> {
    let mut applied = 0;

    for spec in schema.settings {
        let name = spec.name;

        let allowed = match origin {
            Origin::Env => spec.from_env,
            Origin::File => spec.from_file,
            Origin::Cli | Origin::Default => false,
        };
        if !allowed || provenance.is_explicit(schema, name) {
            continue;
        }
        if record.origin(name).is_some_and(|current| current > origin) {
            continue;
        }
        let Some(raw) = source.get(name.key()) else {
            continue;
        };
        if raw.is_absent() {
            continue;
        }

        let value = coerce(name.key(), spec.kind(), raw)?;
        debug!(
            event = "core.config.setting_applied",
            tool = schema.tool,
            setting = name.key(),
            origin = origin.as_str()
        );
        record.set(name, value, origin)?;
        applied += 1;
    }

    Ok(applied)
}

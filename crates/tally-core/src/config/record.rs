use crate::config::schema::{Schema, SettingName};
use crate::config::value::SettingValue;
use crate::errors::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where the current value of a setting came from.
///
/// Variants are ordered by priority, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Default,
    File,
    Env,
    Cli,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Default => "default",
            Origin::File => "file",
            Origin::Env => "env",
            Origin::Cli => "cli",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingEntry {
    pub value: SettingValue,
    pub default: SettingValue,
    pub origin: Origin,
}

/// Current value, default and origin of every setting in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRecord<N> {
    entries: BTreeMap<N, SettingEntry>,
}

impl<N: SettingName> SettingsRecord<N> {
    /// A record holding every setting at its built-in default.
    pub fn from_schema(schema: &Schema<N>) -> Self {
        let entries = schema
            .settings
            .iter()
            .map(|spec| {
                let default = spec.default.to_value();
                let entry = SettingEntry {
                    value: default.clone(),
                    default,
                    origin: Origin::Default,
                };
                (spec.name, entry)
            })
            .collect();
        Self { entries }
    }

    pub fn entry(&self, name: N) -> Option<&SettingEntry> {
        self.entries.get(&name)
    }

    pub fn get(&self, name: N) -> Option<&SettingValue> {
        self.entries.get(&name).map(|entry| &entry.value)
    }

    pub fn origin(&self, name: N) -> Option<Origin> {
        self.entries.get(&name).map(|entry| entry.origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = (N, &SettingEntry)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    /// Overwrite a value. The kind must match the schema's declaration.
    pub(crate) fn set(
        &mut self,
        name: N,
        value: SettingValue,
        origin: Origin,
    ) -> Result<(), ConfigError> {
        let Some(entry) = self.entries.get_mut(&name) else {
            return Err(ConfigError::ValidationError {
                setting: name.key(),
                message: "setting is not declared in the schema".to_string(),
            });
        };
        if entry.default.kind() != value.kind() {
            return Err(ConfigError::KindMismatch {
                setting: name.key(),
                expected: entry.default.kind().as_str(),
                found: value.kind().as_str(),
            });
        }
        entry.value = value;
        entry.origin = origin;
        Ok(())
    }

    fn value_or_mismatch(
        &self,
        name: N,
        expected: &'static str,
    ) -> Result<&SettingValue, ConfigError> {
        self.get(name).ok_or(ConfigError::KindMismatch {
            setting: name.key(),
            expected,
            found: "missing",
        })
    }

    fn mismatch(name: N, expected: &'static str, found: &SettingValue) -> ConfigError {
        ConfigError::KindMismatch {
            setting: name.key(),
            expected,
            found: found.kind().as_str(),
        }
    }

    pub fn bool(&self, name: N) -> Result<bool, ConfigError> {
        let value = self.value_or_mismatch(name, "boolean")?;
        value
            .as_bool()
            .ok_or_else(|| Self::mismatch(name, "boolean", value))
    }

    pub fn int(&self, name: N) -> Result<i64, ConfigError> {
        let value = self.value_or_mismatch(name, "integer")?;
        value
            .as_int()
            .ok_or_else(|| Self::mismatch(name, "integer", value))
    }

    pub fn float(&self, name: N) -> Result<f64, ConfigError> {
        let value = self.value_or_mismatch(name, "float")?;
        value
            .as_float()
            .ok_or_else(|| Self::mismatch(name, "float", value))
    }

    pub fn string(&self, name: N) -> Result<String, ConfigError> {
        let value = self.value_or_mismatch(name, "string")?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::mismatch(name, "string", value))
    }

    pub fn path(&self, name: N) -> Result<Option<PathBuf>, ConfigError> {
        let value = self.value_or_mismatch(name, "path")?;
        value
            .as_path()
            .map(|p| p.map(PathBuf::from))
            .ok_or_else(|| Self::mismatch(name, "path", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::tests::{DEMO_SCHEMA, Demo};

    #[test]
    fn test_record_starts_at_defaults() {
        let record = SettingsRecord::from_schema(&DEMO_SCHEMA);
        assert_eq!(record.int(Demo::Top).unwrap(), 10);
        assert_eq!(record.string(Demo::Mode).unwrap(), "file");
        assert_eq!(record.path(Demo::Config).unwrap(), None);
        assert_eq!(record.path(Demo::Directory).unwrap(), Some(PathBuf::from(".")));
        assert!(record.iter().all(|(_, entry)| entry.origin == Origin::Default));
    }

    #[test]
    fn test_set_records_origin() {
        let mut record = SettingsRecord::from_schema(&DEMO_SCHEMA);
        record.set(Demo::Top, SettingValue::Int(3), Origin::Cli).unwrap();
        let entry = record.entry(Demo::Top).unwrap();
        assert_eq!(entry.value, SettingValue::Int(3));
        assert_eq!(entry.default, SettingValue::Int(10));
        assert_eq!(entry.origin, Origin::Cli);
    }

    #[test]
    fn test_set_rejects_kind_mismatch() {
        let mut record = SettingsRecord::from_schema(&DEMO_SCHEMA);
        let err = record
            .set(Demo::Top, SettingValue::Bool(true), Origin::Env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::KindMismatch { setting: "top", .. }));
    }

    #[test]
    fn test_typed_getter_mismatch() {
        let record = SettingsRecord::from_schema(&DEMO_SCHEMA);
        assert!(record.bool(Demo::Top).is_err());
        assert!(record.int(Demo::Json).is_err());
    }

    #[test]
    fn test_origin_priority_order() {
        assert!(Origin::Cli > Origin::Env);
        assert!(Origin::Env > Origin::File);
        assert!(Origin::File > Origin::Default);
    }
}

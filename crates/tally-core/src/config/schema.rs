//! Declarative setting schemas.
//!
//! A tool describes its settings once, as a static [`Schema`] table over a
//! typed [`SettingName`] enum. The merge engine, the environment reader and
//! the provenance check all derive flag names, environment keys and config
//! keys from that table, so no tool carries its own precedence code.

use crate::config::value::SettingValue;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;

/// Declared kind of a setting, used to coerce raw source values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Bool,
    Int,
    Float,
    Str,
    Path,
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Bool => "boolean",
            SettingKind::Int => "integer",
            SettingKind::Float => "float",
            SettingKind::Str => "string",
            SettingKind::Path => "path",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in default, expressible in a `static` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
    Path(Option<&'static str>),
}

impl DefaultValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            DefaultValue::Bool(_) => SettingKind::Bool,
            DefaultValue::Int(_) => SettingKind::Int,
            DefaultValue::Float(_) => SettingKind::Float,
            DefaultValue::Str(_) => SettingKind::Str,
            DefaultValue::Path(_) => SettingKind::Path,
        }
    }

    pub fn to_value(self) -> SettingValue {
        match self {
            DefaultValue::Bool(b) => SettingValue::Bool(b),
            DefaultValue::Int(i) => SettingValue::Int(i),
            DefaultValue::Float(x) => SettingValue::Float(x),
            DefaultValue::Str(s) => SettingValue::Str(s.to_string()),
            DefaultValue::Path(p) => SettingValue::Path(p.map(PathBuf::from)),
        }
    }
}

/// A typed setting identifier.
///
/// Implemented by one enum per tool. `key` is the snake_case name used in
/// config files; the CLI flag and the environment key are derived from it.
pub trait SettingName: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    fn key(self) -> &'static str;
}

/// One row of a schema table.
#[derive(Debug, Clone, Copy)]
pub struct SettingSpec<N> {
    pub name: N,
    pub default: DefaultValue,
    /// Whether the environment may supply this setting.
    pub from_env: bool,
    /// Whether a config file may supply this setting.
    pub from_file: bool,
}

impl<N: Copy> SettingSpec<N> {
    pub const fn new(name: N, default: DefaultValue) -> Self {
        Self {
            name,
            default,
            from_env: true,
            from_file: true,
        }
    }

    /// Only the command line may set this (e.g. the `.env` path itself).
    pub const fn cli_only(self) -> Self {
        Self {
            name: self.name,
            default: self.default,
            from_env: false,
            from_file: false,
        }
    }

    /// CLI or environment only (e.g. the config-file path).
    pub const fn not_in_file(self) -> Self {
        Self {
            name: self.name,
            default: self.default,
            from_env: self.from_env,
            from_file: false,
        }
    }

    pub fn kind(&self) -> SettingKind {
        self.default.kind()
    }
}

/// Declarative schema for one tool.
#[derive(Debug)]
pub struct Schema<N: 'static> {
    /// Tool name, used in log events.
    pub tool: &'static str,
    /// Prefix of environment keys, e.g. `DIRSCAN`.
    pub env_prefix: &'static str,
    /// The primary positional argument, tracked by parse-time presence.
    pub positional: Option<N>,
    /// The setting that holds the config-file path.
    pub config_path: Option<N>,
    pub settings: &'static [SettingSpec<N>],
}

impl<N: SettingName> Schema<N> {
    pub fn spec(&self, name: N) -> Option<&SettingSpec<N>> {
        self.settings.iter().find(|spec| spec.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = N> + '_ {
        self.settings.iter().map(|spec| spec.name)
    }

    /// `min_size` -> `--min-size`
    pub fn flag(&self, name: N) -> String {
        format!("--{}", name.key().replace('_', "-"))
    }

    /// `min_size` -> `DIRSCAN_MIN_SIZE`
    pub fn env_key(&self, name: N) -> String {
        format!("{}_{}", self.env_prefix, name.key().to_ascii_uppercase())
    }

    pub fn lookup_key(&self, key: &str) -> Option<N> {
        self.names().find(|name| name.key() == key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small schema shared by the config module tests.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub(crate) enum Demo {
        Directory,
        Top,
        MinSize,
        Json,
        Timeout,
        Mode,
        Config,
        EnvFile,
    }

    impl SettingName for Demo {
        fn key(self) -> &'static str {
            match self {
                Demo::Directory => "directory",
                Demo::Top => "top",
                Demo::MinSize => "min_size",
                Demo::Json => "json",
                Demo::Timeout => "timeout",
                Demo::Mode => "mode",
                Demo::Config => "config",
                Demo::EnvFile => "env_file",
            }
        }
    }

    pub(crate) static DEMO_SCHEMA: Schema<Demo> = Schema {
        tool: "demo",
        env_prefix: "DEMO",
        positional: Some(Demo::Directory),
        config_path: Some(Demo::Config),
        settings: &[
            SettingSpec::new(Demo::Directory, DefaultValue::Path(Some("."))),
            SettingSpec::new(Demo::Top, DefaultValue::Int(10)),
            SettingSpec::new(Demo::MinSize, DefaultValue::Int(0)),
            SettingSpec::new(Demo::Json, DefaultValue::Bool(false)),
            SettingSpec::new(Demo::Timeout, DefaultValue::Float(10.0)),
            SettingSpec::new(Demo::Mode, DefaultValue::Str("file")),
            SettingSpec::new(Demo::Config, DefaultValue::Path(None)).not_in_file(),
            SettingSpec::new(Demo::EnvFile, DefaultValue::Path(None)).cli_only(),
        ],
    };

    #[test]
    fn test_flag_and_env_key_derivation() {
        assert_eq!(DEMO_SCHEMA.flag(Demo::MinSize), "--min-size");
        assert_eq!(DEMO_SCHEMA.env_key(Demo::MinSize), "DEMO_MIN_SIZE");
        assert_eq!(DEMO_SCHEMA.flag(Demo::EnvFile), "--env-file");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(DEMO_SCHEMA.lookup_key("min_size"), Some(Demo::MinSize));
    }

    #[test]
    fn test_spec_modifiers() {
        let config = DEMO_SCHEMA.spec(Demo::Config).unwrap();
        assert!(config.from_env);
        assert!(!config.from_file);

        let env_file = DEMO_SCHEMA.spec(Demo::EnvFile).unwrap();
        assert!(!env_file.from_env);
        assert!(!env_file.from_file);

        assert_eq!(DEMO_SCHEMA.spec(Demo::Timeout).unwrap().kind(), SettingKind::Float);
    }
}

//! Raw and resolved setting values, and the coercion between them.

use crate::config::schema::SettingKind;
use crate::errors::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const TRUTHY: [&str; 5] = ["1", "true", "yes", "y", "on"];
const FALSEY: [&str; 5] = ["0", "false", "no", "n", "off"];

/// A primitive value as handed over by a source reader.
///
/// Environment lookups always produce `Text`; config documents can carry
/// native booleans and numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Null,
    /// Arrays, tables and other shapes no setting kind accepts.
    Unsupported(String),
}

impl RawValue {
    /// Empty strings and nulls count as "not supplied" for every source.
    pub fn is_absent(&self) -> bool {
        match self {
            RawValue::Text(s) => s.is_empty(),
            RawValue::Null => true,
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Int(i) => write!(f, "{i}"),
            RawValue::Float(x) => write!(f, "{x}"),
            RawValue::Null => write!(f, "null"),
            RawValue::Unsupported(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => n
                    .as_f64()
                    .map(RawValue::Float)
                    .unwrap_or_else(|| RawValue::Unsupported(n.to_string())),
            },
            Value::String(s) => RawValue::Text(s),
            other => RawValue::Unsupported(other.to_string()),
        }
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => RawValue::Text(s),
            Value::Integer(i) => RawValue::Int(i),
            Value::Float(x) => RawValue::Float(x),
            Value::Boolean(b) => RawValue::Bool(b),
            other => RawValue::Unsupported(other.to_string()),
        }
    }
}

/// A resolved, kind-checked setting value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(Option<PathBuf>),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Str(_) => SettingKind::Str,
            SettingValue::Path(_) => SettingKind::Path,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// `Some(None)` means a path setting that is unset.
    pub fn as_path(&self) -> Option<Option<&Path>> {
        match self {
            SettingValue::Path(p) => Some(p.as_deref()),
            _ => None,
        }
    }
}

/// Parse a boolean from the fixed truthy/falsey vocabulary (case-insensitive).
pub fn parse_bool(raw: &str) -> Option<bool> {
    let normalized = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&normalized.as_str()) {
        Some(true)
    } else if FALSEY.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Coerce a raw source value into the declared kind of `setting`.
///
/// # Errors
///
/// Returns `ConfigError::ConfigValueError` naming the setting and the raw
/// value when the value cannot represent the kind.
pub fn coerce(
    setting: &'static str,
    kind: SettingKind,
    raw: &RawValue,
) -> Result<SettingValue, ConfigError> {
    let invalid = |reason: &str| ConfigError::ConfigValueError {
        setting,
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    match (kind, raw) {
        (SettingKind::Bool, RawValue::Bool(b)) => Ok(SettingValue::Bool(*b)),
        (SettingKind::Bool, RawValue::Int(0)) => Ok(SettingValue::Bool(false)),
        (SettingKind::Bool, RawValue::Int(1)) => Ok(SettingValue::Bool(true)),
        (SettingKind::Bool, RawValue::Text(s)) => parse_bool(s)
            .map(SettingValue::Bool)
            .ok_or_else(|| invalid("expected one of 1/true/yes/y/on or 0/false/no/n/off")),
        (SettingKind::Bool, _) => Err(invalid("expected a boolean")),

        (SettingKind::Int, RawValue::Int(i)) => Ok(SettingValue::Int(*i)),
        // `as` saturates, so out-of-range whole floats must fall through.
        (SettingKind::Int, RawValue::Float(x))
            if x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64 =>
        {
            Ok(SettingValue::Int(*x as i64))
        }
        (SettingKind::Int, RawValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(SettingValue::Int)
            .map_err(|e| invalid(&format!("expected an integer: {e}"))),
        (SettingKind::Int, _) => Err(invalid("expected an integer")),

        (SettingKind::Float, RawValue::Float(x)) => Ok(SettingValue::Float(*x)),
        (SettingKind::Float, RawValue::Int(i)) => Ok(SettingValue::Float(*i as f64)),
        (SettingKind::Float, RawValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(SettingValue::Float)
            .map_err(|e| invalid(&format!("expected a number: {e}"))),
        (SettingKind::Float, _) => Err(invalid("expected a number")),

        (SettingKind::Str, RawValue::Text(s)) => Ok(SettingValue::Str(s.clone())),
        (SettingKind::Str, RawValue::Bool(_) | RawValue::Int(_) | RawValue::Float(_)) => {
            Ok(SettingValue::Str(raw.to_string()))
        }
        (SettingKind::Str, _) => Err(invalid("expected a string")),

        (SettingKind::Path, RawValue::Text(s)) => Ok(SettingValue::Path(Some(expand_tilde(s)))),
        (SettingKind::Path, _) => Err(invalid("expected a path string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy_and_falsey() {
        for raw in ["1", "true", "YES", "y", "On", " true "] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "false", "No", "n", "OFF"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_coerce_bool_rejects_unknown_words() {
        let err = coerce("json", SettingKind::Bool, &RawValue::from("maybe")).unwrap_err();
        match err {
            ConfigError::ConfigValueError { setting, raw, .. } => {
                assert_eq!(setting, "json");
                assert_eq!(raw, "maybe");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_coerce_int_from_text_and_float() {
        assert_eq!(
            coerce("top", SettingKind::Int, &RawValue::from(" 7 ")).unwrap(),
            SettingValue::Int(7)
        );
        assert_eq!(
            coerce("top", SettingKind::Int, &RawValue::Float(3.0)).unwrap(),
            SettingValue::Int(3)
        );
        assert!(coerce("top", SettingKind::Int, &RawValue::Float(2.5)).is_err());
        assert!(coerce("top", SettingKind::Int, &RawValue::from("ten")).is_err());
        assert!(coerce("top", SettingKind::Int, &RawValue::Bool(true)).is_err());
    }

    #[test]
    fn test_coerce_int_rejects_out_of_range_floats() {
        for x in [1e300, -1e300, 18446744073709551615.0, f64::INFINITY] {
            let err = coerce("top", SettingKind::Int, &RawValue::Float(x)).unwrap_err();
            assert!(
                matches!(err, ConfigError::ConfigValueError { setting: "top", .. }),
                "{x}: {err:?}"
            );
        }
        assert_eq!(
            coerce("top", SettingKind::Int, &RawValue::Float(-9.0e15)).unwrap(),
            SettingValue::Int(-9_000_000_000_000_000)
        );
    }

    #[test]
    fn test_coerce_int_from_json_overflowing_i64() {
        let raw = RawValue::from(serde_json::json!(18446744073709551615u64));
        assert!(coerce("min_size", SettingKind::Int, &raw).is_err());
    }

    #[test]
    fn test_coerce_float_accepts_integers() {
        assert_eq!(
            coerce("timeout", SettingKind::Float, &RawValue::Int(3)).unwrap(),
            SettingValue::Float(3.0)
        );
        assert_eq!(
            coerce("timeout", SettingKind::Float, &RawValue::from("2.5")).unwrap(),
            SettingValue::Float(2.5)
        );
    }

    #[test]
    fn test_coerce_str_stringifies_primitives() {
        assert_eq!(
            coerce("mode", SettingKind::Str, &RawValue::Int(5)).unwrap(),
            SettingValue::Str("5".to_string())
        );
        assert!(coerce("mode", SettingKind::Str, &RawValue::Unsupported("[1]".into())).is_err());
    }

    #[test]
    fn test_coerce_path_expands_tilde() {
        let value = coerce("out", SettingKind::Path, &RawValue::from("report.json")).unwrap();
        assert_eq!(value, SettingValue::Path(Some(PathBuf::from("report.json"))));

        if let Some(home) = dirs::home_dir() {
            let value = coerce("out", SettingKind::Path, &RawValue::from("~/r.json")).unwrap();
            assert_eq!(value, SettingValue::Path(Some(home.join("r.json"))));
        }
    }

    #[test]
    fn test_absent_values() {
        assert!(RawValue::from("").is_absent());
        assert!(RawValue::Null.is_absent());
        assert!(!RawValue::from("0").is_absent());
        assert!(!RawValue::Bool(false).is_absent());
    }

    #[test]
    fn test_raw_from_json() {
        assert_eq!(RawValue::from(serde_json::json!(3)), RawValue::Int(3));
        assert_eq!(RawValue::from(serde_json::json!(1.5)), RawValue::Float(1.5));
        assert_eq!(RawValue::from(serde_json::json!(true)), RawValue::Bool(true));
        assert!(matches!(
            RawValue::from(serde_json::json!([1, 2])),
            RawValue::Unsupported(_)
        ));
    }
}

//! Domain checks shared by the tools, run on resolved values before any
//! streaming starts.

use crate::config::schema::SettingName;
use crate::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn invalid<N: SettingName>(name: N, message: String) -> ConfigError {
    ConfigError::ValidationError {
        setting: name.key(),
        message,
    }
}

/// Counts such as `top` and `min_size` must not be negative.
pub fn non_negative<N: SettingName>(name: N, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| invalid(name, format!("must be 0 or greater, got {value}")))
}

/// Timeouts must be finite and strictly positive.
pub fn positive_seconds<N: SettingName>(name: N, secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid(name, format!("must be greater than 0, got {secs}")));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| invalid(name, e.to_string()))
}

/// Value must be one of `choices`, compared case-sensitively.
pub fn one_of<N: SettingName>(
    name: N,
    value: &str,
    choices: &[&str],
) -> Result<(), ConfigError> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            name,
            format!("expected one of {}, got {value:?}", choices.join("|")),
        ))
    }
}

/// Resolve `path` to an absolute, existing directory.
pub fn existing_dir<N: SettingName>(name: N, path: &Path) -> Result<PathBuf, ConfigError> {
    let resolved = std::fs::canonicalize(path)
        .map_err(|_| invalid(name, format!("path does not exist: {}", path.display())))?;
    if !resolved.is_dir() {
        return Err(invalid(
            name,
            format!("path is not a directory: {}", path.display()),
        ));
    }
    Ok(resolved)
}

/// `path` must exist and be a regular file (symlinks followed).
pub fn existing_file<N: SettingName>(name: N, path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(invalid(
            name,
            format!("path does not exist: {}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(invalid(
            name,
            format!("path is not a file: {}", path.display()),
        ));
    }
    Ok(())
}

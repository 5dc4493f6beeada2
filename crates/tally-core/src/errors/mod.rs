use std::error::Error;

/// Base trait for all application errors
pub trait TallyError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether the error was caused by user input (bad flag, bad config value)
    /// rather than by the environment the tool runs in.
    fn is_user_error(&self) -> bool {
        false
    }

    /// Process exit code for this error: 2 for user errors, 1 otherwise.
    fn exit_code(&self) -> u8 {
        if self.is_user_error() { 2 } else { 1 }
    }
}

/// Common result type for the application
pub type TallyResult<T> = Result<T, Box<dyn TallyError>>;

impl<E: TallyError> From<E> for Box<dyn TallyError> {
    fn from(error: E) -> Self {
        Box::new(error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for '{setting}': {raw:?} ({reason})")]
    ConfigValueError {
        setting: &'static str,
        raw: String,
        reason: String,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Config source '{path}' is unavailable: {message}")]
    SourceUnavailable { path: String, message: String },

    #[error("Invalid setting '{setting}': {message}")]
    ValidationError {
        setting: &'static str,
        message: String,
    },

    #[error("Setting '{setting}' holds a {found} value where {expected} was expected")]
    KindMismatch {
        setting: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl TallyError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigValueError { .. } => "CONFIG_VALUE_ERROR",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::SourceUnavailable { .. } => "CONFIG_SOURCE_UNAVAILABLE",
            ConfigError::ValidationError { .. } => "CONFIG_VALIDATION_ERROR",
            ConfigError::KindMismatch { .. } => "CONFIG_KIND_MISMATCH",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigValueError { .. }
                | ConfigError::ConfigParseError { .. }
                | ConfigError::ValidationError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_result() {
        let _result: TallyResult<i32> = Ok(42);
    }

    #[test]
    fn test_config_value_error_display() {
        let error = ConfigError::ConfigValueError {
            setting: "json",
            raw: "maybe".to_string(),
            reason: "expected one of 1/true/yes/y/on or 0/false/no/n/off".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'json': \"maybe\" (expected one of 1/true/yes/y/on or 0/false/no/n/off)"
        );
        assert_eq!(error.error_code(), "CONFIG_VALUE_ERROR");
        assert!(error.is_user_error());
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_source_unavailable_is_not_user_error() {
        let error = ConfigError::SourceUnavailable {
            path: "/missing/.env".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(error.error_code(), "CONFIG_SOURCE_UNAVAILABLE");
        assert!(!error.is_user_error());
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_boxed_conversion() {
        let result: TallyResult<()> = Err(ConfigError::ValidationError {
            setting: "top",
            message: "must be >= 0".to_string(),
        }
        .into());
        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Invalid setting 'top': must be >= 0");
    }
}

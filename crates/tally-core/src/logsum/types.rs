use crate::config::validation::{existing_file, non_negative, positive_seconds};
use crate::config::{DefaultValue, Schema, SettingName, SettingSpec, SettingsRecord};
use crate::errors::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogsumSetting {
    Path,
    Level,
    Top,
    Json,
    Out,
    Post,
    Timeout,
    Verbose,
    Config,
    EnvFile,
}

impl SettingName for LogsumSetting {
    fn key(self) -> &'static str {
        match self {
            LogsumSetting::Path => "path",
            LogsumSetting::Level => "level",
            LogsumSetting::Top => "top",
            LogsumSetting::Json => "json",
            LogsumSetting::Out => "out",
            LogsumSetting::Post => "post",
            LogsumSetting::Timeout => "timeout",
            LogsumSetting::Verbose => "verbose",
            LogsumSetting::Config => "config",
            LogsumSetting::EnvFile => "env_file",
        }
    }
}

pub static LOGSUM_SCHEMA: Schema<LogsumSetting> = Schema {
    tool: "logsum",
    env_prefix: "LOGSUM",
    positional: Some(LogsumSetting::Path),
    config_path: Some(LogsumSetting::Config),
    settings: &[
        SettingSpec::new(LogsumSetting::Path, DefaultValue::Path(None)),
        SettingSpec::new(LogsumSetting::Level, DefaultValue::Str("")),
        SettingSpec::new(LogsumSetting::Top, DefaultValue::Int(5)),
        SettingSpec::new(LogsumSetting::Json, DefaultValue::Bool(false)),
        SettingSpec::new(LogsumSetting::Out, DefaultValue::Path(None)),
        SettingSpec::new(LogsumSetting::Post, DefaultValue::Str("")),
        SettingSpec::new(LogsumSetting::Timeout, DefaultValue::Float(10.0)),
        SettingSpec::new(LogsumSetting::Verbose, DefaultValue::Bool(false)),
        SettingSpec::new(LogsumSetting::Config, DefaultValue::Path(None)).not_in_file(),
        SettingSpec::new(LogsumSetting::EnvFile, DefaultValue::Path(None)).cli_only(),
    ],
};

/// Where log lines come from. An absent path and `-` both mean stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogInput {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for LogInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogInput::Stdin => f.write_str("-"),
            LogInput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCount {
    pub count: u64,
    pub message: String,
}

/// Validated logsum settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogsumSettings {
    pub input: LogInput,
    /// Upper-cased level to keep; `None` keeps every level.
    pub level: Option<String>,
    pub top: usize,
    pub json: bool,
    pub verbose: bool,
    pub out: Option<PathBuf>,
    pub post: Option<String>,
    pub timeout: Duration,
}

impl TryFrom<&SettingsRecord<LogsumSetting>> for LogsumSettings {
    type Error = ConfigError;

    fn try_from(record: &SettingsRecord<LogsumSetting>) -> Result<Self, Self::Error> {
        let top = non_negative(LogsumSetting::Top, record.int(LogsumSetting::Top)?)?;
        let timeout = positive_seconds(
            LogsumSetting::Timeout,
            record.float(LogsumSetting::Timeout)?,
        )?;

        let input = match record.path(LogsumSetting::Path)? {
            None => LogInput::Stdin,
            Some(path) if path.as_os_str() == "-" => LogInput::Stdin,
            Some(path) => {
                existing_file(LogsumSetting::Path, &path)?;
                LogInput::File(path)
            }
        };

        let level = record.string(LogsumSetting::Level)?.trim().to_ascii_uppercase();
        let post = record.string(LogsumSetting::Post)?;

        Ok(Self {
            input,
            level: (!level.is_empty()).then_some(level),
            top: usize::try_from(top).unwrap_or(usize::MAX),
            json: record.bool(LogsumSetting::Json)?,
            verbose: record.bool(LogsumSetting::Verbose)?,
            out: record.path(LogsumSetting::Out)?,
            post: (!post.is_empty()).then_some(post),
            timeout,
        })
    }
}

use crate::config::validation::{existing_dir, non_negative, one_of, positive_seconds};
use crate::config::{DefaultValue, Schema, SettingName, SettingSpec, SettingsRecord};
use crate::errors::ConfigError;
use serde::Serialize;
use std::fmt;
use std::fs::FileType;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirscanSetting {
    Directory,
    Mode,
    Top,
    MinSize,
    Human,
    Relative,
    Json,
    Out,
    Post,
    Timeout,
    Verbose,
    Config,
    EnvFile,
}

impl SettingName for DirscanSetting {
    fn key(self) -> &'static str {
        match self {
            DirscanSetting::Directory => "directory",
            DirscanSetting::Mode => "mode",
            DirscanSetting::Top => "top",
            DirscanSetting::MinSize => "min_size",
            DirscanSetting::Human => "human",
            DirscanSetting::Relative => "relative",
            DirscanSetting::Json => "json",
            DirscanSetting::Out => "out",
            DirscanSetting::Post => "post",
            DirscanSetting::Timeout => "timeout",
            DirscanSetting::Verbose => "verbose",
            DirscanSetting::Config => "config",
            DirscanSetting::EnvFile => "env_file",
        }
    }
}

pub static DIRSCAN_SCHEMA: Schema<DirscanSetting> = Schema {
    tool: "dirscan",
    env_prefix: "DIRSCAN",
    positional: Some(DirscanSetting::Directory),
    config_path: Some(DirscanSetting::Config),
    settings: &[
        SettingSpec::new(DirscanSetting::Directory, DefaultValue::Path(Some("."))),
        SettingSpec::new(DirscanSetting::Mode, DefaultValue::Str("file")),
        SettingSpec::new(DirscanSetting::Top, DefaultValue::Int(10)),
        SettingSpec::new(DirscanSetting::MinSize, DefaultValue::Int(0)),
        SettingSpec::new(DirscanSetting::Human, DefaultValue::Bool(false)),
        SettingSpec::new(DirscanSetting::Relative, DefaultValue::Bool(false)),
        SettingSpec::new(DirscanSetting::Json, DefaultValue::Bool(false)),
        SettingSpec::new(DirscanSetting::Out, DefaultValue::Path(None)),
        SettingSpec::new(DirscanSetting::Post, DefaultValue::Str("")),
        SettingSpec::new(DirscanSetting::Timeout, DefaultValue::Float(10.0)),
        SettingSpec::new(DirscanSetting::Verbose, DefaultValue::Bool(false)),
        SettingSpec::new(DirscanSetting::Config, DefaultValue::Path(None)).not_in_file(),
        SettingSpec::new(DirscanSetting::EnvFile, DefaultValue::Path(None)).cli_only(),
    ],
};

/// Which directory entries take part in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Regular files only.
    File,
    /// Everything that is not a directory (files, symlinks, sockets, ...).
    All,
}

impl ScanMode {
    pub const CHOICES: [&'static str; 2] = ["file", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::File => "file",
            ScanMode::All => "all",
        }
    }

    /// Decide membership from the entry's own type, following a symlink
    /// only to learn what it points at.
    pub fn includes(&self, file_type: FileType, path: &Path) -> bool {
        let (is_file, is_dir) = if file_type.is_symlink() {
            (path.is_file(), path.is_dir())
        } else {
            (file_type.is_file(), file_type.is_dir())
        };
        match self {
            ScanMode::File => is_file,
            ScanMode::All => !is_dir,
        }
    }
}

impl std::str::FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(ScanMode::File),
            "all" => Ok(ScanMode::All),
            other => Err(format!("unknown scan mode: {other}")),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated dirscan settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DirscanSettings {
    /// Absolute scan root.
    pub root: PathBuf,
    pub mode: ScanMode,
    pub top: usize,
    pub min_size: u64,
    pub human: bool,
    pub relative: bool,
    pub json: bool,
    pub verbose: bool,
    pub out: Option<PathBuf>,
    pub post: Option<String>,
    pub timeout: Duration,
}

impl TryFrom<&SettingsRecord<DirscanSetting>> for DirscanSettings {
    type Error = ConfigError;

    fn try_from(record: &SettingsRecord<DirscanSetting>) -> Result<Self, Self::Error> {
        let directory = record
            .path(DirscanSetting::Directory)?
            .unwrap_or_else(|| PathBuf::from("."));
        let root = existing_dir(DirscanSetting::Directory, &directory)?;

        let top = non_negative(DirscanSetting::Top, record.int(DirscanSetting::Top)?)?;
        let min_size = non_negative(DirscanSetting::MinSize, record.int(DirscanSetting::MinSize)?)?;
        let timeout = positive_seconds(
            DirscanSetting::Timeout,
            record.float(DirscanSetting::Timeout)?,
        )?;

        let mode = record.string(DirscanSetting::Mode)?;
        one_of(DirscanSetting::Mode, &mode, &ScanMode::CHOICES)?;
        let mode = mode
            .parse::<ScanMode>()
            .map_err(|message| ConfigError::ValidationError {
                setting: DirscanSetting::Mode.key(),
                message,
            })?;

        let post = record.string(DirscanSetting::Post)?;

        Ok(Self {
            root,
            mode,
            top: usize::try_from(top).unwrap_or(usize::MAX),
            min_size,
            human: record.bool(DirscanSetting::Human)?,
            relative: record.bool(DirscanSetting::Relative)?,
            json: record.bool(DirscanSetting::Json)?,
            verbose: record.bool(DirscanSetting::Verbose)?,
            out: record.path(DirscanSetting::Out)?,
            post: (!post.is_empty()).then_some(post),
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvSource, Invocation, SettingValue, SourceMap, resolve};
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct NoConfig;

    impl crate::config::ConfigLoader for NoConfig {
        fn load(&self, _path: &Path) -> Result<SourceMap, ConfigError> {
            Ok(SourceMap::new())
        }
    }

    fn env(pairs: &[(&str, &str)]) -> EnvSource {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvSource::from_maps(HashMap::new(), map)
    }

    fn settings_for(
        invocation: Invocation<DirscanSetting>,
        pairs: &[(&str, &str)],
    ) -> Result<DirscanSettings, ConfigError> {
        let record = resolve(&DIRSCAN_SCHEMA, &invocation, &env(pairs), &NoConfig)?;
        DirscanSettings::try_from(&record)
    }

    fn at(dir: &TempDir) -> Invocation<DirscanSetting> {
        let path = dir.path().to_path_buf();
        Invocation::new(vec![path.display().to_string()])
            .with_positional(DirscanSetting::Directory, SettingValue::Path(Some(path)))
    }

    #[test]
    fn test_schema_names() {
        assert_eq!(DIRSCAN_SCHEMA.flag(DirscanSetting::MinSize), "--min-size");
        assert_eq!(DIRSCAN_SCHEMA.env_key(DirscanSetting::Json), "DIRSCAN_JSON");
        assert_eq!(DIRSCAN_SCHEMA.settings.len(), 13);
    }

    #[test]
    fn test_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = settings_for(at(&temp), &[]).unwrap();
        assert_eq!(settings.mode, ScanMode::File);
        assert_eq!(settings.top, 10);
        assert_eq!(settings.min_size, 0);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.post, None);
        assert_eq!(settings.out, None);
        assert!(!settings.json && !settings.human && !settings.relative);
        assert!(settings.root.is_absolute());
    }

    #[test]
    fn test_env_values_apply() {
        let temp = TempDir::new().unwrap();
        let settings = settings_for(
            at(&temp),
            &[
                ("DIRSCAN_MODE", "all"),
                ("DIRSCAN_TOP", "0"),
                ("DIRSCAN_HUMAN", "yes"),
                ("DIRSCAN_POST", "http://localhost:9/x"),
            ],
        )
        .unwrap();
        assert_eq!(settings.mode, ScanMode::All);
        assert_eq!(settings.top, 0);
        assert!(settings.human);
        assert_eq!(settings.post.as_deref(), Some("http://localhost:9/x"));
    }

    #[test]
    fn test_malformed_bool_names_setting() {
        let temp = TempDir::new().unwrap();
        let err = settings_for(at(&temp), &[("DIRSCAN_JSON", "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConfigValueError { setting: "json", .. }
        ));
    }

    #[test]
    fn test_validation_failures() {
        let temp = TempDir::new().unwrap();
        for (key, value, setting) in [
            ("DIRSCAN_TOP", "-1", "top"),
            ("DIRSCAN_MIN_SIZE", "-5", "min_size"),
            ("DIRSCAN_TIMEOUT", "0", "timeout"),
            ("DIRSCAN_MODE", "dirs", "mode"),
        ] {
            let err = settings_for(at(&temp), &[(key, value)]).unwrap_err();
            match err {
                ConfigError::ValidationError { setting: s, .. } => assert_eq!(s, setting),
                other => panic!("expected validation error for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let invocation = Invocation::new(vec![missing.display().to_string()])
            .with_positional(DirscanSetting::Directory, SettingValue::Path(Some(missing)));
        let err = settings_for(invocation, &[]).unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }

    #[test]
    fn test_positional_beats_env_directory() {
        let cli_dir = TempDir::new().unwrap();
        let env_dir = TempDir::new().unwrap();
        let env_path = env_dir.path().display().to_string();
        let settings =
            settings_for(at(&cli_dir), &[("DIRSCAN_DIRECTORY", env_path.as_str())]).unwrap();
        assert_eq!(settings.root, cli_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_scan_mode_includes() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        std::fs::write(&file, "x").unwrap();
        let file_type = std::fs::symlink_metadata(&file).unwrap().file_type();
        let dir_type = std::fs::symlink_metadata(temp.path()).unwrap().file_type();

        assert!(ScanMode::File.includes(file_type, &file));
        assert!(ScanMode::All.includes(file_type, &file));
        assert!(!ScanMode::File.includes(dir_type, temp.path()));
        assert!(!ScanMode::All.includes(dir_type, temp.path()));
    }
}

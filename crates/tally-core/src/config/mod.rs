//! # Configuration System
//!
//! Layered settings resolution shared by every tally tool.
//!
//! ## Precedence
//!
//! Settings are resolved from these sources (earlier sources win):
//! 1. **CLI arguments** - flags and the positional argument actually typed
//! 2. **Environment** - `--env-file` values, then the process environment
//! 3. **Config file** - JSON (or TOML for `.toml` paths), located by the
//!    `config` setting, which is itself resolved from CLI or environment
//! 4. **Built-in defaults** - the schema table
//!
//! A setting typed on the command line is never overridden, even when the
//! typed value equals the default. Empty values are treated as unset.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tally_core::config::{EnvSource, FsConfigLoader, Invocation, SettingValue, resolve};
//! use tally_core::dirscan::{DIRSCAN_SCHEMA, DirscanSetting, DirscanSettings};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let invocation = Invocation::new(vec!["--top".into(), "3".into()])
//!         .with_value(DirscanSetting::Top, SettingValue::Int(3));
//!     let env = EnvSource::from_process(Default::default());
//!     let record = resolve(&DIRSCAN_SCHEMA, &invocation, &env, &FsConfigLoader)?;
//!     let settings = DirscanSettings::try_from(&record)?;
//!     assert_eq!(settings.top, 3);
//!     Ok(())
//! }
//! ```

pub mod merge;
pub mod provenance;
pub mod record;
pub mod resolve;
pub mod schema;
pub mod sources;
pub mod validation;
pub mod value;

// Public API exports
pub use merge::apply_source;
pub use provenance::{Provenance, compute_provenance};
pub use record::{Origin, SettingEntry, SettingsRecord};
pub use resolve::{Invocation, resolve};
pub use schema::{DefaultValue, Schema, SettingKind, SettingName, SettingSpec};
pub use sources::{
    ConfigFormat, ConfigLoader, EnvSource, FsConfigLoader, SourceMap, load_env_file,
    parse_config_document,
};
pub use value::{RawValue, SettingValue, coerce, parse_bool};

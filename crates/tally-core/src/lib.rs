//! tally-core: Core library for the tally command-line tools
//!
//! Every tool resolves its settings through the same layered engine and
//! reduces an item stream with the same bounded top-K aggregator. The
//! binaries only parse arguments and choose where the report goes.
//!
//! # Main Entry Points
//!
//! - [`config`] - Resolve settings from CLI, environment, config file, defaults
//! - [`aggregate`] - Streaming top-K selection with running totals
//! - [`dirscan`] - Largest entries under a directory
//! - [`logsum`] - Level counts and most frequent messages of a log
//! - [`delivery`] - JSON to stdout, a file, or an HTTP endpoint

pub mod aggregate;
pub mod config;
pub mod delivery;
pub mod dirscan;
pub mod errors;
pub mod events;
pub mod format;
pub mod logging;
pub mod logsum;

// Re-export commonly used types at crate root for convenience
pub use aggregate::{AggregateResult, ScoredItem, TopK};
pub use config::{EnvSource, FsConfigLoader, Invocation, SettingValue, SettingsRecord, resolve};
pub use errors::{ConfigError, TallyError, TallyResult};
pub use format::human_size;

// Re-export logging initialization
pub use logging::{LoggingHandle, init_logging};

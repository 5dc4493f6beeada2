//! Directory size scan: stream every entry under a root, keep the largest.

pub mod errors;
pub mod handler;
pub mod operations;
pub mod report;
pub mod types;

pub use errors::ScanError;
pub use handler::scan_directory;
pub use operations::{format_path, scan_entries};
pub use report::{DirscanEntry, DirscanReport};
pub use types::{DIRSCAN_SCHEMA, DirscanSetting, DirscanSettings, ScanMode};

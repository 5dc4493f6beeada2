//! Log summary: count lines per level and find the most frequent messages.

pub mod errors;
pub mod handler;
pub mod operations;
pub mod report;
pub mod types;

pub use errors::LogReadError;
pub use handler::summarize_log;
pub use operations::{LogSummary, parse_line, read_records, summarize};
pub use report::LogsumReport;
pub use types::{LOGSUM_SCHEMA, LogInput, LogsumSetting, LogsumSettings, Record};

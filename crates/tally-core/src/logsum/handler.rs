use crate::logsum::errors::LogReadError;
use crate::logsum::{operations, report::LogsumReport, types::LogsumSettings};
use tracing::info;

/// Read the configured input once and build the report.
///
/// # Errors
///
/// Returns `LogReadError::OpenFailed` when the log file cannot be opened.
/// Read errors part way through end the input early and are only logged.
pub fn summarize_log(settings: &LogsumSettings) -> Result<LogsumReport, LogReadError> {
    info!(
        event = "core.logsum.read_started",
        path = %settings.input,
        level = settings.level.as_deref().unwrap_or(""),
        top = settings.top
    );

    let reader = operations::open_input(&settings.input)?;
    let records = operations::read_records(settings.input.to_string(), reader);
    let summary = operations::summarize(records, settings.level.as_deref(), settings.top);

    info!(
        event = "core.logsum.read_completed",
        total_lines = summary.total_lines,
        distinct_messages = summary.distinct_messages,
        skipped = summary.skipped
    );

    Ok(LogsumReport::new(settings, summary))
}

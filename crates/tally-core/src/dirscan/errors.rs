use crate::errors::TallyError;

/// Failure to produce one scan entry. The scan skips the entry and goes on.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Cannot read directory entry under '{path}': {message}")]
    WalkFailed { path: String, message: String },

    #[error("Cannot stat '{path}': {message}")]
    StatFailed { path: String, message: String },
}

impl TallyError for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            ScanError::WalkFailed { .. } => "SCAN_WALK_FAILED",
            ScanError::StatFailed { .. } => "SCAN_STAT_FAILED",
        }
    }
}

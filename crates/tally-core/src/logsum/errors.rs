use crate::errors::TallyError;

#[derive(Debug, thiserror::Error)]
pub enum LogReadError {
    #[error("Failed to open log '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Failed to read from '{source_name}': {message}")]
    ReadFailed {
        source_name: String,
        message: String,
    },
}

impl TallyError for LogReadError {
    fn error_code(&self) -> &'static str {
        match self {
            LogReadError::OpenFailed { .. } => "LOG_OPEN_FAILED",
            LogReadError::ReadFailed { .. } => "LOG_READ_FAILED",
        }
    }
}

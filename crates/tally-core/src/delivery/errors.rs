use crate::errors::TallyError;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to serialize payload: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to write payload to '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("HTTP POST to '{url}' failed: {message}")]
    PostFailed { url: String, message: String },

    #[error("HTTP POST to '{url}' returned status {status}")]
    HttpStatus { url: String, status: u16 },
}

impl TallyError for DeliveryError {
    fn error_code(&self) -> &'static str {
        match self {
            DeliveryError::SerializeFailed { .. } => "DELIVERY_SERIALIZE_FAILED",
            DeliveryError::WriteFailed { .. } => "DELIVERY_WRITE_FAILED",
            DeliveryError::PostFailed { .. } => "DELIVERY_POST_FAILED",
            DeliveryError::HttpStatus { .. } => "DELIVERY_HTTP_STATUS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_errors_are_not_user_errors() {
        let error = DeliveryError::HttpStatus {
            url: "http://localhost/x".to_string(),
            status: 503,
        };
        assert_eq!(error.error_code(), "DELIVERY_HTTP_STATUS");
        assert!(!error.is_user_error());
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("503"));
    }
}

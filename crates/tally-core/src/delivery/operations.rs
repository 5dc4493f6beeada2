use crate::delivery::errors::DeliveryError;
use reqwest::blocking::Client;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const BODY_PREVIEW_CHARS: usize = 200;

/// Pretty-printed JSON, two-space indent, non-ASCII kept as is.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, DeliveryError> {
    serde_json::to_string_pretty(payload).map_err(|e| DeliveryError::SerializeFailed {
        message: e.to_string(),
    })
}

/// Write the payload as pretty JSON followed by a newline.
pub fn write_json_file<T: Serialize + ?Sized>(
    path: &Path,
    payload: &T,
) -> Result<(), DeliveryError> {
    let mut text = render_json(payload)?;
    text.push('\n');

    std::fs::write(path, text).map_err(|e| DeliveryError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(
        event = "core.delivery.file_written",
        path = %path.display()
    );
    Ok(())
}

/// POST the payload as JSON. Any status of 400 or above is a failure.
/// There are no retries.
pub fn post_json<T: Serialize + ?Sized>(
    url: &str,
    payload: &T,
    timeout: Duration,
) -> Result<u16, DeliveryError> {
    let post_failed = |e: reqwest::Error| DeliveryError::PostFailed {
        url: url.to_string(),
        message: e.to_string(),
    };

    let client = Client::builder().timeout(timeout).build().map_err(post_failed)?;
    let response = client.post(url).json(payload).send().map_err(post_failed)?;
    let status = response.status();

    info!(
        event = "core.delivery.post_completed",
        url = url,
        status = status.as_u16()
    );

    if status.is_client_error() || status.is_server_error() {
        let body: String = response
            .text()
            .unwrap_or_default()
            .chars()
            .take(BODY_PREVIEW_CHARS)
            .collect();
        warn!(
            event = "core.delivery.post_rejected",
            url = url,
            status = status.as_u16(),
            body = body.as_str()
        );
        return Err(DeliveryError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(status.as_u16())
}

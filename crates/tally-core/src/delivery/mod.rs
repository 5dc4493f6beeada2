//! Output sinks for a finished report: stdout JSON, a file, an HTTP endpoint.

pub mod errors;
pub mod operations;

pub use errors::DeliveryError;
pub use operations::{post_json, render_json, write_json_file};

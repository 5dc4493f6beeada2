use crate::errors::TallyError;
use tracing::{error, info};

pub fn log_app_startup(app: &str) {
    info!(
        event = "core.app.startup_completed",
        app = app,
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown(app: &str) {
    info!(event = "core.app.shutdown_started", app = app);
}

pub fn log_app_error(error: &dyn TallyError) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_code = error.error_code(),
        user_error = error.is_user_error()
    );
}

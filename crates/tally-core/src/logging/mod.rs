use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const CORE_TARGET: &str = "tally_core";

/// Lets a tool change verbosity after the subscriber is installed.
///
/// `verbose` is itself a setting that may come from the environment or a
/// config file, so it is only known after resolution.
pub struct LoggingHandle {
    app: &'static str,
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LoggingHandle {
    pub fn set_verbose(&self, verbose: bool) {
        if let Err(e) = self.handle.reload(build_filter(self.app, verbose)) {
            eprintln!("Warning: could not change log level: {e}");
        }
    }
}

/// Filter for the tool's own target and the core library.
///
/// Warnings and errors are always emitted; `verbose` adds info-level events.
/// `RUST_LOG` is honoured for every other target.
pub fn build_filter(app: &str, verbose: bool) -> EnvFilter {
    let level = if verbose { "info" } else { "warn" };
    let mut filter = EnvFilter::from_default_env();
    for target in [app, CORE_TARGET] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Install the JSON-lines subscriber on stderr, keeping stdout for results.
pub fn init_logging(app: &'static str, verbose: bool) -> LoggingHandle {
    let (filter, handle) = reload::Layer::new(build_filter(app, verbose));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .try_init();
    if let Err(e) = installed {
        eprintln!("Warning: logging already initialized: {e}");
    }

    LoggingHandle { app, handle }
}

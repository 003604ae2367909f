use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Output goes to stderr so stdout carries
/// only reports and JSON.
pub fn init_logging(json: bool) {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter_layer);

    if json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(true)
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

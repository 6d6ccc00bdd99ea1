use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::ChronoLocal},
    prelude::*,
};

/// Installs the global subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(log_level.into()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_timer(ChronoLocal::rfc_3339())
        .compact();

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set global subscriber: {}", err);
    }
}

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the fmt subscriber on stderr. `RUST_LOG` overrides `level`; an
/// invalid directive falls back to `info`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init()
        .ok();
}

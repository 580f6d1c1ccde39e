use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr subscriber.
///
/// Off unless `RUST_LOG` holds a valid filter, so the terminal view is never
/// interleaved with log lines by default.
pub fn init() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

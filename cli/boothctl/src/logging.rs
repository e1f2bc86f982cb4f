//! Tracing setup. Logs go to stderr so table/JSON output on stdout stays
//! clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var consulted when `RUST_LOG` is unset.
pub const LOG_LEVEL_ENV: &str = "BOOTH_LOG_LEVEL";

/// Default filter for a `-v` count.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize tracing (prefer RUST_LOG, then BOOTH_LOG_LEVEL, then -v).
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}

use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber: `fmt` to stderr, filtered by `RUST_LOG`
/// (default `info`). Returns `false` if a subscriber was already installed.
pub fn init_tracing() -> bool {
    if INITIALISED.set(()).is_err() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    Registry::default().with(filter).with(fmt_layer).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_is_harmless() {
        let _ = init_tracing();
        assert!(!init_tracing());
    }
}

//! Structured logging with `tracing`.
//!
//! The bridge reports every contained host failure as a `warn` event and
//! every ignored method as a `debug` event; nothing is surfaced to the
//! application for either. [`init_subscriber`] installs the process-wide
//! stderr subscriber, and [`capture_logs`] gives tests a thread-local
//! subscriber whose events can be asserted on.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are
/// no-ops. Output goes to stderr so stdout stays free for port traffic.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails if a global subscriber is already set
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_subscriber_does_not_panic() {
        init_subscriber("warn");
        init_subscriber("debug");
    }
}

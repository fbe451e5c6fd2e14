//! Diagnostic logging setup.
//!
//! Library code only emits `tracing` events; the binary installs a
//! subscriber writing to stderr so stdout stays clean for command output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "DEPOT_LOG";

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "depot=warn",
        1 => "depot=info",
        2 => "depot=debug",
        _ => "depot=trace",
    }
}

/// Build the filter: `DEPOT_LOG` when set and valid, else from `verbosity`.
fn build_filter(verbosity: u8) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .unwrap_or_else(|e| {
                eprintln!("warning: ignoring invalid {}: {}", LOG_ENV, e);
                EnvFilter::new(default_directive(verbosity))
            }),
        _ => EnvFilter::new(default_directive(verbosity)),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "depot=warn");
        assert_eq!(default_directive(1), "depot=info");
        assert_eq!(default_directive(2), "depot=debug");
        assert_eq!(default_directive(9), "depot=trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0);
        init(2);
    }
}

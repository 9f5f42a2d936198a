use std::time::Instant;

use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` is unset. Seeding progress logs at
/// `info`, so that level stays on by default.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "info,dbjson=debug" } else { "info" }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` adds `debug` for this crate.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A timer for measuring durations in verbose mode.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

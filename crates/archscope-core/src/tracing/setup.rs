//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the archscope tracing/logging system.
///
/// Reads `ARCHSCOPE_LOG` for per-subsystem log levels, e.g.
/// `ARCHSCOPE_LOG=archscope_analysis::rules=debug,archscope_core=warn`.
///
/// Falls back to `archscope=info` if `ARCHSCOPE_LOG` is unset or invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ARCHSCOPE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("archscope=info"));

        // A host test harness may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

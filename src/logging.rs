//! Logging setup for the knitchart binary.
//!
//! Logs are written to stderr so that stdout stays usable for chart output.
//!
//! ## Environment Variables
//!
//! 1. **`KNITCHART_LOG`** (highest priority) - knitchart-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn`
//!
//! The library only emits events; installing a subscriber is left to binaries.

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Install the global stderr subscriber.
///
/// `verbose` raises the default level to `debug` for knitchart when neither
/// environment variable is set. Fails if a subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), InitError> {
    fmt().with_env_filter(create_filter(verbose)).with_writer(std::io::stderr).try_init()
}

/// Initialize logging for tests.
///
/// Will not crash if called multiple times or if logging is already
/// initialized by another test.
#[allow(clippy::let_unit_value)]
pub fn test() {
    let _ = fmt().with_env_filter(create_filter(false)).with_test_writer().try_init();
}

/// Create the [`EnvFilter`]: `KNITCHART_LOG` > `RUST_LOG` > defaults.
fn create_filter(verbose: bool) -> EnvFilter {
    if let Ok(knit_log) = env::var("KNITCHART_LOG") {
        return expand_knitchart_log(&knit_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    if verbose {
        EnvFilter::new("warn,knitchart=debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Expand a bare level such as `KNITCHART_LOG=debug` to `warn,knitchart=debug`.
///
/// Values with directive syntax are used as-is.
fn expand_knitchart_log(knit_log: &str) -> EnvFilter {
    if knit_log.contains('=') || knit_log.contains(':') || knit_log.contains(',') {
        return EnvFilter::new(knit_log);
    }
    EnvFilter::new(format!("warn,knitchart={knit_log}"))
}

//! Test Logging
//!
//! Installs a tracing subscriber for test runs so service logs can be
//! inspected with `RUST_LOG` when debugging a failing test.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the test tracing subscriber, once per process
///
/// Honors `RUST_LOG`; defaults to warnings only so test output stays quiet.
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

//! Helpers shared by the lazyq test suites.
//!
//! - [`init_tracing_for_tests`] installs a `tracing` subscriber once per test
//!   binary. Enable the `auto-init` feature to have it run before `main`.
//! - [`Probe`] is an instrumented source sequence that counts how a traversal
//!   drives it, for asserting laziness and disposal contracts.

use std::sync::Once;

mod probe;

pub use probe::{Probe, ProbeStats};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
///
/// Honors `RUST_LOG`; defaults to `warn` so the per-cursor `trace!` events
/// stay quiet unless asked for.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

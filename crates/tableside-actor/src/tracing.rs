//! # Observability & Tracing
//!
//! One call to [`setup_tracing`] at process start installs a compact `tracing-subscriber`
//! formatter. Every actor logs with an `entity_type` field instead of the module path, so the
//! target is hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle and state changes
//! RUST_LOG=debug cargo run           # full request payloads
//! RUST_LOG=tableside::relay=debug    # one subsystem only
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (for example `"info"` or
/// `"tableside=debug,tower_http=info"`) is used. Calling this twice is a no-op.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

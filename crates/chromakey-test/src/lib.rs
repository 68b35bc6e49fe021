//! chromakey-test - Regression test framework for chromakey
//!
//! Provides [`RegParams`], a small harness that numbers each check,
//! records failures and reports them through `tracing`, plus
//! procedural test images in [`images`].
//!
//! # Usage
//!
//! ```ignore
//! use chromakey_test::RegParams;
//!
//! let mut rp = RegParams::new("key");
//! rp.compare_values(0.0, alpha as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter for harness and library log output (default `info`)

mod error;
pub mod images;
mod params;

use std::sync::Once;

pub use error::{TestError, TestResult};
pub use params::RegParams;

static LOGGING: Once = Once::new();

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call has an effect.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Another subscriber may already be installed by the caller
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_test_writer(),
            )
            .try_init();
    });
}

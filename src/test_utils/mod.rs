//! Test utilities for mass-requests
//!
//! Sample catalog and request documents shared by the unit tests and the
//! CLI integration tests, plus one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use mass_requests::catalog::Catalog;
//! use mass_requests::test_utils::CatalogFixture;
//!
//! let fixture = CatalogFixture::basic();
//! let catalog = Catalog::parse(&fixture.content, &fixture.name).unwrap();
//! assert!(catalog.find_time_profile("TDAYM").is_some());
//! ```

pub mod fixtures;

pub use fixtures::{CatalogFixture, RequestFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` when set; with neither,
/// logging stays off.
///
/// ```bash
/// RUST_LOG=mass_requests=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

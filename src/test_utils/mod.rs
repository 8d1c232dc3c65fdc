//! Test utilities for wikirender
//!
//! Helpers shared by unit tests: one-time logging setup and a ready-made
//! rendering context backed by the built-in plugins.
//!
//! # Example
//!
//! ```rust,no_run
//! use wikirender::test_utils::{init_test_logging, test_context};
//!
//! init_test_logging(None);
//! let ctx = test_context("Main");
//! assert_eq!(ctx.page_name(), "Main");
//! ```

use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::context::{RenderContext, WikiEngine};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging stays
/// off. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=wikirender=debug cargo test
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
            .with_thread_ids(false)
            .try_init();
    });
}

/// A context for `page_name` on a fresh engine with the built-in plugins.
pub fn test_context(page_name: &str) -> Arc<RenderContext> {
    Arc::new(RenderContext::new(Arc::new(WikiEngine::default()), page_name))
}

//! Integration layer around `iris-core`: decodes image files, keeps the
//! enrolled gallery in SQLite and exposes enroll / identify / verify.
pub mod config;
pub(crate) mod error;
pub mod lenient;
pub mod loader;
pub mod prelude;
pub mod service;
pub mod store;
#[cfg(test)]
pub(crate) mod tests;

pub use error::Error;

use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

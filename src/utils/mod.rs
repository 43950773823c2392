//! Utility functions shared across the crate: image resizing helpers and
//! logging setup.

pub mod image;

pub use self::image::{resize_image, RESIZE_TARGET};

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, defaulting to `info`. Safe to call once per
/// process; later calls are ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

//! Customer Export Tool - library
//!
//! Exports customer names and emails from a store's REST API into a
//! timestamped CSV or JSON file.

pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod models;

pub use error::{AppError, Result};

/// Log filter: `RUST_LOG` when set, else INFO with `verbose` or WARN
fn log_filter(verbose: bool, rust_log: Option<&str>) -> tracing_subscriber::EnvFilter {
    let level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

/// Initialize logging to stderr, `RUST_LOG` overrides the default level
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*};

    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_default_level_follows_verbose() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_level_overrides_default() {
        assert_eq!(log_filter(false, Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(true, Some("error")).max_level_hint(), Some(LevelFilter::ERROR));
    }
}

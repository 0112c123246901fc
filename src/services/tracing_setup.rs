//! Tracing subscriber setup
//!
//! This module provides shared tracing configuration used by both
//! the command-line tool and tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Diagnostics go to `log_file_path` when given, otherwise to stderr.
/// `RUST_LOG` overrides `default_filter` when set.
pub fn init_global(log_file_path: Option<&Path>, default_filter: &str) -> std::io::Result<()> {
    let filter = build_filter(default_filter);
    match log_file_path {
        Some(path) => {
            let log_file = File::create(path)?;
            build_subscriber(Arc::new(log_file), filter, false).init();
        }
        None => build_subscriber(std::io::stderr, filter, true).init(),
    }
    Ok(())
}

/// Filter from `RUST_LOG`, falling back to `default_filter`
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Build a subscriber writing formatted events to `writer`.
///
/// This is the core subscriber configuration shared between the binary and tests.
pub fn build_subscriber<W>(
    writer: W,
    filter: EnvFilter,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer().with_writer(writer).with_ansi(ansi);

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{History, Position};
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_subscriber_records_applied_actions() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(
            Arc::new(log_file.reopen().unwrap()),
            EnvFilter::new("debug"),
            false,
        );

        tracing::subscriber::with_default(subscriber, || {
            let mut history = History::default();
            history.insert("abc", Position::End).unwrap();
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("DEBUG"), "Log should contain DEBUG level");
        assert!(
            contents.contains("applied action"),
            "Log should contain the applied action event"
        );
    }

    #[test]
    fn test_filter_suppresses_lower_levels() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(
            Arc::new(log_file.reopen().unwrap()),
            EnvFilter::new("warn"),
            false,
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Test info message");
            tracing::warn!("Test warning message");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(!contents.contains("Test info message"));
        assert!(contents.contains("Test warning message"));
    }
}

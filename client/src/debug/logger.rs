//! File-based logging initialization

use super::config::DebugConfig;
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Sets up file-based logging with daily rotation and non-blocking writes.
/// Logs go to `logs/bank-client.log` by default; `RUST_LOG` (or
/// `BANK_CLIENT_LOG`) controls the filter.
///
/// Call once from the embedding application. Calling twice is a no-op
/// because the global subscriber is already set.
pub fn init() {
    let config = DebugConfig::from_env();

    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "bank-client.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("client=info,warn"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed (embedding app or test harness).
        return;
    }

    // The guard must outlive the process or buffered lines are lost.
    std::mem::forget(guard);

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        "Diagnostics logging initialized"
    );
}

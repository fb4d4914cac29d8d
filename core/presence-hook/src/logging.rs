//! Logging setup for the hook.
//!
//! stdout carries the payload, so events go to a daily rolling file under
//! `~/.editor-presence/logs`. `PRESENCE_DEBUG_LOG=1` forces debug level;
//! otherwise `RUST_LOG` applies, defaulting to `info`.

use presence_core::StorageConfig;
use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "presence-hook.log";

fn debug_enabled() -> bool {
    env::var("PRESENCE_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered events are flushed; `None` means logging is off.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = StorageConfig::default().logs_dir();
    if fs_err::create_dir_all(&logs_dir).is_err() {
        return None;
    }

    let filter = if debug_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

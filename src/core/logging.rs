use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::core::config::AppPaths;

/// Overrides the default filter, e.g. `entropy_boundary=debug`.
pub const LOG_ENV: &str = "ENTROPY_BOUNDARY_LOG";
const DEFAULT_DIRECTIVES: &str = "warn,entropy_boundary=info";
const LOG_FILE_PREFIX: &str = "boundary.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn file_writer(log_dir: &Path) -> NonBlocking {
    let _ = std::fs::create_dir_all(log_dir);
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    writer
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber: stderr (stdout carries the report) plus a
/// daily file under `log_dir`. Returns false if one was already installed.
pub fn init(paths: &AppPaths) -> bool {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer(&paths.log_dir));

    tracing_subscriber::registry()
        .with(filter())
        .with(console)
        .with(file)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}

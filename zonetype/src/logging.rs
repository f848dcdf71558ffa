use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "zonetype.log";
const LOG_ENV: &str = "ZONETYPE_LOG";

/// Log to a file in `log_dir`, since the terminal belongs to the UI.
///
/// The filter is read from `ZONETYPE_LOG` and defaults to `info`. Returns `None` if the
/// directory can't be created or a subscriber is already installed. Keep the guard alive
/// until exit, or buffered lines are lost.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(error) = std::fs::create_dir_all(log_dir) {
        eprintln!("Logging disabled: {error}");
        return None;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

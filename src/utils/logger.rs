//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.
//! The filter is taken from `RUST_LOG` when set, otherwise a sensible
//! default keeps the server and tower-http access spans at `info`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "greenhouse_server=info,tower_http=info,http_access=info";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// When `log_dir` points at an existing directory, logs additionally roll
/// into a daily `greenhouse-server.*` file inside it.
pub fn init_logger_with_file(log_filter: Option<&str>, log_dir: Option<&str>) {
    let filter = log_filter
        .map(EnvFilter::new)
        .unwrap_or_else(|| {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "greenhouse-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}

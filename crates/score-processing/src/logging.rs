//! File logging for the transformation pipeline.
//!
//! Logging is configured by an explicit initialization call made once by
//! the process entry point, never as an import-time side effect. Each run
//! gets a fresh timestamped log file under the configured directory; all
//! informational and error messages go there, not to the console.

use crate::error::{PreprocessingError, Result, ResultExt};
use chrono::Local;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Configuration for file logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files are created.
    /// Default: "logs"
    pub dir: PathBuf,

    /// Log level directive (trace, debug, info, warn, error).
    /// Default: "info"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: "info".to_string(),
        }
    }
}

/// Initialize file logging and return the path of the created log file.
///
/// Creates the log directory if absent, opens a file named with the local
/// timestamp (`MM_DD_YYYY_HH_MM_SS.log`), and installs a global
/// `tracing` subscriber writing to it. The filter level comes from the
/// configuration, not from the environment.
///
/// # Errors
///
/// Fails if the directory or file cannot be created, or if a global
/// subscriber has already been installed.
pub fn init_file_logging(config: &LoggingConfig) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.dir)
        .context(format!("creating log directory {}", config.dir.display()))?;

    let file_name = format!("{}.log", Local::now().format("%m_%d_%Y_%H_%M_%S"));
    let log_path = config.dir.join(file_name);
    let file = File::create(&log_path)
        .context(format!("creating log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| {
            PreprocessingError::Internal(format!("failed to install log subscriber: {e}"))
        })?;

    info!("logging initialised, writing to {}", log_path.display());
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A global subscriber can be installed only once per process, so file
    // creation and subscriber installation share a single test.
    #[test]
    fn test_init_creates_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            dir: dir.path().join("logs"),
            level: "debug".to_string(),
        };

        let log_path = init_file_logging(&config).unwrap();

        assert!(log_path.exists());
        assert_eq!(log_path.extension().unwrap(), "log");
        assert!(log_path.starts_with(dir.path().join("logs")));

        // A second initialization must fail rather than silently reconfigure.
        let again = init_file_logging(&config);
        assert!(again.is_err());
    }
}

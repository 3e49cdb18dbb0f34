//! Logging setup
//!
//! Logging is off unless SHELF_LOG is set, so command output stays clean.
//! The value of SHELF_LOG is used as the level for both Shelf crates.
//! Logs go to `config.log_file` when configured, stderr otherwise.

use std::fs::OpenOptions;
use std::sync::Mutex;

use shelf_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable that enables logging and sets its level
const LOG_ENV: &str = "SHELF_LOG";

/// Initialize the tracing subscriber if SHELF_LOG is set
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = EnvFilter::new(filter_directives(&log_level));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            debug!("Logging to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

/// Filter directives scoping the level to Shelf's own crates
fn filter_directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    format!("shelf_core={},shelf_cli={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(filter_directives("debug"), "shelf_core=debug,shelf_cli=debug");
        assert_eq!(filter_directives(""), "shelf_core=info,shelf_cli=info");
        assert_eq!(filter_directives(" warn "), "shelf_core=warn,shelf_cli=warn");
    }
}

mod config;

pub use config::{Config, DisplayConfig, LoggingConfig, ResolverConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/timebox[-dev]/` based on TIMEBOX_ENV.
///
/// Set TIMEBOX_ENV=dev to use development data directory.
/// Set TIMEBOX_DATA_DIR to use an explicit directory instead.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TIMEBOX_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TIMEBOX_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("timebox-dev")
            } else {
                base_dir.join("timebox")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

//! Logging bootstrap for the CLI.
//!
//! The core only talks to the `log` facade; this installs the backend.
//! Output goes to stderr so stdout stays clean for `--json`.
//! `RUST_LOG`, when set, takes precedence over `logging.level`.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Start the stderr logger.
///
/// The returned handle must be kept alive for the rest of the process.
///
/// # Errors
/// Returns a human-readable message when the level string is invalid or the
/// backend cannot start.
pub fn init(level: &str) -> Result<LoggerHandle, String> {
    let level = level.trim();
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    debug!(
        "event=cli_start module=cli status=ok version={} level={}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(handle)
}

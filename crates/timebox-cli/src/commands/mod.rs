pub mod config;
pub mod outline;
pub mod resolve;
pub mod scan;
pub mod validate;
pub mod watch;

use clap::Args;
use std::path::{Path, PathBuf};
use timebox_core::time::{from_millis, parse_instant, to_millis};
use timebox_core::{Item, ItemTable, Millis, Snapshot, SnapshotError};

/// Snapshot, root and root start shared by every tree command.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// JSON snapshot holding the item tree
    #[arg(long)]
    pub items: PathBuf,
    /// Id of the root item
    #[arg(long)]
    pub root: String,
    /// Absolute start of the root (epoch ms or RFC 3339)
    #[arg(long, value_parser = instant_arg, allow_hyphen_values = true)]
    pub start: Millis,
}

/// clap value parser for instants.
pub fn instant_arg(raw: &str) -> Result<Millis, String> {
    parse_instant(raw).ok_or_else(|| {
        format!("invalid instant '{raw}': expected epoch milliseconds or an RFC 3339 timestamp")
    })
}

/// Current wall-clock time. The only place the CLI reads the clock.
pub fn now_millis() -> Millis {
    to_millis(chrono::Utc::now())
}

/// RFC 3339 when representable, raw milliseconds otherwise.
pub fn format_instant(ms: Millis) -> String {
    from_millis(ms)
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Load and check a snapshot file.
pub fn load_table(path: &Path) -> Result<ItemTable, Box<dyn std::error::Error>> {
    let table = Snapshot::load(path)?.table_checked()?;
    Ok(table)
}

pub fn root_item<'a>(items: &'a ItemTable, id: &str) -> Result<&'a Item, SnapshotError> {
    items
        .get(id)
        .ok_or_else(|| SnapshotError::RootNotFound(id.to_string()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

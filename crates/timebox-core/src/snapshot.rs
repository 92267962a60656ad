//! JSON item snapshots.
//!
//! The item tree is owned and persisted elsewhere; this is the read-only
//! document format the CLI loads to drive the resolvers:
//!
//! ```json
//! { "items": [ { "type": "basic", "id": "a", "name": "Email", "duration": 900000 } ] }
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SnapshotError, ValidationError};
use crate::item::{Item, ItemTable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Read and parse a snapshot file.
    ///
    /// # Errors
    /// Returns [`SnapshotError::ReadFailed`] or [`SnapshotError::ParseFailed`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content).map_err(|err| SnapshotError::ParseFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        info!(
            "event=snapshot_load module=snapshot status=ok path={} items={}",
            path.display(),
            snapshot.items.len()
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Ids that appear more than once, in first-repeat order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for item in &self.items {
            if !seen.insert(item.id()) && !duplicates.contains(&item.id()) {
                duplicates.push(item.id());
            }
        }
        duplicates
    }

    /// Build the item table without checks. Later duplicates win.
    pub fn into_table(self) -> ItemTable {
        ItemTable::from_items(self.items)
    }

    /// Build the item table, rejecting duplicate ids and cyclic graphs.
    ///
    /// Dangling child references are logged and kept: the resolvers skip
    /// them.
    ///
    /// # Errors
    /// Returns [`ValidationError::DuplicateId`] or [`ValidationError::Cycle`].
    pub fn table_checked(self) -> Result<ItemTable> {
        if let Some(id) = self.duplicate_ids().first() {
            return Err(ValidationError::DuplicateId(id.to_string()).into());
        }
        let table = self.into_table();
        table.validate()?;
        for (container, missing) in table.dangling_references() {
            warn!(
                "event=dangling_reference module=snapshot container_id={} missing_id={}",
                container, missing
            );
        }
        Ok(table)
    }
}

//! # Timebox Core Library
//!
//! This library resolves what is happening *now* inside a tree of time-boxed
//! tasks. Given an item tree, the absolute start of its root and the current
//! instant, it reports which leaf task is running, which phase each
//! container is in, what comes next and how long until it does.
//!
//! ## Architecture
//!
//! - **Item Model**: leaf tasks, timed containers (children at offsets) and
//!   checklists (children advanced by completion flags), stored in a flat
//!   id-keyed [`ItemTable`]
//! - **Resolver**: one-level phase/active/next resolution for a container
//! - **Scanner**: recursive search for the running (or next) leaf anywhere
//!   below a container
//! - **Depth Guard**: bound on every recursive walk
//! - **Countdown**: the one-line text for a live display
//! - **Monitor**: tick-driven change detection for a live display
//!
//! Nothing here reads the wall clock. Every instant is an argument, so the
//! same inputs always produce the same outputs.
//!
//! ## Key Components
//!
//! - [`resolve_execution_state`]: single-level container status
//! - [`scan_hierarchy`]: deep active/next leaf search
//! - [`format_countdown`]: display line
//! - [`ExecutionMonitor`]: per-tick events
//! - [`Config`]: application configuration management

pub mod context;
pub mod countdown;
pub mod depth;
pub mod error;
pub mod events;
pub mod item;
pub mod monitor;
pub mod outline;
pub mod resolver;
pub mod scanner;
pub mod snapshot;
pub mod storage;
pub mod time;

pub use context::ExecutionContext;
pub use countdown::format_countdown;
pub use depth::{DepthCheck, DepthGuard, DEFAULT_MAX_DEPTH, MAX_DEPTH_MESSAGE};
pub use error::{ConfigError, CoreError, SnapshotError, ValidationError};
pub use events::MonitorEvent;
pub use item::{
    BasicItem, CheckListChild, CheckListItem, Item, ItemKind, ItemTable, SubCalendarChild,
    SubCalendarItem,
};
pub use monitor::{ExecutionMonitor, LeafView, MonitorSnapshot};
pub use outline::{build_outline, OutlineNode, OutlineStatus};
pub use resolver::{current_child, resolve_execution_state, ExecutionPhase, ExecutionState, NextChild};
pub use scanner::{scan_hierarchy, ActiveLeaf, HierarchyStatus};
pub use snapshot::Snapshot;
pub use storage::Config;
pub use time::Millis;

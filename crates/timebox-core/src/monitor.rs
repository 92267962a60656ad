//! Execution monitor.
//!
//! A tick-driven wrapper around the resolvers for a live display. The
//! monitor owns its item snapshot and remembers what it saw on the previous
//! tick so it can report changes as [`MonitorEvent`]s.
//!
//! There is no internal thread and no clock: the caller passes the instant
//! to every `tick()`. Ticking with an earlier instant than before is allowed
//! and simply reports whatever changed.
//!
//! ```ignore
//! let mut monitor = ExecutionMonitor::new(items, "day", day_start, DepthGuard::default())?;
//! // Once per second:
//! for event in monitor.tick(now) { /* ... */ }
//! println!("{}", monitor.snapshot(now).countdown);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::countdown::format_countdown;
use crate::depth::DepthGuard;
use crate::error::SnapshotError;
use crate::events::MonitorEvent;
use crate::item::{Item, ItemTable};
use crate::resolver::{resolve_execution_state, ExecutionPhase};
use crate::scanner::scan_hierarchy;
use crate::time::Millis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafView {
    pub item_id: String,
    pub name: String,
    pub absolute_start_time: Millis,
    /// Remaining ms for a running leaf, ms until start for an upcoming one.
    pub remaining_ms: i64,
}

/// Point-in-time view of the monitored root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub root_id: String,
    pub phase: ExecutionPhase,
    pub countdown: String,
    pub active_leaf: Option<LeafView>,
    pub next_leaf: Option<LeafView>,
    pub completed_children: usize,
    pub total_children: usize,
    pub depth_limit_reached: bool,
    pub at: Millis,
}

#[derive(Debug, Clone)]
pub struct ExecutionMonitor {
    items: ItemTable,
    root_id: String,
    root_start: Millis,
    guard: DepthGuard,
    last_phase: Option<ExecutionPhase>,
    last_leaf: Option<String>,
}

impl ExecutionMonitor {
    /// # Errors
    /// Returns [`SnapshotError::RootNotFound`] if `root_id` is not in `items`.
    pub fn new(
        items: ItemTable,
        root_id: impl Into<String>,
        root_start: Millis,
        guard: DepthGuard,
    ) -> Result<Self, SnapshotError> {
        let root_id = root_id.into();
        if !items.contains(&root_id) {
            return Err(SnapshotError::RootNotFound(root_id));
        }
        Ok(Self {
            items,
            root_id,
            root_start,
            guard,
            last_phase: None,
            last_leaf: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root_start(&self) -> Millis {
        self.root_start
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn last_phase(&self) -> Option<ExecutionPhase> {
        self.last_phase
    }

    fn root(&self) -> Option<&Item> {
        self.items.get(&self.root_id)
    }

    /// Build a full snapshot at `now`. Does not change monitor state.
    pub fn snapshot(&self, now: Millis) -> MonitorSnapshot {
        let Some(root) = self.root() else {
            return MonitorSnapshot {
                root_id: self.root_id.clone(),
                phase: ExecutionPhase::Complete,
                countdown: format_countdown(None, ExecutionPhase::Complete),
                active_leaf: None,
                next_leaf: None,
                completed_children: 0,
                total_children: 0,
                depth_limit_reached: false,
                at: now,
            };
        };

        let state = resolve_execution_state(root, &self.items, now, self.root_start);
        let status = scan_hierarchy(root, &self.items, now, self.root_start, self.guard);

        MonitorSnapshot {
            root_id: self.root_id.clone(),
            phase: state.current_phase,
            countdown: format_countdown(state.next_child.as_ref(), state.current_phase),
            active_leaf: status.active_basic_descendant.map(|leaf| LeafView {
                item_id: leaf.item.id().to_string(),
                name: leaf.item.name().to_string(),
                absolute_start_time: leaf.absolute_start_time,
                remaining_ms: i64::try_from(leaf.time_remaining).unwrap_or(i64::MAX),
            }),
            next_leaf: status.next_basic_descendant.map(|next| LeafView {
                item_id: next.item.id().to_string(),
                name: next.item.name().to_string(),
                absolute_start_time: next.absolute_start_time,
                remaining_ms: next.time_until_start,
            }),
            completed_children: status.completed_children,
            total_children: status.total_children,
            depth_limit_reached: status.depth_limit_reached,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Evaluate at `now` and return what changed since the previous tick.
    pub fn tick(&mut self, now: Millis) -> Vec<MonitorEvent> {
        let snapshot = self.snapshot(now);
        let mut events = Vec::new();

        let leaf = snapshot.active_leaf.as_ref().map(|l| l.item_id.clone());
        let leaf_changed = leaf != self.last_leaf;
        if leaf_changed {
            if let Some(previous) = self.last_leaf.take() {
                events.push(MonitorEvent::LeafFinished {
                    item_id: previous,
                    at: now,
                });
            }
        }

        if self.last_phase != Some(snapshot.phase) {
            events.push(MonitorEvent::PhaseChanged {
                from: self.last_phase,
                to: snapshot.phase,
                at: now,
            });
        }

        if leaf_changed {
            if let Some(active) = &snapshot.active_leaf {
                events.push(MonitorEvent::LeafStarted {
                    item_id: active.item_id.clone(),
                    name: active.name.clone(),
                    at: now,
                });
            }
        }

        if snapshot.phase == ExecutionPhase::Complete
            && self.last_phase != Some(ExecutionPhase::Complete)
        {
            events.push(MonitorEvent::AllComplete { at: now });
        }

        for event in &events {
            debug!(
                "event=monitor_event module=monitor root_id={} at={} detail={:?}",
                self.root_id, now, event
            );
        }

        self.last_phase = Some(snapshot.phase);
        self.last_leaf = leaf;
        events
    }

    /// Swap in a new item snapshot, keeping root and start.
    ///
    /// Previous-tick memory is cleared, so the next tick reports from scratch.
    ///
    /// # Errors
    /// Returns [`SnapshotError::RootNotFound`] if the new table lacks the root.
    pub fn set_items(&mut self, items: ItemTable) -> Result<(), SnapshotError> {
        if !items.contains(&self.root_id) {
            return Err(SnapshotError::RootNotFound(self.root_id.clone()));
        }
        self.items = items;
        self.reset();
        Ok(())
    }

    /// Forget the previous tick.
    pub fn reset(&mut self) {
        self.last_phase = None;
        self.last_leaf = None;
    }
}

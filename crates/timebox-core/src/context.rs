//! Per-evaluation inputs bundled together.
//!
//! Build one per tick and drop it afterwards. Nothing here reads the clock.

use crate::depth::DepthGuard;
use crate::item::{Item, ItemTable};
use crate::outline::{build_outline, OutlineNode};
use crate::resolver::{current_child, resolve_execution_state, ExecutionState};
use crate::scanner::{scan_hierarchy, HierarchyStatus};
use crate::time::Millis;

#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub items: &'a ItemTable,
    pub current_time: Millis,
    pub root_start_time: Millis,
    pub guard: DepthGuard,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(items: &'a ItemTable, current_time: Millis, root_start_time: Millis) -> Self {
        Self {
            items,
            current_time,
            root_start_time,
            guard: DepthGuard::default(),
        }
    }

    pub fn with_guard(mut self, guard: DepthGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&'a Item> {
        self.items.get(id)
    }

    /// Single-level state of `root`, started at `root_start_time`.
    pub fn resolve(&self, root: &'a Item) -> ExecutionState<'a> {
        resolve_execution_state(root, self.items, self.current_time, self.root_start_time)
    }

    pub fn current_child(&self, root: &'a Item) -> Option<&'a Item> {
        current_child(root, self.items, self.current_time, self.root_start_time)
    }

    pub fn scan(&self, root: &'a Item) -> HierarchyStatus<'a> {
        scan_hierarchy(
            root,
            self.items,
            self.current_time,
            self.root_start_time,
            self.guard,
        )
    }

    pub fn outline(&self, root: &'a Item) -> OutlineNode {
        build_outline(
            root,
            self.items,
            self.current_time,
            self.root_start_time,
            self.guard,
        )
    }
}

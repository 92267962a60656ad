//! Hierarchy scanner.
//!
//! Descends through any mix of nested containers to answer "which leaf is
//! actually running right now", or failing that, "which leaf starts next".
//! Descent is depth-first and stops at the first running leaf.
//!
//! - Timed containers shift each child's start by its offset.
//! - Checklists commit to their first open step, which inherits the
//!   checklist's start. Later steps are never considered.
//! - Every descent asks the [`DepthGuard`] first; a refused branch is
//!   dropped and flagged on the result.

use log::debug;
use serde::Serialize;

use crate::depth::DepthGuard;
use crate::item::{Item, ItemTable};
use crate::resolver::{existing_children, sorted_children, NextChild};
use crate::time::{end_of, window_contains, Millis};

/// The leaf running at the probed instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveLeaf<'a> {
    pub item: &'a Item,
    pub absolute_start_time: Millis,
    /// Milliseconds until the leaf's window closes.
    pub time_remaining: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyStatus<'a> {
    /// Direct children that exist in the table.
    pub total_children: usize,
    /// Direct children considered finished.
    pub completed_children: usize,
    pub has_active_basic_descendant: bool,
    pub active_basic_descendant: Option<ActiveLeaf<'a>>,
    /// Only populated when no leaf is running.
    pub next_basic_descendant: Option<NextChild<'a>>,
    /// Some branch was cut off by the depth guard.
    pub depth_limit_reached: bool,
}

impl HierarchyStatus<'_> {
    /// Completed share of direct children, 0.0 ..= 1.0.
    pub fn progress(&self) -> f64 {
        if self.total_children == 0 {
            return 0.0;
        }
        self.completed_children as f64 / self.total_children as f64
    }
}

#[derive(Default)]
struct Descent<'a> {
    active: Option<ActiveLeaf<'a>>,
    next: Option<NextChild<'a>>,
    truncated: bool,
}

struct Scan<'a> {
    items: &'a ItemTable,
    now: Millis,
    guard: DepthGuard,
}

impl<'a> Scan<'a> {
    fn descend(&self, item: &'a Item, start: Millis, depth: usize) -> Descent<'a> {
        match item {
            Item::Basic(leaf) => {
                if window_contains(start, leaf.duration, self.now) {
                    Descent {
                        active: Some(ActiveLeaf {
                            item,
                            absolute_start_time: start,
                            time_remaining: end_of(start, leaf.duration).saturating_sub(self.now)
                                as u64,
                        }),
                        ..Descent::default()
                    }
                } else if start > self.now {
                    Descent {
                        next: Some(NextChild {
                            item,
                            absolute_start_time: start,
                            time_until_start: start.saturating_sub(self.now),
                        }),
                        ..Descent::default()
                    }
                } else {
                    Descent::default()
                }
            }
            Item::SubCalendar(calendar) => {
                let mut best = Descent::default();
                // Start order, so an earlier overlapping child wins like in
                // the single-level resolver.
                for (child, child_item) in sorted_children(calendar, self.items) {
                    let Some(found) = self.enter(
                        item,
                        child_item,
                        start.saturating_add(child.start_offset_ms),
                        depth,
                    ) else {
                        best.truncated = true;
                        continue;
                    };
                    best.truncated |= found.truncated;
                    if found.active.is_some() {
                        return Descent {
                            truncated: best.truncated,
                            ..found
                        };
                    }
                    if let Some(next) = found.next {
                        let earlier = best
                            .next
                            .as_ref()
                            .map_or(true, |b| next.absolute_start_time < b.absolute_start_time);
                        if earlier {
                            best.next = Some(next);
                        }
                    }
                }
                best
            }
            Item::CheckList(list) => {
                let open = list
                    .children
                    .iter()
                    .filter(|child| !child.complete)
                    .find_map(|child| self.items.get(&child.item_id));
                match open {
                    Some(child_item) => self.enter(item, child_item, start, depth).unwrap_or(
                        Descent {
                            truncated: true,
                            ..Descent::default()
                        },
                    ),
                    None => Descent::default(),
                }
            }
        }
    }

    /// Descend into `child` one level below `parent`, if the guard allows.
    fn enter(
        &self,
        parent: &'a Item,
        child: &'a Item,
        start: Millis,
        depth: usize,
    ) -> Option<Descent<'a>> {
        let child_depth = depth + 1;
        if !self.guard.allows(child_depth) {
            debug!(
                "event=depth_limit module=scanner parent_id={} child_id={} depth={}",
                parent.id(),
                child.id(),
                child_depth
            );
            return None;
        }
        Some(self.descend(child, start, child_depth))
    }
}

fn completion_counts(container: &Item, items: &ItemTable, now: Millis, own_start: Millis) -> (usize, usize) {
    match container {
        Item::SubCalendar(calendar) => {
            let children = sorted_children(calendar, items);
            let completed = children
                .iter()
                .filter(|(child, item)| {
                    let start = own_start.saturating_add(child.start_offset_ms);
                    now >= end_of(start, item.duration())
                })
                .count();
            (children.len(), completed)
        }
        Item::CheckList(list) => {
            let children = existing_children(list, items);
            let completed = children.iter().filter(|(child, _)| child.complete).count();
            (children.len(), completed)
        }
        Item::Basic(_) => (0, 0),
    }
}

/// Scan the subtree under `container` at `now`.
///
/// `own_start` is the container's absolute start. Counts cover direct
/// children only; the active/next leaf search covers the whole subtree.
pub fn scan_hierarchy<'a>(
    container: &'a Item,
    items: &'a ItemTable,
    now: Millis,
    own_start: Millis,
    guard: DepthGuard,
) -> HierarchyStatus<'a> {
    let (total_children, completed_children) = completion_counts(container, items, now, own_start);

    let scan = Scan { items, now, guard };
    let descent = if guard.allows(0) {
        scan.descend(container, own_start, 0)
    } else {
        Descent {
            truncated: true,
            ..Descent::default()
        }
    };

    let has_active = descent.active.is_some();
    HierarchyStatus {
        total_children,
        completed_children,
        has_active_basic_descendant: has_active,
        next_basic_descendant: if has_active { None } else { descent.next },
        active_basic_descendant: descent.active,
        depth_limit_reached: descent.truncated,
    }
}

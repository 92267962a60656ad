//! Execution outline: the whole tree annotated with per-node status.
//!
//! This is the top-down walker a display uses to draw every level at once.
//! Containers get their phase from the single-level resolver, leaves get a
//! status from their own window. Checked-off checklist steps are done. The depth guard is checked before each
//! level of children is built.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

use crate::depth::{DepthGuard, MAX_DEPTH_MESSAGE};
use crate::item::{Item, ItemKind, ItemTable};
use crate::resolver::{resolve_execution_state, sorted_children, ExecutionPhase};
use crate::time::{end_of, window_contains, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineStatus {
    Pending,
    Running,
    Done,
    PreStart,
    Active,
    Gap,
    Complete,
}

impl From<ExecutionPhase> for OutlineStatus {
    fn from(phase: ExecutionPhase) -> Self {
        match phase {
            ExecutionPhase::PreStart => Self::PreStart,
            ExecutionPhase::Active => Self::Active,
            ExecutionPhase::Gap => Self::Gap,
            ExecutionPhase::Complete => Self::Complete,
        }
    }
}

impl fmt::Display for OutlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::PreStart => "pre_start",
            Self::Active => "active",
            Self::Gap => "gap",
            Self::Complete => "complete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub item_id: String,
    pub name: String,
    pub kind: ItemKind,
    pub depth: usize,
    pub absolute_start: Millis,
    pub status: OutlineStatus,
    /// Checklist completion flag, for checklist steps only.
    #[serde(default)]
    pub checked: Option<bool>,
    /// Children were not built because of the depth guard.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Indented plain-text rendering, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        let indent = "  ".repeat(self.depth);
        let check = match self.checked {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        let _ = writeln!(out, "{indent}{check}{} ({})", self.name, self.status);
        if self.truncated {
            let _ = writeln!(out, "{indent}  {MAX_DEPTH_MESSAGE}");
        }
        for child in &self.children {
            child.render_into(out);
        }
    }

    /// Depth-first iterator over this node and its descendants.
    pub fn walk(&self) -> Vec<&OutlineNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }
}

struct Walker<'a> {
    items: &'a ItemTable,
    now: Millis,
    guard: DepthGuard,
}

impl Walker<'_> {
    fn node(&self, item: &Item, start: Millis, depth: usize, checked: Option<bool>) -> OutlineNode {
        let status = match item {
            // A checked-off step is finished whatever its window says.
            _ if checked == Some(true) => OutlineStatus::Done,
            Item::Basic(leaf) => {
                if window_contains(start, leaf.duration, self.now) {
                    OutlineStatus::Running
                } else if self.now >= end_of(start, leaf.duration) {
                    OutlineStatus::Done
                } else {
                    OutlineStatus::Pending
                }
            }
            _ => resolve_execution_state(item, self.items, self.now, start)
                .current_phase
                .into(),
        };

        let mut node = OutlineNode {
            item_id: item.id().to_string(),
            name: item.name().to_string(),
            kind: item.kind(),
            depth,
            absolute_start: start,
            status,
            checked,
            truncated: false,
            children: Vec::new(),
        };

        let children = self.children(item, start);
        if children.is_empty() {
            return node;
        }
        if self.guard.check(depth + 1).is_limit() {
            node.truncated = true;
            return node;
        }
        node.children = children
            .into_iter()
            .map(|(child, child_start, child_checked)| {
                self.node(child, child_start, depth + 1, child_checked)
            })
            .collect();
        node
    }

    /// Existing children with their absolute start, in display order.
    fn children<'b>(&'b self, item: &'b Item, start: Millis) -> Vec<(&'b Item, Millis, Option<bool>)> {
        match item {
            Item::Basic(_) => Vec::new(),
            Item::SubCalendar(calendar) => sorted_children(calendar, self.items)
                .into_iter()
                .map(|(child, child_item)| {
                    (child_item, start.saturating_add(child.start_offset_ms), None)
                })
                .collect(),
            Item::CheckList(list) => list
                .children
                .iter()
                .filter_map(|child| {
                    self.items
                        .get(&child.item_id)
                        .map(|child_item| (child_item, start, Some(child.complete)))
                })
                .collect(),
        }
    }
}

/// Build the outline for `root` started at `root_start`.
pub fn build_outline(
    root: &Item,
    items: &ItemTable,
    now: Millis,
    root_start: Millis,
    guard: DepthGuard,
) -> OutlineNode {
    Walker { items, now, guard }.node(root, root_start, 0, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{BasicItem, CheckListItem, SubCalendarItem};

    fn items() -> ItemTable {
        ItemTable::from_items(vec![
            BasicItem::with_id("a", "Email", 1_000).into(),
            BasicItem::with_id("b", "Write", 1_000).into(),
            CheckListItem::with_id("list", "Chores", 0)
                .with_child("a", true)
                .with_child("b", false)
                .into(),
            SubCalendarItem::with_id("day", "Day", 10_000)
                .with_child("list", 2_000)
                .with_child("a", 0)
                .into(),
        ])
    }

    #[test]
    fn outline_orders_timed_children_by_offset() {
        let items = items();
        let day = items.get("day").unwrap();
        let outline = build_outline(day, &items, 500, 0, DepthGuard::default());

        assert_eq!(outline.status, OutlineStatus::Active);
        let ids: Vec<&str> = outline.children.iter().map(|c| c.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "list"]);
        assert_eq!(outline.children[0].status, OutlineStatus::Running);
        assert_eq!(outline.children[1].absolute_start, 2_000);
        assert_eq!(outline.children[1].status, OutlineStatus::Active);
    }

    #[test]
    fn checklist_steps_inherit_start_and_carry_flag() {
        let items = items();
        let day = items.get("day").unwrap();
        let outline = build_outline(day, &items, 2_500, 0, DepthGuard::default());
        let list = &outline.children[1];
        assert_eq!(list.children[0].checked, Some(true));
        assert_eq!(list.children[0].status, OutlineStatus::Done);
        assert_eq!(list.children[1].checked, Some(false));
        assert_eq!(list.children[1].absolute_start, 2_000);
        assert_eq!(list.children[1].status, OutlineStatus::Running);
        assert_eq!(outline.walk().len(), 5);
    }

    #[test]
    fn checked_step_renders_done_inside_its_window() {
        let items = items();
        let day = items.get("day").unwrap();
        // "a" runs at 2_500 from the list's start, but it is checked off.
        let text = build_outline(day, &items, 2_500, 0, DepthGuard::default()).render();
        assert!(text.contains("    [x] Email (done)\n"), "{text}");
        assert!(text.contains("    [ ] Write (running)\n"), "{text}");
    }

    #[test]
    fn pre_start_label_matches_phase_spelling() {
        let items = items();
        let day = items.get("day").unwrap();
        let outline = build_outline(day, &items, -1, 0, DepthGuard::default());
        assert_eq!(outline.status, OutlineStatus::PreStart);
        assert_eq!(outline.status.to_string(), ExecutionPhase::PreStart.to_string());
        assert!(outline.render().starts_with("Day (pre_start)\n"));
    }

    #[test]
    fn guard_truncates_and_renders_message() {
        let items = items();
        let day = items.get("day").unwrap();
        let outline = build_outline(day, &items, 0, 0, DepthGuard::new(2));
        let list = &outline.children[1];
        assert!(list.truncated);
        assert!(list.children.is_empty());

        let text = outline.render();
        assert!(text.contains("Maximum nesting depth reached"));
        assert!(text.starts_with("Day (active)\n"));
    }

    #[test]
    fn cyclic_graph_is_bounded() {
        let items = ItemTable::from_items(vec![
            CheckListItem::with_id("x", "x", 0).with_child("y", false).into(),
            CheckListItem::with_id("y", "y", 0).with_child("x", false).into(),
        ]);
        let x = items.get("x").unwrap();
        let outline = build_outline(x, &items, 0, 0, DepthGuard::default());
        let nodes = outline.walk();
        assert_eq!(nodes.len(), 10);
        assert!(nodes.last().unwrap().truncated);
    }
}

//! Single-level resolver.
//!
//! Looks exactly one level below a container: which direct child is running,
//! which one is next, and what phase the container is in. Use
//! [`crate::scanner`] to find the leaf that is running anywhere below.
//!
//! Every function here is pure. The caller supplies both the current instant
//! and the container's absolute start.

mod checklist;
mod phase;
mod timed;

pub use checklist::{current_check_list_child, resolve_check_list};
pub use phase::{ExecutionPhase, ExecutionState, NextChild};
pub use timed::resolve_sub_calendar;

pub(crate) use checklist::existing_children;
pub(crate) use timed::sorted_children;

use crate::item::{Item, ItemTable};
use crate::time::Millis;

/// Full execution status of `container` at `now`.
///
/// Leaves have no children and resolve like an empty container.
pub fn resolve_execution_state<'a>(
    container: &'a Item,
    items: &'a ItemTable,
    now: Millis,
    own_start: Millis,
) -> ExecutionState<'a> {
    match container {
        Item::SubCalendar(calendar) => resolve_sub_calendar(calendar, items, now, own_start),
        Item::CheckList(list) => resolve_check_list(list, items, now),
        Item::Basic(_) => ExecutionState::complete(),
    }
}

/// The single direct child considered current.
///
/// Matches `resolve_execution_state(..).active_child` except for a checklist
/// whose steps are all complete, where this returns the last step.
pub fn current_child<'a>(
    container: &'a Item,
    items: &'a ItemTable,
    now: Millis,
    own_start: Millis,
) -> Option<&'a Item> {
    match container {
        Item::SubCalendar(calendar) => {
            resolve_sub_calendar(calendar, items, now, own_start).active_child
        }
        Item::CheckList(list) => current_check_list_child(list, items),
        Item::Basic(_) => None,
    }
}

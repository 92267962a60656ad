//! Single-level resolution for timed containers.
//!
//! Children are ordered by start offset on every call; storage order is
//! never trusted. The first child (in start order) whose window contains the
//! elapsed time wins, so an earlier overlapping child keeps running past a
//! later child's nominal start.

use super::phase::{ExecutionPhase, ExecutionState, NextChild};
use crate::item::{Item, ItemTable, SubCalendarChild, SubCalendarItem};
use crate::time::{end_of, window_contains, Millis};

/// Existing children sorted by offset. Ties keep storage order.
pub(crate) fn sorted_children<'a>(
    container: &'a SubCalendarItem,
    items: &'a ItemTable,
) -> Vec<(&'a SubCalendarChild, &'a Item)> {
    let mut children: Vec<_> = container
        .children
        .iter()
        .filter_map(|child| items.get(&child.item_id).map(|item| (child, item)))
        .collect();
    children.sort_by_key(|(child, _)| child.start_offset_ms);
    children
}

fn next_child<'a>(
    child: &SubCalendarChild,
    item: &'a Item,
    own_start: Millis,
    now: Millis,
) -> NextChild<'a> {
    let absolute_start_time = own_start.saturating_add(child.start_offset_ms);
    NextChild {
        item,
        absolute_start_time,
        time_until_start: absolute_start_time.saturating_sub(now),
    }
}

pub fn resolve_sub_calendar<'a>(
    container: &'a SubCalendarItem,
    items: &'a ItemTable,
    now: Millis,
    own_start: Millis,
) -> ExecutionState<'a> {
    let children = sorted_children(container, items);
    if children.is_empty() {
        return ExecutionState::complete();
    }

    let elapsed = now.saturating_sub(own_start);

    if elapsed < 0 {
        let (child, item) = children[0];
        return ExecutionState {
            active_child: None,
            next_child: Some(next_child(child, item, own_start, now)),
            gap_period: false,
            current_phase: ExecutionPhase::PreStart,
            active_child_index: None,
            time_remaining: None,
            active_child_remaining: None,
        };
    }

    let own_end = end_of(own_start, container.duration);
    if now >= own_end {
        return ExecutionState::complete();
    }
    let time_remaining = Some(own_end.saturating_sub(now) as u64);

    let active = children.iter().enumerate().find(|(_, (child, item))| {
        window_contains(child.start_offset_ms, item.duration(), elapsed)
    });

    let upcoming = children
        .iter()
        .find(|(child, _)| child.start_offset_ms > elapsed)
        .map(|&(child, item)| next_child(child, item, own_start, now));

    match active {
        Some((index, (child, item))) => {
            let child_end = end_of(child.start_offset_ms, item.duration());
            ExecutionState {
                active_child: Some(*item),
                next_child: upcoming,
                gap_period: false,
                current_phase: ExecutionPhase::Active,
                active_child_index: Some(index),
                time_remaining,
                active_child_remaining: Some(child_end.saturating_sub(elapsed) as u64),
            }
        }
        None => ExecutionState {
            active_child: None,
            next_child: upcoming,
            gap_period: true,
            current_phase: ExecutionPhase::Gap,
            active_child_index: None,
            time_remaining,
            active_child_remaining: None,
        },
    }
}

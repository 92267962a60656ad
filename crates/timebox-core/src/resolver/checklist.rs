//! Single-level resolution for checklists.
//!
//! Checklists have no time semantics: progression is driven by the
//! `complete` flags alone.

use super::phase::{ExecutionPhase, ExecutionState, NextChild};
use crate::item::{CheckListChild, CheckListItem, Item, ItemTable};
use crate::time::Millis;

/// Existing children in list order.
pub(crate) fn existing_children<'a>(
    container: &'a CheckListItem,
    items: &'a ItemTable,
) -> Vec<(&'a CheckListChild, &'a Item)> {
    container
        .children
        .iter()
        .filter_map(|child| items.get(&child.item_id).map(|item| (child, item)))
        .collect()
}

pub fn resolve_check_list<'a>(
    container: &'a CheckListItem,
    items: &'a ItemTable,
    now: Millis,
) -> ExecutionState<'a> {
    let children = existing_children(container, items);
    let mut open = children.iter().filter(|(child, _)| !child.complete);

    let Some(&(_, active)) = open.next() else {
        return ExecutionState::complete();
    };

    let next_child = open.next().map(|&(_, item)| NextChild {
        item,
        absolute_start_time: now,
        time_until_start: 0,
    });

    ExecutionState {
        active_child: Some(active),
        next_child,
        gap_period: false,
        current_phase: ExecutionPhase::Active,
        active_child_index: None,
        time_remaining: None,
        active_child_remaining: None,
    }
}

/// First open step, or the last step once every one is complete.
///
/// Differs from [`resolve_check_list`], which reports no active child for a
/// finished list. Both behaviors are kept until product decides which one
/// the display should use.
pub fn current_check_list_child<'a>(
    container: &'a CheckListItem,
    items: &'a ItemTable,
) -> Option<&'a Item> {
    let children = existing_children(container, items);
    children
        .iter()
        .find(|(child, _)| !child.complete)
        .or_else(|| children.last())
        .map(|&(_, item)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::BasicItem;

    fn fixture(flags: &[bool]) -> ItemTable {
        let mut list = CheckListItem::with_id("list", "Morning", 0);
        let mut items: Vec<Item> = Vec::new();
        for (i, complete) in flags.iter().enumerate() {
            let id = format!("step{}", i + 1);
            items.push(BasicItem::with_id(&id, &id, 1_000).into());
            list = list.with_child(id, *complete);
        }
        items.push(list.into());
        ItemTable::from_items(items)
    }

    fn list(items: &ItemTable) -> &CheckListItem {
        match items.get("list") {
            Some(Item::CheckList(list)) => list,
            _ => panic!("list missing"),
        }
    }

    #[test]
    fn first_incomplete_is_active() {
        let items = fixture(&[true, false, false]);
        let state = resolve_check_list(list(&items), &items, 42);
        assert_eq!(state.current_phase, ExecutionPhase::Active);
        assert_eq!(state.active_child.unwrap().id(), "step2");
        let next = state.next_child.unwrap();
        assert_eq!(next.item.id(), "step3");
        assert_eq!(next.absolute_start_time, 42);
        assert_eq!(next.time_until_start, 0);
    }

    #[test]
    fn next_skips_completed_steps() {
        let items = fixture(&[false, true, false]);
        let state = resolve_check_list(list(&items), &items, 0);
        assert_eq!(state.active_child.unwrap().id(), "step1");
        assert_eq!(state.next_child.unwrap().item.id(), "step3");
    }

    #[test]
    fn all_complete_has_no_active_child() {
        let items = fixture(&[true, true, true]);
        let state = resolve_check_list(list(&items), &items, 0);
        assert_eq!(state, ExecutionState::complete());
    }

    #[test]
    fn current_child_falls_back_to_last() {
        let items = fixture(&[true, true, true]);
        assert_eq!(current_check_list_child(list(&items), &items).unwrap().id(), "step3");

        let items = fixture(&[true, false]);
        assert_eq!(current_check_list_child(list(&items), &items).unwrap().id(), "step2");
    }

    #[test]
    fn empty_list_is_complete() {
        let items = fixture(&[]);
        assert!(resolve_check_list(list(&items), &items, 0).is_complete());
        assert!(current_check_list_child(list(&items), &items).is_none());
    }

    #[test]
    fn time_does_not_matter() {
        let items = fixture(&[false, false]);
        let early = resolve_check_list(list(&items), &items, -1_000_000);
        let late = resolve_check_list(list(&items), &items, 1_000_000);
        assert_eq!(early.active_child, late.active_child);
        assert_eq!(early.current_phase, ExecutionPhase::Active);
    }
}

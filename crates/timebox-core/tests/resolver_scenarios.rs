//! Integration tests for single-level resolution scenarios.

use timebox_core::{
    current_child, format_countdown, resolve_execution_state, BasicItem, CheckListItem,
    ExecutionPhase, Item, ItemTable, SubCalendarItem,
};

/// Container "root" with the given `(id, offset, duration)` children.
fn timed(duration: u64, children: &[(&str, i64, u64)]) -> ItemTable {
    let mut root = SubCalendarItem::with_id("root", "Root", duration);
    let mut items: Vec<Item> = Vec::new();
    for (id, offset, child_duration) in children {
        items.push(BasicItem::with_id(*id, format!("Task {id}"), *child_duration).into());
        root = root.with_child(*id, *offset);
    }
    items.push(root.into());
    ItemTable::from_items(items)
}

fn active_id(items: &ItemTable, now: i64, start: i64) -> Option<String> {
    let root = items.get("root").unwrap();
    resolve_execution_state(root, items, now, start)
        .active_child
        .map(|item| item.id().to_string())
}

#[test]
fn scenario_a_back_to_back_children() {
    let items = timed(2_000, &[("child1", 0, 1_000), ("child2", 1_000, 1_000)]);

    assert_eq!(active_id(&items, 1_500, 1_000).as_deref(), Some("child1"));
    assert_eq!(active_id(&items, 2_500, 1_000).as_deref(), Some("child2"));
    assert_eq!(active_id(&items, 1_999, 1_000).as_deref(), Some("child1"));
    assert_eq!(active_id(&items, 2_000, 1_000).as_deref(), Some("child2"));
}

#[test]
fn scenario_b_gap_between_children() {
    let items = timed(1_500, &[("child1", 0, 500), ("child2", 1_000, 500)]);
    let root = items.get("root").unwrap();
    let start = 1_000;

    let state = resolve_execution_state(root, &items, start + 250, start);
    assert_eq!(state.active_child.unwrap().id(), "child1");
    assert!(!state.gap_period);

    let state = resolve_execution_state(root, &items, start + 750, start);
    assert!(state.gap_period);
    assert_eq!(state.current_phase, ExecutionPhase::Gap);
    assert!(state.active_child.is_none());
    let next = state.next_child.as_ref().unwrap();
    assert_eq!(next.item.id(), "child2");
    assert_eq!(next.time_until_start, 250);
    assert_eq!(next.absolute_start_time, 2_000);
    assert_eq!(
        format_countdown(state.next_child.as_ref(), state.current_phase),
        "Next: Task child2 in 0s"
    );

    let state = resolve_execution_state(root, &items, start + 1_250, start);
    assert_eq!(state.active_child.unwrap().id(), "child2");
}

#[test]
fn scenario_c_empty_container_is_complete_at_any_time() {
    let items = timed(10_000, &[]);
    let root = items.get("root").unwrap();
    for now in [-5_000, 0, 999, 1_000, 5_000, 50_000] {
        let state = resolve_execution_state(root, &items, now, 1_000);
        assert_eq!(state.current_phase, ExecutionPhase::Complete, "now = {now}");
        assert!(state.active_child.is_none());
        assert!(state.next_child.is_none());
    }
}

#[test]
fn scenario_d_checklist_progression() {
    let items = ItemTable::from_items(vec![
        BasicItem::with_id("s1", "Stretch", 60_000).into(),
        BasicItem::with_id("s2", "Shower", 60_000).into(),
        BasicItem::with_id("s3", "Coffee", 60_000).into(),
        CheckListItem::with_id("list", "Morning", 0)
            .with_child("s1", true)
            .with_child("s2", true)
            .with_child("s3", false)
            .into(),
        CheckListItem::with_id("done", "Morning (finished)", 0)
            .with_child("s1", true)
            .with_child("s2", true)
            .with_child("s3", true)
            .into(),
    ]);

    let list = items.get("list").unwrap();
    let state = resolve_execution_state(list, &items, 0, 0);
    assert_eq!(state.current_phase, ExecutionPhase::Active);
    assert_eq!(state.active_child.unwrap().id(), "s3");

    let done = items.get("done").unwrap();
    let state = resolve_execution_state(done, &items, 0, 0);
    assert_eq!(state.current_phase, ExecutionPhase::Complete);
    assert!(state.active_child.is_none());

    // The single-result helper keeps its own fallback.
    assert_eq!(current_child(done, &items, 0, 0).unwrap().id(), "s3");
}

#[test]
fn boundaries_are_half_open() {
    let items = timed(10_000, &[("a", 3_000, 1_000)]);
    let start = 100;

    assert_eq!(active_id(&items, start + 2_999, start), None);
    assert_eq!(active_id(&items, start + 3_000, start).as_deref(), Some("a"));
    assert_eq!(active_id(&items, start + 3_999, start).as_deref(), Some("a"));
    assert_eq!(active_id(&items, start + 4_000, start), None);
}

#[test]
fn container_window_is_half_open() {
    let items = timed(2_000, &[("a", 0, 5_000)]);
    let root = items.get("root").unwrap();

    let state = resolve_execution_state(root, &items, 1_999, 0);
    assert_eq!(state.current_phase, ExecutionPhase::Active);
    assert_eq!(state.time_remaining, Some(1));

    let state = resolve_execution_state(root, &items, 2_000, 0);
    assert_eq!(state.current_phase, ExecutionPhase::Complete);
    assert!(state.next_child.is_none());
}

#[test]
fn pre_start_countdown_uses_smallest_offset() {
    let items = timed(
        10_000,
        &[("c", 6_000, 100), ("a", 2_000, 100), ("b", 4_000, 100)],
    );
    let root = items.get("root").unwrap();
    let state = resolve_execution_state(root, &items, 0, 5_000);

    assert_eq!(state.current_phase, ExecutionPhase::PreStart);
    let next = state.next_child.as_ref().unwrap();
    assert_eq!(next.item.id(), "a");
    assert_eq!(next.time_until_start, 7_000);
    assert_eq!(
        format_countdown(state.next_child.as_ref(), state.current_phase),
        "Preparing to start: Task a"
    );
}

#[test]
fn gap_after_last_child_has_no_next() {
    let items = timed(10_000, &[("a", 0, 1_000)]);
    let root = items.get("root").unwrap();
    let state = resolve_execution_state(root, &items, 5_000, 0);
    assert_eq!(state.current_phase, ExecutionPhase::Gap);
    assert!(state.next_child.is_none());
    assert_eq!(
        format_countdown(state.next_child.as_ref(), state.current_phase),
        "All tasks complete"
    );
}

#[test]
fn long_gap_countdown_shows_minutes() {
    let items = timed(3_600_000, &[("a", 0, 60_000), ("b", 600_000, 60_000)]);
    let root = items.get("root").unwrap();
    // 60s in; b starts 540s later = 9m 0s.
    let state = resolve_execution_state(root, &items, 60_000, 0);
    assert_eq!(
        format_countdown(state.next_child.as_ref(), state.current_phase),
        "Next: Task b in 9m 0s"
    );
    let state = resolve_execution_state(root, &items, 60_001, 0);
    assert_eq!(
        format_countdown(state.next_child.as_ref(), state.current_phase),
        "Next: Task b in 8m 59s"
    );
}

//! One-line countdown text for the live display.

use crate::resolver::{ExecutionPhase, NextChild};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;

/// Whole minutes and leftover whole seconds in `ms`. Negative counts clamp
/// to zero.
pub fn split_minutes_seconds(ms: i64) -> (i64, i64) {
    let ms = ms.max(0);
    (ms / MS_PER_MINUTE, (ms % MS_PER_MINUTE) / MS_PER_SECOND)
}

/// Format the countdown line for `next` in `phase`.
pub fn format_countdown(next: Option<&NextChild<'_>>, phase: ExecutionPhase) -> String {
    let Some(next) = next else {
        return "All tasks complete".to_string();
    };
    let name = next.item.name();

    match phase {
        ExecutionPhase::PreStart => format!("Preparing to start: {name}"),
        ExecutionPhase::Gap => {
            let (minutes, seconds) = split_minutes_seconds(next.time_until_start);
            if minutes > 0 {
                format!("Next: {name} in {minutes}m {seconds}s")
            } else {
                format!("Next: {name} in {seconds}s")
            }
        }
        ExecutionPhase::Active | ExecutionPhase::Complete => format!("Next: {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{BasicItem, Item};

    fn next(item: &Item, time_until_start: i64) -> NextChild<'_> {
        NextChild {
            item,
            absolute_start_time: 0,
            time_until_start,
        }
    }

    #[test]
    fn nothing_next_means_done() {
        assert_eq!(format_countdown(None, ExecutionPhase::Gap), "All tasks complete");
        assert_eq!(format_countdown(None, ExecutionPhase::PreStart), "All tasks complete");
    }

    #[test]
    fn pre_start_names_first_child() {
        let item: Item = BasicItem::with_id("a", "Standup", 1).into();
        assert_eq!(
            format_countdown(Some(&next(&item, 90_000)), ExecutionPhase::PreStart),
            "Preparing to start: Standup"
        );
    }

    #[test]
    fn gap_shows_minutes_and_seconds() {
        let item: Item = BasicItem::with_id("a", "Review", 1).into();
        assert_eq!(
            format_countdown(Some(&next(&item, 125_999)), ExecutionPhase::Gap),
            "Next: Review in 2m 5s"
        );
    }

    #[test]
    fn gap_minute_boundary() {
        let item: Item = BasicItem::with_id("a", "Review", 1).into();
        assert_eq!(
            format_countdown(Some(&next(&item, 59_999)), ExecutionPhase::Gap),
            "Next: Review in 59s"
        );
        assert_eq!(
            format_countdown(Some(&next(&item, 60_000)), ExecutionPhase::Gap),
            "Next: Review in 1m 0s"
        );
        assert_eq!(
            format_countdown(Some(&next(&item, 999)), ExecutionPhase::Gap),
            "Next: Review in 0s"
        );
    }

    #[test]
    fn active_shows_name_only() {
        let item: Item = BasicItem::with_id("a", "Lunch", 1).into();
        assert_eq!(
            format_countdown(Some(&next(&item, 5_000)), ExecutionPhase::Active),
            "Next: Lunch"
        );
    }

    #[test]
    fn negative_remaining_clamps() {
        assert_eq!(split_minutes_seconds(-5_000), (0, 0));
        assert_eq!(split_minutes_seconds(250), (0, 0));
        assert_eq!(split_minutes_seconds(61_500), (1, 1));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::item::Item;
use crate::time::Millis;

/// Coarse execution state of a container at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPhase {
    PreStart,
    Active,
    Gap,
    Complete,
}

impl ExecutionPhase {
    /// Position in `PreStart -> (Active|Gap)* -> Complete`.
    ///
    /// `Active` and `Gap` share a rank: a container may alternate between
    /// them but never returns to `PreStart` or leaves `Complete`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::PreStart => 0,
            Self::Active | Self::Gap => 1,
            Self::Complete => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreStart => "pre_start",
            Self::Active => "active",
            Self::Gap => "gap",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nearest child that has not started yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextChild<'a> {
    pub item: &'a Item,
    pub absolute_start_time: Millis,
    /// Milliseconds until `absolute_start_time`.
    pub time_until_start: i64,
}

/// Result of resolving one container one level down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionState<'a> {
    pub active_child: Option<&'a Item>,
    pub next_child: Option<NextChild<'a>>,
    /// Started, not ended, and nothing running.
    pub gap_period: bool,
    pub current_phase: ExecutionPhase,
    /// Index of the active child in start order. Timed containers only.
    pub active_child_index: Option<usize>,
    /// Milliseconds until the container's own window closes.
    pub time_remaining: Option<u64>,
    /// Milliseconds left in the active child's window.
    pub active_child_remaining: Option<u64>,
}

impl<'a> ExecutionState<'a> {
    /// Nothing left to run.
    pub fn complete() -> Self {
        Self {
            active_child: None,
            next_child: None,
            gap_period: false,
            current_phase: ExecutionPhase::Complete,
            active_child_index: None,
            time_remaining: None,
            active_child_remaining: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_phase == ExecutionPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_phases() {
        assert!(ExecutionPhase::PreStart.rank() < ExecutionPhase::Active.rank());
        assert_eq!(ExecutionPhase::Active.rank(), ExecutionPhase::Gap.rank());
        assert!(ExecutionPhase::Gap.rank() < ExecutionPhase::Complete.rank());
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&ExecutionPhase::PreStart).unwrap();
        assert_eq!(json, "\"pre_start\"");
    }
}

use serde::{Deserialize, Serialize};

use crate::resolver::ExecutionPhase;
use crate::time::Millis;

/// Every observed change between two monitor ticks produces an event.
/// `at` is the instant the tick was evaluated for, not wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MonitorEvent {
    /// Root container moved to a new phase. `from` is `None` on the first tick.
    PhaseChanged {
        from: Option<ExecutionPhase>,
        to: ExecutionPhase,
        at: Millis,
    },
    /// A leaf became the running leaf.
    LeafStarted {
        item_id: String,
        name: String,
        at: Millis,
    },
    /// The previously running leaf is no longer running.
    LeafFinished {
        item_id: String,
        at: Millis,
    },
    /// Root container entered `Complete`.
    AllComplete {
        at: Millis,
    },
}

impl MonitorEvent {
    pub fn at(&self) -> Millis {
        match self {
            Self::PhaseChanged { at, .. }
            | Self::LeafStarted { at, .. }
            | Self::LeafFinished { at, .. }
            | Self::AllComplete { at } => *at,
        }
    }
}

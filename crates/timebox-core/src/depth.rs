//! Nesting bound for recursive walks over the item graph.
//!
//! The graph is not checked for cycles at traversal time, so every walker
//! asks the guard before descending one more level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Text shown in place of a subtree cut off by the guard.
pub const MAX_DEPTH_MESSAGE: &str = "Maximum nesting depth reached";

/// Outcome of a depth check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthCheck {
    Continue,
    LimitReached,
}

impl DepthCheck {
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::LimitReached)
    }
}

impl fmt::Display for DepthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("ok"),
            Self::LimitReached => f.write_str(MAX_DEPTH_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthGuard {
    max_depth: usize,
}

impl DepthGuard {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `depth < max_depth`.
    pub fn allows(&self, depth: usize) -> bool {
        depth < self.max_depth
    }

    pub fn check(&self, depth: usize) -> DepthCheck {
        if self.allows(depth) {
            DepthCheck::Continue
        } else {
            DepthCheck::LimitReached
        }
    }
}

impl Default for DepthGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_up_to_nine() {
        let guard = DepthGuard::default();
        assert!(guard.allows(0));
        assert!(guard.allows(9));
        assert!(!guard.allows(10));
        assert!(!guard.allows(11));
    }

    #[test]
    fn check_signals_limit() {
        let guard = DepthGuard::new(2);
        assert_eq!(guard.check(1), DepthCheck::Continue);
        assert_eq!(guard.check(2), DepthCheck::LimitReached);
        assert_eq!(guard.check(2).to_string(), "Maximum nesting depth reached");
    }

    #[test]
    fn zero_depth_guard_allows_nothing() {
        assert!(DepthGuard::new(0).check(0).is_limit());
    }
}

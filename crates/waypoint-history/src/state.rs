//! Traversal state
//!
//! ```text
//! Neither      single entry, or empty
//! BackOnly     cursor at the newest entry
//! ForwardOnly  cursor at the oldest entry
//! Both         cursor in the middle
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalState {
    Neither,
    BackOnly,
    ForwardOnly,
    Both,
}

impl TraversalState {
    pub fn from_flags(can_go_back: bool, can_go_forward: bool) -> Self {
        match (can_go_back, can_go_forward) {
            (false, false) => TraversalState::Neither,
            (true, false) => TraversalState::BackOnly,
            (false, true) => TraversalState::ForwardOnly,
            (true, true) => TraversalState::Both,
        }
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self, TraversalState::BackOnly | TraversalState::Both)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self, TraversalState::ForwardOnly | TraversalState::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalState::Neither => "neither",
            TraversalState::BackOnly => "back_only",
            TraversalState::ForwardOnly => "forward_only",
            TraversalState::Both => "both",
        }
    }
}

impl std::fmt::Display for TraversalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

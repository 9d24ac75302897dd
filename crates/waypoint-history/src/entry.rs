//! History entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A visited location. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Monotonic within one history
    pub sequence: u64,
    /// Concrete location: normalized path plus query string, if any
    pub path: String,
    /// Name of the route the location matched
    pub route_name: String,
    pub visited_at: DateTime<Utc>,
}

impl NavigationEntry {
    pub(crate) fn new(sequence: u64, path: String, route_name: String) -> Self {
        Self {
            sequence,
            path,
            route_name,
            visited_at: Utc::now(),
        }
    }
}

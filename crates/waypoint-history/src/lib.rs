//! Waypoint Navigation History
//!
//! Browser-style session history:
//! - `push` appends and discards everything forward of the cursor
//! - `replace` swaps the entry under the cursor
//! - `back` / `forward` / `go` move the cursor; moving past either end is
//!   a no-op, not an error

mod entry;
mod manager;
mod state;

pub use entry::NavigationEntry;
pub use manager::HistoryManager;
pub use state::TraversalState;

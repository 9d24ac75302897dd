//! History manager
//!
//! An ordered sequence of entries with a cursor pointing at the current one.
//! The cursor is `None` only before the first `push` or `replace`.

use crate::entry::NavigationEntry;
use crate::state::TraversalState;

#[derive(Debug, Default)]
pub struct HistoryManager {
    entries: Vec<NavigationEntry>,
    cursor: Option<usize>,
    next_sequence: u64,
    /// Maximum number of retained entries
    limit: Option<usize>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` entries, dropping the oldest first
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    /// Record a new location, discarding every entry forward of the cursor
    pub fn push(
        &mut self,
        path: impl Into<String>,
        route_name: impl Into<String>,
    ) -> NavigationEntry {
        let entry = self.next_entry(path.into(), route_name.into());

        if let Some(cursor) = self.cursor {
            let discarded = self.entries.len() - (cursor + 1);
            if discarded > 0 {
                tracing::debug!(discarded, "Discarding forward history");
            }
            self.entries.truncate(cursor + 1);
        }

        self.entries.push(entry.clone());
        self.cursor = Some(self.entries.len() - 1);
        self.enforce_limit();

        tracing::debug!(
            sequence = entry.sequence,
            path = %entry.path,
            route = %entry.route_name,
            "History push"
        );

        entry
    }

    /// Swap the current entry for a new location. Forward entries are kept.
    pub fn replace(
        &mut self,
        path: impl Into<String>,
        route_name: impl Into<String>,
    ) -> NavigationEntry {
        let Some(cursor) = self.cursor else {
            return self.push(path, route_name);
        };

        let entry = self.next_entry(path.into(), route_name.into());
        self.entries[cursor] = entry.clone();

        tracing::debug!(
            sequence = entry.sequence,
            path = %entry.path,
            route = %entry.route_name,
            "History replace"
        );

        entry
    }

    /// Move one step back. `None` at the oldest entry.
    pub fn back(&mut self) -> Option<NavigationEntry> {
        self.go(-1)
    }

    /// Move one step forward. `None` at the newest entry.
    pub fn forward(&mut self) -> Option<NavigationEntry> {
        self.go(1)
    }

    /// Move the cursor by `delta` entries.
    ///
    /// Out-of-range moves leave the cursor untouched and return `None`.
    /// `go(0)` returns the current entry.
    pub fn go(&mut self, delta: isize) -> Option<NavigationEntry> {
        let cursor = self.cursor?;
        let target = cursor.checked_add_signed(delta)?;
        let entry = self.entries.get(target)?.clone();

        if target != cursor {
            tracing::debug!(from = cursor, to = target, path = %entry.path, "History traversal");
        }

        self.cursor = Some(target);
        Some(entry)
    }

    /// Move the cursor to the entry with the given sequence number
    pub fn go_to_sequence(&mut self, sequence: u64) -> Option<NavigationEntry> {
        let target = self.entries.iter().position(|e| e.sequence == sequence)?;
        let cursor = self.cursor?;
        self.go(target as isize - cursor as isize)
    }

    pub fn current(&self) -> Option<NavigationEntry> {
        self.cursor.map(|cursor| self.entries[cursor].clone())
    }

    /// Index of the current entry
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn state(&self) -> TraversalState {
        TraversalState::from_flags(self.can_go_back(), self.can_go_forward())
    }

    fn next_entry(&mut self, path: String, route_name: String) -> NavigationEntry {
        let entry = NavigationEntry::new(self.next_sequence, path, route_name);
        self.next_sequence += 1;
        entry
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };

        if self.entries.len() > limit {
            let overflow = self.entries.len() - limit;
            self.entries.drain(0..overflow);
            self.cursor = self.cursor.map(|cursor| cursor.saturating_sub(overflow));
        }
    }
}

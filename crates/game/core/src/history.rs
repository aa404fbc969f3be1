//! Travel history stack for backtracking.
//!
//! The bottom entry is the starting location and is never popped, so the
//! stack is non-empty for the whole session. Backtracking is
//! one-directional and destructive: there is no forward stack.

use crate::topology::LocationId;

/// Stack of visited location ids with a pinned starting entry.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    entries: Vec<LocationId>,
}

impl History {
    pub fn new(start: LocationId) -> Self {
        Self {
            entries: vec![start],
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// The location currently on top of the stack.
    pub fn current(&self) -> LocationId {
        // Non-empty by construction: the start entry is never popped.
        *self.entries.last().expect("history holds the start entry")
    }

    /// Record travel into a location.
    pub fn visit(&mut self, location: LocationId) {
        self.entries.push(location);
    }

    /// Pop the current location and return the new top, or `None` when
    /// only the starting entry remains (in which case nothing changes).
    pub fn backtrack(&mut self) -> Option<LocationId> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    /// Truncate to just the starting entry (defeat reset).
    pub fn reset(&mut self) {
        self.entries.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: LocationId = LocationId::new(0);
    const A: LocationId = LocationId::new(1);
    const B: LocationId = LocationId::new(2);

    #[test]
    fn backtrack_walks_back_to_start() {
        let mut history = History::new(START);
        history.visit(A);
        history.visit(B);
        assert_eq!(history.backtrack(), Some(A));
        assert_eq!(history.backtrack(), Some(START));
        assert_eq!(history.current(), START);
    }

    #[test]
    fn start_entry_is_never_popped() {
        let mut history = History::new(START);
        assert_eq!(history.backtrack(), None);
        assert_eq!(history.depth(), 1);
        assert_eq!(history.current(), START);
    }

    #[test]
    fn reset_truncates_to_start() {
        let mut history = History::new(START);
        history.visit(A);
        history.visit(B);
        history.reset();
        assert_eq!(history.depth(), 1);
        assert_eq!(history.current(), START);
        assert_eq!(history.backtrack(), None);
    }
}

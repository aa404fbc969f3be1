//! Bounded FIFO message log.
//!
//! Backs both the battle log (capacity 100) and the crawler's event log
//! (capacity 10). Appending at capacity evicts the oldest entry; nothing
//! else ever removes messages.

use std::collections::VecDeque;

/// Fixed-capacity message journal with FIFO eviction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Journal {
    messages: VecDeque<String>,
    capacity: usize,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, evicting the oldest entry when full.
    pub fn append(&mut self, message: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    /// The `n` most recently appended messages, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &str> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).map(String::as_str)
    }

    /// All retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

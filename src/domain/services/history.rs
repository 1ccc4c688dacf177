#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use crate::domain::models::OutOfRangeError;
use crate::domain::models::TranslationRecord;

pub const DEFAULT_HISTORY_SIZE: usize = 5;
pub const MAX_HISTORY_SIZE: usize = 20;

/// Bounded record of past translations. Oldest entries are evicted first, and
/// reading an entry never changes its position.
pub struct HistoryStore {
    records: VecDeque<TranslationRecord>,
    capacity: NonZeroUsize,
}

impl Default for HistoryStore {
    fn default() -> HistoryStore {
        return HistoryStore::new(NonZeroUsize::new(DEFAULT_HISTORY_SIZE).unwrap_or(NonZeroUsize::MIN));
    }
}

impl HistoryStore {
    pub fn new(capacity: NonZeroUsize) -> HistoryStore {
        return HistoryStore {
            records: VecDeque::with_capacity(capacity.get()),
            capacity,
        };
    }

    pub fn append(&mut self, record: TranslationRecord) {
        if self.records.len() >= self.capacity.get() {
            self.records.pop_front();
        }

        self.records.push_back(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Newest first. The returned list is a copy, later mutations don't
    /// affect it.
    pub fn list(&self) -> Vec<TranslationRecord> {
        return self.records.iter().rev().cloned().collect();
    }

    /// Original text of the entry at `index` in the newest-first view.
    pub fn replay(&self, index: usize) -> Result<String, OutOfRangeError> {
        let len = self.records.len();
        if index >= len {
            return Err(OutOfRangeError { index, len });
        }

        return Ok(self.records[len - 1 - index].original_text.to_string());
    }

    pub fn set_capacity(&mut self, capacity: NonZeroUsize) {
        self.capacity = capacity;
        while self.records.len() > capacity.get() {
            self.records.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        return self.capacity.get();
    }

    pub fn len(&self) -> usize {
        return self.records.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }
}

//! Bounded search history
//!
//! Most-recent-first, deduplicated by exact string match.

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SearchHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Rebuild a history from persisted entries, keeping the stored order.
    ///
    /// Later duplicates and anything past capacity are dropped.
    pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
        let mut kept: Vec<String> = Vec::with_capacity(capacity.min(entries.len()));
        for entry in entries {
            if kept.len() == capacity {
                break;
            }
            if !kept.contains(&entry) {
                kept.push(entry);
            }
        }
        Self {
            entries: kept,
            capacity,
        }
    }

    /// Move `query` to the front, dropping any earlier occurrence
    pub fn record(&mut self, query: &str) {
        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use crate::constants::MAX_HISTORY;
use crate::models::{HistoryEntry, HttpMethod};
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Bounded request history, most recent first
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        HistoryLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an attempt stamped with the current local time
    pub fn record(&mut self, method: HttpMethod, original_url: impl Into<String>) {
        self.record_at(method, original_url, Local::now());
    }

    pub fn record_at(
        &mut self,
        method: HttpMethod,
        original_url: impl Into<String>,
        timestamp: DateTime<Local>,
    ) {
        let entry = HistoryEntry {
            method,
            original_url: original_url.into(),
            timestamp,
        };
        tracing::debug!(method = %entry.method, url = %entry.original_url, "Recorded history entry");

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first
    pub fn list(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Get history item by index (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = HistoryLog::new();
        log.record(HttpMethod::GET, "/a");
        log.record(HttpMethod::POST, "/b");

        let urls: Vec<_> = log.list().map(|e| e.original_url.as_str()).collect();
        assert_eq!(urls, ["/b", "/a"]);
        assert_eq!(log.get(0).unwrap().method, HttpMethod::POST);
    }

    #[test]
    fn test_bounded_to_capacity() {
        let mut log = HistoryLog::new();
        for i in 0..25 {
            log.record(HttpMethod::GET, format!("/{}", i));
        }

        assert_eq!(log.len(), MAX_HISTORY);
        let urls: Vec<String> = log.list().map(|e| e.original_url.clone()).collect();
        let expected: Vec<String> = (5..25).rev().map(|i| format!("/{}", i)).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut log = HistoryLog::new();
        assert!(log.get(0).is_none());
        log.record(HttpMethod::DELETE, "/x");
        assert!(log.get(1).is_none());
        assert!(log.get(usize::MAX).is_none());
    }

    #[test]
    fn test_record_at_keeps_timestamp() {
        let mut log = HistoryLog::with_capacity(2);
        let ts = Local::now();
        log.record_at(HttpMethod::PUT, "/t", ts);
        assert_eq!(log.get(0).unwrap().timestamp, ts);
        assert_eq!(log.capacity(), 2);
    }
}

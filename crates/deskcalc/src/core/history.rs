//! Completed-calculation history
//!
//! An append-only, bounded log of display strings like `12 + 8 = 20`.
//! Bounded so a long-running session cannot grow memory without limit.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated, e.g. `12 + 8`
    pub expression: String,
    /// The formatted result, e.g. `20`
    pub result: String,
    /// When the calculation completed (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a new entry stamped with the current time
    #[must_use]
    pub fn new(expression: String, result: String) -> Self {
        Self {
            expression,
            result,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Creates an entry with a specific timestamp (for testing)
    #[must_use]
    pub fn with_timestamp(expression: String, result: String, timestamp: u64) -> Self {
        Self {
            expression,
            result,
            timestamp,
        }
    }

    fn current_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Returns the display line, `<expression> = <result>`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Bounded calculation log, oldest entries evicted first
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a new history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Creates a history with a custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Appends an entry, evicting the oldest at capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(HistoryEntry::new(expression.to_string(), result.to_string()));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Iterates over entries, newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Serializes the history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries.iter().collect::<Vec<_>>())
    }

    /// Deserializes a history from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== HistoryEntry tests =====

    #[test]
    fn test_entry_new() {
        let entry = HistoryEntry::new("2 + 2".into(), "4".into());
        assert_eq!(entry.expression, "2 + 2");
        assert_eq!(entry.result, "4");
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::with_timestamp("12 + 8".into(), "20".into(), 1000);
        assert_eq!(entry.display(), "12 + 8 = 20");
    }

    #[test]
    fn test_entry_display_formatted_result() {
        // Results are stored pre-formatted, so the log shows no float noise
        let entry = HistoryEntry::with_timestamp("0.1 + 0.2".into(), "0.3".into(), 1000);
        assert_eq!(entry.display(), "0.1 + 0.2 = 0.3");
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let entry = HistoryEntry::with_timestamp("6 × 7".into(), "42".into(), 1234);
        let json = serde_json::to_string(&entry).unwrap();
        let restored: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, restored);
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), History::DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_history_record() {
        let mut history = History::new();
        history.record("3 + 4", "7");
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().display(), "3 + 4 = 7");
    }

    #[test]
    fn test_history_bounded() {
        let mut history = History::with_capacity(3);
        for i in 1..=4 {
            history.record(&format!("{i}"), &format!("{i}"));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().next().unwrap().expression, "2");
        assert_eq!(history.last().unwrap().expression, "4");
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record("1 + 1", "2");
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_iter_order() {
        let mut history = History::new();
        history.record("a", "1");
        history.record("b", "2");
        history.record("c", "3");

        let oldest_first: Vec<&str> = history.iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(oldest_first, vec!["a", "b", "c"]);

        let newest_first: Vec<&str> = history.iter_rev().map(|e| e.expression.as_str()).collect();
        assert_eq!(newest_first, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_history_json_round_trip() {
        let mut original = History::new();
        original.push(HistoryEntry::with_timestamp("x".into(), "10".into(), 100));
        original.push(HistoryEntry::with_timestamp("y".into(), "20".into(), 200));

        let json = original.to_json().unwrap();
        let restored = History::from_json(&json).unwrap();

        assert_eq!(original.len(), restored.len());
        for (orig, rest) in original.iter().zip(restored.iter()) {
            assert_eq!(orig, rest);
        }
    }

    #[test]
    fn test_history_from_json_invalid() {
        assert!(History::from_json("not json").is_err());
    }
}

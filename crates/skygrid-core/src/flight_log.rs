//! Append-only log container for flight data.

use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of records.
///
/// Preserves insertion order exactly and supports any number of independent
/// full traversals. There is deliberately no removal, indexing, or
/// reordering: the mission pipeline never needs them. Serializes as a plain
/// JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightLog<T> {
    entries: Vec<T>,
}

impl<T> FlightLog<T> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a record to the end of the log.
    pub fn append(&mut self, item: T) {
        self.entries.push(item);
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the records in insertion order.
    ///
    /// Each call starts a fresh traversal from the first record.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// First record, if any.
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Last record, if any.
    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }
}

impl<T> Default for FlightLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a FlightLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> FromIterator<T> for FlightLog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: Vec::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for FlightLog<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_count_and_order() {
        let mut log = FlightLog::new();
        for i in 0..5 {
            log.append(i);
        }

        assert_eq!(log.len(), 5);
        let collected: Vec<i32> = log.iter().copied().collect();
        assert_eq!(collected, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn iteration_is_restartable() {
        let log: FlightLog<u8> = [10, 20, 30].into_iter().collect();

        let first: Vec<u8> = log.iter().copied().collect();
        let second: Vec<u8> = log.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![10, 20, 30]);
    }

    #[test]
    fn is_empty_tracks_appends() {
        let mut log = FlightLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);

        log.append("point");
        assert!(!log.is_empty());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn serializes_as_plain_array() {
        let log: FlightLog<u8> = [1, 2, 3].into_iter().collect();
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, "[1,2,3]");

        let back: FlightLog<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}

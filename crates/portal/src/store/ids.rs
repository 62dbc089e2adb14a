//! Record identifiers.
//!
//! Ids are decimal Unix-millisecond strings, like the ones the browser front
//! end produced, but strictly increasing: two adds in the same millisecond
//! still get distinct ids.

use chrono::Utc;

use crate::models::Record;

/// Hands out strictly increasing numeric ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a collection currently holding `existing`.
    pub fn next_for<T: Record>(&mut self, existing: &[T]) -> String {
        let stored_max = existing
            .iter()
            .filter_map(|record| record.id().parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.next_at(Utc::now().timestamp_millis(), stored_max)
            .to_string()
    }

    /// Next id given the clock reading and the largest id already stored.
    ///
    /// The result is the clock reading unless that would not exceed every
    /// id seen so far.
    pub fn next_at(&mut self, now_millis: i64, stored_max: i64) -> i64 {
        let floor = self.last.max(stored_max);
        let id = if now_millis > floor {
            now_millis
        } else {
            floor.saturating_add(1)
        };
        self.last = id;
        id
    }
}

//! Closed date intervals

use chrono::NaiveDate;

/// A closed `[start, end]` interval of days.
///
/// `start <= end` is not enforced: coverage ranges are turned into intervals
/// only after the start-before-end check has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Ranges sharing a single boundary day are adjacent, not overlapping.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains(&self, other: &DateInterval) -> bool {
        self.contains_date(other.start) && self.contains_date(other.end)
    }

    /// Overlap, equality or containment in either direction
    pub fn conflicts_with(&self, other: &DateInterval) -> bool {
        self.overlaps(other) || self == other || self.contains(other) || other.contains(self)
    }
}

//! Free-interval bookkeeping.
//!
//! The free-interval set always equals the schedule window minus the union
//! of all placed events; intervals stay disjoint and sorted by start.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::window::ScheduleWindow;

/// A contiguous unscheduled span within the day's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeInterval {
    /// Create a new interval; empty or inverted spans are rejected.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if start >= end {
            return None;
        }
        Some(FreeInterval { start, end })
    }

    /// Interval length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether a task of the given duration fits.
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }

    /// Whether the span `[start, end)` lies entirely inside this interval.
    pub fn contains_span(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Disjoint, sorted set of free intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeIntervalSet {
    intervals: Vec<FreeInterval>,
}

impl FreeIntervalSet {
    /// One free interval spanning the whole window.
    pub fn from_window(window: &ScheduleWindow) -> Self {
        FreeIntervalSet {
            intervals: FreeInterval::new(window.start, window.end)
                .into_iter()
                .collect(),
        }
    }

    pub fn intervals(&self) -> &[FreeInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total unscheduled minutes remaining.
    pub fn total_minutes(&self) -> i64 {
        self.intervals.iter().map(FreeInterval::duration_minutes).sum()
    }

    /// Earliest interval that can fit the given duration.
    pub fn earliest_fitting(&self, minutes: i64) -> Option<FreeInterval> {
        self.intervals.iter().find(|iv| iv.can_fit(minutes)).copied()
    }

    /// Remove a placed span from the set, splitting the containing interval
    /// as needed. Returns false (and leaves the set untouched) when the span
    /// is not fully inside one free interval.
    pub fn carve(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if start >= end {
            return false;
        }
        let Some(idx) = self
            .intervals
            .iter()
            .position(|iv| iv.contains_span(start, end))
        else {
            return false;
        };

        let carved = self.intervals.remove(idx);
        let mut insert_at = idx;
        if let Some(left) = FreeInterval::new(carved.start, start) {
            self.intervals.insert(insert_at, left);
            insert_at += 1;
        }
        if let Some(right) = FreeInterval::new(end, carved.end) {
            self.intervals.insert(insert_at, right);
        }
        true
    }
}

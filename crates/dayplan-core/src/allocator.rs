//! Free-slot selection for flexible tasks.
//!
//! Selection policy: among all free intervals able to fit the task, prefer
//! the earliest one overlapping a peak-hour window when the task demands
//! focus; otherwise take the earliest fitting interval. Placement starts at
//! the beginning of the chosen interval, pushed past any dependency bound.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::timeline::FreeIntervalSet;
use crate::window::PeakHours;

/// Chooses concrete spans for flexible tasks.
#[derive(Debug, Clone, Copy)]
pub struct SlotAllocator {
    demands_focus_threshold: u8,
}

impl SlotAllocator {
    pub fn new(demands_focus_threshold: u8) -> Self {
        SlotAllocator {
            demands_focus_threshold,
        }
    }

    /// Whether a task of this difficulty prefers peak-hour intervals.
    pub fn demands_focus(&self, difficulty: u8) -> bool {
        difficulty >= self.demands_focus_threshold
    }

    /// Choose a span of `effective_minutes` inside one free interval, no
    /// earlier than `not_before`. Pure: committing the placement (carving
    /// the interval, inserting the event) is the caller's job. None when no
    /// interval fits.
    pub fn place(
        &self,
        effective_minutes: i64,
        difficulty: u8,
        not_before: Option<DateTime<Utc>>,
        free: &FreeIntervalSet,
        peak: &PeakHours,
        date: NaiveDate,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let candidates: Vec<(DateTime<Utc>, DateTime<Utc>)> = free
            .intervals()
            .iter()
            .filter_map(|interval| {
                let start = match not_before {
                    Some(bound) => interval.start.max(bound),
                    None => interval.start,
                };
                let end = start + Duration::minutes(effective_minutes);
                (end <= interval.end).then_some((start, end))
            })
            .collect();

        if self.demands_focus(difficulty) {
            if let Some(span) = candidates
                .iter()
                .find(|(start, end)| peak.overlaps(date, *start, *end))
            {
                return Some(*span);
            }
        }
        candidates.first().copied()
    }
}

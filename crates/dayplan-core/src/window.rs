//! Schedule window and peak focus hours.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// The day being scheduled, bounded by working hours.
///
/// Invariant: `start < end`, both on `date`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduleWindow {
    /// Build a window from whole hours (0-23) on `date`.
    pub fn from_hours(date: NaiveDate, start_hour: u32, end_hour: u32) -> Result<Self, ScheduleError> {
        let invalid = ScheduleError::InvalidTimeWindow {
            start_hour,
            end_hour,
        };
        if start_hour >= end_hour || end_hour > 23 {
            return Err(invalid);
        }
        let start = date.and_hms_opt(start_hour, 0, 0).ok_or(invalid.clone())?;
        let end = date.and_hms_opt(end_hour, 0, 0).ok_or(invalid)?;
        Ok(ScheduleWindow {
            date,
            start: Utc.from_utc_datetime(&start),
            end: Utc.from_utc_datetime(&end),
        })
    }

    /// Window length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Lift a time of day onto this window's date.
    pub fn at_time(&self, time: NaiveTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(time))
    }

    /// Whether the span `[start, end)` lies entirely inside the window.
    pub fn contains_span(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }
}

/// User-defined time-of-day intervals favored for high-difficulty work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PeakHours {
    intervals: Vec<(NaiveTime, NaiveTime)>,
}

impl PeakHours {
    /// Build from `(start, end)` time-of-day pairs; inverted pairs are
    /// discarded.
    pub fn new(intervals: Vec<(NaiveTime, NaiveTime)>) -> Self {
        PeakHours {
            intervals: intervals.into_iter().filter(|(s, e)| s < e).collect(),
        }
    }

    /// No peak windows.
    pub fn none() -> Self {
        PeakHours::default()
    }

    /// Single 09:00-13:00 morning window.
    pub fn morning() -> Self {
        PeakHours::from_hour_span(9, 13)
    }

    /// Single window covering `start_hour..end_hour`.
    pub fn from_hour_span(start_hour: u32, end_hour: u32) -> Self {
        let interval = NaiveTime::from_hms_opt(start_hour, 0, 0)
            .zip(NaiveTime::from_hms_opt(end_hour, 0, 0));
        PeakHours::new(interval.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Minutes of `[start, end)` covered by any peak interval on `date`.
    pub fn overlap_minutes(&self, date: NaiveDate, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        self.intervals
            .iter()
            .map(|(ps, pe)| {
                let peak_start = Utc.from_utc_datetime(&date.and_time(*ps));
                let peak_end = Utc.from_utc_datetime(&date.and_time(*pe));
                let overlap_start = start.max(peak_start);
                let overlap_end = end.min(peak_end);
                (overlap_end - overlap_start).num_minutes().max(0)
            })
            .sum()
    }

    /// Whether `[start, end)` overlaps any peak interval on `date`.
    pub fn overlaps(&self, date: NaiveDate, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.overlap_minutes(date, start, end) > 0
    }
}

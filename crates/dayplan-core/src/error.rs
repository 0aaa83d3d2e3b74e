//! Error types for dayplan-core.
//!
//! Structural input errors abort a run before scheduling begins; per-task
//! placement failures are collected in the run outcome and never abort the
//! whole run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::TaskId;

/// Fatal errors that fail an optimization run before any flexible task is
/// placed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The requested working window is empty or inverted
    #[error("Invalid time window: start hour {start_hour} and end hour {end_hour} do not form a valid window")]
    InvalidTimeWindow { start_hour: u32, end_hour: u32 },

    /// Two fixed tasks occupy intersecting spans
    #[error("Fixed tasks '{first}' and '{second}' overlap at {at}")]
    OverlappingFixedTasks {
        first: TaskId,
        second: TaskId,
        at: DateTime<Utc>,
    },

    /// A task declared fixed carries no start timestamp
    #[error("Fixed task '{id}' has no start time")]
    MissingFixedStart { id: TaskId },
}

/// Reason a single task could not be placed.
///
/// Collected per task in the run outcome; these are never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscheduledReason {
    /// The task's dependency chain can never resolve within this run
    CyclicDependency,
    /// No free interval is large enough for the task's effective duration
    UnresolvableSlot,
    /// Even maximal break insertion cannot make the task affordable
    EnergyExhausted,
}

impl std::fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnscheduledReason::CyclicDependency => write!(f, "cyclic dependency"),
            UnscheduledReason::UnresolvableSlot => write!(f, "no free slot"),
            UnscheduledReason::EnergyExhausted => write!(f, "energy exhausted"),
        }
    }
}

/// Result type alias for ScheduleError
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;

//! Task model for schedule optimization.
//!
//! Tasks are read-only inputs to one optimization run. A task is either
//! fixed (immovable start time) or flexible (placed by the allocator), and
//! may depend on other tasks, carry a deadline, and be marked outdoor so
//! that weather affects its effective duration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
pub type TaskId = String;

/// Upper bound of the difficulty scale.
pub const MAX_DIFFICULTY: u8 = 10;

/// Scheduling semantics of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Task with a predetermined, immovable start time.
    Fixed,
    /// Task without a predetermined time, placed by the allocator.
    Flexible,
}

/// Where the task takes place. Outdoor tasks are subject to weather
/// adjustment and travel buffers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    Indoor,
    Outdoor,
}

/// A unit of work to be scheduled within one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Human-readable title
    pub title: String,
    /// Fixed or flexible scheduling semantics
    pub kind: TaskKind,
    /// Start timestamp; required for fixed tasks, ignored for flexible ones
    #[serde(default)]
    pub fixed_start: Option<DateTime<Utc>>,
    /// Base duration in minutes, before weather/travel adjustment (> 0)
    pub base_duration_minutes: i64,
    /// Difficulty on a 0-10 scale
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Indoor or outdoor
    #[serde(default)]
    pub location: LocationType,
    /// Ids of tasks that must be placed before this one may start
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    /// Optional completion deadline
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

fn default_difficulty() -> u8 {
    5
}

impl Task {
    /// Create a flexible task.
    pub fn flexible(id: impl Into<TaskId>, title: impl Into<String>, minutes: i64) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            kind: TaskKind::Flexible,
            fixed_start: None,
            base_duration_minutes: minutes,
            difficulty: default_difficulty(),
            location: LocationType::Indoor,
            depends_on: Vec::new(),
            deadline: None,
        }
    }

    /// Create a fixed task starting at `start`.
    pub fn fixed(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        minutes: i64,
    ) -> Self {
        Task {
            kind: TaskKind::Fixed,
            fixed_start: Some(start),
            ..Task::flexible(id, title, minutes)
        }
    }

    /// Set the difficulty, clamped to the 0-10 scale.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty.min(MAX_DIFFICULTY);
        self
    }

    /// Set the location type.
    pub fn with_location(mut self, location: LocationType) -> Self {
        self.location = location;
        self
    }

    /// Add a dependency on another task.
    pub fn with_dependency(mut self, id: impl Into<TaskId>) -> Self {
        self.depends_on.push(id.into());
        self
    }

    /// Set the completion deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whether this task has an immovable start time.
    pub fn is_fixed(&self) -> bool {
        self.kind == TaskKind::Fixed
    }

    /// Whether this task is demanding enough to prefer peak focus hours.
    pub fn demands_focus(&self, threshold: u8) -> bool {
        self.difficulty >= threshold
    }
}

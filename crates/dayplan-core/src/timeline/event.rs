//! Scheduled events and the ordered output timeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::breaks::BreakKind;
use crate::task::{Task, TaskId};

/// What occupies a scheduled span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Task(TaskId),
    Break(BreakKind),
}

impl EventKind {
    /// The task id, when this event is a task.
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            EventKind::Task(id) => Some(id),
            EventKind::Break(_) => None,
        }
    }
}

/// One committed entry of the output timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub kind: EventKind,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Minutes actually occupied, after adjustment and window clamping
    pub effective_minutes: i64,
}

impl ScheduledEvent {
    /// Event for a placed task.
    pub fn for_task(task: &Task, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        ScheduledEvent {
            kind: EventKind::Task(task.id.clone()),
            title: task.title.clone(),
            start,
            end,
            effective_minutes: (end - start).num_minutes(),
        }
    }

    /// Event for an inserted break.
    pub fn for_break(
        kind: BreakKind,
        title: impl Into<String>,
        start: DateTime<Utc>,
        minutes: i64,
    ) -> Self {
        ScheduledEvent {
            kind: EventKind::Break(kind),
            title: title.into(),
            start,
            end: start + Duration::minutes(minutes),
            effective_minutes: minutes,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self.kind, EventKind::Break(_))
    }

    /// Whether this event's span intersects another's.
    pub fn overlaps(&self, other: &ScheduledEvent) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Ordered, non-overlapping sequence of scheduled events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    events: Vec<ScheduledEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline::default()
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert an event, keeping start order. Returns false (and leaves the
    /// timeline untouched) when the event is empty or would overlap an
    /// existing one.
    pub fn insert(&mut self, event: ScheduledEvent) -> bool {
        if event.start >= event.end {
            return false;
        }
        if self.events.iter().any(|e| e.overlaps(&event)) {
            return false;
        }
        let idx = self.events.partition_point(|e| e.start <= event.start);
        self.events.insert(idx, event);
        true
    }

    /// Whether the task has already been placed.
    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.end_of(id).is_some()
    }

    /// End time of the given task's placement, if placed.
    pub fn end_of(&self, id: &TaskId) -> Option<DateTime<Utc>> {
        self.events
            .iter()
            .find(|e| e.kind.task_id() == Some(id))
            .map(|e| e.end)
    }

    /// Consume the timeline, yielding the ordered event list.
    pub fn into_events(self) -> Vec<ScheduledEvent> {
        self.events
    }
}

//! Dependency-aware readiness checks.
//!
//! A flexible task is *ready* once every dependency is either absent from
//! today's task set (and so ignored) or already placed in the timeline. The
//! resolver also maintains the reverse index used to re-queue dependents
//! after a placement and to feed the scorer's fan-out term.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::task::{Task, TaskId};
use crate::timeline::Timeline;

/// Readiness oracle for one run's task set.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    known: BTreeSet<TaskId>,
    dependents: BTreeMap<TaskId, Vec<TaskId>>,
}

impl DependencyResolver {
    /// Build the forward/reverse dependency view of today's task set.
    pub fn new(tasks: &[Task]) -> Self {
        let known: BTreeSet<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
        let mut dependents: BTreeMap<TaskId, Vec<TaskId>> = BTreeMap::new();
        for task in tasks {
            for dep in &task.depends_on {
                if !known.contains(dep) {
                    continue;
                }
                let entry = dependents.entry(dep.clone()).or_default();
                if !entry.contains(&task.id) {
                    entry.push(task.id.clone());
                }
            }
        }
        DependencyResolver { known, dependents }
    }

    /// Whether every dependency of `task` is absent from today's set or
    /// already placed.
    pub fn is_ready(&self, task: &Task, timeline: &Timeline) -> bool {
        task.depends_on
            .iter()
            .all(|dep| !self.known.contains(dep) || timeline.contains_task(dep))
    }

    /// Earliest start allowed by placed dependencies: the latest end time
    /// among them, or None when unconstrained.
    pub fn earliest_start(&self, task: &Task, timeline: &Timeline) -> Option<DateTime<Utc>> {
        task.depends_on
            .iter()
            .filter_map(|dep| timeline.end_of(dep))
            .max()
    }

    /// Tasks directly depending on `id`.
    pub fn dependents_of(&self, id: &TaskId) -> &[TaskId] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tasks directly unblocked by completing `id`.
    pub fn direct_dependent_count(&self, id: &TaskId) -> usize {
        self.dependents_of(id).len()
    }

    /// Whether the dependency chain rooted at `task` reaches any id in
    /// `failed`, walking only edges inside today's task set.
    pub fn chain_contains(
        &self,
        task: &Task,
        by_id: &BTreeMap<TaskId, &Task>,
        failed: &BTreeSet<TaskId>,
    ) -> bool {
        let mut stack: Vec<&TaskId> = task.depends_on.iter().collect();
        let mut visited: BTreeSet<&TaskId> = BTreeSet::new();
        while let Some(dep) = stack.pop() {
            if !visited.insert(dep) {
                continue;
            }
            if failed.contains(dep) {
                return true;
            }
            if let Some(dep_task) = by_id.get(dep) {
                stack.extend(dep_task.depends_on.iter());
            }
        }
        false
    }
}

//! Priority scoring for ready flexible tasks.
//!
//! The score is a weighted combination of four normalized terms:
//! - difficulty, scaled by the current energy level (high-difficulty work
//!   is favored while energy is high and suppressed once it runs low)
//! - overlap of the candidate placement with peak focus hours
//! - fan-out: how many direct dependents a placement unblocks
//! - deadline urgency, increasing monotonically as the deadline approaches
//!
//! Weights are configuration; callers should rely on relative ordering
//! rather than absolute values. Ties are broken by lowest task id.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::EnergyState;
use crate::task::{Task, TaskId, MAX_DIFFICULTY};

/// Weights for each scoring term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    /// Weight for the energy-aware difficulty term (default 0.35)
    #[serde(default = "default_difficulty_weight")]
    pub difficulty_weight: f64,
    /// Weight for peak-hour overlap of the candidate placement (default 0.25)
    #[serde(default = "default_peak_weight")]
    pub peak_weight: f64,
    /// Weight for direct dependents unblocked (default 0.2)
    #[serde(default = "default_fanout_weight")]
    pub fanout_weight: f64,
    /// Weight for deadline urgency (default 0.2)
    #[serde(default = "default_deadline_weight")]
    pub deadline_weight: f64,
}

fn default_difficulty_weight() -> f64 {
    0.35
}
fn default_peak_weight() -> f64 {
    0.25
}
fn default_fanout_weight() -> f64 {
    0.2
}
fn default_deadline_weight() -> f64 {
    0.2
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            difficulty_weight: default_difficulty_weight(),
            peak_weight: default_peak_weight(),
            fanout_weight: default_fanout_weight(),
            deadline_weight: default_deadline_weight(),
        }
    }
}

/// Scorer for ready flexible tasks.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    weights: ScoreWeights,
    demands_focus_threshold: u8,
}

impl PriorityScorer {
    pub fn new(weights: ScoreWeights, demands_focus_threshold: u8) -> Self {
        PriorityScorer {
            weights,
            demands_focus_threshold,
        }
    }

    /// Score a ready task; higher scores are scheduled first.
    ///
    /// `peak_overlap` is the fraction of the task's candidate placement
    /// covered by peak hours; `unblocked` the number of direct dependents.
    pub fn score(
        &self,
        task: &Task,
        effective_minutes: i64,
        energy: &EnergyState,
        peak_overlap: f64,
        unblocked: usize,
        now: DateTime<Utc>,
    ) -> f64 {
        let difficulty_term = self.difficulty_term(task, effective_minutes, energy);

        // Demanding tasks want peak coverage; light tasks are better kept
        // out of peak windows so demanding ones can claim them.
        let peak_term = if task.demands_focus(self.demands_focus_threshold) {
            peak_overlap.clamp(0.0, 1.0)
        } else {
            1.0 - peak_overlap.clamp(0.0, 1.0)
        };

        let fanout_term = (unblocked as f64 / 4.0).min(1.0);
        let deadline_term = Self::deadline_urgency(task.deadline, now);

        self.weights.difficulty_weight * difficulty_term
            + self.weights.peak_weight * peak_term
            + self.weights.fanout_weight * fanout_term
            + self.weights.deadline_weight * deadline_term
    }

    fn difficulty_term(&self, task: &Task, effective_minutes: i64, energy: &EnergyState) -> f64 {
        let base = f64::from(task.difficulty) / f64::from(MAX_DIFFICULTY);
        let cost = EnergyState::task_cost(task.difficulty, effective_minutes);
        let factor = if energy.current - cost < energy.critical_threshold {
            0.2
        } else if energy.is_high() && task.demands_focus(self.demands_focus_threshold) {
            1.1
        } else {
            1.0
        };
        base * factor
    }

    /// Urgency in [0, 1]: 0 without a deadline, 1 once overdue, banded
    /// decay in between.
    fn deadline_urgency(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
        let Some(deadline) = deadline else {
            return 0.0;
        };
        let hours = (deadline - now).num_hours();
        if hours < 0 {
            1.0
        } else if hours < 24 {
            0.9 + 0.1 * (1.0 - hours as f64 / 24.0)
        } else if hours < 72 {
            0.6 + 0.3 * (1.0 - (hours - 24) as f64 / 48.0)
        } else if hours < 168 {
            0.3 + 0.3 * (1.0 - (hours - 72) as f64 / 96.0)
        } else {
            0.1
        }
    }
}

/// Priority-queue entry: ordered by score descending, then lowest task id,
/// so heap order never depends on insertion order.
#[derive(Debug, Clone)]
pub struct ScoredTask {
    pub score: f64,
    pub id: TaskId,
}

impl PartialEq for ScoredTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredTask {}

impl PartialOrd for ScoredTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredTask {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.score.total_cmp(&other.score) {
            // Max-heap: among equal scores the lexicographically smallest
            // id must surface first.
            Ordering::Equal => other.id.cmp(&self.id),
            ordering => ordering,
        }
    }
}

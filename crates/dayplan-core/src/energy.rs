//! Simulated energy budget gating task placement.
//!
//! Energy is a depletable resource consumed proportionally to a task's
//! difficulty and effective duration, and restored by breaks. A placement is
//! only committed when the projected post-task level stays above the
//! critical threshold, so the observable level never goes negative.

use serde::{Deserialize, Serialize};

/// Default energy budget for a full day.
pub const DEFAULT_MAX_ENERGY: f64 = 50.0;

/// Fraction of the budget below which high-effort work is blocked.
pub const DEFAULT_CRITICAL_FRACTION: f64 = 0.3;

/// Fraction of the budget a rest break restores up to.
pub const DEFAULT_RECOVERY_FRACTION: f64 = 0.6;

/// Outcome of gating a task against the current energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyDecision {
    /// The task is affordable as-is.
    Allow,
    /// A rest break first would make the task affordable.
    RequireBreak,
    /// No break of any length can make the task affordable.
    Defer,
}

/// Mutable energy budget of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyState {
    pub current: f64,
    pub max: f64,
    pub critical_threshold: f64,
    pub recovery_threshold: f64,
}

impl EnergyState {
    /// Full budget with default thresholds.
    pub fn new(max: f64) -> Self {
        EnergyState::with_thresholds(
            max,
            max * DEFAULT_CRITICAL_FRACTION,
            max * DEFAULT_RECOVERY_FRACTION,
        )
    }

    /// Full budget with explicit thresholds.
    pub fn with_thresholds(max: f64, critical_threshold: f64, recovery_threshold: f64) -> Self {
        EnergyState {
            current: max,
            max,
            critical_threshold,
            recovery_threshold,
        }
    }

    /// Energy cost of running a task of the given difficulty for
    /// `effective_minutes`. Difficulty maps to cost-per-hour at half its
    /// value, so a difficulty-10 task burns 5 energy per hour.
    pub fn task_cost(difficulty: u8, effective_minutes: i64) -> f64 {
        (f64::from(difficulty) / 2.0) * (effective_minutes as f64 / 60.0)
    }

    /// Gate a task of the given cost against the current level. Breaks are
    /// never gated; callers skip evaluation for them.
    pub fn evaluate(&self, cost: f64) -> EnergyDecision {
        if self.current - cost >= self.critical_threshold {
            EnergyDecision::Allow
        } else if self.max - cost >= self.critical_threshold {
            EnergyDecision::RequireBreak
        } else {
            EnergyDecision::Defer
        }
    }

    /// Deduct a committed task's cost, saturating at zero.
    pub fn consume(&mut self, cost: f64) {
        self.current = (self.current - cost).max(0.0);
    }

    /// Restore energy from a break, never exceeding the budget.
    pub fn restore(&mut self, amount: f64) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Whether the level is high enough to favor demanding work.
    pub fn is_high(&self) -> bool {
        self.current > 0.7 * self.max
    }
}

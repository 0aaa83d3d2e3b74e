//! Scheduled and energy-triggered rest breaks.
//!
//! Two kinds of break enter the timeline: fixed scheduled breaks (lunch,
//! afternoon recharge) inserted as quasi-fixed events before flexible
//! placement begins, and rest breaks inserted on demand when the energy
//! model signals that the next candidate task needs one.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::energy::{EnergyState, DEFAULT_MAX_ENERGY};
use crate::timeline::{FreeIntervalSet, ScheduledEvent, Timeline};
use crate::window::ScheduleWindow;

/// Kind of break event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    Lunch,
    Recharge,
    Rest,
}

/// A break at a configured time of day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledBreak {
    pub kind: BreakKind,
    pub title: String,
    /// Time of day the break starts
    pub start: NaiveTime,
    pub duration_minutes: i64,
}

/// Break configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakPolicy {
    /// Quasi-fixed breaks inserted before flexible placement
    #[serde(default = "default_scheduled")]
    pub scheduled: Vec<ScheduledBreak>,
    /// Energy restored per minute of rest
    #[serde(default = "default_restore_per_minute")]
    pub restore_per_minute: f64,
    /// Shortest rest break worth inserting
    #[serde(default = "default_min_rest_minutes")]
    pub min_rest_minutes: i64,
}

fn default_scheduled() -> Vec<ScheduledBreak> {
    let lunch = NaiveTime::from_hms_opt(12, 30, 0);
    let recharge = NaiveTime::from_hms_opt(15, 0, 0);
    lunch
        .map(|start| ScheduledBreak {
            kind: BreakKind::Lunch,
            title: "Lunch".to_string(),
            start,
            duration_minutes: 45,
        })
        .into_iter()
        .chain(recharge.map(|start| ScheduledBreak {
            kind: BreakKind::Recharge,
            title: "Afternoon recharge".to_string(),
            start,
            duration_minutes: 30,
        }))
        .collect()
}

// A 30-minute rest recharges the default budget completely.
fn default_restore_per_minute() -> f64 {
    DEFAULT_MAX_ENERGY / 30.0
}

fn default_min_rest_minutes() -> i64 {
    5
}

impl Default for BreakPolicy {
    fn default() -> Self {
        BreakPolicy {
            scheduled: default_scheduled(),
            restore_per_minute: default_restore_per_minute(),
            min_rest_minutes: default_min_rest_minutes(),
        }
    }
}

impl BreakPolicy {
    /// Policy without scheduled breaks, keeping rest-break behavior.
    pub fn without_scheduled(mut self) -> Self {
        self.scheduled.clear();
        self
    }
}

/// Inserts breaks into a run's free intervals and timeline.
#[derive(Debug, Clone)]
pub struct BreakInserter {
    policy: BreakPolicy,
}

impl BreakInserter {
    pub fn new(policy: BreakPolicy) -> Self {
        BreakInserter { policy }
    }

    /// Insert configured breaks as quasi-fixed events. A break whose span is
    /// not fully inside one free interval (it collides with a fixed task or
    /// falls outside the window) is skipped.
    pub fn insert_scheduled(
        &self,
        window: &ScheduleWindow,
        free: &mut FreeIntervalSet,
        timeline: &mut Timeline,
    ) {
        for spec in &self.policy.scheduled {
            let start = window.at_time(spec.start);
            let end = start + Duration::minutes(spec.duration_minutes);
            if !window.contains_span(start, end) {
                continue;
            }
            if !free.carve(start, end) {
                continue;
            }
            let event = ScheduledEvent::for_break(spec.kind, spec.title.clone(), start, spec.duration_minutes);
            let inserted = timeline.insert(event);
            debug_assert!(inserted);
        }
    }

    /// Minutes of rest needed to climb from the current level to at least
    /// `target`.
    pub fn rest_minutes_to(&self, energy: &EnergyState, target: f64) -> i64 {
        let deficit = (target - energy.current).max(0.0);
        let minutes = (deficit / self.policy.restore_per_minute).ceil() as i64;
        minutes.max(self.policy.min_rest_minutes)
    }

    /// Place a rest break restoring at least to `target` into the earliest
    /// free interval that fits, apply the restore, and return the event.
    /// None when no interval can hold the break.
    pub fn insert_rest(
        &self,
        target: f64,
        free: &mut FreeIntervalSet,
        timeline: &mut Timeline,
        energy: &mut EnergyState,
    ) -> Option<ScheduledEvent> {
        let minutes = self.rest_minutes_to(energy, target);
        let slot = free.earliest_fitting(minutes)?;
        let start = slot.start;
        let end = start + Duration::minutes(minutes);
        if !free.carve(start, end) {
            return None;
        }
        let event = ScheduledEvent::for_break(BreakKind::Rest, "Rest break", start, minutes);
        let inserted = timeline.insert(event.clone());
        debug_assert!(inserted);
        energy.restore(minutes as f64 * self.policy.restore_per_minute);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> ScheduleWindow {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        ScheduleWindow::from_hours(date, 9, 17).unwrap()
    }

    #[test]
    fn default_policy_has_lunch_and_recharge() {
        let policy = BreakPolicy::default();
        assert_eq!(policy.scheduled.len(), 2);
        assert_eq!(policy.scheduled[0].kind, BreakKind::Lunch);
        assert_eq!(policy.scheduled[1].kind, BreakKind::Recharge);
    }

    #[test]
    fn scheduled_breaks_consume_free_intervals() {
        let window = window();
        let mut free = FreeIntervalSet::from_window(&window);
        let mut timeline = Timeline::new();

        BreakInserter::new(BreakPolicy::default()).insert_scheduled(
            &window,
            &mut free,
            &mut timeline,
        );

        assert_eq!(timeline.len(), 2);
        assert_eq!(free.total_minutes(), 8 * 60 - 45 - 30);
    }

    #[test]
    fn colliding_scheduled_break_skipped() {
        let window = window();
        let mut free = FreeIntervalSet::from_window(&window);
        let mut timeline = Timeline::new();

        // Occupy 12:00-13:30, colliding with the 12:30 lunch
        let lunch_blocker_start = window.at_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        let lunch_blocker_end = window.at_time(NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert!(free.carve(lunch_blocker_start, lunch_blocker_end));

        BreakInserter::new(BreakPolicy::default()).insert_scheduled(
            &window,
            &mut free,
            &mut timeline,
        );

        // Only the afternoon recharge fits
        assert_eq!(timeline.len(), 1);
        assert_eq!(
            timeline.events()[0].kind,
            crate::timeline::EventKind::Break(BreakKind::Recharge)
        );
    }

    #[test]
    fn break_outside_window_skipped() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let morning_only = ScheduleWindow::from_hours(date, 8, 12).unwrap();
        let mut free = FreeIntervalSet::from_window(&morning_only);
        let mut timeline = Timeline::new();

        BreakInserter::new(BreakPolicy::default()).insert_scheduled(
            &morning_only,
            &mut free,
            &mut timeline,
        );
        assert!(timeline.is_empty());
    }

    #[test]
    fn rest_minutes_sized_to_target() {
        let policy = BreakPolicy::default();
        let inserter = BreakInserter::new(policy);

        let mut energy = EnergyState::new(50.0);
        energy.consume(35.0); // down to 15
        // Deficit of 15 at 50/30 per minute => 9 minutes
        assert_eq!(inserter.rest_minutes_to(&energy, 30.0), 9);

        // Tiny deficits still get the minimum rest
        energy.restore(14.0);
        assert_eq!(inserter.rest_minutes_to(&energy, 30.0), 5);
    }

    #[test]
    fn rest_break_restores_and_occupies_earliest_slot() {
        let window = window();
        let mut free = FreeIntervalSet::from_window(&window);
        let mut timeline = Timeline::new();
        let mut energy = EnergyState::new(50.0);
        energy.consume(35.0);

        let inserter = BreakInserter::new(BreakPolicy::default().without_scheduled());
        let event = inserter
            .insert_rest(30.0, &mut free, &mut timeline, &mut energy)
            .unwrap();

        assert_eq!(event.start, window.start);
        assert!(energy.current >= 30.0);
        assert_eq!(timeline.len(), 1);
        assert_eq!(free.intervals()[0].start, event.end);
    }

    #[test]
    fn rest_break_fails_without_room() {
        let window = window();
        let mut free = FreeIntervalSet::from_window(&window);
        let mut timeline = Timeline::new();
        let mut energy = EnergyState::new(50.0);
        energy.consume(35.0);

        // Consume the whole day
        assert!(free.carve(window.start, window.end));

        let inserter = BreakInserter::new(BreakPolicy::default());
        assert!(inserter
            .insert_rest(30.0, &mut free, &mut timeline, &mut energy)
            .is_none());
        assert_eq!(energy.current, 15.0);
    }
}

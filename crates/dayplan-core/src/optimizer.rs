//! Single-pass schedule optimizer.
//!
//! The optimizer owns all mutable state of one run (free intervals, energy,
//! priority queue, timeline) and walks a fixed state machine:
//!
//!   INIT -> LOADING -> SCHEDULING -> DONE
//!                 \-> FAILED (invalid window or overlapping fixed tasks)
//!
//! LOADING validates and places fixed tasks and scheduled breaks.
//! SCHEDULING pops the highest-scored ready flexible task, gates it against
//! the energy model (inserting a rest break when required), asks the
//! allocator for a slot, and commits or records the failure. Per-task
//! placement failures never abort the run; they are carried in the outcome.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::adjust::{DurationAdjuster, TravelProvider, WeatherProvider};
use crate::allocator::SlotAllocator;
use crate::breaks::{BreakInserter, BreakPolicy};
use crate::deps::DependencyResolver;
use crate::energy::{
    EnergyDecision, EnergyState, DEFAULT_CRITICAL_FRACTION, DEFAULT_MAX_ENERGY,
    DEFAULT_RECOVERY_FRACTION,
};
use crate::error::{Result, ScheduleError, UnscheduledReason};
use crate::scoring::{PriorityScorer, ScoreWeights, ScoredTask};
use crate::task::{Task, TaskId, TaskKind};
use crate::timeline::{FreeIntervalSet, ScheduledEvent, Timeline};
use crate::window::{PeakHours, ScheduleWindow};

/// Run states of the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerState {
    Init,
    Loading,
    Scheduling,
    Done,
    Failed,
}

/// Tunable knobs of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizerConfig {
    /// Energy budget at the start of the day
    #[serde(default = "default_max_energy")]
    pub max_energy: f64,
    /// Fraction of the budget forming the critical threshold
    #[serde(default = "default_critical_fraction")]
    pub critical_fraction: f64,
    /// Fraction of the budget rest breaks restore up to
    #[serde(default = "default_recovery_fraction")]
    pub recovery_fraction: f64,
    /// Difficulty at which a task prefers peak-hour slots
    #[serde(default = "default_demands_focus_threshold")]
    pub demands_focus_threshold: u8,
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub breaks: BreakPolicy,
}

fn default_max_energy() -> f64 {
    DEFAULT_MAX_ENERGY
}
fn default_critical_fraction() -> f64 {
    DEFAULT_CRITICAL_FRACTION
}
fn default_recovery_fraction() -> f64 {
    DEFAULT_RECOVERY_FRACTION
}
fn default_demands_focus_threshold() -> u8 {
    7
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            max_energy: default_max_energy(),
            critical_fraction: default_critical_fraction(),
            recovery_fraction: default_recovery_fraction(),
            demands_focus_threshold: default_demands_focus_threshold(),
            weights: ScoreWeights::default(),
            breaks: BreakPolicy::default(),
        }
    }
}

/// Result of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleOutcome {
    /// Ordered, non-overlapping event sequence
    pub timeline: Vec<ScheduledEvent>,
    /// Tasks that could not be placed, with reasons
    pub unscheduled: Vec<(TaskId, UnscheduledReason)>,
    /// Energy level left at the end of the day
    pub final_energy: f64,
    /// Unscheduled minutes remaining in the window
    pub idle_minutes: i64,
}

/// One optimization run. Create a fresh instance per date; instances are
/// single-threaded and never shared.
pub struct Optimizer {
    window: ScheduleWindow,
    peak: PeakHours,
    config: OptimizerConfig,
    adjuster: DurationAdjuster,
    state: OptimizerState,
}

impl Optimizer {
    pub fn new(
        window: ScheduleWindow,
        peak: PeakHours,
        config: OptimizerConfig,
        weather: Box<dyn WeatherProvider>,
        travel: Box<dyn TravelProvider>,
    ) -> Self {
        let adjuster = DurationAdjuster::new(window.date, weather, travel);
        Optimizer {
            window,
            peak,
            config,
            adjuster,
            state: OptimizerState::Init,
        }
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    fn fail(&mut self, err: ScheduleError) -> ScheduleError {
        self.state = OptimizerState::Failed;
        err
    }

    /// Run a single optimization pass over `tasks`.
    pub fn run(&mut self, tasks: &[Task]) -> Result<ScheduleOutcome> {
        self.state = OptimizerState::Loading;

        let mut energy = EnergyState::with_thresholds(
            self.config.max_energy,
            self.config.max_energy * self.config.critical_fraction,
            self.config.max_energy * self.config.recovery_fraction,
        );
        let mut free = FreeIntervalSet::from_window(&self.window);
        let mut timeline = Timeline::new();
        let mut unscheduled: Vec<(TaskId, UnscheduledReason)> = Vec::new();

        // Effective durations, once per task for the whole run.
        let mut effective: BTreeMap<TaskId, i64> = BTreeMap::new();
        for task in tasks {
            effective.insert(task.id.clone(), self.adjuster.adjust(task));
        }

        self.place_fixed_tasks(tasks, &effective, &mut free, &mut timeline, &mut energy, &mut unscheduled)?;

        let break_inserter = BreakInserter::new(self.config.breaks.clone());
        break_inserter.insert_scheduled(&self.window, &mut free, &mut timeline);

        self.state = OptimizerState::Scheduling;

        let resolver = DependencyResolver::new(tasks);
        let allocator = SlotAllocator::new(self.config.demands_focus_threshold);
        let scorer = PriorityScorer::new(
            self.config.weights.clone(),
            self.config.demands_focus_threshold,
        );
        let peak = self.peak.clone();
        let date = self.window.date;
        let now = self.window.start;

        let flexible: Vec<&Task> = tasks.iter().filter(|t| t.kind == TaskKind::Flexible).collect();
        let by_id: BTreeMap<TaskId, &Task> =
            tasks.iter().map(|t| (t.id.clone(), t)).collect();

        // Candidate-aware score: peak overlap is measured on the span the
        // allocator would currently pick.
        let score_of = |task: &Task, free: &FreeIntervalSet, energy: &EnergyState| -> ScoredTask {
            let minutes = effective.get(&task.id).copied().unwrap_or(task.base_duration_minutes);
            let overlap = allocator
                .place(minutes, task.difficulty, None, free, &peak, date)
                .map(|(start, end)| {
                    peak.overlap_minutes(date, start, end) as f64 / minutes.max(1) as f64
                })
                .unwrap_or(0.0);
            let unblocked = resolver.direct_dependent_count(&task.id);
            ScoredTask {
                score: scorer.score(task, minutes, energy, overlap, unblocked, now),
                id: task.id.clone(),
            }
        };

        // Ready tasks only ever enter the queue.
        let mut heap: BinaryHeap<ScoredTask> = BinaryHeap::new();
        let mut queued: BTreeSet<TaskId> = BTreeSet::new();
        for task in &flexible {
            if resolver.is_ready(task, &timeline) {
                heap.push(score_of(task, &free, &energy));
                queued.insert(task.id.clone());
            }
        }

        // Bounded loop: pathological inputs terminate instead of spinning.
        let iteration_cap = tasks.len() * 4 + 16;
        let mut iterations = 0;
        while let Some(entry) = heap.pop() {
            iterations += 1;
            if iterations > iteration_cap {
                unscheduled.push((entry.id, UnscheduledReason::UnresolvableSlot));
                continue;
            }
            let Some(task) = by_id.get(&entry.id).copied() else {
                continue;
            };
            if timeline.contains_task(&task.id) {
                continue;
            }
            let minutes = effective.get(&task.id).copied().unwrap_or(task.base_duration_minutes);
            let cost = EnergyState::task_cost(task.difficulty, minutes);

            let mut rest_bound: Option<DateTime<Utc>> = None;
            match energy.evaluate(cost) {
                EnergyDecision::Allow => {}
                EnergyDecision::RequireBreak => {
                    // Restore to at least the recovery threshold, and far
                    // enough that the candidate becomes affordable.
                    let target = energy
                        .recovery_threshold
                        .max(energy.critical_threshold + cost)
                        .min(energy.max);
                    match break_inserter.insert_rest(target, &mut free, &mut timeline, &mut energy)
                    {
                        Some(event) => rest_bound = Some(event.end),
                        None => {
                            unscheduled.push((task.id.clone(), UnscheduledReason::EnergyExhausted));
                            continue;
                        }
                    }
                    // Re-evaluate the candidate after the restore.
                    if energy.evaluate(cost) != EnergyDecision::Allow {
                        unscheduled.push((task.id.clone(), UnscheduledReason::EnergyExhausted));
                        continue;
                    }
                }
                EnergyDecision::Defer => {
                    unscheduled.push((task.id.clone(), UnscheduledReason::EnergyExhausted));
                    continue;
                }
            }

            let dep_bound = resolver.earliest_start(task, &timeline);
            let not_before = match (dep_bound, rest_bound) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (bound, None) | (None, bound) => bound,
            };

            match allocator.place(minutes, task.difficulty, not_before, &free, &peak, date) {
                Some((start, end)) => {
                    let carved = free.carve(start, end);
                    debug_assert!(carved);
                    let inserted = timeline.insert(ScheduledEvent::for_task(task, start, end));
                    debug_assert!(inserted);
                    energy.consume(cost);

                    // Placement may have unblocked dependents.
                    for dependent in resolver.dependents_of(&task.id) {
                        if queued.contains(dependent) {
                            continue;
                        }
                        let Some(dep_task) = by_id.get(dependent).copied() else {
                            continue;
                        };
                        if dep_task.kind == TaskKind::Flexible
                            && resolver.is_ready(dep_task, &timeline)
                        {
                            heap.push(score_of(dep_task, &free, &energy));
                            queued.insert(dependent.clone());
                        }
                    }
                }
                None => {
                    unscheduled.push((task.id.clone(), UnscheduledReason::UnresolvableSlot));
                }
            }
        }

        // Whatever never became ready is stalled: either downstream of a
        // failed task, or part of a dependency cycle.
        let failed: BTreeSet<TaskId> = unscheduled.iter().map(|(id, _)| id.clone()).collect();
        for task in &flexible {
            if timeline.contains_task(&task.id) || failed.contains(&task.id) {
                continue;
            }
            let reason = if resolver.chain_contains(task, &by_id, &failed) {
                UnscheduledReason::UnresolvableSlot
            } else {
                UnscheduledReason::CyclicDependency
            };
            unscheduled.push((task.id.clone(), reason));
        }

        self.state = OptimizerState::Done;
        Ok(ScheduleOutcome {
            timeline: timeline.into_events(),
            unscheduled,
            final_energy: energy.current,
            idle_minutes: free.total_minutes(),
        })
    }

    /// Validate and commit fixed tasks: sorted by start, pairwise
    /// non-overlapping, clamped to the window.
    fn place_fixed_tasks(
        &mut self,
        tasks: &[Task],
        effective: &BTreeMap<TaskId, i64>,
        free: &mut FreeIntervalSet,
        timeline: &mut Timeline,
        energy: &mut EnergyState,
        unscheduled: &mut Vec<(TaskId, UnscheduledReason)>,
    ) -> Result<()> {
        let mut fixed: Vec<&Task> = tasks.iter().filter(|t| t.kind == TaskKind::Fixed).collect();
        for task in &fixed {
            if task.fixed_start.is_none() {
                return Err(self.fail(ScheduleError::MissingFixedStart {
                    id: task.id.clone(),
                }));
            }
        }
        fixed.sort_by(|a, b| a.fixed_start.cmp(&b.fixed_start).then_with(|| a.id.cmp(&b.id)));

        let mut last_placed: Option<(TaskId, DateTime<Utc>)> = None;
        for task in fixed {
            let Some(start) = task.fixed_start else {
                continue;
            };
            if start < self.window.start || start >= self.window.end {
                unscheduled.push((task.id.clone(), UnscheduledReason::UnresolvableSlot));
                continue;
            }
            let minutes = effective
                .get(&task.id)
                .copied()
                .unwrap_or(task.base_duration_minutes);
            let end = (start + Duration::minutes(minutes)).min(self.window.end);

            if let Some((prev_id, prev_end)) = &last_placed {
                if start < *prev_end {
                    return Err(self.fail(ScheduleError::OverlappingFixedTasks {
                        first: prev_id.clone(),
                        second: task.id.clone(),
                        at: start,
                    }));
                }
            }

            let carved = free.carve(start, end);
            debug_assert!(carved);
            let inserted = timeline.insert(ScheduledEvent::for_task(task, start, end));
            debug_assert!(inserted);
            energy.consume(EnergyState::task_cost(task.difficulty, (end - start).num_minutes()));
            last_placed = Some((task.id.clone(), end));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    use crate::adjust::{FixedTravel, FixedWeather};
    use crate::timeline::EventKind;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, hour, minute, 0).unwrap()
    }

    fn quiet_config() -> OptimizerConfig {
        OptimizerConfig {
            breaks: BreakPolicy::default().without_scheduled(),
            ..OptimizerConfig::default()
        }
    }

    fn optimizer(start_hour: u32, end_hour: u32, config: OptimizerConfig) -> Optimizer {
        let window = ScheduleWindow::from_hours(date(), start_hour, end_hour).unwrap();
        Optimizer::new(
            window,
            PeakHours::morning(),
            config,
            Box::new(FixedWeather(1.0)),
            Box::new(FixedTravel(0)),
        )
    }

    fn assert_no_overlaps(outcome: &ScheduleOutcome) {
        for pair in outcome.timeline.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "events overlap: {:?} / {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    fn task_event<'a>(outcome: &'a ScheduleOutcome, id: &str) -> &'a ScheduledEvent {
        outcome
            .timeline
            .iter()
            .find(|e| e.kind.task_id().map(String::as_str) == Some(id))
            .unwrap_or_else(|| panic!("task {id} not placed"))
    }

    #[test]
    fn invalid_window_fails_before_scheduling() {
        let err = ScheduleWindow::from_hours(date(), 17, 9).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeWindow { .. }));
    }

    #[test]
    fn overlapping_fixed_tasks_fail_the_run() {
        let mut opt = optimizer(9, 17, quiet_config());
        let tasks = vec![
            Task::fixed("m1", "Meeting 1", at(10, 0), 60),
            Task::fixed("m2", "Meeting 2", at(10, 30), 60),
        ];
        let err = opt.run(&tasks).unwrap_err();
        assert!(matches!(err, ScheduleError::OverlappingFixedTasks { .. }));
        assert_eq!(opt.state(), OptimizerState::Failed);
    }

    #[test]
    fn fixed_task_without_start_fails_the_run() {
        let mut opt = optimizer(9, 17, quiet_config());
        let mut broken = Task::flexible("m1", "Meeting", 60);
        broken.kind = TaskKind::Fixed;
        let err = opt.run(&[broken]).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingFixedStart { .. }));
    }

    // Scenario A: meeting 10:00-11:00; A (difficulty 8, 60 min) placed in a
    // free interval, B (30 min, depends on A) starts at or after A's end.
    #[test]
    fn dependency_chain_around_fixed_meeting() {
        let mut opt = optimizer(9, 17, quiet_config());
        let tasks = vec![
            Task::fixed("meeting", "Standup", at(10, 0), 60).with_difficulty(3),
            Task::flexible("a", "Design doc", 60).with_difficulty(8),
            Task::flexible("b", "Review design", 30).with_dependency("a"),
        ];
        let outcome = opt.run(&tasks).unwrap();

        assert_eq!(opt.state(), OptimizerState::Done);
        assert!(outcome.unscheduled.is_empty());
        assert_no_overlaps(&outcome);

        let a = task_event(&outcome, "a");
        let b = task_event(&outcome, "b");
        let meeting = task_event(&outcome, "meeting");
        assert_eq!(meeting.start, at(10, 0));
        assert!(b.start >= a.end, "dependent started before its dependency ended");
    }

    // Scenario B: two tasks depending on each other never become ready;
    // the fixed meeting is still placed.
    #[test]
    fn cycle_reported_fixed_still_placed() {
        let mut opt = optimizer(9, 17, quiet_config());
        let tasks = vec![
            Task::fixed("meeting", "Standup", at(10, 0), 60),
            Task::flexible("a", "A", 30).with_dependency("b"),
            Task::flexible("b", "B", 30).with_dependency("a"),
        ];
        let outcome = opt.run(&tasks).unwrap();

        assert_eq!(outcome.timeline.len(), 1);
        assert_eq!(task_event(&outcome, "meeting").start, at(10, 0));

        let mut unscheduled = outcome.unscheduled.clone();
        unscheduled.sort();
        assert_eq!(
            unscheduled,
            vec![
                ("a".to_string(), UnscheduledReason::CyclicDependency),
                ("b".to_string(), UnscheduledReason::CyclicDependency),
            ]
        );
    }

    // Scenario C: energy exactly at the critical threshold before a
    // difficulty-9 task; a rest break lands immediately before it and
    // restores at least to the recovery threshold.
    #[test]
    fn rest_break_inserted_before_demanding_task() {
        let mut opt = optimizer(8, 18, quiet_config());
        let tasks = vec![
            // Consumes 10/2 * 7h = 35 energy, leaving exactly 15 (critical)
            Task::fixed("grind", "Morning grind", at(8, 0), 7 * 60).with_difficulty(10),
            Task::flexible("deep", "Deep work", 60).with_difficulty(9),
        ];
        let outcome = opt.run(&tasks).unwrap();

        assert!(outcome.unscheduled.is_empty());
        assert_no_overlaps(&outcome);

        let deep = task_event(&outcome, "deep");
        let rest = outcome
            .timeline
            .iter()
            .find(|e| e.kind == EventKind::Break(crate::breaks::BreakKind::Rest))
            .expect("rest break inserted");
        assert_eq!(rest.end, deep.start, "rest break must directly precede the task");

        // The restore must reach the recovery threshold (deficit 15 at
        // 50/30 per minute => 9 minutes of rest).
        let policy = BreakPolicy::default();
        assert!(rest.effective_minutes as f64 * policy.restore_per_minute >= 15.0);
    }

    // Scenario D: one fixed task spanning the whole window; nothing else.
    #[test]
    fn full_window_fixed_task_leaves_no_free_interval() {
        let mut opt = optimizer(9, 17, OptimizerConfig::default());
        let tasks = vec![Task::fixed("all-day", "Offsite", at(9, 0), 8 * 60)];
        let outcome = opt.run(&tasks).unwrap();

        assert_eq!(outcome.timeline.len(), 1);
        assert_eq!(outcome.idle_minutes, 0);
        assert!(outcome.unscheduled.is_empty());
        let event = &outcome.timeline[0];
        assert_eq!((event.start, event.end), (at(9, 0), at(17, 0)));
    }

    #[test]
    fn scheduled_breaks_claim_their_slots() {
        let mut opt = optimizer(9, 17, OptimizerConfig::default());
        let tasks = vec![Task::flexible("t", "Long task", 6 * 60).with_difficulty(2)];
        let outcome = opt.run(&tasks).unwrap();

        let lunch = outcome
            .timeline
            .iter()
            .find(|e| e.kind == EventKind::Break(crate::breaks::BreakKind::Lunch))
            .expect("lunch inserted");
        assert_eq!(lunch.start, at(12, 30));
        assert_no_overlaps(&outcome);

        // 6h task cannot fit around the breaks
        assert_eq!(
            outcome.unscheduled,
            vec![("t".to_string(), UnscheduledReason::UnresolvableSlot)]
        );
    }

    #[test]
    fn unaffordable_task_reported_energy_exhausted() {
        let config = OptimizerConfig {
            max_energy: 10.0,
            ..quiet_config()
        };
        let mut opt = optimizer(9, 17, config);
        // Cost 10/2 * 2h = 10 > max - critical = 7
        let tasks = vec![Task::flexible("monster", "Monster", 120).with_difficulty(10)];
        let outcome = opt.run(&tasks).unwrap();

        assert_eq!(
            outcome.unscheduled,
            vec![("monster".to_string(), UnscheduledReason::EnergyExhausted)]
        );
    }

    #[test]
    fn failure_cascades_to_dependents() {
        let mut opt = optimizer(9, 11, quiet_config());
        let tasks = vec![
            // 4 hours can never fit a 2-hour window
            Task::flexible("big", "Big", 4 * 60),
            Task::flexible("after", "After", 30).with_dependency("big"),
        ];
        let outcome = opt.run(&tasks).unwrap();

        let mut unscheduled = outcome.unscheduled.clone();
        unscheduled.sort();
        assert_eq!(
            unscheduled,
            vec![
                ("after".to_string(), UnscheduledReason::UnresolvableSlot),
                ("big".to_string(), UnscheduledReason::UnresolvableSlot),
            ]
        );
    }

    #[test]
    fn fixed_task_outside_window_reported_not_fatal() {
        let mut opt = optimizer(9, 17, quiet_config());
        let tasks = vec![
            Task::fixed("early", "Too early", at(7, 0), 60),
            Task::flexible("t", "Task", 60),
        ];
        let outcome = opt.run(&tasks).unwrap();
        assert_eq!(
            outcome.unscheduled,
            vec![("early".to_string(), UnscheduledReason::UnresolvableSlot)]
        );
        assert!(outcome.timeline.iter().any(|e| e.kind.task_id().is_some()));
    }

    #[test]
    fn fixed_task_clamped_to_window_end() {
        let mut opt = optimizer(9, 17, quiet_config());
        let tasks = vec![Task::fixed("late", "Late call", at(16, 30), 60)];
        let outcome = opt.run(&tasks).unwrap();
        let event = task_event(&outcome, "late");
        assert_eq!(event.end, at(17, 0));
        assert_eq!(event.effective_minutes, 30);
    }

    #[test]
    fn demanding_task_lands_in_peak_hours() {
        let mut opt = optimizer(8, 18, quiet_config());
        let tasks = vec![
            Task::fixed("block", "Blocked morning", at(8, 0), 60),
            Task::flexible("deep", "Deep work", 90).with_difficulty(9),
            Task::flexible("mail", "Email sweep", 30).with_difficulty(2),
        ];
        let outcome = opt.run(&tasks).unwrap();

        let deep = task_event(&outcome, "deep");
        let peak = PeakHours::morning();
        assert!(peak.overlaps(date(), deep.start, deep.end));
        assert_no_overlaps(&outcome);
    }

    #[test]
    fn deterministic_given_identical_inputs() {
        let build_tasks = || {
            vec![
                Task::fixed("meeting", "Standup", at(10, 0), 30),
                Task::flexible("a", "A", 60).with_difficulty(8),
                Task::flexible("b", "B", 45).with_difficulty(5).with_dependency("a"),
                Task::flexible("c", "C", 30).with_difficulty(2),
                Task::flexible("d", "D", 90).with_difficulty(9),
            ]
        };
        let run = || {
            let mut opt = optimizer(9, 17, OptimizerConfig::default());
            opt.run(&build_tasks()).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn tie_break_is_lexicographic_not_insertion_order() {
        let run = |first: &str, second: &str| {
            let mut opt = optimizer(9, 12, quiet_config());
            let tasks = vec![
                Task::flexible(first, "Same shape", 60).with_difficulty(4),
                Task::flexible(second, "Same shape", 60).with_difficulty(4),
            ];
            opt.run(&tasks).unwrap()
        };

        let forward = run("a", "b");
        let reversed = run("b", "a");
        assert_eq!(
            forward.timeline[0].kind.task_id().map(String::as_str),
            Some("a")
        );
        assert_eq!(
            reversed.timeline[0].kind.task_id().map(String::as_str),
            Some("a")
        );
    }

    #[test]
    fn dependency_on_absent_task_is_ignored() {
        let mut opt = optimizer(9, 12, quiet_config());
        let tasks = vec![Task::flexible("t", "Task", 30).with_dependency("yesterday")];
        let outcome = opt.run(&tasks).unwrap();
        assert!(outcome.unscheduled.is_empty());
        assert_eq!(outcome.timeline.len(), 1);
    }

    #[test]
    fn energy_never_negative() {
        let mut opt = optimizer(8, 18, quiet_config());
        let tasks: Vec<Task> = (0..8)
            .map(|i| Task::flexible(format!("t{i}"), format!("Task {i}"), 60).with_difficulty(10))
            .collect();
        let outcome = opt.run(&tasks).unwrap();
        assert!(outcome.final_energy >= 0.0);
        assert_no_overlaps(&outcome);
    }
}

//! `plan` command: run one optimization pass and print the timetable.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};

use dayplan_core::{
    EventKind, LocationType, Optimizer, OptimizerConfig, PeakHours, ScheduleOutcome,
    ScheduleWindow, SimulatedTravel, SimulatedWeather, Task, TaskId, TaskKind,
};

#[derive(Args)]
pub struct PlanArgs {
    /// Date to schedule (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// First hour of the working window (0-23)
    #[arg(long, default_value_t = 8)]
    pub start_hour: u32,
    /// Last hour of the working window (0-23)
    #[arg(long, default_value_t = 18)]
    pub end_hour: u32,
    /// Path to the JSON task file
    #[arg(long)]
    pub tasks: PathBuf,
    /// Optional TOML config overriding weights, energy and break policy
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed for the simulated weather/travel providers
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Energy budget for the day, overriding the config file
    #[arg(long)]
    pub max_energy: Option<f64>,
    /// Peak focus hours as START-END (24h), e.g. 9-13
    #[arg(long, default_value = "9-13")]
    pub peak: String,
    /// Emit the outcome as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One entry of the JSON task file. Times of day are given as HH:MM on the
/// planned date; entries without an id get a generated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub duration_minutes: i64,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_start: Option<String>,
    #[serde(default)]
    pub outdoor: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

fn default_difficulty() -> u8 {
    5
}

impl TaskRecord {
    /// Lower the record onto a concrete date.
    pub fn into_task(self, date: NaiveDate) -> Result<Task, Box<dyn std::error::Error>> {
        let id = self
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut task = match &self.fixed_start {
            Some(start) => {
                let start = at_time(date, start)?;
                Task::fixed(id, self.title, start, self.duration_minutes)
            }
            None => Task::flexible(id, self.title, self.duration_minutes),
        };
        task = task.with_difficulty(self.difficulty);
        if self.outdoor {
            task = task.with_location(LocationType::Outdoor);
        }
        for dep in self.depends_on {
            task = task.with_dependency(dep);
        }
        if let Some(deadline) = &self.deadline {
            task = task.with_deadline(at_time(date, deadline)?);
        }
        Ok(task)
    }
}

fn at_time(
    date: NaiveDate,
    time: &str,
) -> Result<chrono::DateTime<Utc>, Box<dyn std::error::Error>> {
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| format!("invalid time '{time}' (expected HH:MM): {e}"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

fn parse_peak(spec: &str) -> Result<PeakHours, Box<dyn std::error::Error>> {
    let (start, end) = spec
        .split_once('-')
        .ok_or_else(|| format!("invalid peak spec '{spec}' (expected START-END)"))?;
    let start: u32 = start.trim().parse()?;
    let end: u32 = end.trim().parse()?;
    Ok(PeakHours::from_hour_span(start, end))
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let window = ScheduleWindow::from_hours(args.date, args.start_hour, args.end_hour)?;
    let peak = parse_peak(&args.peak)?;
    let mut config: OptimizerConfig = match &args.config {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => OptimizerConfig::default(),
    };
    if let Some(max_energy) = args.max_energy {
        config.max_energy = max_energy;
    }

    let records: Vec<TaskRecord> = serde_json::from_str(&fs::read_to_string(&args.tasks)?)?;
    let tasks = records
        .into_iter()
        .map(|record| record.into_task(args.date))
        .collect::<Result<Vec<_>, _>>()?;

    let weather = SimulatedWeather::from_seed(args.seed, args.date);
    let condition = weather.condition();
    let travel = SimulatedTravel::new(args.seed);

    let mut optimizer = Optimizer::new(window, peak, config, Box::new(weather), Box::new(travel));
    let outcome = optimizer.run(&tasks)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_timetable(&outcome, &tasks, args.date, format!("{condition:?}"));
    }
    Ok(())
}

fn print_timetable(outcome: &ScheduleOutcome, tasks: &[Task], date: NaiveDate, weather: String) {
    let kinds: BTreeMap<TaskId, TaskKind> =
        tasks.iter().map(|t| (t.id.clone(), t.kind)).collect();

    println!("{}", "=".repeat(72));
    println!("DAILY TIME TABLE: {date}   (weather: {weather})");
    println!("{}", "=".repeat(72));
    println!("{:<7} {:<7} {:>5}  {:<6} {:>4}  {}", "Start", "End", "Dur", "Type", "Diff", "Title");
    println!("{}", "-".repeat(72));

    for event in &outcome.timeline {
        let (kind, difficulty) = match &event.kind {
            EventKind::Break(_) => ("BREAK".to_string(), "-".to_string()),
            EventKind::Task(id) => {
                let kind = match kinds.get(id) {
                    Some(TaskKind::Fixed) => "FIXED",
                    _ => "FLEX",
                };
                let difficulty = tasks
                    .iter()
                    .find(|t| &t.id == id)
                    .map(|t| t.difficulty.to_string())
                    .unwrap_or_else(|| "-".to_string());
                (kind.to_string(), difficulty)
            }
        };
        println!(
            "{:<7} {:<7} {:>5}  {:<6} {:>4}  {}",
            event.start.format("%H:%M"),
            event.end.format("%H:%M"),
            event.effective_minutes,
            kind,
            difficulty,
            event.title
        );
    }
    if outcome.timeline.is_empty() {
        println!("(nothing scheduled)");
    }

    println!("{}", "-".repeat(72));
    println!(
        "Final energy: {:.1}   Idle minutes: {}",
        outcome.final_energy, outcome.idle_minutes
    );

    if !outcome.unscheduled.is_empty() {
        println!();
        println!("UNSCHEDULED:");
        for (id, reason) in &outcome.unscheduled {
            let title = tasks
                .iter()
                .find(|t| &t.id == id)
                .map(|t| t.title.as_str())
                .unwrap_or(id.as_str());
            println!("  - {title} ({reason})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn record_with_fixed_start_becomes_fixed_task() {
        let record = TaskRecord {
            id: Some("m1".to_string()),
            title: "Meeting".to_string(),
            duration_minutes: 60,
            difficulty: 4,
            fixed_start: Some("10:00".to_string()),
            outdoor: false,
            depends_on: vec![],
            deadline: None,
        };
        let task = record.into_task(date()).unwrap();
        assert_eq!(task.kind, TaskKind::Fixed);
        assert_eq!(
            task.fixed_start,
            Some(Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn record_without_id_gets_one() {
        let record = TaskRecord {
            id: None,
            title: "Anon".to_string(),
            duration_minutes: 30,
            difficulty: 5,
            fixed_start: None,
            outdoor: false,
            depends_on: vec![],
            deadline: None,
        };
        let task = record.into_task(date()).unwrap();
        assert!(!task.id.is_empty());
        assert_eq!(task.kind, TaskKind::Flexible);
    }

    #[test]
    fn bad_time_rejected() {
        let record = TaskRecord {
            id: None,
            title: "Broken".to_string(),
            duration_minutes: 30,
            difficulty: 5,
            fixed_start: Some("25:99".to_string()),
            outdoor: false,
            depends_on: vec![],
            deadline: None,
        };
        assert!(record.into_task(date()).is_err());
    }

    #[test]
    fn peak_spec_parsing() {
        assert!(parse_peak("9-13").is_ok());
        assert!(parse_peak("913").is_err());
        assert!(parse_peak("a-b").is_err());
    }
}

//! Effective-duration computation with external condition providers.
//!
//! Weather and travel conditions are supplied by black-box providers; the
//! adjuster combines them with a task's base duration and caches the result
//! per task for the lifetime of one run, so repeated reads stay stable even
//! when a provider is stochastic.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::task::{LocationType, Task, TaskId};

/// Source of weather-driven duration factors.
pub trait WeatherProvider {
    /// Multiplicative duration factor for an outdoor task on `date`.
    fn factor(&self, task: &Task, date: NaiveDate) -> f64;
}

/// Source of travel buffers added to a task's duration.
pub trait TravelProvider {
    /// Extra minutes of travel to attach to the task.
    fn buffer_minutes(&self, task: &Task) -> i64;
}

/// Weather conditions produced by the simulated provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Windy,
    Rain,
}

impl WeatherCondition {
    /// Duration factor applied to outdoor tasks under this condition.
    pub fn duration_factor(self) -> f64 {
        match self {
            WeatherCondition::Clear => 1.0,
            WeatherCondition::Windy => 1.2,
            WeatherCondition::Rain => 1.5,
        }
    }
}

/// Seeded weather simulation: one condition per (seed, date).
#[derive(Debug, Clone)]
pub struct SimulatedWeather {
    condition: WeatherCondition,
}

impl SimulatedWeather {
    /// Draw the day's condition from a seeded generator. The date is mixed
    /// into the seed so consecutive days differ under the same seed.
    pub fn from_seed(seed: u64, date: NaiveDate) -> Self {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        date.hash(&mut hasher);
        let mut rng = Pcg64::seed_from_u64(hasher.finish());
        let condition = match rng.gen_range(0..3) {
            0 => WeatherCondition::Clear,
            1 => WeatherCondition::Windy,
            _ => WeatherCondition::Rain,
        };
        SimulatedWeather { condition }
    }

    pub fn condition(&self) -> WeatherCondition {
        self.condition
    }
}

impl WeatherProvider for SimulatedWeather {
    fn factor(&self, _task: &Task, _date: NaiveDate) -> f64 {
        self.condition.duration_factor()
    }
}

/// Seeded travel simulation: a 20-50 minute buffer for outdoor tasks,
/// stable per task id under a given seed.
#[derive(Debug, Clone)]
pub struct SimulatedTravel {
    seed: u64,
}

impl SimulatedTravel {
    pub fn new(seed: u64) -> Self {
        SimulatedTravel { seed }
    }
}

impl TravelProvider for SimulatedTravel {
    fn buffer_minutes(&self, task: &Task) -> i64 {
        if task.location != LocationType::Outdoor {
            return 0;
        }
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        task.id.hash(&mut hasher);
        let mut rng = Pcg64::seed_from_u64(hasher.finish());
        rng.gen_range(20..=50)
    }
}

/// Constant-factor weather, for tests and calm-day runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedWeather(pub f64);

impl WeatherProvider for FixedWeather {
    fn factor(&self, _task: &Task, _date: NaiveDate) -> f64 {
        self.0
    }
}

/// Constant travel buffer, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTravel(pub i64);

impl TravelProvider for FixedTravel {
    fn buffer_minutes(&self, _task: &Task) -> i64 {
        self.0
    }
}

/// Computes and caches each task's effective duration for one run.
pub struct DurationAdjuster {
    date: NaiveDate,
    weather: Box<dyn WeatherProvider>,
    travel: Box<dyn TravelProvider>,
    cache: BTreeMap<TaskId, i64>,
}

impl DurationAdjuster {
    pub fn new(
        date: NaiveDate,
        weather: Box<dyn WeatherProvider>,
        travel: Box<dyn TravelProvider>,
    ) -> Self {
        DurationAdjuster {
            date,
            weather,
            travel,
            cache: BTreeMap::new(),
        }
    }

    /// Effective duration in minutes: base times the weather factor (outdoor
    /// only) plus the travel buffer, computed once per task and cached.
    pub fn adjust(&mut self, task: &Task) -> i64 {
        if let Some(&minutes) = self.cache.get(&task.id) {
            return minutes;
        }
        let factor = match task.location {
            LocationType::Outdoor => self.weather.factor(task, self.date),
            LocationType::Indoor => 1.0,
        };
        let adjusted = (task.base_duration_minutes as f64 * factor).round() as i64;
        let minutes = (adjusted + self.travel.buffer_minutes(task)).max(1);
        self.cache.insert(task.id.clone(), minutes);
        minutes
    }
}

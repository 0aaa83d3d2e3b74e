//! Free-interval tracking and the output timeline.
//!
//! This module provides:
//! - The free-interval set (schedule window minus all placed events)
//! - The ordered, non-overlapping sequence of scheduled events

mod event;
mod gap;

pub use event::{EventKind, ScheduledEvent, Timeline};
pub use gap::{FreeInterval, FreeIntervalSet};

//! Pipeline entry points for crawler operations.
//!
//! - `run_lectures`: Fetch lectures and classrooms of every target unit
//! - `run_courses`: Fetch courses and curricula of every target unit

pub mod courses;
pub mod lectures;
pub mod units;

use std::fmt;

use chrono::{DateTime, Utc};

pub use courses::run_courses;
pub use lectures::run_lectures;

/// Statistics about one pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Units enumerated
    pub unit_count: usize,
    /// Items found on the unit listings
    pub listing_count: usize,
    /// Records accepted and written
    pub record_count: usize,
}

impl RunSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} units, {} listed, {} accepted in {:.1}s",
            self.unit_count,
            self.listing_count,
            self.record_count,
            self.elapsed().num_milliseconds() as f64 / 1000.0
        )
    }
}

//! Service layer for the crawler application.
//!
//! This module contains the fetch logic for:
//! - Unit, lecture and course enumeration (`ListingFetcher`)
//! - Lecture details (`LectureCrawler`)
//! - Course curricula (`CourseCrawler`)
//! - Bounded per-item execution (`BoundedScheduler`)

mod courses;
mod lectures;
mod listing;
mod scheduler;

pub use courses::CourseCrawler;
pub use lectures::LectureCrawler;
pub use listing::ListingFetcher;
pub use scheduler::{BoundedScheduler, Progress};

// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod campus;
mod config;
mod course;
mod lecture;

// Re-export all public types
pub use campus::{OTHER_CAMPUS, Unit, UnitDirectory, campus_for_code, campus_for_unit};
pub use config::{Config, CrawlerConfig, OutputConfig};
pub use course::{Course, CourseListing, CurriculumCategory, CurriculumEntry, Periods};
pub use lecture::{
    Classroom, Lecture, LectureListing, ScheduleSlot, Vacancies, VacancyCategory, VacancyCounts,
    VacancySubgroup,
};

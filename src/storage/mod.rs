//! Storage abstractions for catalog output.
//!
//! ## Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── db.json       # Lectures with their classrooms
//! ├── campi.json    # Unit names grouped by campus
//! └── cursos.json   # Courses with their curricula (course mode)
//! ```

pub mod local;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Course, Lecture};

pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Where the file was written
    pub location: String,
    /// Number of top-level records written
    pub count: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Write the accepted lectures.
    async fn write_lectures(&self, lectures: &[Lecture]) -> Result<WriteMetadata>;

    /// Write the accepted courses.
    async fn write_courses(&self, courses: &[Course]) -> Result<WriteMetadata>;

    /// Write unit display names grouped by campus.
    async fn write_campuses(
        &self,
        campuses: &BTreeMap<String, Vec<String>>,
    ) -> Result<WriteMetadata>;
}

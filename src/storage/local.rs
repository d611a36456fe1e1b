//! Local filesystem storage implementation.
//!
//! Every file is written whole: serialized to a sibling temp file, then
//! renamed over the target.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{Course, Lecture, OutputConfig};
use crate::storage::{CatalogStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    output: OutputConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, output: OutputConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            output,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a file name.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Write compact JSON. `serde_json` leaves non-ASCII text unescaped.
    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        count: usize,
    ) -> Result<WriteMetadata> {
        let bytes = serde_json::to_vec(value)?;
        let path = self.write_bytes(key, &bytes).await?;

        log::info!("Wrote {} records to {}", count, path.display());
        Ok(WriteMetadata {
            location: path.display().to_string(),
            count,
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn write_lectures(&self, lectures: &[Lecture]) -> Result<WriteMetadata> {
        self.write_json(&self.output.lectures_file, lectures, lectures.len())
            .await
    }

    async fn write_courses(&self, courses: &[Course]) -> Result<WriteMetadata> {
        self.write_json(&self.output.courses_file, courses, courses.len())
            .await
    }

    async fn write_campuses(
        &self,
        campuses: &BTreeMap<String, Vec<String>>,
    ) -> Result<WriteMetadata> {
        self.write_json(&self.output.campuses_file, campuses, campuses.len())
            .await
    }
}

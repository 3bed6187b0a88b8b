//! The batch course lookup seam.
//!
//! Expansion of a persisted roadmap needs full course data for every id on
//! the plan. Where that data comes from (a catalog API, a cached file, a
//! test fixture) is behind the [`CourseLookup`] trait. [`CatalogLookup`]
//! serves lookups from an in-memory catalog.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::plan::PlannedCourse;

/// Batch lookup of course data by catalog id.
///
/// Ids missing from the returned map are unresolved; that is not an error.
/// An `Err` means the whole batch failed.
#[async_trait]
pub trait CourseLookup: Send + Sync {
    async fn lookup(&self, ids: &[String]) -> Result<HashMap<String, PlannedCourse>>;
}

// Compile-time assertion: CourseLookup must be usable as `dyn CourseLookup`.
const _: () = {
    fn _assert_object_safe(_: &dyn CourseLookup) {}
};

// ---------------------------------------------------------------------------
// CatalogLookup
// ---------------------------------------------------------------------------

/// A lookup backed by an in-memory map of id to course.
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup {
    courses: HashMap<String, PlannedCourse>,
}

impl CatalogLookup {
    pub fn new(courses: impl IntoIterator<Item = PlannedCourse>) -> Self {
        Self {
            courses: courses
                .into_iter()
                .map(|course| (course.id.clone(), course))
                .collect(),
        }
    }

    /// Parse a catalog from JSON: either an array of courses or an object
    /// keyed by course id.
    ///
    /// Entries are decoded one at a time. An entry that is not a valid course
    /// (for example one with a malformed prerequisite tree) is skipped with a
    /// warning naming the course and the defect; the rest of the catalog
    /// still loads.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("failed to parse course catalog")?;
        let entries: Vec<(Option<String>, Value)> = match value {
            Value::Array(items) => items.into_iter().map(|item| (None, item)).collect(),
            Value::Object(map) => map.into_iter().map(|(key, item)| (Some(key), item)).collect(),
            _ => bail!("failed to parse course catalog: expected an array or an object of courses"),
        };

        let mut courses = HashMap::with_capacity(entries.len());
        for (key, entry) in entries {
            let label = key
                .clone()
                .or_else(|| entry.get("id").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| "<no id>".to_string());
            match serde_json::from_value::<PlannedCourse>(entry) {
                Ok(course) => {
                    courses.insert(key.unwrap_or_else(|| course.id.clone()), course);
                }
                Err(err) => warn!(course = %label, error = %err, "skipping malformed catalog entry"),
            }
        }
        Ok(Self { courses })
    }

    /// Read and parse a JSON catalog file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read course catalog at {}", path.display()))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("invalid course catalog at {}", path.display()))?;
        debug!(path = %path.display(), courses = catalog.len(), "loaded course catalog");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&PlannedCourse> {
        self.courses.get(id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[async_trait]
impl CourseLookup for CatalogLookup {
    async fn lookup(&self, ids: &[String]) -> Result<HashMap<String, PlannedCourse>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.courses.get(id).map(|c| (id.clone(), c.clone())))
            .collect())
    }
}

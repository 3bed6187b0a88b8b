//! Reading roadmap documents and writing command output.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roadmap_core::{CourseSlot, RoadmapPlan, SavedRoadmap, TransferRecord};

/// Expanded plans as printed by `roadmap expand` and read by `roadmap collapse`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpandedRoadmap {
    pub planners: Vec<RoadmapPlan<CourseSlot>>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

/// Read a saved roadmap in either the current or the legacy layout.
pub fn load_saved_roadmap(path: &str) -> Result<SavedRoadmap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roadmap file: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse roadmap file: {path}"))
}

pub fn load_expanded_roadmap(path: &str) -> Result<ExpandedRoadmap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse plan file: {path}"))
}

/// Write pretty JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write to {path}"))?;
            eprintln!("Wrote {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

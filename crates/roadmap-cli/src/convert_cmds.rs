//! Handlers for `roadmap expand` and `roadmap collapse`.
//!
//! - `roadmap expand <file>`   -- saved roadmap -> plans with full course data
//! - `roadmap collapse <file>` -- plans with full course data -> saved roadmap

use anyhow::Result;

use roadmap_core::{CatalogLookup, SavedRoadmap, collapse_all, expand_all};

use crate::config::RoadmapConfig;
use crate::roadmap_file::{ExpandedRoadmap, load_expanded_roadmap, load_saved_roadmap, write_json};

// -----------------------------------------------------------------------
// roadmap expand <file>
// -----------------------------------------------------------------------

pub async fn run_expand(config: &RoadmapConfig, file: &str, output: Option<&str>) -> Result<()> {
    let roadmap = load_saved_roadmap(file)?;
    let transfers = roadmap.transfers().to_vec();
    let planners = roadmap.into_planners(&config.default_plan_name);

    let catalog = CatalogLookup::from_json_file(&config.catalog_path).await?;
    // Unresolved ids are logged by `expand` and kept as placeholders.
    let plans = expand_all(&planners, &catalog).await?;

    let expanded = ExpandedRoadmap {
        planners: plans,
        transfers,
    };
    write_json(&expanded, output)
}

// -----------------------------------------------------------------------
// roadmap collapse <file>
// -----------------------------------------------------------------------

pub fn run_collapse(file: &str, output: Option<&str>) -> Result<()> {
    let expanded = load_expanded_roadmap(file)?;
    let saved = SavedRoadmap::new(collapse_all(&expanded.planners), expanded.transfers);
    write_json(&saved, output)
}

//! `roadmap validate <file>` -- expand a saved roadmap against the course
//! catalog and report courses whose prerequisites are not met.

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::info;

use roadmap_core::{
    CatalogLookup, Plan, UnresolvedCourse, ValidationReport, expand_all, validate,
};

use crate::config::RoadmapConfig;
use crate::roadmap_file::load_saved_roadmap;

/// Per-plan output of `roadmap validate --json`.
#[derive(Debug, Serialize)]
struct PlanValidation {
    name: String,
    unresolved: Vec<UnresolvedCourse>,
    report: ValidationReport,
}

/// Validate every plan (or the one named `plan_name`) in a saved roadmap.
///
/// Returns `Ok(false)` when any validated plan has invalid courses.
pub async fn run_validate(
    config: &RoadmapConfig,
    file: &str,
    plan_name: Option<&str>,
    json: bool,
) -> Result<bool> {
    let roadmap = load_saved_roadmap(file)?;
    let transfers = roadmap.transfers().to_vec();
    let mut planners = roadmap.into_planners(&config.default_plan_name);

    if let Some(name) = plan_name {
        planners.retain(|p| p.name == name);
        if planners.is_empty() {
            bail!("no plan named {name:?} in {file}");
        }
    }

    let catalog = CatalogLookup::from_json_file(&config.catalog_path).await?;
    info!(courses = catalog.len(), plans = planners.len(), "validating roadmap");
    let plans = expand_all(&planners, &catalog).await?;

    let mut results = Vec::with_capacity(plans.len());
    for plan in plans {
        let (content, unresolved) = plan.content.into_resolved();
        let report = validate(&transfers, &content);
        results.push((plan.name, content, unresolved, report));
    }

    let all_valid = results.iter().all(|(_, _, _, report)| report.is_valid());

    if json {
        let output: Vec<PlanValidation> = results
            .into_iter()
            .map(|(name, _, unresolved, report)| PlanValidation {
                name,
                unresolved,
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (i, (name, content, unresolved, report)) in results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", render_plan(name, content, unresolved, report));
        }
    }

    Ok(all_valid)
}

/// Human-readable summary of one plan's validation.
fn render_plan(
    name: &str,
    plan: &Plan,
    unresolved: &[UnresolvedCourse],
    report: &ValidationReport,
) -> String {
    let mut out = String::new();
    let (min_units, max_units) = plan.units();
    let units = if min_units == max_units {
        format!("{min_units} units")
    } else {
        format!("{min_units}-{max_units} units")
    };
    out.push_str(&format!("Plan {name:?} ({units})\n"));

    if !unresolved.is_empty() {
        out.push_str("  Courses not found in the catalog:\n");
        for course in unresolved {
            let loc = course.location;
            let quarter = quarter_label(plan, loc.year_index, loc.quarter_index);
            out.push_str(&format!("    - {quarter}: {}\n", course.id));
        }
    }

    if report.is_valid() {
        out.push_str("  All prerequisites satisfied.\n");
        return out;
    }

    out.push_str(&format!(
        "  {} course(s) with unmet prerequisites:\n",
        report.invalid.len()
    ));
    for invalid in &report.invalid {
        let loc = invalid.location;
        let quarter = quarter_label(plan, loc.year_index, loc.quarter_index);
        let course = plan.get(loc);
        let key = course
            .map(|c| c.concurrency_key())
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "    - {quarter}: {key} needs {}\n",
            invalid.required.join(", ")
        ));
        // A single-leaf tree says nothing beyond the line above.
        if let Some(tree) = course.and_then(|c| c.prerequisite_tree.as_ref()) {
            if tree.leaves().len() > 1 {
                out.push_str(&format!("      requires {tree}\n"));
            }
        }
    }

    let missing: Vec<&str> = report.missing.iter().map(String::as_str).collect();
    out.push_str(&format!("  Missing overall: {}\n", missing.join(", ")));
    out
}

fn quarter_label(plan: &Plan, year_index: usize, quarter_index: usize) -> String {
    let Some(year) = plan.years.get(year_index) else {
        return format!("year {year_index}");
    };
    match year.quarters.get(quarter_index) {
        Some(quarter) => format!(
            "{} ({}) {}",
            year.name,
            year.start_year,
            quarter.name.display_name()
        ),
        None => year.name.clone(),
    }
}

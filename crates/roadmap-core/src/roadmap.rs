//! Roadmap persistence: collapsing hydrated plans to course ids and
//! expanding them back through a [`CourseLookup`].
//!
//! The persisted shape is a bit-exact contract with stored roadmaps:
//!
//! ```json
//! [{ "startYear": 2024, "name": "Year 1",
//!    "quarters": [{ "name": "Fall", "courses": ["COMPSCI161"] }] }]
//! ```
//!
//! A stored roadmap is either a list of named plans
//! (`{"planners": [{"name": ..., "content": [...]}]}`) or, in the legacy
//! layout, a single bare plan (`{"planner": [...]}`).

use std::collections::HashMap;

use futures::future::try_join_all;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::lookup::CourseLookup;
use crate::plan::{CourseRef, CourseSlot, Plan, PlannedCourse, Quarter, TransferRecord, Year};
use crate::quarter::{InvalidQuarterName, normalize};

/// Name given to the plan of a legacy single-plan roadmap.
pub const DEFAULT_PLAN_NAME: &str = "Roadmap";

// ---------------------------------------------------------------------------
// Persisted types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuarter {
    /// Any spelling accepted by [`normalize`].
    pub name: String,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedYear {
    pub start_year: i32,
    pub name: String,
    pub quarters: Vec<PersistedQuarter>,
}

pub type PersistedPlan = Vec<PersistedYear>;

/// A persisted plan with its user-facing name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlanner {
    pub name: String,
    pub content: PersistedPlan,
}

/// A hydrated plan with its user-facing name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPlan<C = CourseSlot> {
    pub name: String,
    pub content: Plan<C>,
}

/// A stored roadmap in either the current or the legacy layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedRoadmap {
    Planners {
        planners: Vec<SavedPlanner>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transfers: Vec<TransferRecord>,
    },
    Legacy {
        planner: PersistedPlan,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transfers: Vec<TransferRecord>,
    },
}

impl SavedRoadmap {
    /// A roadmap in the current layout.
    pub fn new(planners: Vec<SavedPlanner>, transfers: Vec<TransferRecord>) -> Self {
        Self::Planners {
            planners,
            transfers,
        }
    }

    pub fn transfers(&self) -> &[TransferRecord] {
        match self {
            Self::Planners { transfers, .. } | Self::Legacy { transfers, .. } => transfers,
        }
    }

    /// The named plans; a legacy roadmap yields one plan called `default_name`.
    pub fn into_planners(self, default_name: &str) -> Vec<SavedPlanner> {
        match self {
            Self::Planners { planners, .. } => planners,
            Self::Legacy { planner, .. } => vec![SavedPlanner {
                name: default_name.to_string(),
                content: planner,
            }],
        }
    }
}

/// Errors from [`expand`].
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    InvalidQuarterName(#[from] InvalidQuarterName),

    /// The batch lookup failed as a whole.
    #[error(transparent)]
    Lookup(anyhow::Error),
}

// ---------------------------------------------------------------------------
// Collapse
// ---------------------------------------------------------------------------

/// Keep only course ids, discarding every other course attribute.
pub fn collapse<C: CourseRef>(plan: &Plan<C>) -> PersistedPlan {
    plan.years
        .iter()
        .map(|year| PersistedYear {
            start_year: year.start_year,
            name: year.name.clone(),
            quarters: year
                .quarters
                .iter()
                .map(|quarter| PersistedQuarter {
                    name: quarter.name.id().to_string(),
                    courses: quarter
                        .courses
                        .iter()
                        .map(|course| course.course_id().to_string())
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Collapse every named plan.
pub fn collapse_all<C: CourseRef>(plans: &[RoadmapPlan<C>]) -> Vec<SavedPlanner> {
    plans
        .iter()
        .map(|plan| SavedPlanner {
            name: plan.name.clone(),
            content: collapse(&plan.content),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Expand
// ---------------------------------------------------------------------------

/// Rebuild a plan from its persisted form.
///
/// All distinct course ids go to `lookup` in a single batch; an empty plan
/// makes no request. Ids the lookup does not return become
/// [`CourseSlot::Unresolved`]. Quarter names are normalized before the
/// lookup, so an unrecognized name fails without a request.
pub async fn expand(
    persisted: &PersistedPlan,
    lookup: &dyn CourseLookup,
) -> Result<Plan<CourseSlot>, ExpandError> {
    let quarter_names = persisted
        .iter()
        .map(|year| {
            year.quarters
                .iter()
                .map(|quarter| normalize(&quarter.name))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let ids: IndexSet<&str> = persisted
        .iter()
        .flat_map(|year| &year.quarters)
        .flat_map(|quarter| &quarter.courses)
        .map(String::as_str)
        .collect();

    let course_lookup: HashMap<String, PlannedCourse> = if ids.is_empty() {
        HashMap::new()
    } else {
        let ids: Vec<String> = ids.into_iter().map(str::to_owned).collect();
        debug!(courses = ids.len(), "looking up plan courses");
        lookup.lookup(&ids).await.map_err(ExpandError::Lookup)?
    };

    let years = persisted
        .iter()
        .zip(quarter_names)
        .map(|(saved_year, names)| Year {
            start_year: saved_year.start_year,
            name: saved_year.name.clone(),
            quarters: saved_year
                .quarters
                .iter()
                .zip(names)
                .map(|(saved_quarter, name)| Quarter {
                    name,
                    courses: saved_quarter
                        .courses
                        .iter()
                        .map(|id| match course_lookup.get(id) {
                            Some(course) => CourseSlot::Resolved(course.clone()),
                            None => CourseSlot::Unresolved {
                                unresolved: id.clone(),
                            },
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let plan = Plan::new(years);
    let unresolved = plan.unresolved();
    if !unresolved.is_empty() {
        warn!(
            count = unresolved.len(),
            ids = ?unresolved.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
            "plan references courses missing from the catalog"
        );
    }

    Ok(plan)
}

/// Expand every named plan concurrently, one lookup batch per plan.
pub async fn expand_all(
    planners: &[SavedPlanner],
    lookup: &dyn CourseLookup,
) -> Result<Vec<RoadmapPlan>, ExpandError> {
    try_join_all(planners.iter().map(|planner| async move {
        let content = expand(&planner.content, lookup).await?;
        Ok::<_, ExpandError>(RoadmapPlan {
            name: planner.name.clone(),
            content,
        })
    }))
    .await
}

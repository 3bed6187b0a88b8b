//! Chronological prerequisite validation of a whole plan.
//!
//! The validator walks the plan once, year by year and quarter by quarter.
//! Transfer credit seeds the taken set. Each course is evaluated against
//! everything taken in earlier quarters plus the corequisite it shares the
//! current quarter with; the quarter's courses join the taken set only after
//! the whole quarter has been evaluated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::plan::{CourseLocation, Plan, TransferRecord};
use crate::requirement::{MissingSet, evaluate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A planned course whose requirements are not met where it is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidCourseReport {
    pub location: CourseLocation,
    /// Unmet leaf ids, in requirement-tree order.
    pub required: Vec<String>,
}

/// The outcome of validating a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every unmet leaf across the plan.
    pub missing: MissingSet,
    /// Offending courses in plan order.
    pub invalid: Vec<InvalidCourseReport>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// The report for the course at `location`, if it is invalid.
    pub fn invalid_at(&self, location: CourseLocation) -> Option<&InvalidCourseReport> {
        self.invalid.iter().find(|report| report.location == location)
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validate every course's requirement tree against its position in `plan`.
///
/// A course counts as taken for all later quarters whether or not its own
/// requirements were met.
pub fn validate(transfers: &[TransferRecord], plan: &Plan) -> ValidationReport {
    let mut taken: HashSet<String> = transfers.iter().map(|t| t.name.clone()).collect();
    let mut report = ValidationReport::default();

    for (year_index, year) in plan.years.iter().enumerate() {
        for (quarter_index, quarter) in year.quarters.iter().enumerate() {
            let taking: HashSet<String> = quarter
                .courses
                .iter()
                .map(|course| course.concurrency_key())
                .collect();

            for (course_index, course) in quarter.courses.iter().enumerate() {
                let Some(tree) = &course.prerequisite_tree else {
                    continue;
                };

                let required = evaluate(&taken, tree, &taking, &course.corequisites);
                if required.is_empty() {
                    continue;
                }

                debug!(
                    course = %course.id,
                    year = %year.name,
                    quarter = %quarter.name,
                    missing = required.len(),
                    "course requirements not met"
                );

                report.missing.extend(required.iter().cloned());
                report.invalid.push(InvalidCourseReport {
                    location: CourseLocation {
                        year_index,
                        quarter_index,
                        course_index,
                    },
                    required: required.into_iter().collect(),
                });
            }

            // Only after the quarter is over do its courses count as taken.
            taken.extend(taking);
        }
    }

    info!(
        invalid = report.invalid.len(),
        missing = report.missing.len(),
        "plan validated"
    );

    report
}

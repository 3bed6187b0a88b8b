//! The multi-year course plan.
//!
//! A [`Plan`] is an ordered list of [`Year`]s, each holding ordered
//! [`Quarter`]s of courses. The containers are generic over the course slot
//! so the same shape carries fully hydrated courses ([`PlannedCourse`]),
//! expanded slots that may be unresolved ([`CourseSlot`]), or bare ids.

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::quarter::{QuarterName, default_quarters};
use crate::requirement::Requirement;

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// A course placed on the plan, as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCourse {
    /// Catalog identifier, e.g. `"COMPSCI161"`.
    pub id: String,
    pub department: String,
    pub course_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub min_units: f64,
    #[serde(default)]
    pub max_units: f64,
    /// Leaf id that may be satisfied by enrolling in the same quarter.
    #[serde(default)]
    pub corequisites: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite_tree: Option<Requirement>,
}

impl PlannedCourse {
    /// The `"{department} {course_number}"` form used by requirement leaves.
    pub fn concurrency_key(&self) -> String {
        format!("{} {}", self.department, self.course_number)
    }
}

/// Anything that names a catalog course id.
pub trait CourseRef {
    fn course_id(&self) -> &str;
}

impl CourseRef for PlannedCourse {
    fn course_id(&self) -> &str {
        &self.id
    }
}

impl CourseRef for String {
    fn course_id(&self) -> &str {
        self
    }
}

/// A course slot after expansion: either the looked-up course or a
/// placeholder for an id the catalog no longer knows.
///
/// Serialized untagged; a placeholder is `{"unresolved": "<id>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CourseSlot {
    Resolved(PlannedCourse),
    Unresolved { unresolved: String },
}

// Hand-written so a course that fails to decode reports its own error
// instead of "did not match any variant".
impl<'de> Deserialize<'de> for CourseSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value.get("unresolved") {
            Some(serde_json::Value::String(id)) if value.get("id").is_none() => {
                Ok(Self::Unresolved {
                    unresolved: id.clone(),
                })
            }
            _ => PlannedCourse::deserialize(value)
                .map(Self::Resolved)
                .map_err(de::Error::custom),
        }
    }
}

impl CourseSlot {
    pub fn as_resolved(&self) -> Option<&PlannedCourse> {
        match self {
            Self::Resolved(course) => Some(course),
            Self::Unresolved { .. } => None,
        }
    }
}

impl CourseRef for CourseSlot {
    fn course_id(&self) -> &str {
        match self {
            Self::Resolved(course) => &course.id,
            Self::Unresolved { unresolved } => unresolved,
        }
    }
}

/// Credit earned outside the plan; counts as taken before the first quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Course-equivalent identifier, e.g. `"MATH 2A"`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<f64>,
}

impl TransferRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// Position of a course within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLocation {
    pub year_index: usize,
    pub quarter_index: usize,
    pub course_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quarter<C = PlannedCourse> {
    pub name: QuarterName,
    pub courses: Vec<C>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Year<C = PlannedCourse> {
    pub start_year: i32,
    pub name: String,
    pub quarters: Vec<Quarter<C>>,
}

/// Years in chronological order. Earlier positions count as taken before
/// later ones during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan<C = PlannedCourse> {
    pub years: Vec<Year<C>>,
}

impl<C> Quarter<C> {
    pub fn new(name: QuarterName) -> Self {
        Self {
            name,
            courses: Vec::new(),
        }
    }
}

impl<C> Year<C> {
    /// A year with empty Fall, Winter and Spring quarters.
    pub fn new(start_year: i32, name: impl Into<String>) -> Self {
        Self {
            start_year,
            name: name.into(),
            quarters: default_quarters().into_iter().map(Quarter::new).collect(),
        }
    }

    /// `"Year 1"` starting in the current calendar year.
    pub fn current() -> Self {
        Self::new(chrono::Local::now().year(), "Year 1")
    }
}

impl<C> Default for Plan<C> {
    fn default() -> Self {
        Self { years: Vec::new() }
    }
}

impl<C> Plan<C> {
    pub fn new(years: Vec<Year<C>>) -> Self {
        Self { years }
    }

    /// Every course with its location, in chronological order.
    pub fn courses(&self) -> impl Iterator<Item = (CourseLocation, &C)> {
        self.years.iter().enumerate().flat_map(|(year_index, year)| {
            year.quarters
                .iter()
                .enumerate()
                .flat_map(move |(quarter_index, quarter)| {
                    quarter
                        .courses
                        .iter()
                        .enumerate()
                        .map(move |(course_index, course)| {
                            let location = CourseLocation {
                                year_index,
                                quarter_index,
                                course_index,
                            };
                            (location, course)
                        })
                })
        })
    }

    /// Look up the course at `location`.
    pub fn get(&self, location: CourseLocation) -> Option<&C> {
        self.years
            .get(location.year_index)?
            .quarters
            .get(location.quarter_index)?
            .courses
            .get(location.course_index)
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

impl Quarter<PlannedCourse> {
    /// `(min, max)` units scheduled in this quarter.
    pub fn units(&self) -> (f64, f64) {
        self.courses.iter().fold((0.0, 0.0), |(min, max), course| {
            (min + course.min_units, max + course.max_units)
        })
    }
}

impl Year<PlannedCourse> {
    pub fn units(&self) -> (f64, f64) {
        sum_units(self.quarters.iter().map(Quarter::units))
    }
}

impl Plan<PlannedCourse> {
    pub fn units(&self) -> (f64, f64) {
        sum_units(self.years.iter().map(Year::units))
    }
}

fn sum_units(parts: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
    parts.fold((0.0, 0.0), |(min, max), (a, b)| (min + a, max + b))
}

// ---------------------------------------------------------------------------
// Unresolved slots
// ---------------------------------------------------------------------------

/// A course id on an expanded plan that the catalog could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedCourse {
    /// Position in the expanded plan, before any pruning.
    pub location: CourseLocation,
    pub id: String,
}

impl Plan<CourseSlot> {
    /// Every placeholder slot, in chronological order.
    pub fn unresolved(&self) -> Vec<UnresolvedCourse> {
        self.courses()
            .filter(|(_, slot)| slot.as_resolved().is_none())
            .map(|(location, slot)| UnresolvedCourse {
                location,
                id: slot.course_id().to_string(),
            })
            .collect()
    }

    /// Drop placeholder slots, returning the plan of resolved courses and
    /// the slots that were removed.
    ///
    /// Removing a slot shifts later course indices within its quarter, so
    /// reported locations refer to this (unpruned) plan.
    pub fn into_resolved(self) -> (Plan, Vec<UnresolvedCourse>) {
        let unresolved = self.unresolved();
        let years = self
            .years
            .into_iter()
            .map(|year| Year {
                start_year: year.start_year,
                name: year.name,
                quarters: year
                    .quarters
                    .into_iter()
                    .map(|quarter| Quarter {
                        name: quarter.name,
                        courses: quarter
                            .courses
                            .into_iter()
                            .filter_map(|slot| match slot {
                                CourseSlot::Resolved(course) => Some(course),
                                CourseSlot::Unresolved { .. } => None,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        (Plan { years }, unresolved)
    }
}

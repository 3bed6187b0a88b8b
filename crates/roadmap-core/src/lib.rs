//! Core of the academic roadmap planner.
//!
//! - [`quarter`]: canonical ordering and spellings of academic terms.
//! - [`requirement`]: prerequisite trees and the missing-leaf evaluator.
//! - [`plan`]: the year / quarter / course plan model.
//! - [`validate`]: chronological prerequisite validation of a whole plan.
//! - [`lookup`]: the batch course lookup seam and an in-memory catalog.
//! - [`roadmap`]: collapsing plans to their persisted form and expanding them back.

pub mod lookup;
pub mod plan;
pub mod quarter;
pub mod requirement;
pub mod roadmap;
pub mod validate;

pub use lookup::{CatalogLookup, CourseLookup};
pub use plan::{
    CourseLocation, CourseRef, CourseSlot, Plan, PlannedCourse, Quarter, TransferRecord,
    UnresolvedCourse, Year,
};
pub use quarter::{InvalidQuarterName, QuarterName, normalize};
pub use requirement::{MalformedRequirement, MissingSet, Requirement, RequirementLeaf, evaluate};
pub use roadmap::{
    DEFAULT_PLAN_NAME, ExpandError, PersistedPlan, PersistedQuarter, PersistedYear, RoadmapPlan, SavedPlanner,
    SavedRoadmap, collapse, collapse_all, expand, expand_all,
};
pub use validate::{InvalidCourseReport, ValidationReport, validate};

//! Shared test utilities for roadmap integration tests.
//!
//! Provides terse builders for courses, quarters and plans, and a
//! [`RecordingLookup`] that serves a fixed catalog while recording every
//! batch it is asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use roadmap_core::{
    CourseLookup, Plan, PlannedCourse, Quarter, QuarterName, Requirement, TransferRecord, Year,
};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A four-unit course whose id is `department` and `number` concatenated
/// without spaces (`"COMPSCI" + "161"` -> `"COMPSCI161"`).
pub fn course(department: &str, number: &str) -> PlannedCourse {
    PlannedCourse {
        id: format!("{}{}", department.replace(' ', ""), number),
        department: department.to_string(),
        course_number: number.to_string(),
        title: format!("{department} {number}"),
        min_units: 4.0,
        max_units: 4.0,
        corequisites: String::new(),
        prerequisite_tree: None,
    }
}

/// [`course`] with a prerequisite tree.
pub fn course_with(department: &str, number: &str, tree: Requirement) -> PlannedCourse {
    PlannedCourse {
        prerequisite_tree: Some(tree),
        ..course(department, number)
    }
}

/// Course leaf.
pub fn leaf(id: &str) -> Requirement {
    Requirement::course(id)
}

pub fn and(children: Vec<Requirement>) -> Requirement {
    Requirement::And(children)
}

pub fn or(children: Vec<Requirement>) -> Requirement {
    Requirement::Or(children)
}

pub fn quarter(name: QuarterName, courses: Vec<PlannedCourse>) -> Quarter {
    Quarter { name, courses }
}

pub fn year(start_year: i32, name: &str, quarters: Vec<Quarter>) -> Year {
    Year {
        start_year,
        name: name.to_string(),
        quarters,
    }
}

/// A single-year plan starting in 2024.
pub fn single_year_plan(quarters: Vec<Quarter>) -> Plan {
    Plan::new(vec![year(2024, "Year 1", quarters)])
}

pub fn transfers(names: &[&str]) -> Vec<TransferRecord> {
    names.iter().map(|name| TransferRecord::new(*name)).collect()
}

// ---------------------------------------------------------------------------
// RecordingLookup
// ---------------------------------------------------------------------------

/// A [`CourseLookup`] over a fixed set of courses that records each batch
/// of ids it receives. Optionally fails every request.
#[derive(Debug, Default)]
pub struct RecordingLookup {
    courses: HashMap<String, PlannedCourse>,
    requests: Mutex<Vec<Vec<String>>>,
    fail_with: Option<String>,
}

impl RecordingLookup {
    pub fn new(courses: impl IntoIterator<Item = PlannedCourse>) -> Self {
        Self {
            courses: courses.into_iter().map(|c| (c.id.clone(), c)).collect(),
            ..Self::default()
        }
    }

    /// A lookup whose every request fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Every batch requested so far, in call order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CourseLookup for RecordingLookup {
    async fn lookup(&self, ids: &[String]) -> Result<HashMap<String, PlannedCourse>> {
        self.requests.lock().unwrap().push(ids.to_vec());
        // Yield so concurrent expansions interleave as they would over a network.
        tokio::task::yield_now().await;

        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.courses.get(id).map(|c| (id.clone(), c.clone())))
            .collect())
    }
}

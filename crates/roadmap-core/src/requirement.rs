//! Prerequisite requirement trees and the missing-leaf evaluator.
//!
//! A [`Requirement`] is a closed tree of course / exam leaves combined with
//! AND and OR nodes. The catalog service ships trees as JSON objects that are
//! either a leaf (`{"prereqType": "course", "courseId": "..."}`) or a node
//! (`{"AND": [...]}` / `{"OR": [...]}`); decoding rejects every other shape,
//! so evaluation never sees a node that is neither.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Leaf identifiers still unmet, in the order the tree mentions them.
pub type MissingSet = IndexSet<String>;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A terminal requirement: one course or one exam.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequirementLeaf {
    /// A course identifier such as `"I&C SCI 31"`.
    Course(String),
    /// An exam name such as `"AP Calculus BC"`.
    Exam(String),
}

impl RequirementLeaf {
    /// The identifier matched against the taken and concurrent sets.
    pub fn id(&self) -> &str {
        match self {
            Self::Course(id) | Self::Exam(id) => id,
        }
    }
}

/// A prerequisite tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequirement", into = "RawRequirement")]
pub enum Requirement {
    Leaf(RequirementLeaf),
    /// Every child must be satisfied.
    And(Vec<Requirement>),
    /// At least one child must be satisfied.
    Or(Vec<Requirement>),
}

/// A requirement object that is not a valid leaf or node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRequirement {
    #[error("requirement node has neither AND nor OR children")]
    MissingCombinator,

    #[error("requirement {0} node has no children")]
    EmptyCombinator(&'static str),
}

impl Requirement {
    /// Shorthand for a course leaf.
    pub fn course(id: impl Into<String>) -> Self {
        Self::Leaf(RequirementLeaf::Course(id.into()))
    }

    /// Shorthand for an exam leaf.
    pub fn exam(name: impl Into<String>) -> Self {
        Self::Leaf(RequirementLeaf::Exam(name.into()))
    }

    /// All leaf identifiers, depth-first.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf.id()),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, op) = match self {
            Self::Leaf(leaf) => return f.write_str(leaf.id()),
            Self::And(children) => (children, " AND "),
            Self::Or(children) => (children, " OR "),
        };
        f.write_str("(")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(op)?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct RawRequirement {
    #[serde(rename = "prereqType", default, skip_serializing_if = "Option::is_none")]
    prereq_type: Option<String>,
    #[serde(rename = "courseId", default, skip_serializing_if = "Option::is_none")]
    course_id: Option<String>,
    #[serde(rename = "examName", default, skip_serializing_if = "Option::is_none")]
    exam_name: Option<String>,
    #[serde(rename = "AND", default, skip_serializing_if = "Option::is_none")]
    and: Option<Vec<Requirement>>,
    #[serde(rename = "OR", default, skip_serializing_if = "Option::is_none")]
    or: Option<Vec<Requirement>>,
}

impl TryFrom<RawRequirement> for Requirement {
    type Error = MalformedRequirement;

    fn try_from(raw: RawRequirement) -> Result<Self, Self::Error> {
        let is_leaf = raw.prereq_type.is_some() || raw.course_id.is_some() || raw.exam_name.is_some();
        if is_leaf {
            // A course id wins over an exam name when both are present. A leaf
            // naming neither has the empty id, which nothing ever satisfies.
            return Ok(Self::Leaf(match (raw.course_id, raw.exam_name) {
                (Some(id), _) => RequirementLeaf::Course(id),
                (None, Some(name)) => RequirementLeaf::Exam(name),
                (None, None) if raw.prereq_type.as_deref() == Some("exam") => {
                    RequirementLeaf::Exam(String::new())
                }
                (None, None) => RequirementLeaf::Course(String::new()),
            }));
        }

        match (raw.and, raw.or) {
            (Some(children), _) if children.is_empty() => {
                Err(MalformedRequirement::EmptyCombinator("AND"))
            }
            (Some(children), _) => Ok(Self::And(children)),
            (None, Some(children)) if children.is_empty() => {
                Err(MalformedRequirement::EmptyCombinator("OR"))
            }
            (None, Some(children)) => Ok(Self::Or(children)),
            (None, None) => Err(MalformedRequirement::MissingCombinator),
        }
    }
}

impl From<Requirement> for RawRequirement {
    fn from(requirement: Requirement) -> Self {
        let mut raw = RawRequirement {
            prereq_type: None,
            course_id: None,
            exam_name: None,
            and: None,
            or: None,
        };
        match requirement {
            Requirement::Leaf(RequirementLeaf::Course(id)) => {
                raw.prereq_type = Some("course".to_string());
                raw.course_id = Some(id);
            }
            Requirement::Leaf(RequirementLeaf::Exam(name)) => {
                raw.prereq_type = Some("exam".to_string());
                raw.exam_name = Some(name);
            }
            Requirement::And(children) => raw.and = Some(children),
            Requirement::Or(children) => raw.or = Some(children),
        }
        raw
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Return the leaf identifiers of `node` that are still unmet.
///
/// - A leaf is met when its id is in `taken`, or when it is the course's
///   `corequisite` and is also in `concurrently_scheduled`.
/// - An AND node reports the union of every child's unmet leaves.
/// - An OR node is met when any child is met; otherwise it reports the
///   union of every child's unmet leaves. For mutually exclusive
///   alternatives this lists all of them, not "one of".
///
/// Every child is evaluated; there is no short circuit. An empty result
/// means the subtree is satisfied.
pub fn evaluate(
    taken: &HashSet<String>,
    node: &Requirement,
    concurrently_scheduled: &HashSet<String>,
    corequisite: &str,
) -> MissingSet {
    match node {
        Requirement::Leaf(leaf) => {
            let id = leaf.id();
            if taken.contains(id) || (id == corequisite && concurrently_scheduled.contains(id)) {
                MissingSet::new()
            } else {
                MissingSet::from([id.to_owned()])
            }
        }
        Requirement::And(children) => children
            .iter()
            .flat_map(|child| evaluate(taken, child, concurrently_scheduled, corequisite))
            .collect(),
        Requirement::Or(children) => {
            let mut satisfied = false;
            let mut required = MissingSet::new();
            for child in children {
                let missing = evaluate(taken, child, concurrently_scheduled, corequisite);
                if missing.is_empty() {
                    satisfied = true;
                } else {
                    required.extend(missing);
                }
            }
            if satisfied { MissingSet::new() } else { required }
        }
    }
}

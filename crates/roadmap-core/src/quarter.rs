//! Academic quarter names.
//!
//! A [`QuarterName`] has a stable canonical id (`"Summer1"`) used in stored
//! roadmaps and a separate display string (`"Summer I"`) for presentation.
//! Older roadmaps and transcripts spell quarters differently; [`normalize`]
//! maps every recognized spelling onto the canonical value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// QuarterName
// ---------------------------------------------------------------------------

/// One of the six terms of the academic year, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuarterName {
    Fall,
    Winter,
    Spring,
    Summer1,
    Summer2,
    Summer10wk,
}

/// Error returned when a raw string matches none of the recognized quarter
/// spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid quarter name: {0:?}")]
pub struct InvalidQuarterName(pub String);

impl QuarterName {
    /// Every quarter in canonical order.
    pub const ALL: [QuarterName; 6] = [
        Self::Fall,
        Self::Winter,
        Self::Spring,
        Self::Summer1,
        Self::Summer2,
        Self::Summer10wk,
    ];

    /// Stable identifier written to persisted roadmaps.
    pub fn id(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer1 => "Summer1",
            Self::Summer2 => "Summer2",
            Self::Summer10wk => "Summer10wk",
        }
    }

    /// Human-readable name for presentation.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer1 => "Summer I",
            Self::Summer2 => "Summer II",
            Self::Summer10wk => "Summer 10 Week",
        }
    }

    /// Zero-based position within [`QuarterName::ALL`].
    pub fn rank(self) -> usize {
        self as usize
    }
}

/// The quarters a newly created year starts with.
pub fn default_quarters() -> [QuarterName; 3] {
    [QuarterName::Fall, QuarterName::Winter, QuarterName::Spring]
}

/// Map any recognized spelling of a quarter onto its canonical value.
///
/// Accepted inputs are the canonical ids, the lowercase regular-term names,
/// the legacy lowercase display names (`"summer I"`), and transcript session
/// names (`"First Summer"`). Matching is exact.
pub fn normalize(raw: &str) -> Result<QuarterName, InvalidQuarterName> {
    if let Some(quarter) = QuarterName::ALL.into_iter().find(|q| q.id() == raw) {
        return Ok(quarter);
    }

    let quarter = match raw {
        "fall" => QuarterName::Fall,
        "winter" => QuarterName::Winter,
        "spring" => QuarterName::Spring,
        // Legacy lowercase display names.
        "summer I" => QuarterName::Summer1,
        "summer II" => QuarterName::Summer2,
        "summer 10 Week" => QuarterName::Summer10wk,
        // Transcript names.
        "First Summer" => QuarterName::Summer1,
        "Second Summer" => QuarterName::Summer2,
        "Special / 10-Week Summer" => QuarterName::Summer10wk,
        other => return Err(InvalidQuarterName(other.to_owned())),
    };
    Ok(quarter)
}

impl fmt::Display for QuarterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for QuarterName {
    type Err = InvalidQuarterName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl Serialize for QuarterName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for QuarterName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_roundtrip() {
        for quarter in QuarterName::ALL {
            assert_eq!(normalize(quarter.id()).unwrap(), quarter);
        }
    }

    #[test]
    fn summer_session_spellings_agree() {
        assert_eq!(normalize("First Summer").unwrap(), QuarterName::Summer1);
        assert_eq!(normalize("Summer1").unwrap(), QuarterName::Summer1);
        assert_eq!(normalize("summer I").unwrap(), QuarterName::Summer1);
        assert_eq!(normalize("Second Summer").unwrap(), QuarterName::Summer2);
        assert_eq!(normalize("summer II").unwrap(), QuarterName::Summer2);
        assert_eq!(
            normalize("Special / 10-Week Summer").unwrap(),
            QuarterName::Summer10wk
        );
        assert_eq!(normalize("summer 10 Week").unwrap(), QuarterName::Summer10wk);
    }

    #[test]
    fn lowercase_regular_terms_accepted() {
        assert_eq!(normalize("fall").unwrap(), QuarterName::Fall);
        assert_eq!(normalize("winter").unwrap(), QuarterName::Winter);
        assert_eq!(normalize("spring").unwrap(), QuarterName::Spring);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = normalize("nonsense").unwrap_err();
        assert_eq!(err, InvalidQuarterName("nonsense".to_string()));
        assert_eq!(err.to_string(), "invalid quarter name: \"nonsense\"");

        // Display names are not stored spellings.
        assert!(normalize("Summer I").is_err());
        assert!(normalize("FALL").is_err());
        assert!(normalize("").is_err());
    }

    #[test]
    fn order_follows_rank() {
        assert!(QuarterName::Fall < QuarterName::Winter);
        assert!(QuarterName::Spring < QuarterName::Summer1);
        assert!(QuarterName::Summer2 < QuarterName::Summer10wk);
        for (i, quarter) in QuarterName::ALL.into_iter().enumerate() {
            assert_eq!(quarter.rank(), i);
        }
    }

    #[test]
    fn display_names() {
        let names: Vec<&str> = QuarterName::ALL.iter().map(|q| q.display_name()).collect();
        assert_eq!(
            names,
            vec!["Fall", "Winter", "Spring", "Summer I", "Summer II", "Summer 10 Week"]
        );
    }

    #[test]
    fn serde_writes_canonical_and_reads_any_spelling() {
        let json = serde_json::to_string(&QuarterName::Summer10wk).unwrap();
        assert_eq!(json, "\"Summer10wk\"");

        let parsed: QuarterName = serde_json::from_str("\"Second Summer\"").unwrap();
        assert_eq!(parsed, QuarterName::Summer2);

        let err = serde_json::from_str::<QuarterName>("\"Autumn\"").unwrap_err();
        assert!(err.to_string().contains("invalid quarter name"), "got: {err}");
    }
}

//! # Diagnosis Taxonomy
//!
//! A diagnosis maps a field name to the way that field deviates from its
//! schema. Validators collect every `(field, issue)` pair in one pass and
//! build the [`Diagnosis`] once at the end, so a report always names every
//! failure rather than the first.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// How a single field deviates from its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldIssue {
    /// A required field is absent.
    Missing,
    /// The field is present but fails its type check.
    Invalid,
    /// The field is not part of the schema.
    Unexpected,
}

impl FieldIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "MISSING",
            Self::Invalid => "INVALID",
            Self::Unexpected => "UNEXPECTED",
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name → issue, ordered by field name.
///
/// An empty diagnosis means the object conforms to its schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnosis(BTreeMap<String, FieldIssue>);

impl Diagnosis {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The issue recorded against `field`, if any.
    pub fn get(&self, field: &str) -> Option<FieldIssue> {
        self.0.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldIssue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldIssue)> for Diagnosis {
    fn from_iter<I: IntoIterator<Item = (K, FieldIssue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The diagnosis of one submitted card, tagged with its position.
///
/// Serialized flat, with the position stringified and emitted first:
/// `{"index": "3", "rulesText": "MISSING", "cardNumber": "INVALID"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDiagnosis {
    pub index: usize,
    pub issues: Diagnosis,
}

impl CardDiagnosis {
    pub fn new(index: usize, issues: Diagnosis) -> Self {
        Self { index, issues }
    }

    /// The issue recorded against `field` on this card, if any.
    pub fn get(&self, field: &str) -> Option<FieldIssue> {
        self.issues.get(field)
    }
}

impl Serialize for CardDiagnosis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.issues.len() + 1))?;
        map.serialize_entry("index", &self.index.to_string())?;
        for (field, issue) in self.issues.iter() {
            map.serialize_entry(field, &issue)?;
        }
        map.end()
    }
}

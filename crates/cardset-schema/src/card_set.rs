//! # Card Set Schema Validator
//!
//! Checks the top level of a card-set update payload and, when the `cards`
//! delta has the right shape, every card inside it.
//!
//! ## Top-level rules
//!
//! | Key           | Absent    | Present but wrong                       |
//! |---------------|-----------|-----------------------------------------|
//! | `name`        | `MISSING` | not a string → `INVALID`                |
//! | `description` | `MISSING` | not a string → `INVALID`                |
//! | `cards`       | `MISSING` | not a modified-cards shape → `INVALID`  |
//! | anything else | —         | `UNEXPECTED`                            |
//!
//! When `cards` has a valid shape but any card inside it does not conform,
//! the top-level report names `cardObjects: INVALID` (not `cards`) and the
//! per-card diagnoses are returned alongside.
//!
//! ## Card positions
//!
//! Card diagnoses are indexed by position in `added ++ updated ++ deleted`.

use serde_json::{Map, Value};

use cardset_core::{CardDiagnosis, CardSetUpdate, CardsDelta, Diagnosis, FieldIssue};

use crate::card::{check_card_ref, check_card_update, check_new_card};
use crate::primitives::is_modified_cards_shape;

/// The required top-level keys of a card-set update request.
pub const CARD_SET_FIELDS: [&str; 3] = ["name", "description", "cards"];

/// Top-level key reported when individual cards fail their schema.
pub const CARD_OBJECTS_KEY: &str = "cardObjects";

/// Everything wrong with one card-set update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSetDiagnosis {
    /// Top-level key → issue.
    pub properties: Diagnosis,
    /// Per-card diagnoses in index order. Non-empty only when `properties`
    /// contains `cardObjects`.
    pub cards: Vec<CardDiagnosis>,
}

impl CardSetDiagnosis {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.cards.is_empty()
    }
}

/// Diagnose a payload without keeping the decoded value.
pub fn diagnose_card_set(value: &Value) -> CardSetDiagnosis {
    check_card_set(value).err().unwrap_or_default()
}

/// Decode a card-set update payload, diagnosing every top-level field and
/// every card in the same pass.
///
/// A payload that is not an object is diagnosed as an empty object.
pub fn check_card_set(value: &Value) -> Result<CardSetUpdate, CardSetDiagnosis> {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let mut properties = Vec::new();
    let mut card_diagnoses = Vec::new();

    let name = decode_string(obj, "name", &mut properties);
    let description = decode_string(obj, "description", &mut properties);

    let cards = match obj.get("cards") {
        None => {
            properties.push(("cards".to_string(), FieldIssue::Missing));
            None
        }
        Some(raw) if !is_modified_cards_shape(Some(raw)) => {
            properties.push(("cards".to_string(), FieldIssue::Invalid));
            None
        }
        Some(raw) => match check_delta(raw.as_object().unwrap_or(&empty)) {
            Ok(delta) => Some(delta),
            Err(invalid) => {
                properties.push((CARD_OBJECTS_KEY.to_string(), FieldIssue::Invalid));
                card_diagnoses = invalid;
                None
            }
        },
    };

    properties.extend(
        obj.keys()
            .filter(|key| !CARD_SET_FIELDS.contains(&key.as_str()))
            .map(|key| (key.clone(), FieldIssue::Unexpected)),
    );

    match (name, description, cards) {
        (Some(name), Some(description), Some(cards)) if properties.is_empty() => {
            Ok(CardSetUpdate {
                name,
                description,
                cards,
            })
        }
        _ => Err(CardSetDiagnosis {
            properties: properties.into_iter().collect(),
            cards: card_diagnoses,
        }),
    }
}

fn decode_string(
    obj: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<(String, FieldIssue)>,
) -> Option<String> {
    match obj.get(key) {
        None => {
            issues.push((key.to_string(), FieldIssue::Missing));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push((key.to_string(), FieldIssue::Invalid));
            None
        }
    }
}

/// Decode every card of a shape-checked delta.
fn check_delta(delta: &Map<String, Value>) -> Result<CardsDelta, Vec<CardDiagnosis>> {
    let added_raw = bucket(delta, "added");
    let updated_raw = bucket(delta, "updated");
    let deleted_raw = bucket(delta, "deleted");
    let mut invalid = Vec::new();

    let added = check_bucket(added_raw, 0, check_new_card, &mut invalid);
    let updated = check_bucket(updated_raw, added_raw.len(), check_card_update, &mut invalid);
    let deleted = check_bucket(
        deleted_raw,
        added_raw.len() + updated_raw.len(),
        check_card_ref,
        &mut invalid,
    );

    if invalid.is_empty() {
        Ok(CardsDelta {
            added,
            deleted,
            updated,
        })
    } else {
        Err(invalid)
    }
}

fn bucket<'a>(delta: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    delta
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn check_bucket<T>(
    entries: &[Value],
    offset: usize,
    check: fn(&Value) -> Result<T, Diagnosis>,
    invalid: &mut Vec<CardDiagnosis>,
) -> Vec<T> {
    let mut decoded = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match check(entry) {
            Ok(card) => decoded.push(card),
            Err(issues) => invalid.push(CardDiagnosis::new(offset + position, issues)),
        }
    }
    decoded
}

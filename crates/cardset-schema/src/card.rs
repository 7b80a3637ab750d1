//! # Card Schema Validator
//!
//! Decodes one submitted card object and, when it does not conform,
//! produces a [`Diagnosis`] naming every deviating field:
//!
//! - required field absent → `MISSING`
//! - field present but failing its predicate → `INVALID`
//! - field outside the schema → `UNEXPECTED`
//!
//! Rules apply independently per field; nothing stops at the first failure.
//!
//! | Field        | Predicate            |
//! |--------------|----------------------|
//! | `name`       | string               |
//! | `cardNumber` | integer              |
//! | `manaCost`   | float                |
//! | `price`      | float                |
//! | `rulesText`  | string               |
//! | `rarity`     | rarity class         |
//! | `id`         | integer (update/delete only) |

use serde_json::{Map, Value};

use cardset_core::{CardFields, CardId, CardRef, CardUpdate, Diagnosis, FieldIssue, NewCard};

use crate::primitives::{parse_float, parse_integer, parse_rarity};

/// The required field set of a card without its key.
pub const CARD_FIELDS: [&str; 6] = ["name", "cardNumber", "manaCost", "price", "rulesText", "rarity"];

/// The required field set of a persisted card.
pub const KEYED_CARD_FIELDS: [&str; 7] = [
    "id",
    "name",
    "cardNumber",
    "manaCost",
    "price",
    "rulesText",
    "rarity",
];

/// Which bucket a card was submitted in, and therefore which shape it must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    /// `added`: the six card fields, no `id`.
    Add,
    /// `updated`: `id` plus the six card fields.
    Update,
    /// `deleted`: an integer `id`; other keys are ignored.
    Delete,
}

impl CardMode {
    pub fn bucket(&self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Diagnose a card without keeping the decoded value.
///
/// Returns an empty diagnosis for a conforming card.
pub fn diagnose_card(value: &Value, mode: CardMode) -> Diagnosis {
    let outcome = match mode {
        CardMode::Add => check_new_card(value).map(drop),
        CardMode::Update => check_card_update(value).map(drop),
        CardMode::Delete => check_card_ref(value).map(drop),
    };
    outcome.err().unwrap_or_default()
}

/// Decode an `added` entry.
///
/// A non-object entry is diagnosed as if it had no fields at all.
pub fn check_new_card(value: &Value) -> Result<NewCard, Diagnosis> {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let mut issues = Vec::new();

    let fields = decode_fields(obj, &mut issues);
    flag_unexpected(obj, &CARD_FIELDS, &mut issues);

    finish(fields, issues)
}

/// Decode an `updated` entry.
pub fn check_card_update(value: &Value) -> Result<CardUpdate, Diagnosis> {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let mut issues = Vec::new();

    let id = decode(obj, "id", parse_integer, &mut issues);
    let fields = decode_fields(obj, &mut issues);
    flag_unexpected(obj, &KEYED_CARD_FIELDS, &mut issues);

    let card = id.zip(fields).map(|(id, fields)| CardUpdate {
        id: CardId::new(id),
        fields,
    });
    finish(card, issues)
}

/// Decode a `deleted` entry. Only the `id` is checked.
pub fn check_card_ref(value: &Value) -> Result<CardRef, Diagnosis> {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let mut issues = Vec::new();

    let id = decode(obj, "id", parse_integer, &mut issues);

    finish(id.map(|id| CardRef { id: CardId::new(id) }), issues)
}

fn decode_fields(
    obj: &Map<String, Value>,
    issues: &mut Vec<(String, FieldIssue)>,
) -> Option<CardFields> {
    let name = decode(obj, "name", parse_string, issues);
    let card_number = decode(obj, "cardNumber", parse_integer, issues);
    let mana_cost = decode(obj, "manaCost", parse_float, issues);
    let price = decode(obj, "price", parse_float, issues);
    let rules_text = decode(obj, "rulesText", parse_string, issues);
    let rarity = decode(obj, "rarity", parse_rarity, issues);

    Some(CardFields {
        name: name?,
        card_number: card_number?,
        mana_cost: mana_cost?,
        price: price?,
        rules_text: rules_text?,
        rarity: rarity?,
    })
}

/// Decode one required field, recording `MISSING` or `INVALID` on failure.
fn decode<T>(
    obj: &Map<String, Value>,
    key: &str,
    parse: impl Fn(Option<&Value>) -> Option<T>,
    issues: &mut Vec<(String, FieldIssue)>,
) -> Option<T> {
    let Some(raw) = obj.get(key) else {
        issues.push((key.to_string(), FieldIssue::Missing));
        return None;
    };
    let parsed = parse(Some(raw));
    if parsed.is_none() {
        issues.push((key.to_string(), FieldIssue::Invalid));
    }
    parsed
}

fn flag_unexpected(
    obj: &Map<String, Value>,
    allowed: &[&str],
    issues: &mut Vec<(String, FieldIssue)>,
) {
    issues.extend(
        obj.keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .map(|key| (key.clone(), FieldIssue::Unexpected)),
    );
}

fn parse_string(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_owned)
}

fn finish<T>(decoded: Option<T>, issues: Vec<(String, FieldIssue)>) -> Result<T, Diagnosis> {
    match decoded {
        Some(value) if issues.is_empty() => Ok(value),
        _ => Err(issues.into_iter().collect()),
    }
}

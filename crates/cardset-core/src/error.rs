//! # Error Types
//!
//! [`InvalidDataError`] is the single structured rejection produced by a
//! failed validation pass. Its serialized form is the body the route layer
//! returns with HTTP 400:
//!
//! ```json
//! {
//!   "name": "InvalidDataError",
//!   "invalidProperties": { "name": "MISSING", "cardObjects": "INVALID" },
//!   "invalidCards": [ { "index": "0", "price": "INVALID" } ]
//! }
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::diagnosis::{CardDiagnosis, Diagnosis};

/// Top-level error type for decoding a card-set update request.
#[derive(Error, Debug)]
pub enum CardSetError {
    /// The payload decoded but does not match the card-set schema.
    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),

    /// The payload is not JSON at all.
    #[error("malformed JSON payload: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Structural validation failure for a card-set update request.
///
/// Built once per failed validation pass and never persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid card set data: {} invalid properties, {} invalid cards",
    .invalid_properties.len(),
    .invalid_cards.len()
)]
pub struct InvalidDataError {
    /// Top-level field → issue.
    pub invalid_properties: Diagnosis,
    /// One entry per card with a non-empty diagnosis, in index order.
    pub invalid_cards: Vec<CardDiagnosis>,
}

impl InvalidDataError {
    /// The `name` carried in the serialized body.
    pub const NAME: &'static str = "InvalidDataError";

    pub fn new(invalid_properties: Diagnosis, invalid_cards: Vec<CardDiagnosis>) -> Self {
        Self {
            invalid_properties,
            invalid_cards,
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl Serialize for InvalidDataError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("InvalidDataError", 3)?;
        body.serialize_field("name", Self::NAME)?;
        body.serialize_field("invalidProperties", &self.invalid_properties)?;
        body.serialize_field("invalidCards", &self.invalid_cards)?;
        body.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::FieldIssue;

    #[test]
    fn serialized_body_carries_name_and_both_reports() {
        let props: Diagnosis = vec![
            ("cards", FieldIssue::Missing),
            ("extra", FieldIssue::Unexpected),
        ]
        .into_iter()
        .collect();
        let err = InvalidDataError::new(props, Vec::new());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["name"], "InvalidDataError");
        assert_eq!(json["invalidProperties"]["cards"], "MISSING");
        assert_eq!(json["invalidProperties"]["extra"], "UNEXPECTED");
        assert_eq!(json["invalidCards"], serde_json::json!([]));
    }

    #[test]
    fn display_counts_failures() {
        let props: Diagnosis = std::iter::once(("cardObjects", FieldIssue::Invalid)).collect();
        let cards = vec![
            CardDiagnosis::new(0, std::iter::once(("name", FieldIssue::Missing)).collect()),
            CardDiagnosis::new(2, std::iter::once(("price", FieldIssue::Invalid)).collect()),
        ];
        let err = InvalidDataError::new(props, cards);
        let msg = err.to_string();
        assert!(msg.contains("1 invalid properties"), "got: {msg}");
        assert!(msg.contains("2 invalid cards"), "got: {msg}");
    }

    #[test]
    fn card_set_error_wraps_json_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = CardSetError::from(json_err);
        assert!(matches!(err, CardSetError::MalformedJson(_)));
        assert!(err.to_string().starts_with("malformed JSON payload"));
    }

    #[test]
    fn card_set_error_is_transparent_over_invalid_data() {
        let err = CardSetError::from(InvalidDataError::new(Diagnosis::default(), Vec::new()));
        assert_eq!(
            err.to_string(),
            "invalid card set data: 0 invalid properties, 0 invalid cards"
        );
    }
}

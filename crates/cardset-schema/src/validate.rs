//! # Validation Orchestrator
//!
//! The single point where a malformed card-set update is rejected. One pass
//! diagnoses the whole payload; an empty diagnosis yields the typed
//! [`CardSetUpdate`], anything else becomes one [`InvalidDataError`]
//! carrying every top-level and per-card failure. A rejected request never
//! reaches the reconciler.

use serde_json::Value;

use cardset_core::{CardSetError, CardSetUpdate, InvalidDataError};

use crate::card_set::check_card_set;

/// Validate a decoded JSON payload.
pub fn validate_update_request(payload: &Value) -> Result<CardSetUpdate, InvalidDataError> {
    match check_card_set(payload) {
        Ok(update) => {
            tracing::debug!(
                added = update.cards.added.len(),
                deleted = update.cards.deleted.len(),
                updated = update.cards.updated.len(),
                "card set update passed validation"
            );
            Ok(update)
        }
        Err(diagnosis) => {
            tracing::warn!(
                invalid_properties = diagnosis.properties.len(),
                invalid_cards = diagnosis.cards.len(),
                "rejecting card set update"
            );
            Err(InvalidDataError::new(diagnosis.properties, diagnosis.cards))
        }
    }
}

/// Decode a raw request body and validate it.
pub fn decode_update_request(body: &[u8]) -> Result<CardSetUpdate, CardSetError> {
    let payload: Value = serde_json::from_slice(body)?;
    Ok(validate_update_request(&payload)?)
}

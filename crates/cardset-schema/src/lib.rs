//! # cardset-schema — Card-Set Payload Validation
//!
//! Deep structural validation of an inbound "update a card set" payload.
//! Validation is layered, leaf first:
//!
//! 1. [`primitives`] — total predicates over one raw value (`is_integer`,
//!    `is_rarity_class`, `is_modified_cards_shape`, ...).
//! 2. [`card`] — one card object against the card schema, per bucket mode.
//! 3. [`card_set`] — the top-level payload and every card in its delta.
//! 4. [`validate`] — the orchestrator: typed [`CardSetUpdate`] on success,
//!    one [`InvalidDataError`] with the full report on failure.
//!
//! Every layer reports all deviations it finds; none stops at the first.
//!
//! [`CardSetUpdate`]: cardset_core::CardSetUpdate
//! [`InvalidDataError`]: cardset_core::InvalidDataError

pub mod card;
pub mod card_set;
pub mod primitives;
pub mod validate;

pub use card::{diagnose_card, CardMode, CARD_FIELDS};
pub use card_set::{check_card_set, diagnose_card_set, CardSetDiagnosis, CARD_OBJECTS_KEY};
pub use validate::{decode_update_request, validate_update_request};

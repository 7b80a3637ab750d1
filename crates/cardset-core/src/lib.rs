//! # cardset-core — Foundational Types for Card Sets
//!
//! Defines the records that flow between the card-set validator and the
//! cards reconciler. Every other crate in the workspace depends on
//! `cardset-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** [`CardId`] and [`CardSetId`] are distinct
//!    types; a card-set key cannot be passed where a card key is expected.
//!
//! 2. **Typed after validation.** [`CardSetUpdate`] and [`CardsDelta`] only
//!    exist once a raw payload has passed the structural validator. Nothing
//!    downstream inspects untyped JSON.
//!
//! 3. **One diagnosis vocabulary.** [`FieldIssue`] is the single
//!    `MISSING | INVALID | UNEXPECTED` taxonomy shared by top-level and
//!    per-card diagnoses.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cardset-*` crates.
//! - No `.unwrap()` outside tests.

pub mod card;
pub mod diagnosis;
pub mod error;
pub mod identity;
pub mod rarity;

pub use card::{Card, CardFields, CardRef, CardSet, CardSetUpdate, CardUpdate, CardsDelta, NewCard};
pub use diagnosis::{CardDiagnosis, Diagnosis, FieldIssue};
pub use error::{CardSetError, InvalidDataError};
pub use identity::{CardId, CardSetId};
pub use rarity::{Rarity, UnknownRarity};

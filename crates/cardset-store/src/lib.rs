//! # cardset-store — Card Persistence and Reconciliation
//!
//! The write side of a card-set update. A request that passed
//! `cardset-schema` validation arrives here as a [`CardSetUpdate`] and is
//! applied through a [`CardStore`]:
//!
//! - [`update_card_set`] rewrites the set row, then hands the cards delta to
//!   [`reconcile_cards`].
//! - [`reconcile_cards`] issues at most one bulk call per non-empty bucket
//!   and returns a [`ReconciliationResult`].
//!
//! ## Backends
//!
//! | Backend            | When                     |
//! |--------------------|--------------------------|
//! | [`PgCardStore`]    | `DATABASE_URL` is set    |
//! | [`MemoryCardStore`]| development and tests    |
//!
//! Storage errors are never absorbed. They surface as [`StoreError`] for the
//! caller to map onto its transport.
//!
//! [`CardSetUpdate`]: cardset_core::CardSetUpdate

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod reconcile;
pub mod service;
pub mod store;

pub use config::{connect, StoreConfig};
pub use error::StoreError;
pub use memory::MemoryCardStore;
pub use postgres::PgCardStore;
pub use reconcile::{reconcile_cards, ReconciliationResult};
pub use service::{update_card_set, CardSetUpdateResponse};
pub use store::{CardStore, UPSERT_COLUMNS};

//! Storage error types.

use cardset_core::CardSetId;

/// Errors raised by a [`CardStore`](crate::CardStore) implementation.
///
/// The reconciler never classifies or retries these; they reach the caller
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed a query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A card write named a card set that does not exist.
    #[error("card set {0} does not exist")]
    UnknownCardSet(CardSetId),

    /// The id sequence has handed out `i64::MAX`; no further ids exist.
    #[error("no {0} ids left to allocate")]
    IdsExhausted(&'static str),

    /// A stored row could not be mapped back to a card.
    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}

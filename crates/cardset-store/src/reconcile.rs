//! # Cards Reconciler
//!
//! Applies a validated [`CardsDelta`] to a [`CardStore`] with the fewest
//! storage calls possible: one bulk insert for `added`, one bulk delete for
//! `deleted`, one bulk upsert for `updated`. An empty bucket issues no call
//! and contributes an empty result.
//!
//! Buckets run in the order added, deleted, updated. The first storage
//! failure is returned as-is and the remaining buckets are not attempted.

use serde::Serialize;

use cardset_core::{Card, CardSetId, CardsDelta};

use crate::error::StoreError;
use crate::store::CardStore;

/// Outcome of one reconciliation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationResult {
    /// Inserted cards with their generated ids.
    pub added: Vec<Card>,
    /// Rows actually removed. May be fewer than the ids requested.
    pub deleted: u64,
    /// Rows written by the upsert.
    pub updated: Vec<Card>,
}

/// Reconcile `delta` against the cards owned by `card_set`.
pub async fn reconcile_cards<S: CardStore>(
    store: &S,
    card_set: CardSetId,
    delta: &CardsDelta,
) -> Result<ReconciliationResult, StoreError> {
    let mut result = ReconciliationResult::default();

    if !delta.added.is_empty() {
        tracing::debug!(%card_set, count = delta.added.len(), "inserting added cards");
        result.added = store.insert_cards(card_set, &delta.added).await?;
    }

    if !delta.deleted.is_empty() {
        let ids = delta.deleted_ids();
        tracing::debug!(%card_set, count = ids.len(), "deleting cards");
        result.deleted = store.delete_cards(&ids).await?;
    }

    if !delta.updated.is_empty() {
        tracing::debug!(%card_set, count = delta.updated.len(), "upserting updated cards");
        result.updated = store.upsert_cards(card_set, &delta.updated).await?;
    }

    tracing::info!(
        %card_set,
        added = result.added.len(),
        deleted = result.deleted,
        updated = result.updated.len(),
        "cards reconciled"
    );
    Ok(result)
}

//! # Storage Seam
//!
//! The persistence primitives the reconciler needs, expressed as one trait.
//! Each method is a single bulk operation; the reconciler treats them as
//! black boxes returning the affected rows or a count.

use std::collections::HashMap;
use std::future::Future;

use cardset_core::{Card, CardId, CardSet, CardSetId, CardUpdate, NewCard};

use crate::error::StoreError;

/// The card columns an upsert overwrites on an existing row, by wire name.
///
/// `id` and `cardSetId` are never overwritten.
pub const UPSERT_COLUMNS: [&str; 6] = ["name", "cardNumber", "manaCost", "price", "rulesText", "rarity"];

/// Bulk card persistence.
///
/// Implementations must be `Send + Sync` so one store can be shared across
/// request tasks behind an `Arc`.
pub trait CardStore: Send + Sync {
    /// Insert new cards owned by `card_set`, returning them with their
    /// generated ids in submission order.
    fn insert_cards(
        &self,
        card_set: CardSetId,
        cards: &[NewCard],
    ) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send;

    /// Delete every card whose id is in `ids`, returning how many rows were
    /// actually removed. Unknown ids are not an error.
    fn delete_cards(&self, ids: &[CardId]) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Insert each card whose id is absent; otherwise overwrite the
    /// [`UPSERT_COLUMNS`] of the existing row. When an id repeats in the
    /// batch the last entry wins. Returns one row per distinct id, in the
    /// order of each id's last entry.
    fn upsert_cards(
        &self,
        card_set: CardSetId,
        cards: &[CardUpdate],
    ) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send;

    /// Overwrite a card set's name and description. `None` when no card set
    /// has that id.
    fn update_card_set(
        &self,
        card_set: CardSetId,
        name: &str,
        description: &str,
    ) -> impl Future<Output = Result<Option<CardSet>, StoreError>> + Send;
}

/// Collapse repeated ids in an upsert batch: the last entry for an id wins
/// and keeps its position. A single statement may touch each row only once.
pub(crate) fn last_write_per_id(cards: &[CardUpdate]) -> Vec<&CardUpdate> {
    let last: HashMap<CardId, usize> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| (card.id, i))
        .collect();
    cards
        .iter()
        .enumerate()
        .filter(|(i, card)| last.get(&card.id) == Some(i))
        .map(|(_, card)| card)
        .collect()
}

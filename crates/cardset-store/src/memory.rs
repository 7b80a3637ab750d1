//! In-memory card store backed by DashMap.
//!
//! Used when no `DATABASE_URL` is configured and throughout the test suites.
//! Ids come from atomic sequences holding the last id handed out. An upsert
//! or seed with an explicit id raises its sequence to that id so later
//! inserts never collide. Once a sequence reaches `i64::MAX` allocation
//! fails with [`StoreError::IdsExhausted`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use cardset_core::{Card, CardId, CardSet, CardSetId, CardUpdate, NewCard};

use crate::error::StoreError;
use crate::store::{last_write_per_id, CardStore};

struct Inner {
    card_sets: DashMap<CardSetId, CardSet>,
    cards: DashMap<CardId, Card>,
    last_card_set_id: AtomicI64,
    last_card_id: AtomicI64,
}

/// Take the id after `last`, or `None` once the sequence is exhausted.
fn next_id(last: &AtomicI64) -> Option<i64> {
    last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
        .ok()
        .and_then(|id| id.checked_add(1))
}

/// Shared in-memory store. Clones share the same data.
#[derive(Clone)]
pub struct MemoryCardStore {
    inner: Arc<Inner>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                card_sets: DashMap::new(),
                cards: DashMap::new(),
                last_card_set_id: AtomicI64::new(0),
                last_card_id: AtomicI64::new(0),
            }),
        }
    }

    /// Builder-style seeding of a card set with a caller-chosen id.
    pub fn with_card_set(self, id: CardSetId, name: &str, description: &str) -> Self {
        self.inner
            .last_card_set_id
            .fetch_max(id.get(), Ordering::SeqCst);
        self.inner.card_sets.insert(
            id,
            CardSet {
                id,
                name: name.to_string(),
                description: description.to_string(),
                date: Utc::now(),
            },
        );
        self
    }

    /// Create a card set with the next free id.
    pub fn insert_card_set(&self, name: &str, description: &str) -> Result<CardSet, StoreError> {
        let id = next_id(&self.inner.last_card_set_id)
            .map(CardSetId::new)
            .ok_or(StoreError::IdsExhausted("card set"))?;
        let set = CardSet {
            id,
            name: name.to_string(),
            description: description.to_string(),
            date: Utc::now(),
        };
        self.inner.card_sets.insert(id, set.clone());
        Ok(set)
    }

    pub fn card_set(&self, id: CardSetId) -> Option<CardSet> {
        self.inner.card_sets.get(&id).map(|s| s.value().clone())
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.inner.cards.get(&id).map(|c| c.value().clone())
    }

    /// Every card owned by `card_set`, ordered by id.
    pub fn cards_in_set(&self, card_set: CardSetId) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .inner
            .cards
            .iter()
            .filter(|c| c.card_set_id == card_set)
            .map(|c| c.value().clone())
            .collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    fn ensure_card_set(&self, card_set: CardSetId) -> Result<(), StoreError> {
        if self.inner.card_sets.contains_key(&card_set) {
            Ok(())
        } else {
            Err(StoreError::UnknownCardSet(card_set))
        }
    }
}

impl Default for MemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCardStore")
            .field("card_sets", &self.inner.card_sets.len())
            .field("cards", &self.inner.cards.len())
            .finish()
    }
}

impl CardStore for MemoryCardStore {
    async fn insert_cards(
        &self,
        card_set: CardSetId,
        cards: &[NewCard],
    ) -> Result<Vec<Card>, StoreError> {
        self.ensure_card_set(card_set)?;
        cards
            .iter()
            .map(|fields| -> Result<Card, StoreError> {
                let id = next_id(&self.inner.last_card_id)
                    .map(CardId::new)
                    .ok_or(StoreError::IdsExhausted("card"))?;
                let card = Card {
                    id,
                    card_set_id: card_set,
                    fields: fields.clone(),
                };
                self.inner.cards.insert(id, card.clone());
                Ok(card)
            })
            .collect()
    }

    async fn delete_cards(&self, ids: &[CardId]) -> Result<u64, StoreError> {
        let removed = ids
            .iter()
            .filter(|id| self.inner.cards.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn upsert_cards(
        &self,
        card_set: CardSetId,
        cards: &[CardUpdate],
    ) -> Result<Vec<Card>, StoreError> {
        self.ensure_card_set(card_set)?;
        let upserted = last_write_per_id(cards)
            .into_iter()
            .map(|update| {
                self.inner
                    .last_card_id
                    .fetch_max(update.id.get(), Ordering::SeqCst);
                let mut entry = self.inner.cards.entry(update.id).or_insert_with(|| Card {
                    id: update.id,
                    card_set_id: card_set,
                    fields: update.fields.clone(),
                });
                entry.fields = update.fields.clone();
                entry.value().clone()
            })
            .collect();
        Ok(upserted)
    }

    async fn update_card_set(
        &self,
        card_set: CardSetId,
        name: &str,
        description: &str,
    ) -> Result<Option<CardSet>, StoreError> {
        Ok(self.inner.card_sets.get_mut(&card_set).map(|mut set| {
            set.name = name.to_string();
            set.description = description.to_string();
            set.value().clone()
        }))
    }
}

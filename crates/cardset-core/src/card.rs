//! # Card and Card-Set Records
//!
//! Typed shapes of the card-set update payload and of the persisted rows the
//! reconciler hands back. Field names serialize in camelCase to match the
//! JSON wire format (`cardNumber`, `manaCost`, `rulesText`, `cardSetId`).
//!
//! ## Bucket Shapes
//!
//! | Bucket    | Entry type     | Carries `id` |
//! |-----------|----------------|--------------|
//! | `added`   | [`NewCard`]    | no           |
//! | `deleted` | [`CardRef`]    | yes (only)   |
//! | `updated` | [`CardUpdate`] | yes          |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{CardId, CardSetId};
use crate::rarity::Rarity;

/// The six mutable columns of a card.
///
/// These are exactly the columns an upsert overwrites on an existing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFields {
    pub name: String,
    pub card_number: i64,
    pub mana_cost: f64,
    pub price: f64,
    pub rules_text: String,
    pub rarity: Rarity,
}

/// A card submitted in the `added` bucket. It has no identifier yet.
pub type NewCard = CardFields;

/// A card submitted in the `updated` bucket: a full card plus its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardUpdate {
    pub id: CardId,
    #[serde(flatten)]
    pub fields: CardFields,
}

/// A card submitted in the `deleted` bucket. Only the key is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub id: CardId,
}

/// A persisted card row, stamped with the card set that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub card_set_id: CardSetId,
    #[serde(flatten)]
    pub fields: CardFields,
}

/// The client's requested changes to a card set's cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardsDelta {
    pub added: Vec<NewCard>,
    pub deleted: Vec<CardRef>,
    pub updated: Vec<CardUpdate>,
}

impl CardsDelta {
    /// True when all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }

    /// Ids named in the `deleted` bucket, in submission order.
    pub fn deleted_ids(&self) -> Vec<CardId> {
        self.deleted.iter().map(|r| r.id).collect()
    }
}

/// A card-set update request that has passed structural validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSetUpdate {
    pub name: String,
    pub description: String,
    pub cards: CardsDelta,
}

/// A persisted card-set row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSet {
    pub id: CardSetId,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

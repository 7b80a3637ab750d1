//! Card-set update service: the full write path behind a validated update
//! request. The set row is rewritten first; cards are reconciled only when
//! the set exists.

use serde::Serialize;

use cardset_core::{CardSet, CardSetId, CardSetUpdate};

use crate::error::StoreError;
use crate::reconcile::{reconcile_cards, ReconciliationResult};
use crate::store::CardStore;

/// Response body for a successful card-set update: the updated set row with
/// the reconciliation summary under `cards`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSetUpdateResponse {
    #[serde(flatten)]
    pub card_set: CardSet,
    pub cards: ReconciliationResult,
}

/// Apply a validated update to `card_set`.
///
/// Returns `Ok(None)` when the card set does not exist; no card is touched
/// in that case.
pub async fn update_card_set<S: CardStore>(
    store: &S,
    card_set: CardSetId,
    update: &CardSetUpdate,
) -> Result<Option<CardSetUpdateResponse>, StoreError> {
    let Some(row) = store
        .update_card_set(card_set, &update.name, &update.description)
        .await?
    else {
        tracing::info!(%card_set, "card set not found; update skipped");
        return Ok(None);
    };

    let cards = reconcile_cards(store, card_set, &update.cards).await?;
    Ok(Some(CardSetUpdateResponse {
        card_set: row,
        cards,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCardStore;
    use cardset_core::{CardFields, CardsDelta, Rarity};

    fn update(name: &str) -> CardSetUpdate {
        CardSetUpdate {
            name: name.to_string(),
            description: "Ice Age block".to_string(),
            cards: CardsDelta {
                added: vec![CardFields {
                    name: "Necropotence".to_string(),
                    card_number: 154,
                    mana_cost: 3.0,
                    price: 20.0,
                    rules_text: "Skip your draw step.".to_string(),
                    rarity: Rarity::Rare,
                }],
                ..CardsDelta::default()
            },
        }
    }

    #[tokio::test]
    async fn missing_set_returns_none_and_leaves_cards_alone() {
        let store = MemoryCardStore::new();
        let response = update_card_set(&store, CardSetId::new(3), &update("Ice Age"))
            .await
            .unwrap();
        assert!(response.is_none());
        assert!(store.cards_in_set(CardSetId::new(3)).is_empty());
    }

    #[tokio::test]
    async fn response_merges_row_and_summary() {
        let store = MemoryCardStore::new();
        let set = store.insert_card_set("Ice Age", "Old description").unwrap();

        let response = update_card_set(&store, set.id, &update("Ice Age (remastered)"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.card_set.name, "Ice Age (remastered)");
        assert_eq!(response.cards.added.len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], set.id.get());
        assert_eq!(json["description"], "Ice Age block");
        assert_eq!(json["cards"]["added"][0]["name"], "Necropotence");
        assert_eq!(json["cards"]["deleted"], 0);
    }
}

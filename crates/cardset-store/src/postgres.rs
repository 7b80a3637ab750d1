//! PostgreSQL card store.
//!
//! Every trait method is one statement. Bulk inserts and upserts pass the
//! columns as parallel arrays through `UNNEST ... WITH ORDINALITY` so a delta
//! of any size costs a single round trip and results come back in
//! submission order.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cardset_core::{Card, CardFields, CardId, CardSet, CardSetId, CardUpdate, NewCard, Rarity};

use crate::error::StoreError;
use crate::store::{last_write_per_id, CardStore, UPSERT_COLUMNS};

const CARD_COLUMNS: &str = "id, card_set_id, name, card_number, mana_cost, price, rules_text, rarity";

/// Card store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Column arrays for an `UNNEST` bulk write.
#[derive(Default)]
struct CardColumns {
    names: Vec<String>,
    card_numbers: Vec<i64>,
    mana_costs: Vec<f64>,
    prices: Vec<f64>,
    rules_texts: Vec<String>,
    rarities: Vec<&'static str>,
}

impl CardColumns {
    fn push(&mut self, fields: &CardFields) {
        self.names.push(fields.name.clone());
        self.card_numbers.push(fields.card_number);
        self.mana_costs.push(fields.mana_cost);
        self.prices.push(fields.price);
        self.rules_texts.push(fields.rules_text.clone());
        self.rarities.push(fields.rarity.as_str());
    }
}

/// Map a wire field name from [`UPSERT_COLUMNS`] to its SQL column.
fn sql_column(field: &str) -> &str {
    match field {
        "cardNumber" => "card_number",
        "manaCost" => "mana_cost",
        "rulesText" => "rules_text",
        other => other,
    }
}

/// `RETURNING` order is unspecified, so rows are fed in ordinal order and
/// read back sorted by id. Identity values are drawn in the order the
/// `SELECT` yields rows, which makes id order the submission order.
fn insert_sql() -> String {
    format!(
        "WITH input AS (
             SELECT * FROM UNNEST($2::text[], $3::bigint[], $4::float8[],
                                  $5::float8[], $6::text[], $7::text[])
                 WITH ORDINALITY AS t(name, card_number, mana_cost, price, rules_text, rarity, ord)
         ),
         inserted AS (
             INSERT INTO cards (card_set_id, name, card_number, mana_cost, price, rules_text, rarity)
             SELECT $1, name, card_number, mana_cost, price, rules_text, rarity
             FROM input ORDER BY ord
             RETURNING {CARD_COLUMNS}
         )
         SELECT {CARD_COLUMNS} FROM inserted ORDER BY id"
    )
}

/// Ids in the batch must be distinct; the rows are joined back to their
/// input ordinal on `id`.
fn upsert_sql() -> String {
    let assignments = UPSERT_COLUMNS
        .iter()
        .map(|field| {
            let column = sql_column(field);
            format!("{column} = EXCLUDED.{column}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "WITH input AS (
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::text[], $4::bigint[],
                                  $5::float8[], $6::float8[], $7::text[], $8::text[])
                 WITH ORDINALITY AS t({CARD_COLUMNS}, ord)
         ),
         upserted AS (
             INSERT INTO cards ({CARD_COLUMNS})
             SELECT {CARD_COLUMNS} FROM input
             ON CONFLICT (id) DO UPDATE SET {assignments}
             RETURNING {CARD_COLUMNS}
         )
         SELECT upserted.* FROM upserted JOIN input USING (id) ORDER BY input.ord"
    )
}

impl CardStore for PgCardStore {
    async fn insert_cards(
        &self,
        card_set: CardSetId,
        cards: &[NewCard],
    ) -> Result<Vec<Card>, StoreError> {
        let mut columns = CardColumns::default();
        cards.iter().for_each(|fields| columns.push(fields));

        let rows = sqlx::query_as::<_, CardRow>(&insert_sql())
            .bind(card_set.get())
            .bind(&columns.names)
            .bind(&columns.card_numbers)
            .bind(&columns.mana_costs)
            .bind(&columns.prices)
            .bind(&columns.rules_texts)
            .bind(&columns.rarities)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CardRow::into_card).collect()
    }

    async fn delete_cards(&self, ids: &[CardId]) -> Result<u64, StoreError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let result = sqlx::query("DELETE FROM cards WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn upsert_cards(
        &self,
        card_set: CardSetId,
        cards: &[CardUpdate],
    ) -> Result<Vec<Card>, StoreError> {
        // ON CONFLICT may touch a row once per statement; the last entry wins.
        let cards = last_write_per_id(cards);
        let ids: Vec<i64> = cards.iter().map(|c| c.id.get()).collect();
        let card_set_ids = vec![card_set.get(); cards.len()];
        let mut columns = CardColumns::default();
        cards.iter().for_each(|c| columns.push(&c.fields));

        let rows = sqlx::query_as::<_, CardRow>(&upsert_sql())
            .bind(&ids)
            .bind(&card_set_ids)
            .bind(&columns.names)
            .bind(&columns.card_numbers)
            .bind(&columns.mana_costs)
            .bind(&columns.prices)
            .bind(&columns.rules_texts)
            .bind(&columns.rarities)
            .fetch_all(&self.pool)
            .await?;

        // Explicit ids bypass the identity sequence; move it past them.
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('cards', 'id'),
                           (SELECT COALESCE(MAX(id), 1) FROM cards))",
        )
        .execute(&self.pool)
        .await?;

        rows.into_iter().map(CardRow::into_card).collect()
    }

    async fn update_card_set(
        &self,
        card_set: CardSetId,
        name: &str,
        description: &str,
    ) -> Result<Option<CardSet>, StoreError> {
        let row = sqlx::query_as::<_, CardSetRow>(
            "UPDATE card_sets SET name = $1, description = $2 WHERE id = $3
             RETURNING id, name, description, date",
        )
        .bind(name)
        .bind(description)
        .bind(card_set.get())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CardSetRow::into_card_set))
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    id: i64,
    card_set_id: i64,
    name: String,
    card_number: i64,
    mana_cost: f64,
    price: f64,
    rules_text: String,
    rarity: String,
}

impl CardRow {
    fn into_card(self) -> Result<Card, StoreError> {
        let rarity = Rarity::parse(&self.rarity).ok_or_else(|| {
            StoreError::InvalidRow(format!("card {} has unknown rarity {:?}", self.id, self.rarity))
        })?;
        Ok(Card {
            id: CardId::new(self.id),
            card_set_id: CardSetId::new(self.card_set_id),
            fields: CardFields {
                name: self.name,
                card_number: self.card_number,
                mana_cost: self.mana_cost,
                price: self.price,
                rules_text: self.rules_text,
                rarity,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct CardSetRow {
    id: i64,
    name: String,
    description: String,
    date: DateTime<Utc>,
}

impl CardSetRow {
    fn into_card_set(self) -> CardSet {
        CardSet {
            id: CardSetId::new(self.id),
            name: self.name,
            description: self.description,
            date: self.date,
        }
    }
}

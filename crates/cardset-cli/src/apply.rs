//! # Apply Subcommand
//!
//! Validates a payload file and applies it to a card set through the update
//! service.
//!
//! ```bash
//! # In-memory: a fresh store seeded with card set 4.
//! cardset apply update.json --set 4
//!
//! # PostgreSQL: migrations run on connect.
//! DATABASE_URL=postgres://localhost/cards cardset apply update.json --set 4
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cardset_core::{CardSetId, CardSetUpdate};
use cardset_schema::validate_update_request;
use cardset_store::{connect, update_card_set, CardStore, MemoryCardStore, PgCardStore, StoreConfig};

use crate::{read_payload, write_json, EXIT_INVALID_DATA, EXIT_NOT_FOUND, EXIT_OK};

/// Arguments for `cardset apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to a JSON card-set update payload.
    pub file: PathBuf,

    /// Id of the card set to update.
    #[arg(long = "set")]
    pub card_set: i64,

    /// Name given to the seeded card set in in-memory mode. Ignored when
    /// `DATABASE_URL` is set; the set must already exist there.
    #[arg(long, default_value = "Untitled card set")]
    pub seed_name: String,

    /// Description given to the seeded card set in in-memory mode.
    #[arg(long, default_value = "")]
    pub seed_description: String,
}

/// Execute the apply subcommand against the store selected by `config`.
pub async fn run_apply<W: Write>(args: &ApplyArgs, config: &StoreConfig, out: &mut W) -> Result<u8> {
    let payload = read_payload(&args.file)?;
    let update = match validate_update_request(&payload) {
        Ok(update) => update,
        Err(err) => {
            tracing::error!(file = %args.file.display(), "{err}");
            write_json(out, &err)?;
            return Ok(EXIT_INVALID_DATA);
        }
    };

    let card_set = CardSetId::new(args.card_set);
    match connect(config).await.context("failed to open card store")? {
        Some(pool) => apply_update(&PgCardStore::new(pool), card_set, &update, out).await,
        None => {
            let store = MemoryCardStore::new().with_card_set(
                card_set,
                &args.seed_name,
                &args.seed_description,
            );
            apply_update(&store, card_set, &update, out).await
        }
    }
}

/// Apply a validated update to `store` and print the response document.
pub async fn apply_update<S: CardStore, W: Write>(
    store: &S,
    card_set: CardSetId,
    update: &CardSetUpdate,
    out: &mut W,
) -> Result<u8> {
    let response = update_card_set(store, card_set, update)
        .await
        .with_context(|| format!("failed to update card set {card_set}"))?;

    match response {
        Some(response) => {
            write_json(out, &response)?;
            Ok(EXIT_OK)
        }
        None => {
            tracing::error!(%card_set, "card set not found");
            Ok(EXIT_NOT_FOUND)
        }
    }
}

//! # Validate Subcommand
//!
//! Runs the validation orchestrator over a payload file. On success the
//! normalized, typed payload is printed (numeric strings become numbers,
//! rarities are canonical). On failure the `InvalidDataError` body a client
//! would receive is printed instead.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cardset_schema::validate_update_request;

use crate::{read_payload, write_json, EXIT_INVALID_DATA, EXIT_OK};

/// Arguments for `cardset validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to a JSON card-set update payload.
    pub file: PathBuf,
}

/// Execute the validate subcommand, writing the result document to `out`.
pub fn run_validate<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<u8> {
    let payload = read_payload(&args.file)?;
    match validate_update_request(&payload) {
        Ok(update) => {
            write_json(out, &update)?;
            Ok(EXIT_OK)
        }
        Err(err) => {
            tracing::error!(file = %args.file.display(), "{err}");
            write_json(out, &err)?;
            Ok(EXIT_INVALID_DATA)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn run(payload: &Value) -> (u8, Value) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("update.json");
        std::fs::write(&file, serde_json::to_vec(payload).unwrap()).unwrap();

        let mut out = Vec::new();
        let code = run_validate(&ValidateArgs { file }, &mut out).unwrap();
        (code, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn valid_payload_prints_normalized_update() {
        let (code, body) = run(&json!({
            "name": "Urza's Saga",
            "description": "Artifact block",
            "cards": {
                "added": [{ "name": "Tolarian Academy", "cardNumber": "330", "manaCost": "0",
                            "price": "45.5", "rulesText": "", "rarity": "rare" }],
                "deleted": [],
                "updated": [],
            },
        }));
        assert_eq!(code, EXIT_OK);
        assert_eq!(body["cards"]["added"][0]["cardNumber"], 330);
        assert_eq!(body["cards"]["added"][0]["price"], 45.5);
    }

    #[test]
    fn invalid_payload_prints_error_body() {
        let (code, body) = run(&json!({ "name": "Urza's Saga" }));
        assert_eq!(code, EXIT_INVALID_DATA);
        assert_eq!(body["name"], "InvalidDataError");
        assert_eq!(body["invalidProperties"]["description"], "MISSING");
        assert_eq!(body["invalidProperties"]["cards"], "MISSING");
        assert_eq!(body["invalidCards"], json!([]));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs { file: dir.path().join("nope.json") };
        let mut out = Vec::new();
        assert!(run_validate(&args, &mut out).is_err());
        assert!(out.is_empty());
    }
}

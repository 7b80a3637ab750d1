//! # cardset-cli — Card-Set Update Tool
//!
//! Provides the `cardset` command-line interface over the validator and the
//! update service.
//!
//! ## Subcommands
//!
//! - `cardset validate <FILE>` — structural validation of an update payload.
//! - `cardset apply <FILE> --set <ID>` — validate, then apply to a card store.
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                       |
//! |------|-----------------------------------------------|
//! | 0    | success                                       |
//! | 1    | unreadable file, malformed JSON, store error  |
//! | 2    | payload failed structural validation          |
//! | 3    | the target card set does not exist            |

pub mod apply;
pub mod validate;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_DATA: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

/// Read and parse a JSON payload file.
pub fn read_payload(path: &Path) -> Result<Value> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Pretty-print `value` as one JSON document followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_payload_parses_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, br#"{"name": "Alpha"}"#).unwrap();
        let value = read_payload(&path).unwrap();
        assert_eq!(value["name"], "Alpha");
    }

    #[test]
    fn read_payload_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_payload(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn read_payload_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"name\": ").unwrap();
        let err = read_payload(&path).unwrap_err();
        assert!(format!("{err:#}").contains("not valid JSON"));
    }

    #[test]
    fn write_json_ends_with_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({ "deleted": 0 })).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
    }
}

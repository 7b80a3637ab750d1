//! # cardset CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to the
//! subcommand handlers. Result documents go to stdout; logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardset_cli::apply::{run_apply, ApplyArgs};
use cardset_cli::validate::{run_validate, ValidateArgs};
use cardset_cli::EXIT_FAILURE;
use cardset_store::StoreConfig;

/// Validate card-set update payloads and apply them to a card store.
#[derive(Parser, Debug)]
#[command(name = "cardset", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a payload file against the card-set update schema.
    Validate(ValidateArgs),

    /// Validate a payload file and apply it to a card set.
    Apply(ApplyArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &mut stdout),
        Commands::Apply(args) => {
            let config = StoreConfig::from_env();
            tracing::debug!(?config, "loaded store configuration");
            run_apply(args, &config, &mut stdout).await
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["cardset", "validate", "update.json"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.file, PathBuf::from("update.json"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.log_json);
    }

    #[test]
    fn cli_parse_apply_with_defaults() {
        let cli = Cli::try_parse_from(["cardset", "apply", "update.json", "--set", "12"]).unwrap();
        let Commands::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.card_set, 12);
        assert_eq!(args.seed_name, "Untitled card set");
        assert!(args.seed_description.is_empty());
    }

    #[test]
    fn cli_parse_apply_with_seed() {
        let cli = Cli::try_parse_from([
            "cardset",
            "apply",
            "update.json",
            "--set",
            "3",
            "--seed-name",
            "Weatherlight",
            "--seed-description",
            "Saga set",
        ])
        .unwrap();
        if let Commands::Apply(args) = cli.command {
            assert_eq!(args.seed_name, "Weatherlight");
            assert_eq!(args.seed_description, "Saga set");
        }
    }

    #[test]
    fn cli_parse_apply_requires_set() {
        assert!(Cli::try_parse_from(["cardset", "apply", "update.json"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cardset", "validate", "u.json", "-vv", "--log-json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.log_json);
    }
}

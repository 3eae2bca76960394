// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use errmap_catalog::load_catalog;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "errmap", version, about = "Resolve error payloads to codes and messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Error catalog file (TOML, or JSON when the extension is `.json`).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the error code extracted from a payload.
    Code {
        /// Error payload as JSON, a bare code, or `-` for stdin.
        error: String,
    },

    /// Print the display message for a payload.
    Message {
        /// Error payload as JSON, a bare code, or `-` for stdin.
        error: String,

        /// Message to use when the code is missing or unmapped.
        #[arg(long = "default")]
        default_message: Option<String>,
    },

    /// Check whether a payload carries a code (exit status 1 when it does not).
    Has {
        /// Error payload as JSON, a bare code, or `-` for stdin.
        error: String,

        /// Code to look for.
        code: String,
    },

    /// Validate the catalog and print any warnings.
    Check,

    /// Print the JSON schema for catalog files.
    Schema,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("errmap_cli=debug,errmap_catalog=debug,errmap_core=trace")
    } else {
        EnvFilter::new("errmap_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = load_catalog(cli.catalog.as_deref()).with_context(|| match &cli.catalog {
        Some(p) => format!("load catalog '{}'", p.display()),
        None => "load catalog".to_owned(),
    })?;
    tracing::debug!(entries = catalog.messages.len(), "catalog ready");

    match cli.command {
        Commands::Code { error } => {
            let utils = catalog.into_utils();
            println!("{}", commands::code(&utils, &read_payload(&error)?));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Message {
            error,
            default_message,
        } => {
            let utils = catalog.into_utils();
            let payload = read_payload(&error)?;
            println!(
                "{}",
                commands::message(&utils, &payload, default_message.as_deref())
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Has { error, code } => {
            let utils = catalog.into_utils();
            let matched = commands::has(&utils, &read_payload(&error)?, &code);
            println!("{matched}");
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Check => {
            for warning in commands::check(&catalog)? {
                eprintln!("warning: {warning}");
            }
            println!("ok ({} messages)", catalog.messages.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schema => {
            println!("{}", commands::schema_json()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read the payload argument, pulling from stdin when it is `-`.
fn read_payload(arg: &str) -> Result<Value> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read error payload from stdin")?;
        Ok(commands::parse_payload(&buf))
    } else {
        Ok(commands::parse_payload(arg))
    }
}

//! # tally
//!
//! Prices a sale from the command line.
//!
//! ## Usage
//! ```bash
//! # From a file
//! tally sale.json
//!
//! # From stdin
//! echo '{"saleNumber":"S-1","customer":"Jane","branch":"Downtown","items":[...]}' | tally
//!
//! # Leave quantity limits to the pricing engine, which reports the first
//! # oversized item as a business-rule error
//! TALLY_PRICING_POLICY=partial tally sale.json
//! ```
//!
//! Prints the `CreateSaleResult` JSON on success. On failure prints the
//! `ApiError` JSON and exits with status 1.

use std::env;
use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tally_app::repository::InMemorySaleRepository;
use tally_app::sales::{CreateSaleCommand, CreateSaleHandler};
use tally_app::{telemetry, ApiError, AppConfig};
use tracing::info;

fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config)?;

    info!(policy = %config.pricing_policy, "Starting tally");

    let input = read_input(env::args().nth(1))?;
    let command: CreateSaleCommand =
        serde_json::from_str(&input).context("Input is not a valid create-sale command")?;

    let handler = CreateSaleHandler::new(
        Arc::new(InMemorySaleRepository::new()),
        config.pricing_policy,
    );

    match handler.handle(command).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let api = ApiError::from(&err);
            println!("{}", serde_json::to_string_pretty(&api)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

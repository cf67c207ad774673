//! split_ledger - Group balance calculator
//!
//! Reads a JSON snapshot of groups (members and recorded expenses) and prints
//! each group's net balances and suggested settlement.
//!
//! Run with: cargo run -- --input groups.json [--group trip]
//! Use `--input -` to read the snapshot from stdin.

use std::io::Read;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use split_ledger::{BalanceService, Config, InMemoryLedgerSource, LedgerError, LogFormat};

/// Command-line arguments
#[derive(Debug)]
struct Args {
    input: String,
    group: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        let input = value_of("--input")
            .context("usage: split_ledger --input <file|-> [--group <id>]")?;

        Ok(Self {
            input,
            group: value_of("--group"),
        })
    }
}

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "split_ledger=info".into());

    // Logs go to stderr so stdout stays pure JSON.
    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn read_snapshot(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read snapshot from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

/// Print the error body to stderr and hand the error back to `main`
fn report_error(err: LedgerError) -> anyhow::Error {
    match serde_json::to_string_pretty(&err.to_response()) {
        Ok(body) => eprintln!("{body}"),
        Err(_) => eprintln!("{err}"),
    }
    err.into()
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env().map_err(|e| report_error(e.into()))?;

    init_tracing(config.log_format);

    let args = Args::parse()?;
    tracing::debug!(?args, ?config, "Starting split_ledger");

    let snapshot = read_snapshot(&args.input)?;
    let source = InMemoryLedgerSource::from_json(&snapshot)
        .map_err(report_error)?
        .with_split_tolerance(config.split_tolerance);

    let group_ids: Vec<String> = match args.group {
        Some(group) => vec![group],
        None => source.group_ids().map(str::to_string).collect(),
    };

    let service = BalanceService::with_config(&source, &config);

    let mut reports = Vec::with_capacity(group_ids.len());
    for group_id in &group_ids {
        reports.push(service.group_balances(group_id).map_err(report_error)?);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    Ok(())
}

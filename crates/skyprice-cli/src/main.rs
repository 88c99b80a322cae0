//! Command line front end for skyprice.
//!
//! ```text
//! skyprice aggregate <page.json>...
//! skyprice inspect <base64 | @file>
//! ```
//!
//! Logging goes to stderr and is filtered by `RUST_LOG` (default `info`).

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skyprice::{AggregatorConfig, AuctionPage, AuctionRecord, ItemView, PriceAggregator, decode};

const USAGE: &str = "usage: skyprice aggregate <page.json>...
       skyprice inspect <base64 | @file>";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    match args.split_first() {
        Some((command, rest)) if command == "aggregate" => aggregate(rest),
        Some((command, [payload])) if command == "inspect" => inspect(payload),
        _ => bail!("{}", USAGE),
    }
}

fn aggregate(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        bail!("{}", USAGE);
    }

    let config = AggregatorConfig::from_env().context("loading configuration")?;
    let mut records = Vec::new();
    for path in paths {
        let page = load_records(Path::new(path))?;
        info!(path = %path, auctions = page.len(), "loaded auctions");
        records.extend(page);
    }

    let report = PriceAggregator::new(config).aggregate_with_report(&records);
    if report.skipped.total() > 0 {
        warn!(
            not_bin = report.skipped.not_bin,
            invalid_base64 = report.skipped.invalid_base64,
            decode_failed = report.skipped.decode_failed,
            no_identity = report.skipped.no_identity,
            excluded = report.skipped.excluded,
            "skipped auctions"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report.stats)?);
    Ok(())
}

/// Reads either a full auctions page or a bare array of records.
fn load_records(path: &Path) -> Result<Vec<AuctionRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let records = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        let page: AuctionPage = serde_json::from_value(value)?;
        if !page.success {
            warn!(path = %path.display(), "page is not marked successful");
        }
        page.auctions
    };
    Ok(records)
}

fn inspect(payload: &str) -> Result<()> {
    let encoded = match payload.strip_prefix('@') {
        Some(file) => fs::read_to_string(file).with_context(|| format!("reading {}", file))?,
        None => payload.to_string(),
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .context("payload is not valid base64")?;
    let root = decode(&bytes).context("decoding item payload")?;

    println!("{}", root);
    match ItemView::from_root(&root) {
        Some(view) => {
            match view.identity() {
                Some(identity) => println!("identity: {}", identity),
                None => println!("identity: <none>"),
            }
            println!("count: {}", view.count());
        }
        None => println!("identity: <none>"),
    }
    Ok(())
}

//! PriceTrail CLI — address price-history reports from the command line.
//!
//! Commands:
//! - `report` — resolve each address to a ZPID, fetch listing-price
//!   history, and write the CSV report
//! - `resolve` — one-shot address → ZPID lookup
//! - `history` — one-shot ZPID → price-history listing
//!
//! An unresolved address never fails a report run; it becomes a sentinel
//! row and the run still exits 0. Missing credentials, an unreadable
//! config, and an unwritable output path exit non-zero before or after the
//! lookups, never mid-row.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricetrail_core::api::{FetchPriceHistory, Lookup, RapidApiClient, ResolveZpid};
use pricetrail_core::config::ReportConfig;
use pricetrail_core::credential::load_api_key;
use pricetrail_core::domain::{format_price, Zpid};
use pricetrail_core::export::write_csv;
use pricetrail_core::report::{build_rows, StdoutProgress};

#[derive(Parser)]
#[command(
    name = "pricetrail",
    about = "PriceTrail CLI — listing-price history reports for property addresses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve each address, fetch its price history, and write the CSV report.
    Report {
        /// Addresses to report on (overrides the config file's list).
        addresses: Vec<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// API key file. Defaults to ./rapidapi.key.
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Output CSV path. Defaults to ./zillow_address_price_data.csv.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Look up the ZPID for a single address.
    Resolve {
        /// Free-text address (street, city, state).
        address: String,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// API key file. Defaults to ./rapidapi.key.
        #[arg(long)]
        key_file: Option<PathBuf>,
    },
    /// Print the listing-price history for a single ZPID, most recent first.
    History {
        /// Property identifier, as printed by `resolve`.
        zpid: String,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// API key file. Defaults to ./rapidapi.key.
        #[arg(long)]
        key_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report {
            addresses,
            config,
            key_file,
            out,
        } => run_report(addresses, config, key_file, out),
        Commands::Resolve {
            address,
            config,
            key_file,
        } => run_resolve(&address, config, key_file),
        Commands::History {
            zpid,
            config,
            key_file,
        } => run_history(&zpid, config, key_file),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file when given, defaults otherwise, then apply the
/// key-file flag on top.
fn load_config(config: Option<&PathBuf>, key_file: Option<PathBuf>) -> Result<ReportConfig> {
    let mut config = match config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(key_file) = key_file {
        config.api.key_file = key_file;
    }
    Ok(config)
}

/// Build the authenticated client, failing before any request goes out when
/// the key file is missing or empty.
fn client_from(config: &ReportConfig) -> Result<RapidApiClient> {
    let key = load_api_key(&config.api.key_file)?;
    Ok(RapidApiClient::new(config.api.host.clone(), key))
}

fn run_report(
    addresses: Vec<String>,
    config_path: Option<PathBuf>,
    key_file: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path.as_ref(), key_file)?;
    if !addresses.is_empty() {
        config.report.addresses = addresses;
    }
    if let Some(out) = out {
        config.report.output = out;
    }
    if config.report.addresses.is_empty() {
        bail!("no addresses to report on: pass them as arguments or list them in the config file");
    }

    let client = client_from(&config)?;
    let rows = build_rows(&client, &client, &config.report.addresses, &StdoutProgress);

    write_csv(&config.report.output, &rows)
        .with_context(|| format!("writing report {}", config.report.output.display()))?;
    println!(
        "Data successfully written to {}",
        config.report.output.display()
    );
    Ok(())
}

fn run_resolve(
    address: &str,
    config_path: Option<PathBuf>,
    key_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_ref(), key_file)?;
    let client = client_from(&config)?;

    match client.resolve(address) {
        Lookup::Found(zpid) => {
            println!("{zpid}");
            Ok(())
        }
        Lookup::NotFound => {
            eprintln!("ZPID not found for address: {address}");
            std::process::exit(1);
        }
        Lookup::Failed(failure) => {
            eprintln!("Lookup failed for {address}: {failure}");
            std::process::exit(1);
        }
    }
}

fn run_history(
    zpid: &str,
    config_path: Option<PathBuf>,
    key_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_ref(), key_file)?;
    let client = client_from(&config)?;

    let history = client.fetch_history(&Zpid::new(zpid));
    if history.is_empty() {
        eprintln!("No price history for ZPID {zpid}");
        std::process::exit(1);
    }
    for point in &history {
        println!("{},{}", point.date, format_price(point.price));
    }
    Ok(())
}

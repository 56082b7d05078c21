//! book-catalog CLI - browse a catalog file and work with its prices
//!
//! ## Example Usage
//!
//! ```bash
//! # One line per book
//! book-catalog list books.csv
//!
//! # JSON lines instead
//! book-catalog list books.csv --json
//!
//! # Sum every price in euros
//! book-catalog total books.csv --currency EUR
//!
//! # Convert a single amount
//! book-catalog convert 100 USD EUR
//! ```

use anyhow::{Context, Result};
use book_catalog::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// book-catalog: stream a book catalog and total its prices
#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stream a book catalog and total its prices", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every book in a catalog file
    List {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Sum every price in a catalog file
    Total {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Currency of the total (default: from config)
        #[arg(short = 'c', long)]
        currency: Option<Currency>,
    },

    /// Convert an amount between currencies
    Convert {
        amount: String,
        from: Currency,
        to: Currency,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_currency", deserialize_with = "currency_from_code")]
    default_currency: Currency,
    /// Exchange rates replacing the built-in table (`from,to,rate` lines)
    #[serde(default)]
    rates_file: Option<PathBuf>,
}

fn default_currency() -> Currency {
    Currency::USD
}

/// Accept codes the same way the command line does ("eur", " USD ")
fn currency_from_code<'de, D>(deserializer: D) -> std::result::Result<Currency, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Currency::from_code(&code).map_err(serde::de::Error::custom)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            rates_file: None,
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match dirs::home_dir() {
                Some(home) => home.join(".book-catalog").join("config.toml"),
                None => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| CatalogError::ConfigError(e.to_string()))
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    fn rates(&self) -> Result<ExchangeRateTable> {
        let Some(path) = &self.rates_file else {
            return Ok(ExchangeRateTable::standard().clone());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rates {}", path.display()))?;
        let mut table = ExchangeRateTable::new();
        let count = table.load_from_csv(&contents)?;
        log::info!("Loaded {} rates from {}", count, path.display());
        Ok(table)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let rates = config.rates()?;

    if cli.verbose {
        eprintln!(
            "{} v{}",
            "book-catalog".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        eprintln!(
            "Rates: {} pairs, default currency {}",
            rates.len(),
            config.default_currency.to_string().dimmed()
        );
    }

    match cli.command {
        Commands::List { file, json } => list_books(&file, json),
        Commands::Total { file, currency } => {
            let currency = currency.unwrap_or(config.default_currency);
            total_books(&file, &rates, currency)
        }
        Commands::Convert { amount, from, to } => {
            let price = Price::parse(&amount, from.code())?;
            let converted = price.convert_with(&rates, to)?;
            println!("{} = {} {}", price, to, converted);
            Ok(())
        }
    }
}

fn list_books(file: &Path, json: bool) -> Result<()> {
    let mut books = BookIterator::from_path(file);

    while let Some(book) = books
        .next_book()
        .with_context(|| format!("Failed reading {}", file.display()))?
    {
        if json {
            println!("{}", serde_json::to_string(&book)?);
        } else {
            println!("{}", book);
        }
    }
    Ok(())
}

fn total_books(file: &Path, rates: &ExchangeRateTable, currency: Currency) -> Result<()> {
    let mut books = BookIterator::from_path(file);
    let mut total = Price::zero(currency);

    while let Some(book) = books
        .next_book()
        .with_context(|| format!("Failed reading {}", file.display()))?
    {
        total = total.add_with(rates, &price_of(&book))?;
    }

    println!(
        "{} books, total {}",
        books.records_read(),
        total.to_string().green().bold()
    );
    Ok(())
}

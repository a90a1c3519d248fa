//! Custom Shipping CLI
//!
//! Loads a fixture set, installs custom shipping into a fresh set of
//! extension points and prints the resulting checkout evaluation.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, ValueEnum};
use rusty_money::iso::{self, Currency};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use custom_shipping::{
    checkout::{CheckoutContext, evaluate},
    extensions::{Extensions, TotalsPosition},
    fixtures::Fixture,
    plugin, summary,
};

#[derive(Debug, Parser)]
#[command(
    name = "custom-shipping",
    about = "Evaluate per-product custom shipping for a fixture cart",
    long_about = None
)]
struct Cli {
    /// Fixture set to load (`products/<set>.yml` and `carts/<set>.yml`)
    #[arg(short, long, default_value = "mixed")]
    fixture: String,

    /// Directory containing the fixture sets
    #[arg(long, env = "CUSTOM_SHIPPING_FIXTURES", default_value = "./fixtures")]
    fixtures_path: PathBuf,

    /// ISO 4217 checkout currency code
    #[arg(short, long, env = "CUSTOM_SHIPPING_CURRENCY", default_value = "GBP")]
    currency: String,

    /// Totals table to collect rows for
    #[arg(short, long, value_enum, default_value_t = Position::Review)]
    position: Position,

    /// Also print the totals rows as HTML
    #[arg(long)]
    html: bool,

    #[command(flatten)]
    logging: LoggingConfig,
}

/// Totals table position.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Position {
    /// Checkout order review
    Review,

    /// Cart totals
    Cart,
}

impl From<Position> for TotalsPosition {
    fn from(position: Position) -> Self {
        match position {
            Position::Review => TotalsPosition::ReviewOrderBeforeOrderTotal,
            Position::Cart => TotalsPosition::CartTotalsBeforeOrderTotal,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn init_subscriber(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log level: {}", config.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

fn find_currency(code: &str) -> Result<&'static Currency> {
    iso::find(&code.to_ascii_uppercase()).ok_or_else(|| anyhow!("unknown currency: {code}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_subscriber(&cli.logging)?;

    let currency = find_currency(&cli.currency)?;

    let fixture = Fixture::from_set_in(&cli.fixtures_path, &cli.fixture)
        .with_context(|| format!("failed to load fixture set `{}`", cli.fixture))?;

    let mut extensions = Extensions::new();
    plugin::install(&mut extensions);

    let ctx = CheckoutContext::new(fixture.cart(), fixture.store(), currency);
    let review = evaluate(&extensions, &ctx, cli.position.into())?;

    info!(
        fixture = %cli.fixture,
        rates = review.rates.len(),
        rows = review.rows.len(),
        "evaluated checkout"
    );

    let mut out = io::stdout().lock();

    summary::write_to(&mut out, &ctx, fixture.products(), &review)?;

    if cli.html {
        for row in &review.rows {
            writeln!(out, "{}", row.to_html()?)?;
        }
    }

    Ok(())
}

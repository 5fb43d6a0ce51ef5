//! Levy Estimator CLI
//!
//! Computes an arrears levy schedule and prints it as a table, CSV, JSON or
//! a printable estimate.
//!
//! Configuration is resolved as defaults, then `LEVY_*` environment
//! variables, then command-line flags.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use levy_estimator::input::{
    coerce_amount, coerce_arrears_count, load_quantities, parse_quantity_entry, ConfigOverrides,
};
use levy_estimator::report::{render_table, write_csv, EstimateDocument};
use levy_estimator::schedule::{CostDistribution, ScheduleConfig};
use levy_estimator::{BaseMonth, EstimateSession, QuantityMap, Schedule, Signatory};

#[derive(Parser, Debug)]
#[command(name = "levy_estimator")]
#[command(author, version, about = "Compounding arrears levy estimates", long_about = None)]
struct Cli {
    /// Current billing month (YYYY-MM)
    #[arg(short, long)]
    base_month: Option<String>,

    /// Number of arrears periods (clamped to 1..=600)
    #[arg(short, long)]
    arrears: Option<String>,

    /// Price per unit; non-numeric values count as 0
    #[arg(short, long)]
    price: Option<String>,

    /// Fixed fee per period with recorded consumption
    #[arg(short, long)]
    fee: Option<String>,

    /// CSV file with Period,Quantity columns
    #[arg(short, long)]
    quantities: Option<PathBuf>,

    /// Quantity edit for one period, e.g. --set 3=7094 (repeatable)
    #[arg(long = "set", value_name = "M=QUANTITY")]
    edits: Vec<String>,

    /// Start with no quantities instead of the sample ones
    #[arg(long)]
    empty: bool,

    /// Signing officer name for printed estimates
    #[arg(long)]
    officer: Option<String>,

    /// Signature image embedded in printed estimates
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
    Html,
    Text,
}

#[derive(Serialize)]
struct EstimateOutput<'a> {
    schedule: &'a Schedule,
    distribution: CostDistribution,
    officer_name: Option<&'a str>,
    has_signature: bool,
    issued_on: NaiveDate,
    valid_until: NaiveDate,
}

fn resolve_config(cli: &Cli) -> Result<ScheduleConfig> {
    let mut config = ScheduleConfig::default();

    let overrides = ConfigOverrides::from_env().context("Invalid LEVY_* environment override")?;
    overrides.apply(&mut config);

    if let Some(raw) = &cli.base_month {
        config.base_month = BaseMonth::parse(raw).context("Invalid --base-month")?;
    }
    if let Some(raw) = &cli.arrears {
        config.arrears_count = coerce_arrears_count(raw);
    }
    if let Some(raw) = &cli.price {
        config.unit_price = coerce_amount(raw);
    }
    if let Some(raw) = &cli.fee {
        config.period_fee = coerce_amount(raw);
    }

    Ok(config)
}

fn build_session(cli: &Cli) -> Result<EstimateSession> {
    let config = resolve_config(cli)?;

    let mut session = if cli.empty {
        EstimateSession::new(config)
    } else {
        let mut session = EstimateSession::seeded();
        session.set_config(config);
        session
    };

    if let Some(path) = &cli.quantities {
        let loaded: QuantityMap = load_quantities(path)
            .with_context(|| format!("Failed to load quantities from {}", path.display()))?;
        info!("Loaded {} quantities from {}", loaded.len(), path.display());
        for (m, quantity) in loaded {
            session.set_quantity(m, quantity);
        }
    }

    for raw in &cli.edits {
        let (m, quantity) = parse_quantity_entry(raw)?;
        debug!("Quantity edit m={} -> {}", m, quantity);
        session.set_quantity(m, quantity);
    }

    let signatory = session.signatory_mut();
    *signatory = Signatory::new(cli.officer.clone());
    if let Some(path) = &cli.signature {
        signatory
            .load_signature(path)
            .with_context(|| format!("Failed to load signature from {}", path.display()))?;
    }

    Ok(session)
}

fn render(session: &EstimateSession, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let schedule = session.schedule();
    let today = Local::now().date_naive();

    match format {
        OutputFormat::Table => out.write_all(render_table(schedule).as_bytes())?,
        OutputFormat::Csv => write_csv(schedule, &mut *out)?,
        OutputFormat::Json => {
            let document = EstimateDocument::new(schedule, session.signatory(), today);
            let output = EstimateOutput {
                schedule,
                distribution: schedule.distribution(),
                officer_name: session.signatory().officer_name.as_deref(),
                has_signature: session.signatory().has_signature(),
                issued_on: document.issued_on,
                valid_until: document.valid_until,
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
        OutputFormat::Html => {
            let document = EstimateDocument::new(schedule, session.signatory(), today);
            out.write_all(document.render_html().as_bytes())?;
        }
        OutputFormat::Text => {
            let document = EstimateDocument::new(schedule, session.signatory(), today);
            out.write_all(document.render_text().as_bytes())?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let session = build_session(&cli)?;

    let config = session.config();
    info!(
        "Estimate: base={} arrears={} price={:.2} fee={:.2} total due={}",
        config.base_month,
        config.arrears_count,
        config.unit_price,
        config.period_fee,
        session.schedule().total_due(),
    );

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            render(&session, cli.format, &mut file)?;
            info!("Estimate written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            render(&session, cli.format, &mut lock)?;
        }
    }

    Ok(())
}

//! Command line entry point for the Weekly Payroll Engine.

use std::fs::File;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{RunOptions, calculate_weekly_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::export::{FormulaTemplate, write_csv, write_values_csv};
use payroll_engine::ingest::{InputPaths, PayrollInputs};
use payroll_engine::models::{NameSource, WeekendSetting};

#[derive(Debug, Parser)]
#[command(name = "payroll-engine", version, about = "Weekly payroll for closers and enrollers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the payroll for one week of files
    Run(RunArgs),
    /// Serve the payroll HTTP API
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Deal tracker export
    #[arg(long)]
    deals: PathBuf,
    /// Closer timesheet
    #[arg(long)]
    closers: PathBuf,
    /// Enroller timesheet
    #[arg(long)]
    enrollers: PathBuf,
    /// Payroll configuration directory
    #[arg(long, default_value = "config/weekly_payroll")]
    config: PathBuf,
    /// Pay the weekend rate only for deals on this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "any_weekday")]
    weekend_date: Option<NaiveDate>,
    /// Pay the weekend rate for deals on every occurrence of the configured weekday
    #[arg(long)]
    any_weekday: bool,
    /// Reference date for the default weekend date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Emit the full JSON report instead of the CSV export
    #[arg(long)]
    json: bool,
    /// Write computed values in place of the Total Pay and CPA formulas
    #[arg(long, conflicts_with = "json")]
    values: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Payroll configuration directory
    #[arg(long, default_value = "config/weekly_payroll")]
    config: PathBuf,
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Serve(args) => serve(args).await,
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    let inputs = PayrollInputs::load(&InputPaths {
        deals: args.deals,
        closers: args.closers,
        enrollers: args.enrollers,
    })?;

    let mut options = match args.as_of {
        Some(as_of) => RunOptions::new(as_of),
        None => RunOptions::default(),
    };
    if args.any_weekday {
        options = options.with_weekend(WeekendSetting::Weekday);
    } else if let Some(date) = args.weekend_date {
        options = options.with_weekend(WeekendSetting::FixedDate { date: Some(date) });
    }

    let report = calculate_weekly_payroll(&inputs, loader.config(), &options)?;

    for name in &report.unmatched_names {
        let source = match name.source {
            NameSource::Timesheet => "timesheet",
            NameSource::DealTracker => "deal tracker",
        };
        warn!(
            role = %name.role,
            source,
            name = %name.name,
            best_candidate = ?name.best_candidate,
            best_score = name.best_score,
            "Unmatched name"
        );
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("failed to write JSON report")?;
        writeln!(out)?;
    } else {
        let template = FormulaTemplate::from_slots(&loader.config().closer().bonus_slots);
        if args.values {
            write_values_csv(&report, &template, &mut out)?;
        } else {
            write_csv(&report, &template, &mut out)?;
        }
    }
    out.flush()?;

    info!(
        weekend_policy = %report.weekend_policy,
        lines = report.lines.len(),
        total_pay = %report.summary.total_pay,
        "Payroll written"
    );
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;
    info!(plan = %loader.plan().name, version = %loader.plan().version, "Configuration loaded");

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    info!(addr = %args.addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ARGS: [&str; 8] = [
        "payroll-engine",
        "run",
        "--deals",
        "deals.csv",
        "--closers",
        "closers.csv",
        "--enrollers",
        "enrollers.csv",
    ];

    #[test]
    fn test_values_flag_selects_values_export() {
        let cli = Cli::try_parse_from(BASE_ARGS.iter().copied().chain(["--values"])).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert!(args.values);
                assert!(!args.json);
            }
            Command::Serve(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_values_conflicts_with_json() {
        let result = Cli::try_parse_from(BASE_ARGS.iter().copied().chain(["--values", "--json"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_weekend_date_parses() {
        let cli = Cli::try_parse_from(
            BASE_ARGS.iter().copied().chain(["--weekend-date", "2025-08-02"]),
        )
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.weekend_date, NaiveDate::from_ymd_opt(2025, 8, 2));
            }
            Command::Serve(_) => panic!("expected run"),
        }
    }
}

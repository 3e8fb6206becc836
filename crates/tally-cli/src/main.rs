//! Tally CLI - Personal budget dashboard
//!
//! Usage:
//!   tally init                     Initialize database
//!   tally import --file CSV        Import transactions
//!   tally budgets set Food 300     Set this month's Food budget
//!   tally insights                 Show this month's insights
//!   tally serve --port 3000        Start web server

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tally_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Command-line flags win over the config file
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());
    let no_encrypt = cli.no_encrypt || !config.database.encrypt;

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path, no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let static_dir = static_dir.or_else(|| config.server.static_dir.clone());
            commands::cmd_serve(
                &db_path,
                &host,
                port,
                no_encrypt,
                static_dir.as_deref(),
                &config,
            )
            .await
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, 20, None),
                Some(TransactionsAction::List { limit, month }) => {
                    commands::cmd_transactions_list(&db, limit, month.as_deref())
                }
                Some(TransactionsAction::Add {
                    amount,
                    description,
                    category,
                    date,
                    kind,
                }) => commands::cmd_transactions_add(
                    &db,
                    amount,
                    &description,
                    &category,
                    date.as_deref(),
                    &kind,
                ),
                Some(TransactionsAction::Update {
                    id,
                    amount,
                    description,
                    category,
                    date,
                    kind,
                }) => commands::cmd_transactions_update(
                    &db,
                    id,
                    commands::TransactionChanges {
                        amount,
                        description,
                        category,
                        date,
                        kind,
                    },
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            match action {
                None => commands::cmd_budgets_list(&db, None),
                Some(BudgetsAction::List { month }) => {
                    commands::cmd_budgets_list(&db, month.as_deref())
                }
                Some(BudgetsAction::Set {
                    category,
                    amount,
                    month,
                }) => commands::cmd_budgets_set(&db, &category, amount, month.as_deref()),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, id),
            }
        }
        Commands::Report { report } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            match report {
                ReportType::Budget { month, json } => {
                    commands::cmd_report_budget(&db, month.as_deref(), json)
                }
                ReportType::Categories { month, json } => {
                    commands::cmd_report_categories(&db, month.as_deref(), json)
                }
                ReportType::Trend { months, json } => commands::cmd_report_trend(
                    &db,
                    months.unwrap_or(config.reports.trend_months),
                    json,
                ),
                ReportType::Dashboard { month, json } => {
                    commands::cmd_report_dashboard(&db, month.as_deref(), json)
                }
            }
        }
        Commands::Insights { month, json } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            commands::cmd_insights(&db, month.as_deref(), json)
        }
        Commands::Import { file } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            commands::cmd_import(&db, &file)
        }
        Commands::Export { output } => {
            let db = commands::open_db(&db_path, no_encrypt)?;
            commands::cmd_export(&db, output.as_deref())
        }
        Commands::Categories => commands::cmd_categories(),
    }
}

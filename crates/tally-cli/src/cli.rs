//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track spending against monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal budget dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to TALLY_CONFIG, then ~/.config/tally/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage transactions (list, add, update, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (list, set, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Show insights for a month
    Insights {
        /// Month to analyse (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import transactions from CSV (date,type,category,description,amount)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export all transactions to CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List suggested categories
    Categories,
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Record a transaction
    Add {
        /// Amount (always positive)
        #[arg(short, long)]
        amount: f64,

        /// What the money was for
        #[arg(short, long)]
        description: String,

        /// Category name (see `tally categories`)
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
    },

    /// Replace fields of a transaction
    Update {
        /// Transaction ID
        id: i64,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List {
        /// Only show budgets for this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set (create or overwrite) the budget for a category and month
    Set {
        /// Category name
        category: String,

        /// Monthly limit
        amount: f64,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Budget vs actual spending per category
    Budget {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending share per category
    Categories {
        /// Month (YYYY-MM, all time when omitted)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly expense totals
    Trend {
        /// Number of months to show (defaults to reports.trend_months)
        #[arg(short = 'n', long)]
        months: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income, expenses and recent activity for a month
    Dashboard {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

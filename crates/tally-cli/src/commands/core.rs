//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `parse_month` - Resolve an optional `--month` flag
//! - `cmd_init` - Initialize the database
//! - `cmd_categories` - Print suggested categories

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::{Database, DB_KEY_ENV};
use tally_core::models::CATEGORIES;
use tally_core::MonthKey;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Database path must be valid UTF-8"))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Parse a `YYYY-MM` flag, defaulting to the current month
pub fn parse_month(month: Option<&str>) -> Result<MonthKey> {
    Ok(parse_optional_month(month)?.unwrap_or_else(MonthKey::current))
}

/// Parse a `YYYY-MM` flag, None when absent
pub fn parse_optional_month(month: Option<&str>) -> Result<Option<MonthKey>> {
    month
        .map(|m| {
            m.trim()
                .parse::<MonthKey>()
                .map_err(|e| anyhow::anyhow!("Invalid month '{}' (use YYYY-MM): {}", m, e))
        })
        .transpose()
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let count = db.count_transactions()?;
    println!("   Transactions: {}", count);

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED ({})", DB_KEY_ENV);
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: tally budgets set \"Food & Dining\" 400");
    println!("  2. Import transactions: tally import --file transactions.csv");
    println!("  3. Start web UI: tally serve");

    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");
    for category in CATEGORIES {
        println!("   {}", category);
    }
    println!();
    println!("   Any other name works too; these are suggestions.");
    Ok(())
}

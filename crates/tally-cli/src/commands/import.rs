//! Import and export command implementations

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::Database;

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!("📥 Importing transactions from {}...", file.display());

    let stats = db
        .import_transactions_csv(BufReader::new(csv_file))
        .context("Import failed, no transactions were saved")?;

    println!();
    println!("📊 Import Results");
    println!("   ─────────────────────────────");
    println!("   Rows read:          {}", stats.total);
    println!("   ✅ Imported:        {}", stats.imported);
    println!("   ⏭️  Already present: {}", stats.skipped);

    Ok(())
}

pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    let csv = db.export_transactions_csv()?;

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            file.write_all(csv.as_bytes())?;
            let count = db.count_transactions()?;
            println!("✅ Exported {} transactions to {}", count, path.display());
        }
        None => {
            std::io::stdout().write_all(csv.as_bytes())?;
        }
    }

    Ok(())
}

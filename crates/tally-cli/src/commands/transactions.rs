//! Transaction command implementations

use anyhow::Result;
use chrono::Utc;
use tally_core::db::Database;
use tally_core::models::{parse_transaction_date, NewTransaction, Transaction, TransactionKind};

use super::{parse_optional_month, truncate};

/// Fields to change on `tally transactions update`
#[derive(Debug, Default)]
pub struct TransactionChanges {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
}

fn parse_kind(kind: &str) -> Result<TransactionKind> {
    kind.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn format_amount(tx: &Transaction) -> String {
    match tx.kind {
        // red for expenses, green for income
        TransactionKind::Expense => format!("\x1b[31m-${:.2}\x1b[0m", tx.amount),
        TransactionKind::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount),
    }
}

pub fn cmd_transactions_list(db: &Database, limit: usize, month: Option<&str>) -> Result<()> {
    let month = parse_optional_month(month)?;
    let transactions: Vec<Transaction> = db
        .list_transactions()?
        .into_iter()
        .filter(|tx| month.map_or(true, |m| m.contains(tx.date)))
        .take(limit)
        .collect();

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!(
            "  tally transactions add --amount 12.50 --description Lunch \
             --category \"Food & Dining\""
        );
        return Ok(());
    }

    println!();
    match month {
        Some(m) => println!("📝 Transactions for {}", m.label()),
        None => println!("📝 Recent Transactions"),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        println!(
            "   [{}] {} │ {:>10} │ {:<18} │ {}",
            tx.id,
            tx.date,
            format_amount(tx),
            truncate(&tx.category, 18),
            truncate(&tx.description, 35)
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    amount: f64,
    description: &str,
    category: &str,
    date: Option<&str>,
    kind: &str,
) -> Result<()> {
    let date = match date {
        Some(d) => parse_transaction_date(d)?,
        None => Utc::now().date_naive(),
    };
    let kind = parse_kind(kind)?;

    let tx = db.insert_transaction(&NewTransaction::new(
        amount,
        description,
        category,
        date,
        kind,
    ))?;

    println!("✅ Added {} #{}:", tx.kind, tx.id);
    println!(
        "   {} │ {} │ {} │ {}",
        tx.date,
        format_amount(&tx),
        tx.category,
        truncate(&tx.description, 40)
    );

    Ok(())
}

pub fn cmd_transactions_update(db: &Database, id: i64, changes: TransactionChanges) -> Result<()> {
    let existing = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let date = match changes.date.as_deref() {
        Some(d) => parse_transaction_date(d)?,
        None => existing.date,
    };
    let kind = match changes.kind.as_deref() {
        Some(k) => parse_kind(k)?,
        None => existing.kind,
    };

    let replacement = NewTransaction::new(
        changes.amount.unwrap_or(existing.amount),
        changes.description.unwrap_or(existing.description),
        changes.category.unwrap_or(existing.category),
        date,
        kind,
    );

    if !db.update_transaction(id, &replacement)? {
        anyhow::bail!("Transaction {} not found", id);
    }

    println!("✅ Updated transaction {}", id);
    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(id)?;

    println!("🗑️  Deleted transaction {}:", id);
    println!(
        "   {} │ ${:.2} │ {}",
        tx.date,
        tx.amount,
        truncate(&tx.description, 40)
    );

    Ok(())
}

//! Budget command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::NewBudget;

use super::{parse_month, parse_optional_month};

pub fn cmd_budgets_list(db: &Database, month: Option<&str>) -> Result<()> {
    let month = parse_optional_month(month)?;
    let budgets = db.list_budgets(month)?;

    if budgets.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  tally budgets set \"Food & Dining\" 400 --month 2024-03");
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────");

    for budget in budgets {
        println!(
            "   [{}] {} │ {:<24} │ {:>10}",
            budget.id,
            budget.month,
            budget.category,
            format!("${:.2}", budget.amount)
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    amount: f64,
    month: Option<&str>,
) -> Result<()> {
    let month = parse_month(month)?;
    let budget = db.upsert_budget(&NewBudget::new(category, amount, month))?;

    println!(
        "✅ Budget for {} in {} set to ${:.2}",
        budget.category,
        budget.month.label(),
        budget.amount
    );

    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: i64) -> Result<()> {
    let budget = db
        .get_budget(id)?
        .ok_or_else(|| anyhow::anyhow!("Budget {} not found", id))?;

    db.delete_budget(id)?;

    println!(
        "🗑️  Deleted {} budget for {}",
        budget.category,
        budget.month.label()
    );
    Ok(())
}

//! Report command implementations

use anyhow::Result;
use tally_core::db::Database;

use super::{parse_month, parse_optional_month, truncate};

/// Render a simple horizontal bar for a 0-100 percentage
fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn cmd_report_budget(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let comparison = db.budget_comparison(month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!();
    println!("📊 Budget vs Actual: {}", month.label());
    println!("   ─────────────────────────────────────────────────────────────────");

    if comparison.is_empty() {
        println!("   No spending or budgets this month.");
        return Ok(());
    }

    for row in &comparison.categories {
        if row.has_budget() {
            let status = if row.over > 0.0 {
                format!("\x1b[31m${:.2} over\x1b[0m", row.over)
            } else {
                format!("${:.2} left", row.remaining)
            };
            println!(
                "   {:<22} ${:>9.2} / ${:>9.2}  {} {:>5.1}%  {}",
                truncate(&row.category, 22),
                row.spent,
                row.budget_amount,
                bar(row.percentage, 20),
                row.percentage,
                status
            );
        } else {
            println!(
                "   {:<22} ${:>9.2}   (no budget)",
                truncate(&row.category, 22),
                row.spent
            );
        }
    }

    println!("   ─────────────────────────────────────────────────────────────────");
    println!(
        "   {:<22} ${:>9.2} / ${:>9.2}",
        "Total",
        comparison.total_spent(),
        comparison.total_budget()
    );

    Ok(())
}

pub fn cmd_report_categories(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = parse_optional_month(month)?;
    let shares = db.category_breakdown(month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&shares)?);
        return Ok(());
    }

    println!();
    match month {
        Some(m) => println!("🥧 Spending by Category: {}", m.label()),
        None => println!("🥧 Spending by Category: all time"),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if shares.is_empty() {
        println!("   No expenses recorded.");
        return Ok(());
    }

    for share in &shares {
        println!(
            "   {:<22} ${:>10.2}  {} {:>5.1}%  ({} txns)",
            truncate(&share.category, 22),
            share.amount,
            bar(share.percentage, 20),
            share.percentage,
            share.transaction_count
        );
    }

    Ok(())
}

pub fn cmd_report_trend(db: &Database, months: usize, json: bool) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    let series = db.monthly_expenses(months)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!();
    println!("📈 Monthly Expenses (last {} months with activity)", months);
    println!("   ─────────────────────────────────────────────────────────────");

    if series.is_empty() {
        println!("   No expenses recorded.");
        return Ok(());
    }

    let peak = series.iter().map(|m| m.amount).fold(0.0_f64, f64::max);
    for point in &series {
        let pct = if peak > 0.0 { point.amount / peak * 100.0 } else { 0.0 };
        println!(
            "   {:<10} ${:>10.2}  {}",
            point.label,
            point.amount,
            bar(pct, 30)
        );
    }

    Ok(())
}

pub fn cmd_report_dashboard(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let summary = db.dashboard(month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("🏠 Dashboard: {}", month.label());
    println!("   ─────────────────────────────");
    println!("   Income:       \x1b[32m${:.2}\x1b[0m", summary.total_income);
    println!("   Expenses:     \x1b[31m${:.2}\x1b[0m", summary.total_expenses);
    println!("   Net:          ${:.2}", summary.net_income);
    println!("   Transactions: {}", summary.transaction_count);
    if let Some(top) = &summary.top_category {
        println!("   Top category: {} (${:.2})", top.category, top.amount);
    }

    if !summary.recent_transactions.is_empty() {
        println!();
        println!("   Recent:");
        for tx in &summary.recent_transactions {
            println!(
                "   {} │ {:>7} │ ${:>9.2} │ {}",
                tx.date,
                tx.kind.as_str(),
                tx.amount,
                truncate(&tx.description, 35)
            );
        }
    }

    Ok(())
}

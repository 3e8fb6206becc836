//! Insight command implementation

use anyhow::Result;
use tally_core::db::Database;
use tally_core::InsightKind;

use super::parse_month;

fn icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "🚨",
        InsightKind::Caution => "⚠️ ",
        InsightKind::Success => "✅",
        InsightKind::Info => "💡",
    }
}

pub fn cmd_insights(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let insights = db.insights(month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("🔎 Insights: {}", month.label());
    println!("   ─────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing to report. Set budgets to get budget alerts:");
        println!("   tally budgets set \"Food & Dining\" 400");
        return Ok(());
    }

    for insight in &insights {
        println!("   {} {}", icon(insight.kind), insight.title);
        println!("      {}", insight.description);
    }

    Ok(())
}

//! Integration tests for tally-core
//!
//! These tests exercise the import → budget → report workflow.

use tally_core::{
    aggregate, derive_insights,
    db::Database,
    export::parse_transactions_csv,
    models::{NewBudget, TransactionKind},
    InsightKind, MonthKey, MAX_INSIGHTS,
};

/// Two months of household spending
/// - Food & Dining doubles from February to March
/// - Travel drops by more than half
/// - Rent dominates both months
fn household_csv() -> &'static str {
    r#"date,type,category,description,amount
2024-02-01,income,Salary,February pay,4000.00
2024-02-02,expense,Rent,February rent,1200.00
2024-02-10,expense,Food & Dining,Groceries,150.00
2024-02-18,expense,Travel,Train tickets,300.00
2024-03-01,income,Salary,March pay,4000.00
2024-03-02,expense,Rent,March rent,1200.00
2024-03-09,expense,Food & Dining,Groceries,180.00
2024-03-20,expense,Food & Dining,Restaurant,120.00
2024-03-22,expense,Travel,Bus pass,100.00"#
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

// =============================================================================
// Database Integration Tests
// =============================================================================

#[test]
fn test_full_import_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");

    let stats = db
        .import_transactions_csv(household_csv().as_bytes())
        .expect("Failed to import CSV");
    assert_eq!(stats.total, 9);
    assert_eq!(stats.imported, 9);

    db.upsert_budget(&NewBudget::new("Food & Dining", 250.0, month("2024-03")))
        .unwrap();
    db.upsert_budget(&NewBudget::new("Rent", 1300.0, month("2024-03")))
        .unwrap();
    db.upsert_budget(&NewBudget::new("Travel", 400.0, month("2024-03")))
        .unwrap();

    let comparison = db.budget_comparison(month("2024-03")).unwrap();
    let names: Vec<&str> = comparison
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["Travel", "Food & Dining", "Rent"]);
    assert_eq!(comparison.total_spent(), 1600.0);

    let food = comparison.get("Food & Dining").unwrap();
    assert_eq!(food.spent, 300.0);
    assert_eq!(food.over, 50.0);

    let insights = db.insights(month("2024-03")).unwrap();
    let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Budget Exceeded",
            "Budget Alert",
            "On Track",
            "Travel Spending Decreased",
            "Food & Dining Spending Increased",
            "Top Spending Category",
        ]
    );
    assert_eq!(insights[1].description, "You've used 92.3% of your Rent budget");
    assert_eq!(insights[3].kind, InsightKind::Info);
    assert_eq!(insights[4].description, "100.0% increase from last month");
    assert_eq!(
        insights[5].description,
        "Rent accounts for 75.0% of your spending this month"
    );
}

#[test]
fn test_reimport_skips_duplicates() {
    let db = Database::in_memory().unwrap();
    db.import_transactions_csv(household_csv().as_bytes())
        .unwrap();
    let second = db
        .import_transactions_csv(household_csv().as_bytes())
        .unwrap();
    assert_eq!(second.skipped, 9);
    assert_eq!(db.count_transactions().unwrap(), 9);
}

#[test]
fn test_dashboard_and_trends() {
    let db = Database::in_memory().unwrap();
    db.import_transactions_csv(household_csv().as_bytes())
        .unwrap();

    let summary = db.dashboard(month("2024-03")).unwrap();
    assert_eq!(summary.total_income, 4000.0);
    assert_eq!(summary.total_expenses, 1600.0);
    assert_eq!(summary.net_income, 2400.0);
    assert_eq!(summary.transaction_count, 5);
    assert_eq!(summary.top_category.unwrap().category, "Rent");
    assert_eq!(summary.recent_transactions[0].description, "Bus pass");

    let series = db.monthly_expenses(6).unwrap();
    let amounts: Vec<f64> = series.iter().map(|m| m.amount).collect();
    assert_eq!(amounts, vec![1650.0, 1600.0]);

    let breakdown = db.category_breakdown(None).unwrap();
    assert_eq!(breakdown[0].category, "Rent");
    assert_eq!(breakdown[0].amount, 2400.0);
    assert!(breakdown.iter().all(|c| c.category != "Salary"));
}

// =============================================================================
// Pure Analytics Tests
// =============================================================================

#[test]
fn test_analytics_on_parsed_rows() {
    let db = Database::in_memory().unwrap();
    let rows = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    for row in &rows {
        db.insert_transaction(row).unwrap();
    }
    let transactions = db.list_transactions().unwrap();
    assert!(transactions
        .iter()
        .any(|t| t.kind == TransactionKind::Income));

    let budgets = db.list_budgets(None).unwrap();
    let table = aggregate(&transactions, &budgets, "2024-03");
    assert_eq!(table.len(), 3);
    assert!(table.categories.iter().all(|c| !c.has_budget()));

    assert!(aggregate(&transactions, &budgets, "2024-13").is_empty());
    assert!(derive_insights(&transactions, &budgets, "not a month").is_empty());
    assert!(derive_insights(&transactions, &budgets, "2024-03").len() <= MAX_INSIGHTS);
}

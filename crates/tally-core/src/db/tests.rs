//! Database tests

use super::*;
use crate::models::*;
use crate::month::MonthKey;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn new_expense(amount: f64, description: &str, category: &str, on: &str) -> NewTransaction {
        NewTransaction::new(amount, description, category, date(on), TransactionKind::Expense)
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_transactions().unwrap().is_empty());
        assert!(db.list_budgets(None).unwrap().is_empty());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN \
                 ('id', 'amount', 'description', 'category', 'date', 'kind', \
                 'import_hash', 'created_at', 'updated_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 9, "transactions table should have 9 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('budgets') WHERE name IN \
                 ('id', 'category', 'amount', 'month', 'created_at', 'updated_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 6, "budgets table should have 6 expected columns");
    }

    #[test]
    fn test_transaction_crud() {
        let db = Database::in_memory().unwrap();

        let tx = db
            .insert_transaction(&new_expense(12.5, "Lunch", "Food & Dining", "2024-03-05"))
            .unwrap();
        assert!(tx.id > 0);
        assert_eq!(tx.amount, 12.5);
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.date, date("2024-03-05"));

        let fetched = db.get_transaction(tx.id).unwrap().unwrap();
        assert_eq!(fetched, tx);

        let replacement = NewTransaction::new(
            2000.0,
            "Paycheck",
            "Salary",
            date("2024-03-01"),
            TransactionKind::Income,
        );
        assert!(db.update_transaction(tx.id, &replacement).unwrap());
        let updated = db.get_transaction(tx.id).unwrap().unwrap();
        assert_eq!(updated.description, "Paycheck");
        assert_eq!(updated.kind, TransactionKind::Income);
        assert_eq!(updated.date, date("2024-03-01"));
        assert!(updated.updated_at >= updated.created_at);

        assert!(db.delete_transaction(tx.id).unwrap());
        assert!(db.get_transaction(tx.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_transaction() {
        let db = Database::in_memory().unwrap();
        let tx = new_expense(1.0, "x", "Other", "2024-03-05");
        assert!(db.get_transaction(999).unwrap().is_none());
        assert!(!db.update_transaction(999, &tx).unwrap());
        assert!(!db.delete_transaction(999).unwrap());
    }

    #[test]
    fn test_invalid_transaction_rejected() {
        let db = Database::in_memory().unwrap();
        let bad = new_expense(-5.0, "Refund", "Shopping", "2024-03-05");
        assert!(matches!(
            db.insert_transaction(&bad),
            Err(Error::InvalidData(_))
        ));
        assert_eq!(db.count_transactions().unwrap(), 0);
    }

    #[test]
    fn test_list_transactions_order() {
        let db = Database::in_memory().unwrap();
        let a = db
            .insert_transaction(&new_expense(1.0, "a", "Other", "2024-03-01"))
            .unwrap();
        let b = db
            .insert_transaction(&new_expense(1.0, "b", "Other", "2024-03-09"))
            .unwrap();
        let c = db
            .insert_transaction(&new_expense(1.0, "c", "Other", "2024-03-01"))
            .unwrap();

        let ids: Vec<i64> = db.list_transactions().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
    }

    #[test]
    fn test_duplicate_import_hash_skipped() {
        let db = Database::in_memory().unwrap();
        let mut tx = new_expense(3.0, "Coffee", "Food & Dining", "2024-03-05");
        tx.import_hash = Some("abc123".into());

        assert!(db.insert_transaction_if_new(&tx).unwrap().is_some());
        assert!(db.insert_transaction_if_new(&tx).unwrap().is_none());
        assert_eq!(db.count_transactions().unwrap(), 1);

        // manual entries carry no hash and are never treated as duplicates
        let manual = new_expense(3.0, "Coffee", "Food & Dining", "2024-03-05");
        assert!(db.insert_transaction_if_new(&manual).unwrap().is_some());
        assert!(db.insert_transaction_if_new(&manual).unwrap().is_some());
        assert_eq!(db.count_transactions().unwrap(), 3);
    }

    #[test]
    fn test_budget_upsert() {
        let db = Database::in_memory().unwrap();

        let first = db
            .upsert_budget(&NewBudget::new("Food & Dining", 300.0, month("2024-03")))
            .unwrap();
        assert_eq!(first.amount, 300.0);
        assert_eq!(first.month, month("2024-03"));

        let second = db
            .upsert_budget(&NewBudget::new("Food & Dining", 450.0, month("2024-03")))
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.amount, 450.0);

        db.upsert_budget(&NewBudget::new("Food & Dining", 200.0, month("2024-04")))
            .unwrap();

        assert_eq!(db.list_budgets(None).unwrap().len(), 2);
        let march = db.list_budgets(Some(month("2024-03"))).unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].amount, 450.0);
    }

    #[test]
    fn test_budget_validation_and_delete() {
        let db = Database::in_memory().unwrap();
        assert!(db
            .upsert_budget(&NewBudget::new("Travel", 0.0, month("2024-03")))
            .is_err());
        assert!(db
            .upsert_budget(&NewBudget::new("  ", 10.0, month("2024-03")))
            .is_err());

        let budget = db
            .upsert_budget(&NewBudget::new("Travel", 500.0, month("2024-03")))
            .unwrap();
        assert_eq!(db.get_budget(budget.id).unwrap().unwrap().category, "Travel");
        assert!(db.delete_budget(budget.id).unwrap());
        assert!(!db.delete_budget(budget.id).unwrap());
        assert!(db.get_budget(budget.id).unwrap().is_none());
    }

    #[test]
    fn test_reports_from_store() {
        let db = Database::in_memory().unwrap();
        db.insert_transaction(&new_expense(120.0, "Groceries", "Food", "2024-03-05"))
            .unwrap();
        db.insert_transaction(&new_expense(50.0, "Groceries", "Food", "2024-02-05"))
            .unwrap();
        db.upsert_budget(&NewBudget::new("Food", 100.0, month("2024-03")))
            .unwrap();

        let comparison = db.budget_comparison(month("2024-03")).unwrap();
        let food = comparison.get("Food").unwrap();
        assert_eq!(food.spent, 120.0);
        assert_eq!(food.over, 20.0);

        let insights = db.insights(month("2024-03")).unwrap();
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Budget Exceeded",
                "Food Spending Increased",
                "Top Spending Category"
            ]
        );

        let series = db.monthly_expenses(6).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].amount, 120.0);

        let summary = db.dashboard(month("2024-03")).unwrap();
        assert_eq!(summary.total_expenses, 120.0);
        assert_eq!(summary.recent_transactions.len(), 2);
    }

    #[test]
    fn test_encrypted_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encrypted.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new_with_key(path, Some("test-passphrase")).unwrap();
            db.insert_transaction(&new_expense(5.0, "Snack", "Food", "2024-03-05"))
                .unwrap();
        }

        {
            let db = Database::new_with_key(path, Some("test-passphrase")).unwrap();
            assert_eq!(db.count_transactions().unwrap(), 1);
        }

        assert!(
            Database::new_with_key(path, None).is_err(),
            "Should fail to open encrypted db without key"
        );
        assert!(
            Database::new_with_key(path, Some("wrong-passphrase")).is_err(),
            "Should fail to open encrypted db with wrong key"
        );
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        let key1 = derive_key("my-secret").unwrap();
        let key2 = derive_key("my-secret").unwrap();
        assert_eq!(key1, key2);
        assert_ne!(key1, derive_key("other-secret").unwrap());
    }

    #[test]
    fn test_unencrypted_database_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new_unencrypted(path).unwrap();
            db.upsert_budget(&NewBudget::new("Rent", 900.0, month("2024-03")))
                .unwrap();
        }

        let db = Database::new_unencrypted(path).unwrap();
        assert_eq!(db.list_budgets(None).unwrap().len(), 1);
        assert_eq!(db.path(), path);
    }
}

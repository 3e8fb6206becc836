//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{conversion_error, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};
use crate::month::MonthKey;

impl Database {
    /// Budgets in insertion order, optionally limited to one month
    pub fn list_budgets(&self, month: Option<MonthKey>) -> Result<Vec<Budget>> {
        let conn = self.conn()?;

        let budgets = match month {
            Some(month) => {
                let mut stmt = conn.prepare(
                    "SELECT id, category, amount, month, created_at, updated_at
                     FROM budgets WHERE month = ? ORDER BY id",
                )?;
                let rows = stmt
                    .query_map(params![month.to_string()], |row| Self::row_to_budget(row))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, category, amount, month, created_at, updated_at
                     FROM budgets ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([], |row| Self::row_to_budget(row))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        Ok(budgets)
    }

    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category, amount, month, created_at, updated_at
                 FROM budgets WHERE id = ?",
                params![id],
                |row| Self::row_to_budget(row),
            )
            .optional()?;
        Ok(budget)
    }

    /// Create or overwrite the budget for a (category, month) pair
    pub fn upsert_budget(&self, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;
        let conn = self.conn()?;
        let category = budget.category.trim();
        let month = budget.month.to_string();

        conn.execute(
            "INSERT INTO budgets (category, amount, month) VALUES (?, ?, ?)
             ON CONFLICT(category, month) DO UPDATE SET
                amount = excluded.amount,
                updated_at = CURRENT_TIMESTAMP",
            params![category, budget.amount, month],
        )?;

        let stored = conn
            .query_row(
                "SELECT id, category, amount, month, created_at, updated_at
                 FROM budgets WHERE category = ? AND month = ?",
                params![category, month],
                |row| Self::row_to_budget(row),
            )
            .optional()?;

        stored.ok_or_else(|| {
            Error::NotFound(format!("Budget {} / {} vanished after upsert", category, month))
        })
    }

    /// Returns false when no budget has this id
    pub fn delete_budget(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let month_str: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: row.get(2)?,
            month: month_str.parse().map_err(|e| conversion_error(3, e))?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}

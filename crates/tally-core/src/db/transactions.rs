//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{conversion_error, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionKind};

const TRANSACTION_COLUMNS: &str =
    "id, amount, description, category, date, kind, created_at, updated_at";

impl Database {
    /// Insert a transaction and return the stored row
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO transactions (amount, description, category, date, kind, import_hash)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                tx.amount,
                tx.description.trim(),
                tx.category.trim(),
                tx.date.to_string(),
                tx.kind.as_str(),
                tx.import_hash,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_transaction(id)?.ok_or_else(|| {
            Error::NotFound(format!("Transaction {} vanished after insert", id))
        })
    }

    /// Insert an imported transaction unless one with the same import hash exists
    ///
    /// Returns the new id, or `None` for a duplicate.
    pub fn insert_transaction_if_new(&self, tx: &NewTransaction) -> Result<Option<i64>> {
        tx.validate()?;
        let conn = self.conn()?;

        if tx.import_hash.is_some() {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM transactions WHERE import_hash = ?",
                    params![tx.import_hash],
                    |row| row.get(0),
                )
                .optional()?;

            if existing.is_some() {
                return Ok(None);
            }
        }

        conn.execute(
            "INSERT INTO transactions (amount, description, category, date, kind, import_hash)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                tx.amount,
                tx.description.trim(),
                tx.category.trim(),
                tx.date.to_string(),
                tx.kind.as_str(),
                tx.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// All transactions, newest date first (highest id first within a day)
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map([], |row| Self::row_to_transaction(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        ))?;

        let transaction = stmt
            .query_row(params![id], |row| Self::row_to_transaction(row))
            .optional()?;

        Ok(transaction)
    }

    /// Replace every editable field of a transaction
    ///
    /// Returns false when no transaction has this id.
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<bool> {
        tx.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE transactions
             SET amount = ?, description = ?, category = ?, date = ?, kind = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
            params![
                tx.amount,
                tx.description.trim(),
                tx.category.trim(),
                tx.date.to_string(),
                tx.kind.as_str(),
                id,
            ],
        )?;

        Ok(updated > 0)
    }

    /// Returns false when no transaction has this id
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Column order follows `TRANSACTION_COLUMNS`
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(4)?;
        let kind_str: String = row.get(5)?;
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| conversion_error(4, format!("Bad date {}: {}", date_str, e)))?;
        let kind: TransactionKind = kind_str.parse().map_err(|e| conversion_error(5, e))?;

        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            date,
            kind,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}

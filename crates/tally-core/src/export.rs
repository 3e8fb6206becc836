//! Transaction CSV export and import
//!
//! Both directions use the same layout:
//!
//! ```text
//! date,type,category,description,amount
//! 2024-03-05,expense,Food & Dining,Lunch,12.5
//! ```
//!
//! Amounts are written in their shortest exact form, never rounded, so an
//! export imports back to the same values. Imported rows get a SHA-256
//! `import_hash`, so importing the same file twice stores each row once.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{parse_transaction_date, NewTransaction, Transaction, TransactionKind};

pub const CSV_HEADER: &str = "date,type,category,description,amount";

const COLUMNS: [&str; 5] = ["date", "type", "category", "description", "amount"];

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
}

/// Render transactions as CSV, in the order given
pub fn transactions_to_csv(transactions: &[Transaction]) -> String {
    let mut csv = format!("{}\n", CSV_HEADER);

    for tx in transactions {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            tx.date,
            tx.kind,
            escape_csv_field(&tx.category),
            escape_csv_field(&tx.description),
            tx.amount
        ));
    }

    csv
}

/// Parse transactions from CSV
///
/// Columns are matched by header name, in any order. The first bad row stops
/// the parse with its line number.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = column_index(&headers)?;

    let mut transactions = Vec::new();
    let mut seen: HashMap<String, u32> = HashMap::new();

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut tx = parse_row(&record, &index)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        // Identical rows in one file are distinct purchases; number them so
        // each keeps its own stable hash.
        let base = row_hash(&tx, 0);
        let occurrence = seen.entry(base).or_insert(0);
        tx.import_hash = Some(row_hash(&tx, *occurrence));
        *occurrence += 1;

        transactions.push(tx);
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

fn column_index(headers: &StringRecord) -> Result<[usize; 5]> {
    let mut index = [0usize; 5];
    for (slot, name) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                Error::Import(format!(
                    "Missing column '{}' (expected header: {})",
                    name, CSV_HEADER
                ))
            })?;
    }
    Ok(index)
}

fn parse_row(record: &StringRecord, index: &[usize; 5]) -> Result<NewTransaction> {
    let field = |i: usize| record.get(index[i]).unwrap_or("");

    let date = parse_transaction_date(field(0))?;
    let kind: TransactionKind = field(1).parse().map_err(Error::InvalidData)?;
    let amount = parse_amount(field(4))?;

    let tx = NewTransaction::new(amount, field(3), field(2), date, kind);
    tx.validate()?;
    Ok(tx)
}

/// Parse an amount, tolerating currency symbols and thousands separators
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned = s.trim().replace(['$', ',', ' '], "");
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))
}

fn row_hash(tx: &NewTransaction, occurrence: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tx.date.to_string().as_bytes());
    hasher.update(tx.kind.as_str().as_bytes());
    hasher.update(tx.category.as_bytes());
    hasher.update(tx.description.as_bytes());
    hasher.update(tx.amount.to_be_bytes());
    hasher.update(occurrence.to_be_bytes());
    hex::encode(hasher.finalize())
}

impl Database {
    /// Export every transaction as CSV, newest first
    pub fn export_transactions_csv(&self) -> Result<String> {
        let transactions = self.list_transactions()?;
        Ok(transactions_to_csv(&transactions))
    }

    /// Import transactions from CSV, skipping rows imported before
    ///
    /// The whole file is parsed before anything is written, so a bad row
    /// leaves the database untouched.
    pub fn import_transactions_csv<R: Read>(&self, reader: R) -> Result<ImportStats> {
        let transactions = parse_transactions_csv(reader)?;
        let mut stats = ImportStats {
            total: transactions.len(),
            ..Default::default()
        };

        for tx in &transactions {
            match self.insert_transaction_if_new(tx)? {
                Some(_) => stats.imported += 1,
                None => stats.skipped += 1,
            }
        }

        info!(
            total = stats.total,
            imported = stats.imported,
            skipped = stats.skipped,
            "CSV import complete"
        );
        Ok(stats)
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("Food & Dining"), "Food & Dining");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_parse_csv() {
        let csv = "date,type,category,description,amount
2024-03-05,expense,Food & Dining,Lunch,12.50
2024-03-01,income,Salary,\"March pay, net\",\"$3,000.00\"
";
        let txs = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(txs[0].kind, TransactionKind::Expense);
        assert_eq!(txs[0].category, "Food & Dining");
        assert_eq!(txs[1].description, "March pay, net");
        assert_eq!(txs[1].amount, 3000.0);
        assert!(txs.iter().all(|t| t.import_hash.is_some()));
    }

    #[test]
    fn test_parse_csv_any_column_order() {
        let csv = "Amount,Description,Date,Type,Category\n\
                   9.99,Movie,2024-02-10,Expense,Entertainment\n";
        let txs = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs[0].amount, 9.99);
        assert_eq!(txs[0].description, "Movie");
    }

    #[test]
    fn test_parse_csv_reports_line_number() {
        let csv = "date,type,category,description,amount
2024-03-05,expense,Food,Lunch,12.50
2024-03-06,expense,Food,Dinner,abc
";
        let err = parse_transactions_csv(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("Line 3"), "{}", err);
        assert!(err.contains("abc"), "{}", err);

        let csv = "date,type,category,description,amount\n2024-03-05,refund,Food,Lunch,1\n";
        let err = parse_transactions_csv(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("Line 2"), "{}", err);

        let csv = "date,type,category,description,amount\n05/03/2024,expense,Food,Lunch,1\n";
        assert!(parse_transactions_csv(csv.as_bytes()).is_err());

        let csv = "date,type,category,description,amount\n2024-03-05,expense,Food,Lunch,-4\n";
        assert!(parse_transactions_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "date,category,description,amount\n2024-03-05,Food,Lunch,1\n";
        let err = parse_transactions_csv(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("'type'"), "{}", err);
    }

    #[test]
    fn test_identical_rows_get_distinct_hashes() {
        let csv = "date,type,category,description,amount
2024-03-05,expense,Food,Coffee,3.00
2024-03-05,expense,Food,Coffee,3.00
";
        let txs = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_ne!(txs[0].import_hash, txs[1].import_hash);

        let again = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs[0].import_hash, again[0].import_hash);
        assert_eq!(txs[1].import_hash, again[1].import_hash);
    }

    #[test]
    fn test_import_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let csv = "date,type,category,description,amount
2024-03-05,expense,Food,Coffee,3.00
2024-03-05,expense,Food,Coffee,3.00
2024-03-07,income,Salary,Pay,1000
";
        let first = db.import_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            first,
            ImportStats {
                total: 3,
                imported: 3,
                skipped: 0
            }
        );

        let second = db.import_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(db.count_transactions().unwrap(), 3);
    }

    #[test]
    fn test_bad_row_imports_nothing() {
        let db = Database::in_memory().unwrap();
        let csv = "date,type,category,description,amount
2024-03-05,expense,Food,Coffee,3.00
not-a-date,expense,Food,Coffee,3.00
";
        assert!(db.import_transactions_csv(csv.as_bytes()).is_err());
        assert_eq!(db.count_transactions().unwrap(), 0);
    }

    #[test]
    fn test_export_then_import() {
        let db = Database::in_memory().unwrap();
        db.insert_transaction(&NewTransaction::new(
            42.0,
            "Tickets, two",
            "Entertainment",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            TransactionKind::Expense,
        ))
        .unwrap();

        let csv = db.export_transactions_csv().unwrap();
        assert!(csv.starts_with(CSV_HEADER));
        assert!(csv.contains("2024-03-09,expense,Entertainment,\"Tickets, two\",42"));

        let other = Database::in_memory().unwrap();
        let stats = other.import_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(stats.imported, 1);
        let imported = other.list_transactions().unwrap();
        assert_eq!(imported[0].description, "Tickets, two");
        assert_eq!(imported[0].amount, 42.0);
    }

    #[test]
    fn test_export_keeps_sub_cent_amounts() {
        let db = Database::in_memory().unwrap();
        for amount in [3.333, 0.1 + 0.2, 1234.5678] {
            db.insert_transaction(&NewTransaction::new(
                amount,
                "Fuel",
                "Transportation",
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                TransactionKind::Expense,
            ))
            .unwrap();
        }

        let csv = db.export_transactions_csv().unwrap();
        assert!(csv.contains(",Fuel,3.333\n"), "{}", csv);

        let other = Database::in_memory().unwrap();
        other.import_transactions_csv(csv.as_bytes()).unwrap();

        let amounts = |db: &Database| {
            let mut amounts: Vec<f64> = db
                .list_transactions()
                .unwrap()
                .iter()
                .map(|t| t.amount)
                .collect();
            amounts.sort_by(f64::total_cmp);
            amounts
        };
        assert_eq!(amounts(&db), amounts(&other));
        assert!(amounts(&other).contains(&3.333));
    }
}

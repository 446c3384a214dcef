//! Parse ledger CSV exports into typed transactions.
//!
//! Expected columns after the header row:
//! date,amount,category,type,note
//!
//! Rows with unparseable dates or amounts are skipped, not fatal: a single
//! bad export line must never lose the rest of the file.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use tally_core::{Transaction, TxKind};

use crate::store::new_id;

/// Parse a ledger CSV file, returning all valid transactions.
/// Leading junk before the header row is skipped automatically.
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_ledger_reader(file)
}

pub fn parse_ledger_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut txns = Vec::new();
    let mut header_found = false;

    for result in rdr.records() {
        let record = result?;
        // Skip until we find the header row
        if !header_found {
            if record
                .get(0)
                .map(|s| s.trim().eq_ignore_ascii_case("date"))
                .unwrap_or(false)
            {
                header_found = true;
            }
            continue;
        }

        let date_str = record.get(0).unwrap_or("").trim();
        if date_str.is_empty() {
            continue;
        }
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue, // skip unparseable rows
        };

        let amount: f64 = match record.get(1).unwrap_or("").trim().replace(',', "").parse() {
            Ok(a) => a,
            Err(_) => continue,
        };

        let Some(kind) = TxKind::parse(record.get(3).unwrap_or("")) else {
            continue;
        };

        let category = record.get(2).unwrap_or("").trim();
        let category = if category.is_empty() {
            "Uncategorized"
        } else {
            category
        };

        let note = record
            .get(4)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut tx = Transaction::new(new_id(), date, amount, category, kind);
        tx.note = note;
        txns.push(tx);
    }

    Ok(txns)
}

//! The JSON ledger file: load, append, save.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use tally_core::Transaction;

/// Generate a fresh unique transaction id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Load the ledger. A missing file is an empty ledger, not an error.
pub fn load_ledger(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_ledger(path: &Path, transactions: &[Transaction]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(transactions)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Append transactions to the ledger on disk, returning the new total count.
pub fn append_transactions(path: &Path, incoming: Vec<Transaction>) -> Result<usize> {
    let mut ledger = load_ledger(path)?;
    ledger.extend(incoming);
    save_ledger(path, &ledger)?;
    Ok(ledger.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::TxKind;

    fn sample(id: &str) -> Transaction {
        Transaction::new(
            id,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            -50.0,
            "Food",
            TxKind::Expense,
        )
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        assert_eq!(load_ledger(&path).unwrap(), Vec::new());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let txns = vec![sample("a"), sample("b")];

        save_ledger(&path, &txns).unwrap();
        assert_eq!(load_ledger(&path).unwrap(), txns);
    }

    #[test]
    fn test_append_extends_existing_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        save_ledger(&path, &[sample("a")]).unwrap();

        let count = append_transactions(&path, vec![sample("b"), sample("c")]).unwrap();
        assert_eq!(count, 3);
        let ledger = load_ledger(&path).unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[2].id, "c");
    }

    #[test]
    fn test_new_ids_differ() {
        assert_ne!(new_id(), new_id());
    }
}

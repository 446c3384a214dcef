//! tally-ledger: ledger-file ingestion and export.
//!
//! Reads user-supplied transaction CSVs with a tolerant row-by-row policy
//! and owns the JSON ledger file the CLI reads and writes.

pub mod csv_import;
pub mod store;

pub use csv_import::parse_ledger_csv;
pub use store::{append_transactions, load_ledger, new_id, save_ledger};

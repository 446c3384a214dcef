//! Transaction records and category accounting types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Signed amount: income positive, expense usually negative.
    /// Investment amounts are always read through `abs()`.
    pub amount: f64,
    /// User-defined category name
    pub category: String,
    /// Income, expense, or investment
    pub kind: TxKind,
    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Transaction kinds, serialized in lowercase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "investment")]
    Investment,
}

impl TxKind {
    /// Parse a user- or API-supplied kind string. Case-insensitive.
    pub fn parse(s: &str) -> Option<TxKind> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            "investment" => Some(TxKind::Investment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Investment => "investment",
        }
    }
}

impl Transaction {
    /// Create a new Transaction with no note
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        kind: TxKind,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category: category.into(),
            kind,
            note: None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxKind::Income
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Ordered per-category accumulator.
///
/// Lookups for categories that were never added resolve to zero, so callers
/// never hit a missing-key fault when a transaction names an unknown category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals(BTreeMap<String, f64>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, creating the entry on first use.
    pub fn add(&mut self, category: &str, amount: f64) {
        *self.0.entry(category.to_string()).or_insert(0.0) += amount;
    }

    /// Total for a category; zero when the category was never seen.
    pub fn get(&self, category: &str) -> f64 {
        self.0.get(category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over every category in the map
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }
}

/// Per-category budget targets; a category without an entry budgets to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budgets(BTreeMap<String, f64>);

impl Budgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: &str, target: f64) {
        self.0.insert(category.to_string(), target);
    }

    /// Budget target for a category; zero when none was configured.
    pub fn get(&self, category: &str) -> f64 {
        self.0.get(category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The three disjoint category lists owned by application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLists {
    pub income: Vec<String>,
    pub expense: Vec<String>,
    pub investment: Vec<String>,
}

impl Default for CategoryLists {
    fn default() -> Self {
        let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            income: names(&["Salary", "Bonus", "Interest", "Other Income"]),
            expense: names(&[
                "Food",
                "Housing",
                "Transport",
                "Shopping",
                "Entertainment",
                "Health",
                "Other",
            ]),
            investment: names(&["Stocks", "Funds", "Crypto", "Savings"]),
        }
    }
}

impl CategoryLists {
    /// Categories for one transaction kind, in declared order.
    pub fn for_kind(&self, kind: TxKind) -> &[String] {
        match kind {
            TxKind::Income => &self.income,
            TxKind::Expense => &self.expense,
            TxKind::Investment => &self.investment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txkind_parse_roundtrip() {
        for kind in [TxKind::Income, TxKind::Expense, TxKind::Investment] {
            assert_eq!(TxKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TxKind::parse("  Expense "), Some(TxKind::Expense));
        assert_eq!(TxKind::parse("transfer"), None);
    }

    #[test]
    fn test_category_totals_default_zero() {
        let mut totals = CategoryTotals::new();
        totals.add("Food", -50.0);
        totals.add("Food", -25.0);
        assert_eq!(totals.get("Food"), -75.0);
        assert_eq!(totals.get("Nonexistent"), 0.0);
    }

    #[test]
    fn test_category_totals_ordered_iteration() {
        let mut totals = CategoryTotals::new();
        totals.add("Zoo", 1.0);
        totals.add("Apple", 2.0);
        let keys: Vec<_> = totals.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["Apple", "Zoo"]);
    }

    #[test]
    fn test_budgets_default_zero() {
        let mut budgets = Budgets::new();
        budgets.set("Food", 200.0);
        assert_eq!(budgets.get("Food"), 200.0);
        assert_eq!(budgets.get("Travel"), 0.0);
    }

    #[test]
    fn test_transaction_serde_kind_rename() {
        let tx = Transaction::new(
            "t-1",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            -50.0,
            "Food",
            TxKind::Expense,
        );
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"expense\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}

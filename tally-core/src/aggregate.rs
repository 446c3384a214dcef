//! Folds transactions into the series behind the four report views:
//! bucketed spending, current-month budget tracking, running balances,
//! and the yearly income/expense/investment flow.
//!
//! Every function here is pure and cheap to re-run in full; callers are
//! expected to recompute on any input change rather than patch results
//! incrementally.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{CategoryTotals, Transaction, TxKind};
use crate::period::PeriodWindow;

/// One point on a chart's time axis with per-category totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub by_category: CategoryTotals,
    pub total: f64,
}

/// A prefix-sum point in a running-balance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

/// The two aligned running-balance series.
///
/// Both series always have one point per input transaction, so their
/// x-axes line up regardless of the kind mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSeries {
    /// Cumulative signed income + expense: net cash position.
    pub wealth: Vec<BalancePoint>,
    /// Cumulative absolute investment: total capital committed.
    pub invested: Vec<BalancePoint>,
}

/// One month of the yearly flow view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub investment: f64,
}

/// Bucket transactions of one kind over a resolved window.
///
/// Every axis label gets a bucket even when nothing falls into it, so a
/// chart keeps its complete time axis. Amounts are added as absolute
/// values. A transaction whose label has no pre-registered bucket is
/// skipped rather than failing the whole computation.
pub fn spending_series(
    transactions: &[Transaction],
    window: &PeriodWindow,
    kind: TxKind,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = window
        .labels
        .iter()
        .map(|label| Bucket {
            label: label.clone(),
            by_category: CategoryTotals::new(),
            total: 0.0,
        })
        .collect();

    let index: HashMap<&str, usize> = window
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    for tx in transactions {
        if tx.kind != kind || !window.contains(tx.date) {
            continue;
        }
        let label = window.period.label_for(tx.date);
        let Some(&slot) = index.get(label.as_str()) else {
            continue;
        };
        let amount = tx.amount.abs();
        buckets[slot].by_category.add(&tx.category, amount);
        buckets[slot].total += amount;
    }

    buckets
}

/// Signed per-category totals for the real current calendar month.
///
/// This feeds the budget view and deliberately ignores any period
/// navigation: the spending-analysis window and this aggregation are
/// independent scopes.
pub fn current_month_category_totals(
    transactions: &[Transaction],
    now: NaiveDate,
) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for tx in transactions {
        if tx.date.year() == now.year() && tx.date.month() == now.month() {
            totals.add(&tx.category, tx.amount);
        }
    }
    totals
}

/// Running wealth and investment balances in chronological order.
///
/// Transactions are sorted by date before folding; both series get one
/// point per transaction, carrying the unchanged accumulator forward when
/// a transaction only touches the other series.
pub fn running_balances(transactions: &[Transaction]) -> BalanceSeries {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);

    let mut wealth = Vec::with_capacity(ordered.len());
    let mut invested = Vec::with_capacity(ordered.len());
    let mut wealth_balance = 0.0;
    let mut invested_balance = 0.0;

    for tx in ordered {
        match tx.kind {
            TxKind::Income | TxKind::Expense => wealth_balance += tx.amount,
            TxKind::Investment => invested_balance += tx.amount.abs(),
        }
        wealth.push(BalancePoint {
            date: tx.date,
            balance: wealth_balance,
        });
        invested.push(BalancePoint {
            date: tx.date,
            balance: invested_balance,
        });
    }

    BalanceSeries { wealth, invested }
}

/// Monthly income/expense/investment totals across the current calendar year.
///
/// All 12 months are pre-seeded so the axis is complete; transactions
/// outside the year are excluded.
pub fn yearly_flow(transactions: &[Transaction], now: NaiveDate) -> Vec<MonthlyFlow> {
    const MONTH_ABBREV: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    let mut months: Vec<MonthlyFlow> = MONTH_ABBREV
        .iter()
        .map(|label| MonthlyFlow {
            label: label.to_string(),
            income: 0.0,
            expense: 0.0,
            investment: 0.0,
        })
        .collect();

    for tx in transactions {
        if tx.date.year() != now.year() {
            continue;
        }
        let slot = &mut months[tx.date.month0() as usize];
        match tx.kind {
            TxKind::Income => slot.income += tx.amount,
            TxKind::Expense => slot.expense += tx.amount.abs(),
            TxKind::Investment => slot.investment += tx.amount.abs(),
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{resolve, Period};
    use chrono::Weekday;

    fn tx(id: &str, date: (i32, u32, u32), amount: f64, category: &str, kind: TxKind) -> Transaction {
        Transaction::new(
            id,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            category,
            kind,
        )
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    #[test]
    fn test_spending_series_preserves_empty_buckets() {
        let window = resolve(Period::Week, 0, now(), Weekday::Mon);
        let series = spending_series(&[], &window, TxKind::Expense);
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|b| b.total == 0.0));
        assert_eq!(series[0].label, "Mon");
    }

    #[test]
    fn test_spending_series_buckets_by_weekday() {
        let window = resolve(Period::Week, 0, now(), Weekday::Mon);
        let txns = vec![
            tx("a", (2024, 3, 11), -40.0, "Food", TxKind::Expense),
            tx("b", (2024, 3, 11), -10.0, "Transport", TxKind::Expense),
            tx("c", (2024, 3, 15), -25.0, "Food", TxKind::Expense),
            // Outside the window, must not appear.
            tx("d", (2024, 3, 4), -99.0, "Food", TxKind::Expense),
            // Different kind, must not appear.
            tx("e", (2024, 3, 12), 500.0, "Salary", TxKind::Income),
        ];

        let series = spending_series(&txns, &window, TxKind::Expense);
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[0].total, 50.0);
        assert_eq!(series[0].by_category.get("Food"), 40.0);
        assert_eq!(series[0].by_category.get("Transport"), 10.0);
        assert_eq!(series[4].label, "Fri");
        assert_eq!(series[4].total, 25.0);
        assert_eq!(series[1].total, 0.0);
    }

    #[test]
    fn test_bucket_total_equals_category_sum() {
        let window = resolve(Period::SixMonth, 0, now(), Weekday::Mon);
        let txns = vec![
            tx("a", (2023, 11, 3), -12.5, "Food", TxKind::Expense),
            tx("b", (2023, 11, 21), -7.5, "Transport", TxKind::Expense),
            tx("c", (2024, 1, 2), -100.0, "Housing", TxKind::Expense),
            tx("d", (2024, 3, 13), -3.25, "Food", TxKind::Expense),
        ];

        for bucket in spending_series(&txns, &window, TxKind::Expense) {
            let category_sum = bucket.by_category.sum();
            assert!(
                (bucket.total - category_sum).abs() < 1e-9,
                "bucket {} total {} != category sum {}",
                bucket.label,
                bucket.total,
                category_sum
            );
        }
    }

    #[test]
    fn test_current_month_totals_signed_and_scoped() {
        let txns = vec![
            tx("a", (2024, 3, 1), -50.0, "Food", TxKind::Expense),
            tx("b", (2024, 3, 15), 2000.0, "Salary", TxKind::Income),
            tx("c", (2024, 3, 20), -200.0, "Stocks", TxKind::Investment),
            // Previous month, ignored.
            tx("d", (2024, 2, 28), -75.0, "Food", TxKind::Expense),
        ];

        let totals = current_month_category_totals(&txns, now());
        assert_eq!(totals.get("Food"), -50.0);
        assert_eq!(totals.get("Salary"), 2000.0);
        assert_eq!(totals.get("Stocks"), -200.0);
    }

    #[test]
    fn test_running_balances_aligned_lengths() {
        let txns = vec![
            tx("a", (2024, 1, 10), 1000.0, "Salary", TxKind::Income),
            tx("b", (2024, 1, 15), -300.0, "Food", TxKind::Expense),
            tx("c", (2024, 1, 20), -500.0, "Stocks", TxKind::Investment),
        ];

        let series = running_balances(&txns);
        assert_eq!(series.wealth.len(), 3);
        assert_eq!(series.invested.len(), 3);

        assert_eq!(series.wealth[0].balance, 1000.0);
        assert_eq!(series.wealth[1].balance, 700.0);
        // Investment leaves the wealth series unchanged, point still appended.
        assert_eq!(series.wealth[2].balance, 700.0);

        assert_eq!(series.invested[0].balance, 0.0);
        assert_eq!(series.invested[1].balance, 0.0);
        assert_eq!(series.invested[2].balance, 500.0);
    }

    #[test]
    fn test_running_balances_sorts_by_date() {
        let txns = vec![
            tx("late", (2024, 2, 1), -100.0, "Food", TxKind::Expense),
            tx("early", (2024, 1, 1), 400.0, "Salary", TxKind::Income),
        ];

        let series = running_balances(&txns);
        assert_eq!(series.wealth[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(series.wealth[0].balance, 400.0);
        assert_eq!(series.wealth[1].balance, 300.0);
    }

    #[test]
    fn test_yearly_flow_seeds_all_months() {
        let txns = vec![
            tx("a", (2024, 1, 5), 2500.0, "Salary", TxKind::Income),
            tx("b", (2024, 1, 8), -120.0, "Food", TxKind::Expense),
            tx("c", (2024, 6, 1), -1000.0, "Funds", TxKind::Investment),
            // Wrong year, excluded.
            tx("d", (2023, 6, 1), -999.0, "Food", TxKind::Expense),
        ];

        let flow = yearly_flow(&txns, now());
        assert_eq!(flow.len(), 12);
        assert_eq!(flow[0].income, 2500.0);
        assert_eq!(flow[0].expense, 120.0);
        assert_eq!(flow[5].investment, 1000.0);
        assert_eq!(flow[5].expense, 0.0);
        assert_eq!(flow[11].income, 0.0);
    }
}

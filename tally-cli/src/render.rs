//! Text-table and chart-JSON rendering of report series.

use anyhow::Result;
use serde_json::{json, Value};

use tally_core::{shades, BalanceSeries, Bucket, BudgetReport, MonthlyFlow, PeriodWindow};

pub fn print_spending(window: &PeriodWindow, series: &[Bucket]) {
    println!("Spending {} .. {}\n", window.start, window.end);
    for bucket in series {
        let breakdown: Vec<String> = bucket
            .by_category
            .iter()
            .map(|(category, amount)| format!("{category} {amount:.2}"))
            .collect();
        println!(
            "{:>4} {:>10.2}  {}",
            bucket.label,
            bucket.total,
            breakdown.join(" | ")
        );
    }
    let total: f64 = series.iter().map(|b| b.total).sum();
    println!("\nTotal: {total:.2}");
}

pub fn print_budget(report: &BudgetReport) {
    for row in &report.rows {
        println!(
            "{:<16} {:>10.2} / {:>10.2}  {:>5.1}%",
            row.category,
            row.tracked.abs(),
            row.budget,
            row.percent_used
        );
    }
    println!(
        "\nBudget: {:.2}  Tracked: {:.2}  Remaining: {:.2}{}",
        report.total_budget,
        report.total_tracked.abs(),
        report.total_remaining,
        if report.over_budget { "  OVER BUDGET" } else { "" }
    );
}

pub fn print_balances(series: &BalanceSeries) {
    println!("{:<12} {:>12} {:>12}", "Date", "Wealth", "Invested");
    for (wealth, invested) in series.wealth.iter().zip(series.invested.iter()) {
        println!(
            "{:<12} {:>12.2} {:>12.2}",
            wealth.date.to_string(),
            wealth.balance,
            invested.balance
        );
    }
}

pub fn print_flow(flow: &[MonthlyFlow]) {
    println!(
        "{:<4} {:>12} {:>12} {:>12}",
        "", "Income", "Expense", "Invested"
    );
    for month in flow {
        println!(
            "{:<4} {:>12.2} {:>12.2} {:>12.2}",
            month.label, month.income, month.expense, month.investment
        );
    }
}

/// Chart-ready JSON for the spending view: one colored series per category,
/// shaded from the configured base color, plus per-bucket totals.
pub fn spending_chart_json(
    window: &PeriodWindow,
    series: &[Bucket],
    base_color: &str,
) -> Result<Value> {
    let mut categories: Vec<String> = Vec::new();
    for bucket in series {
        for (category, _) in bucket.by_category.iter() {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
    }

    let palette = shades(base_color, categories.len())?;
    let chart_series: Vec<Value> = categories
        .iter()
        .zip(palette)
        .map(|(category, color)| {
            json!({
                "category": category,
                "color": color.to_css(),
                "values": series
                    .iter()
                    .map(|b| b.by_category.get(category))
                    .collect::<Vec<f64>>(),
            })
        })
        .collect();

    Ok(json!({
        "labels": window.labels,
        "series": chart_series,
        "totals": series.iter().map(|b| b.total).collect::<Vec<f64>>(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use tally_core::{resolve, spending_series, Period, Transaction, TxKind};

    #[test]
    fn test_chart_json_shape() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let window = resolve(Period::Week, 0, now, Weekday::Mon);
        let txns = vec![
            Transaction::new("a", now, -40.0, "Food", TxKind::Expense),
            Transaction::new("b", now, -10.0, "Transport", TxKind::Expense),
        ];
        let series = spending_series(&txns, &window, TxKind::Expense);

        let chart = spending_chart_json(&window, &series, "#4F6BED").unwrap();
        assert_eq!(chart["labels"].as_array().unwrap().len(), 7);
        let chart_series = chart["series"].as_array().unwrap();
        assert_eq!(chart_series.len(), 2);
        assert!(chart_series[0]["color"]
            .as_str()
            .unwrap()
            .starts_with("rgba("));
        assert_eq!(
            chart_series[0]["values"].as_array().unwrap().len(),
            7
        );
    }
}

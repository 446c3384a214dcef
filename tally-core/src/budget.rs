//! Budget-versus-spend comparison for the current month.

use serde::{Deserialize, Serialize};

use crate::model::{Budgets, CategoryTotals};

/// One category row in the budget view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub category: String,
    pub budget: f64,
    /// Signed tracked amount for the month (expenses are negative as stored).
    pub tracked: f64,
    /// Share of the budget consumed, in percent. Zero when no budget is set.
    pub percent_used: f64,
}

/// Per-category rows plus overall totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub rows: Vec<BudgetRow>,
    pub total_budget: f64,
    pub total_tracked: f64,
    pub total_remaining: f64,
    pub over_budget: bool,
}

/// Compare configured budgets against tracked monthly totals.
///
/// Rows come out in the supplied category order, and the totals sum over
/// exactly that list: a category missing from `categories` never affects
/// the report, and a category with no budget entry compares against zero.
pub fn compare(categories: &[String], budgets: &Budgets, tracked: &CategoryTotals) -> BudgetReport {
    let mut rows = Vec::with_capacity(categories.len());
    let mut total_budget = 0.0;
    let mut total_tracked = 0.0;

    for category in categories {
        let budget = budgets.get(category);
        let spent = tracked.get(category);
        let percent_used = if budget > 0.0 {
            spent.abs() / budget * 100.0
        } else {
            0.0
        };

        total_budget += budget;
        total_tracked += spent;

        rows.push(BudgetRow {
            category: category.clone(),
            budget,
            tracked: spent,
            percent_used,
        });
    }

    BudgetReport {
        rows,
        total_budget,
        total_tracked,
        total_remaining: total_budget - total_tracked.abs(),
        over_budget: total_tracked.abs() > total_budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compare_basic_row() {
        let categories = category_list(&["Food"]);
        let mut budgets = Budgets::new();
        budgets.set("Food", 200.0);
        let mut tracked = CategoryTotals::new();
        tracked.add("Food", -50.0);

        let report = compare(&categories, &budgets, &tracked);
        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.budget, 200.0);
        assert_eq!(row.tracked, -50.0);
        assert_eq!(row.percent_used, 25.0);
        assert_eq!(report.total_remaining, 150.0);
        assert!(!report.over_budget);
    }

    #[test]
    fn test_compare_zero_budget_never_divides() {
        let categories = category_list(&["Misc"]);
        let budgets = Budgets::new();
        let mut tracked = CategoryTotals::new();
        tracked.add("Misc", -30.0);

        let report = compare(&categories, &budgets, &tracked);
        assert_eq!(report.rows[0].percent_used, 0.0);
        assert!(report.rows[0].percent_used.is_finite());
    }

    #[test]
    fn test_compare_ignores_categories_outside_list() {
        let categories = category_list(&["Food"]);
        let mut budgets = Budgets::new();
        budgets.set("Food", 100.0);
        budgets.set("Travel", 500.0);
        let mut tracked = CategoryTotals::new();
        tracked.add("Food", -20.0);
        tracked.add("Travel", -400.0);

        let report = compare(&categories, &budgets, &tracked);
        assert_eq!(report.total_budget, 100.0);
        assert_eq!(report.total_tracked, -20.0);
    }

    #[test]
    fn test_compare_over_budget_flag() {
        let categories = category_list(&["Food", "Transport"]);
        let mut budgets = Budgets::new();
        budgets.set("Food", 100.0);
        budgets.set("Transport", 50.0);
        let mut tracked = CategoryTotals::new();
        tracked.add("Food", -120.0);
        tracked.add("Transport", -60.0);

        let report = compare(&categories, &budgets, &tracked);
        assert!(report.over_budget);
        assert_eq!(report.total_remaining, -30.0);
        assert!(report.rows[0].percent_used > 100.0);
    }

    #[test]
    fn test_compare_preserves_declared_order() {
        let categories = category_list(&["Zoo", "Apple", "Mango"]);
        let report = compare(&categories, &Budgets::new(), &CategoryTotals::new());
        let order: Vec<_> = report.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["Zoo", "Apple", "Mango"]);
    }
}

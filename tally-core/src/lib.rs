//! tally-core: transaction model, reporting windows, and the aggregation
//! engine behind the spending, budget, balance, and flow views.

pub mod aggregate;
pub mod budget;
pub mod color;
pub mod model;
pub mod period;

pub use aggregate::{
    current_month_category_totals, running_balances, spending_series, yearly_flow, BalancePoint,
    BalanceSeries, Bucket, MonthlyFlow,
};
pub use budget::{compare, BudgetReport, BudgetRow};
pub use color::{shades, Rgba};
pub use model::{Budgets, CategoryLists, CategoryTotals, Transaction, TxKind};
pub use period::{resolve, Period, PeriodWindow};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One slice of the financial breakdown pie.
///
/// The core computes the numbers; the frontend just renders them.
/// There are always three slices: Income, Expenses, Savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    /// Display label (e.g., "Income")
    pub label: String,

    /// Monetary total for this slice
    pub value: f64,
}

/// One point of the per-entry cashflow line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowPoint {
    /// The entry's date
    pub date: NaiveDate,

    /// Income recorded on that entry
    pub income: f64,

    /// Expense recorded on that entry
    pub expense: f64,
}

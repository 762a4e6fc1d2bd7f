use crate::models::chart::{BreakdownSlice, CashflowPoint};
use crate::models::ledger::Ledger;
use crate::models::metrics::AggregateMetrics;

/// Generates chart-ready data sets from the ledger and its metrics.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Income / Expenses / Savings totals for the breakdown pie.
    #[must_use]
    pub fn breakdown(&self, metrics: &AggregateMetrics) -> Vec<BreakdownSlice> {
        vec![
            BreakdownSlice {
                label: "Income".into(),
                value: metrics.total_income,
            },
            BreakdownSlice {
                label: "Expenses".into(),
                value: metrics.total_expense,
            },
            BreakdownSlice {
                label: "Savings".into(),
                value: metrics.total_savings,
            },
        ]
    }

    /// One point per entry, in ledger order (newest first, matching the
    /// records list the chart sits next to).
    #[must_use]
    pub fn cashflow_series(&self, ledger: &Ledger) -> Vec<CashflowPoint> {
        ledger
            .entries
            .iter()
            .map(|e| CashflowPoint {
                date: e.date,
                income: e.income,
                expense: e.expense,
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

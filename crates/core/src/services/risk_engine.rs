use crate::models::entry::LedgerEntry;
use crate::models::metrics::{AdviceTier, AggregateMetrics};

/// Recomputes aggregate financial metrics from the full ledger.
///
/// Pure derivation, no I/O, no side effects. Must run synchronously
/// after every ledger mutation, before metrics are displayed.
pub struct RiskEngine;

impl RiskEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute metrics over any finite sequence of entries.
    ///
    /// Policies:
    /// - With zero total income the debt-to-income ratio is 0, even when
    ///   expenses are nonzero. This understates risk; it is a documented
    ///   policy, not a bug to silently fix.
    /// - Per-entry savings is re-derived from income/expense here. The
    ///   stored savings field on each entry is display data only.
    /// - The raw score `dti * 1.5 - (savings / income) * 20` may fall
    ///   below 0 or exceed 100; it is clamped afterwards.
    /// - The ratio is rounded to 2 decimal places for display; the score
    ///   is computed from the unrounded value.
    #[must_use]
    pub fn compute_metrics(&self, entries: &[LedgerEntry]) -> AggregateMetrics {
        let total_income: f64 = entries.iter().map(|e| e.income).sum();
        let total_expense: f64 = entries.iter().map(|e| e.expense).sum();
        let total_savings: f64 = entries
            .iter()
            .map(|e| (e.income - e.expense).max(0.0))
            .sum();

        let dti = if total_income > 0.0 {
            total_expense / total_income * 100.0
        } else {
            0.0
        };
        let savings_offset = if total_income > 0.0 {
            total_savings / total_income * 20.0
        } else {
            0.0
        };

        let risk_score = (dti * 1.5 - savings_offset).round().clamp(0.0, 100.0) as u8;

        AggregateMetrics {
            total_income,
            total_expense,
            total_savings,
            debt_to_income_ratio: round_to_cents(dti),
            risk_score,
            advice: AdviceTier::from_risk_score(risk_score),
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a percentage to 2 decimal places for display.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

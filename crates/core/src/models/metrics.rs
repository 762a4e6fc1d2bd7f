use serde::{Deserialize, Serialize};

/// Qualitative advice tier derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceTier {
    /// Score 0..=30: healthy finances, a loan is safe to consider
    Strong,
    /// Score 31..=50: proceed with caution
    Moderate,
    /// Score 51..=100: avoid taking a loan
    HighRisk,
}

impl AdviceTier {
    #[must_use]
    pub fn from_risk_score(score: u8) -> Self {
        match score {
            0..=30 => AdviceTier::Strong,
            31..=50 => AdviceTier::Moderate,
            _ => AdviceTier::HighRisk,
        }
    }

    /// The advice sentence shown to the user for this tier.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            AdviceTier::Strong => {
                "Your financial health is strong. It's safe to consider a loan."
            }
            AdviceTier::Moderate => "Moderate risk detected. Proceed with caution for loans.",
            AdviceTier::HighRisk => {
                "High risk. Avoid taking a loan unless you improve your finances."
            }
        }
    }
}

impl std::fmt::Display for AdviceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdviceTier::Strong => write!(f, "Strong"),
            AdviceTier::Moderate => write!(f, "Moderate"),
            AdviceTier::HighRisk => write!(f, "High Risk"),
        }
    }
}

/// Aggregate financial metrics, recomputed from the full in-memory
/// ledger after every change. Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Sum of income over all entries
    pub total_income: f64,

    /// Sum of expense over all entries
    pub total_expense: f64,

    /// Sum of `max(0, income - expense)` per entry, derived fresh from
    /// income/expense. The stored per-entry savings field is ignored.
    pub total_savings: f64,

    /// `total_expense / total_income * 100`, rounded to 2 decimal
    /// places. 0 when total income is 0 (documented zero-income policy).
    pub debt_to_income_ratio: f64,

    /// Combined debt/savings score, clamped to 0..=100
    pub risk_score: u8,

    /// Tier label gating the loan-safety advice
    pub advice: AdviceTier,
}

impl Default for AggregateMetrics {
    fn default() -> Self {
        Self {
            total_income: 0.0,
            total_expense: 0.0,
            total_savings: 0.0,
            debt_to_income_ratio: 0.0,
            risk_score: 0,
            advice: AdviceTier::Strong,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Service Tests — RiskEngine, LedgerService, ChartService
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, NaiveDateTime};

use loan_advisor_core::errors::CoreError;
use loan_advisor_core::models::entry::{EntryDraft, EntryId, LedgerEntry};
use loan_advisor_core::models::ledger::Ledger;
use loan_advisor_core::models::metrics::AdviceTier;
use loan_advisor_core::services::chart_service::ChartService;
use loan_advisor_core::services::ledger_service::LedgerService;
use loan_advisor_core::services::risk_engine::RiskEngine;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn ts() -> NaiveDateTime {
    d(2025, 5, 1).and_hms_opt(12, 0, 0).unwrap()
}

fn entry(id: &str, income: f64, expense: f64) -> LedgerEntry {
    LedgerEntry {
        id: EntryId::new(id),
        income,
        expense,
        savings: (income - expense).max(0.0),
        date: d(2025, 4, 30),
        notes: None,
        created_at: ts(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// RiskEngine — compute_metrics
// ═══════════════════════════════════════════════════════════════════

mod risk_engine {
    use super::*;

    #[test]
    fn empty_ledger_is_all_zeros_and_strong() {
        let metrics = RiskEngine::new().compute_metrics(&[]);

        assert_eq!(metrics.total_income, 0.0);
        assert_eq!(metrics.total_expense, 0.0);
        assert_eq!(metrics.total_savings, 0.0);
        assert_eq!(metrics.debt_to_income_ratio, 0.0);
        assert_eq!(metrics.risk_score, 0);
        assert_eq!(metrics.advice, AdviceTier::Strong);
    }

    #[test]
    fn single_entry_moderate_scenario() {
        // 1000 income, 400 expense: dti 40.00, raw risk 60 - 12 = 48
        let metrics = RiskEngine::new().compute_metrics(&[entry("a", 1000.0, 400.0)]);

        assert_eq!(metrics.total_income, 1000.0);
        assert_eq!(metrics.total_expense, 400.0);
        assert_eq!(metrics.total_savings, 600.0);
        assert_eq!(metrics.debt_to_income_ratio, 40.0);
        assert_eq!(metrics.risk_score, 48);
        assert_eq!(metrics.advice, AdviceTier::Moderate);
    }

    #[test]
    fn overspending_entry_clamps_savings_and_score() {
        // 500 income, 600 expense: savings clamps to 0, dti 120.00,
        // raw risk 180 clamps to 100
        let metrics = RiskEngine::new().compute_metrics(&[entry("a", 500.0, 600.0)]);

        assert_eq!(metrics.total_savings, 0.0);
        assert_eq!(metrics.debt_to_income_ratio, 120.0);
        assert_eq!(metrics.risk_score, 100);
        assert_eq!(metrics.advice, AdviceTier::HighRisk);
    }

    #[test]
    fn zero_income_policy_keeps_ratio_at_zero() {
        // Expenses with no income: dti stays 0 by policy, so the score
        // stays 0 too. Documented behavior, not a bug.
        let metrics =
            RiskEngine::new().compute_metrics(&[entry("a", 0.0, 750.0), entry("b", 0.0, 20.0)]);

        assert_eq!(metrics.total_income, 0.0);
        assert_eq!(metrics.total_expense, 770.0);
        assert_eq!(metrics.debt_to_income_ratio, 0.0);
        assert_eq!(metrics.risk_score, 0);
        assert_eq!(metrics.advice, AdviceTier::Strong);
    }

    #[test]
    fn savings_sum_clamps_per_entry_not_in_aggregate() {
        // One overspent month does not eat into another month's savings
        let metrics =
            RiskEngine::new().compute_metrics(&[entry("a", 1000.0, 1500.0), entry("b", 1000.0, 200.0)]);

        assert_eq!(metrics.total_savings, 800.0);
    }

    #[test]
    fn stored_savings_field_is_ignored() {
        let mut lying = entry("a", 100.0, 50.0);
        lying.savings = 999_999.0;

        let metrics = RiskEngine::new().compute_metrics(&[lying]);
        assert_eq!(metrics.total_savings, 50.0);
    }

    #[test]
    fn ratio_is_rounded_to_two_decimals_score_is_not() {
        // 100/300 income: dti 33.333... displays as 33.33; the score is
        // computed from the unrounded ratio: round(50.0 - 13.33) = 37
        let metrics = RiskEngine::new().compute_metrics(&[entry("a", 300.0, 100.0)]);

        assert_eq!(metrics.debt_to_income_ratio, 33.33);
        assert_eq!(metrics.risk_score, 37);
        assert_eq!(metrics.advice, AdviceTier::Moderate);
    }

    #[test]
    fn high_savings_keeps_raw_score_below_zero_clamped_to_zero() {
        // dti 10 * 1.5 = 15, savings offset (900/1000)*20 = 18: raw -3
        let metrics = RiskEngine::new().compute_metrics(&[entry("a", 1000.0, 100.0)]);

        assert_eq!(metrics.risk_score, 0);
        assert_eq!(metrics.advice, AdviceTier::Strong);
    }

    #[test]
    fn score_stays_in_range_for_any_finite_input() {
        let engine = RiskEngine::new();
        let amounts = [0.0, 0.01, 1.0, 500.0, 1e6, 1e12];

        for income in amounts {
            for expense in amounts {
                let metrics = engine.compute_metrics(&[entry("a", income, expense)]);
                assert!(
                    metrics.risk_score <= 100,
                    "score {} out of range for income={income} expense={expense}",
                    metrics.risk_score
                );
                assert!(metrics.total_savings >= 0.0);
            }
        }
    }

    #[test]
    fn sums_over_many_entries() {
        let entries = vec![
            entry("a", 2000.0, 800.0),
            entry("b", 0.0, 150.0),
            entry("c", 500.0, 0.0),
        ];
        let metrics = RiskEngine::new().compute_metrics(&entries);

        assert_eq!(metrics.total_income, 2500.0);
        assert_eq!(metrics.total_expense, 950.0);
        // 1200 + 0 + 500; the overspent entry contributes nothing
        assert_eq!(metrics.total_savings, 1700.0);
        assert_eq!(metrics.debt_to_income_ratio, 38.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService — validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn draft_with_neither_amount_fails() {
        let draft = EntryDraft::new(d(2025, 5, 1));
        let result = LedgerService::new().validate_draft(&draft);

        match result.unwrap_err() {
            CoreError::Validation(msg) => assert!(msg.contains("income or expense")),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn income_only_is_enough() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_income(1200.0);
        assert!(LedgerService::new().validate_draft(&draft).is_ok());
    }

    #[test]
    fn expense_only_is_enough() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_expense(80.0);
        assert!(LedgerService::new().validate_draft(&draft).is_ok());
    }

    #[test]
    fn zero_amount_is_valid() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_income(0.0);
        assert!(LedgerService::new().validate_draft(&draft).is_ok());
    }

    #[test]
    fn negative_income_fails() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_income(-1.0);
        let result = LedgerService::new().validate_draft(&draft);

        match result.unwrap_err() {
            CoreError::Validation(msg) => assert!(msg.contains("income")),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn negative_expense_fails() {
        let draft = EntryDraft::new(d(2025, 5, 1))
            .with_income(100.0)
            .with_expense(-0.01);
        let result = LedgerService::new().validate_draft(&draft);

        match result.unwrap_err() {
            CoreError::Validation(msg) => assert!(msg.contains("expense")),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_amount_fails() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_income(f64::NAN);
        assert!(LedgerService::new().validate_draft(&draft).is_err());

        let draft = EntryDraft::new(d(2025, 5, 1)).with_expense(f64::INFINITY);
        assert!(LedgerService::new().validate_draft(&draft).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService — payload derivation
// ═══════════════════════════════════════════════════════════════════

mod payload {
    use super::*;

    #[test]
    fn absent_amounts_default_to_zero() {
        let draft = EntryDraft::new(d(2025, 5, 1)).with_expense(75.0);
        let payload = LedgerService::new().payload_from_draft(&draft);

        assert_eq!(payload.income, 0.0);
        assert_eq!(payload.expense, 75.0);
        assert_eq!(payload.notes, "");
    }

    #[test]
    fn savings_is_derived_from_form_values() {
        let draft = EntryDraft::new(d(2025, 5, 1))
            .with_income(1000.0)
            .with_expense(400.0);
        let payload = LedgerService::new().payload_from_draft(&draft);

        assert_eq!(payload.savings, 600.0);
    }

    #[test]
    fn savings_never_goes_negative() {
        let draft = EntryDraft::new(d(2025, 5, 1))
            .with_income(500.0)
            .with_expense(600.0);
        let payload = LedgerService::new().payload_from_draft(&draft);

        assert_eq!(payload.savings, 0.0);
    }

    #[test]
    fn notes_travel_with_the_payload() {
        let draft = EntryDraft::new(d(2025, 5, 1))
            .with_income(10.0)
            .with_notes("bonus");
        let payload = LedgerService::new().payload_from_draft(&draft);

        assert_eq!(payload.notes, "bonus");
        assert_eq!(payload.date, d(2025, 5, 1));
    }
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService — in-memory reconciliation
// ═══════════════════════════════════════════════════════════════════

mod reconciliation {
    use super::*;

    fn ledger_of(ids: &[&str]) -> Ledger {
        Ledger {
            entries: ids.iter().map(|id| entry(id, 100.0, 0.0)).collect(),
        }
    }

    #[test]
    fn prepend_puts_newest_first() {
        let svc = LedgerService::new();
        let mut ledger = ledger_of(&["old"]);

        svc.prepend(&mut ledger, entry("new", 5.0, 0.0));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries[0].id, EntryId::new("new"));
        assert_eq!(ledger.entries[1].id, EntryId::new("old"));
    }

    #[test]
    fn replace_preserves_position() {
        let svc = LedgerService::new();
        let mut ledger = ledger_of(&["a", "b", "c"]);

        let updated = entry("b", 9.0, 1.0);
        svc.replace(&mut ledger, &EntryId::new("b"), updated).unwrap();

        assert_eq!(ledger.position(&EntryId::new("b")), Some(1));
        assert_eq!(ledger.entries[1].income, 9.0);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn replace_missing_id_fails() {
        let svc = LedgerService::new();
        let mut ledger = ledger_of(&["a"]);

        let result = svc.replace(&mut ledger, &EntryId::new("ghost"), entry("ghost", 1.0, 0.0));

        match result.unwrap_err() {
            CoreError::EntryNotFound(id) => assert_eq!(id, "ghost"),
            other => panic!("Expected EntryNotFound, got {:?}", other),
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn remove_takes_exactly_one_matching_entry() {
        let svc = LedgerService::new();
        // Same date and amounts everywhere; only the id distinguishes
        let mut ledger = ledger_of(&["a", "b", "c"]);

        let removed = svc.remove(&mut ledger, &EntryId::new("b")).unwrap();

        assert_eq!(removed.id, EntryId::new("b"));
        assert_eq!(ledger.len(), 2);
        assert!(ledger.get(&EntryId::new("b")).is_none());
        assert!(ledger.get(&EntryId::new("a")).is_some());
        assert!(ledger.get(&EntryId::new("c")).is_some());
    }

    #[test]
    fn remove_missing_id_fails_without_changes() {
        let svc = LedgerService::new();
        let mut ledger = ledger_of(&["a"]);

        assert!(svc.remove(&mut ledger, &EntryId::new("ghost")).is_err());
        assert_eq!(ledger.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn breakdown_has_three_labelled_slices() {
        let metrics = RiskEngine::new().compute_metrics(&[entry("a", 1000.0, 400.0)]);
        let slices = ChartService::new().breakdown(&metrics);

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "Income");
        assert_eq!(slices[0].value, 1000.0);
        assert_eq!(slices[1].label, "Expenses");
        assert_eq!(slices[1].value, 400.0);
        assert_eq!(slices[2].label, "Savings");
        assert_eq!(slices[2].value, 600.0);
    }

    #[test]
    fn cashflow_series_follows_ledger_order() {
        let mut first = entry("a", 100.0, 10.0);
        first.date = d(2025, 5, 2);
        let mut second = entry("b", 200.0, 20.0);
        second.date = d(2025, 5, 1);

        let ledger = Ledger {
            entries: vec![first, second],
        };
        let points = ChartService::new().cashflow_series(&ledger);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, d(2025, 5, 2));
        assert_eq!(points[0].income, 100.0);
        assert_eq!(points[1].expense, 20.0);
    }

    #[test]
    fn empty_ledger_gives_empty_series() {
        let points = ChartService::new().cashflow_series(&Ledger::new());
        assert!(points.is_empty());
    }
}

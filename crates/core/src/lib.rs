pub mod clients;
pub mod errors;
pub mod models;
pub mod services;

use log::warn;

use clients::rest::RestApiClient;
use clients::traits::{LedgerStore, LoanOracle};
use errors::CoreError;
use models::chart::{BreakdownSlice, CashflowPoint};
use models::entry::{EntryDraft, EntryId, LedgerEntry};
use models::ledger::Ledger;
use models::metrics::AggregateMetrics;
use models::session::AuthToken;
use services::chart_service::ChartService;
use services::ledger_service::LedgerService;
use services::risk_engine::RiskEngine;

/// Main entry point for the Loan Advisor core library.
///
/// Owns the session's in-memory ledger, the latest aggregate metrics,
/// and the collaborator clients. The presentation layer drives the
/// mutation operations and renders the read accessors; every failure
/// comes back as a `CoreError` value rather than a panic, so it can be
/// shown inline.
///
/// Concurrency model: single mutator. Every operation takes `&mut self`
/// and runs as one request/response cycle against a collaborator, with
/// no conflict detection. When responses apply out of issue order the
/// last-applied response wins in local state; a stale update against a
/// deleted entry simply fails with `EntryNotFound` and changes nothing.
#[must_use]
pub struct FinanceTracker {
    ledger: Ledger,
    metrics: AggregateMetrics,
    /// Opaque display string from the prediction collaborator. Kept
    /// until the next prediction; never part of metric computation.
    prediction: Option<String>,
    session: Option<AuthToken>,
    store: Box<dyn LedgerStore>,
    oracle: Box<dyn LoanOracle>,
    ledger_service: LedgerService,
    risk_engine: RiskEngine,
    chart_service: ChartService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("entries", &self.ledger.len())
            .field("risk_score", &self.metrics.risk_score)
            .field("signed_in", &self.session.is_some())
            .field("store", &self.store.name())
            .finish()
    }
}

impl FinanceTracker {
    /// Build a tracker over explicit collaborator implementations.
    pub fn new(store: Box<dyn LedgerStore>, oracle: Box<dyn LoanOracle>) -> Self {
        Self {
            ledger: Ledger::new(),
            metrics: AggregateMetrics::default(),
            prediction: None,
            session: None,
            store,
            oracle,
            ledger_service: LedgerService::new(),
            risk_engine: RiskEngine::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Build a tracker wired to the REST backend at `base_url`.
    pub fn with_rest_api(base_url: impl Into<String>) -> Self {
        let client = RestApiClient::new(base_url);
        Self::new(Box::new(client.clone()), Box::new(client))
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Install the bearer credential used for subsequent collaborator
    /// calls.
    pub fn sign_in(&mut self, token: AuthToken) {
        self.session = Some(token);
    }

    /// Drop the credential. The local ledger copy stays visible until
    /// the next load.
    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// False after `sign_out` or after any operation hit an expired
    /// session. This is the presentation layer's signal to redirect to
    /// the login view.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    // ── Ledger operations ───────────────────────────────────────────

    /// Load the full ledger from the storage collaborator, replacing
    /// the local copy wholesale, then recompute metrics.
    pub async fn load_entries(&mut self) -> Result<(), CoreError> {
        let token = self.credential()?;
        let result = self.store.list_entries(&token).await;
        let entries = match result {
            Ok(entries) => entries,
            Err(e) => return Err(self.sign_out_if_expired(e)),
        };

        self.ledger.entries = entries;
        self.recompute();
        Ok(())
    }

    /// Validate and create a new entry.
    ///
    /// On success the entry is prepended to the ledger (newest-first)
    /// under the id the collaborator assigned, and metrics are
    /// recomputed. Validation failures make no collaborator call.
    pub async fn add_entry(&mut self, draft: EntryDraft) -> Result<EntryId, CoreError> {
        self.ledger_service.validate_draft(&draft)?;
        let token = self.credential()?;
        let payload = self.ledger_service.payload_from_draft(&draft);

        let result = self.store.create_entry(&token, &payload).await;
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.sign_out_if_expired(e)),
        };

        let entry = LedgerEntry {
            id: receipt.id.clone(),
            income: payload.income,
            expense: payload.expense,
            savings: payload.savings,
            date: payload.date,
            notes: draft.notes,
            created_at: receipt.created_at,
        };
        self.ledger_service.prepend(&mut self.ledger, entry);
        self.recompute();
        Ok(receipt.id)
    }

    /// Validate and update an existing entry.
    ///
    /// On success the entry is replaced in place, keeping its position
    /// and its original creation timestamp. If the collaborator reports
    /// the id missing, the local ledger is left unchanged.
    pub async fn update_entry(&mut self, id: &EntryId, draft: EntryDraft) -> Result<(), CoreError> {
        self.ledger_service.validate_draft(&draft)?;
        let token = self.credential()?;
        let payload = self.ledger_service.payload_from_draft(&draft);

        let result = self.store.update_entry(&token, id, &payload).await;
        if let Err(e) = result {
            return Err(self.sign_out_if_expired(e));
        }

        // The collaborator confirmed, but a delete may have resolved in
        // between. Last applied response wins: leave local state as is.
        let created_at = match self.ledger.get(id) {
            Some(existing) => existing.created_at,
            None => return Err(CoreError::EntryNotFound(id.to_string())),
        };

        let entry = LedgerEntry {
            id: id.clone(),
            income: payload.income,
            expense: payload.expense,
            savings: payload.savings,
            date: payload.date,
            notes: draft.notes,
            created_at,
        };
        self.ledger_service.replace(&mut self.ledger, id, entry)?;
        self.recompute();
        Ok(())
    }

    /// Delete an entry. Local removal happens only after the
    /// collaborator confirms (no optimistic removal), then metrics are
    /// recomputed.
    pub async fn remove_entry(&mut self, id: &EntryId) -> Result<(), CoreError> {
        let token = self.credential()?;

        let result = self.store.delete_entry(&token, id).await;
        if let Err(e) = result {
            return Err(self.sign_out_if_expired(e));
        }

        self.ledger_service.remove(&mut self.ledger, id)?;
        self.recompute();
        Ok(())
    }

    /// Forward the current total income and (rounded) debt-to-income
    /// ratio to the prediction collaborator. The returned string is
    /// kept for display and also returned to the caller.
    pub async fn predict_loan_safety(&mut self) -> Result<String, CoreError> {
        let token = self.credential()?;

        let result = self
            .oracle
            .predict_loan_safety(
                &token,
                self.metrics.total_income,
                self.metrics.debt_to_income_ratio,
            )
            .await;
        let prediction = match result {
            Ok(prediction) => prediction,
            Err(e) => return Err(self.sign_out_if_expired(e)),
        };

        self.prediction = Some(prediction.clone());
        Ok(prediction)
    }

    // ── Read accessors ──────────────────────────────────────────────

    /// All entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.ledger.entries
    }

    /// Look up a single entry by its id.
    #[must_use]
    pub fn entry(&self, id: &EntryId) -> Option<&LedgerEntry> {
        self.ledger.get(id)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.ledger.len()
    }

    /// The metrics derived from the current ledger. Always in sync:
    /// every mutation recomputes before returning.
    #[must_use]
    pub fn metrics(&self) -> &AggregateMetrics {
        &self.metrics
    }

    /// The last loan-safety prediction, if one was requested.
    #[must_use]
    pub fn prediction(&self) -> Option<&str> {
        self.prediction.as_deref()
    }

    /// Income/Expenses/Savings slices for the breakdown pie.
    #[must_use]
    pub fn breakdown(&self) -> Vec<BreakdownSlice> {
        self.chart_service.breakdown(&self.metrics)
    }

    /// Per-entry cashflow points for the line chart.
    #[must_use]
    pub fn cashflow_series(&self) -> Vec<CashflowPoint> {
        self.chart_service.cashflow_series(&self.ledger)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn credential(&self) -> Result<AuthToken, CoreError> {
        self.session.clone().ok_or(CoreError::SessionExpired)
    }

    /// Clear the stored credential when a collaborator rejects it, so
    /// `is_signed_in()` reflects the forced end of the session.
    fn sign_out_if_expired(&mut self, err: CoreError) -> CoreError {
        if matches!(err, CoreError::SessionExpired) {
            warn!("session credential rejected, ending session");
            self.session = None;
        }
        err
    }

    /// Synchronous metrics refresh; runs after every mutation.
    fn recompute(&mut self) {
        self.metrics = self.risk_engine.compute_metrics(&self.ledger.entries);
    }
}

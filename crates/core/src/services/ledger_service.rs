use crate::errors::CoreError;
use crate::models::entry::{EntryDraft, EntryId, EntryPayload, LedgerEntry};
use crate::models::ledger::Ledger;

/// Local ledger reconciliation: form validation and ordered in-memory
/// edits.
///
/// Pure business logic, no I/O, no API calls. The facade talks to the
/// storage collaborator first and applies the confirmed outcome here.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate form input. Runs before any collaborator call; a
    /// failure here means no network round-trip happens at all.
    ///
    /// Rules:
    /// - at least one of income/expense must be filled in
    /// - filled-in amounts must be finite and non-negative
    pub fn validate_draft(&self, draft: &EntryDraft) -> Result<(), CoreError> {
        if draft.income.is_none() && draft.expense.is_none() {
            return Err(CoreError::Validation(
                "At least one of income or expense is required".into(),
            ));
        }

        for (field, amount) in [("income", draft.income), ("expense", draft.expense)] {
            if let Some(amount) = amount {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "{field} must be a non-negative amount, got {amount}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the record the storage collaborator accepts.
    ///
    /// Absent amounts default to 0; savings is derived exactly once,
    /// from these form values, and travels with the entry from here on.
    #[must_use]
    pub fn payload_from_draft(&self, draft: &EntryDraft) -> EntryPayload {
        let income = draft.income.unwrap_or(0.0);
        let expense = draft.expense.unwrap_or(0.0);
        EntryPayload {
            income,
            expense,
            savings: (income - expense).max(0.0),
            date: draft.date,
            notes: draft.notes.clone().unwrap_or_default(),
        }
    }

    /// Newly created entries go to the front: the ledger is newest-first.
    pub fn prepend(&self, ledger: &mut Ledger, entry: LedgerEntry) {
        ledger.entries.insert(0, entry);
    }

    /// Replace the entry matching `id` in place, preserving its position
    /// in the ordered sequence.
    pub fn replace(
        &self,
        ledger: &mut Ledger,
        id: &EntryId,
        entry: LedgerEntry,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .position(id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        ledger.entries[idx] = entry;
        Ok(())
    }

    /// Remove exactly the entry matching `id`, returning it.
    pub fn remove(&self, ledger: &mut Ledger, id: &EntryId) -> Result<LedgerEntry, CoreError> {
        let idx = ledger
            .position(id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        Ok(ledger.entries.remove(idx))
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::CoreError;
use crate::models::entry::{EntryId, EntryPayload, LedgerEntry};
use crate::models::session::AuthToken;

/// Receipt for a successful create: the id the storage collaborator
/// assigned, and when the entry was persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReceipt {
    pub id: EntryId,
    pub created_at: NaiveDateTime,
}

/// Receipt for a successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReceipt {
    pub updated_at: NaiveDateTime,
}

/// Trait abstraction for the remote ledger storage collaborator.
///
/// The REST backend implements this over HTTP; tests swap in mocks.
/// The credential is passed explicitly into every call; no ambient
/// session state exists below the facade.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LedgerStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the user's full ledger, newest-first.
    async fn list_entries(&self, token: &AuthToken) -> Result<Vec<LedgerEntry>, CoreError>;

    /// Persist a new entry; the collaborator assigns the id.
    async fn create_entry(
        &self,
        token: &AuthToken,
        payload: &EntryPayload,
    ) -> Result<CreateReceipt, CoreError>;

    /// Overwrite the entry matching `id`. Fails with `EntryNotFound`
    /// when the collaborator no longer has it.
    async fn update_entry(
        &self,
        token: &AuthToken,
        id: &EntryId,
        payload: &EntryPayload,
    ) -> Result<UpdateReceipt, CoreError>;

    /// Remove the entry matching `id` from durable storage.
    async fn delete_entry(&self, token: &AuthToken, id: &EntryId) -> Result<(), CoreError>;
}

/// Trait abstraction for the loan-safety prediction collaborator.
///
/// The result is an opaque display string. It is shown to the user as
/// is and never fed back into local computation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LoanOracle: Send + Sync {
    /// Human-readable name of this oracle (for logs/errors).
    fn name(&self) -> &str;

    async fn predict_loan_safety(
        &self,
        token: &AuthToken,
        total_income: f64,
        debt_to_income_ratio: f64,
    ) -> Result<String, CoreError>;
}

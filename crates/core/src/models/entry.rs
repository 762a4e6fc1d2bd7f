use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a ledger entry.
///
/// Assigned by the storage collaborator on creation (the backend uses
/// ObjectId strings). The core never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One financial record in the ledger.
///
/// **Important**: `savings` is derived once at submission time from the
/// form values and stored alongside the entry. It is display data only;
/// aggregate metrics always re-derive savings from income and expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier, assigned by the storage collaborator
    #[serde(rename = "_id")]
    pub id: EntryId,

    /// Money received, non-negative (default 0)
    #[serde(default)]
    pub income: f64,

    /// Money spent, non-negative (default 0)
    #[serde(default)]
    pub expense: f64,

    /// `max(0, income - expense)` as of submission time
    #[serde(default)]
    pub savings: f64,

    /// Date of the record (no time component; not required to be unique)
    pub date: NaiveDate,

    /// Optional free-text annotation
    #[serde(default)]
    pub notes: Option<String>,

    /// Set by the storage collaborator when the entry was persisted
    pub created_at: NaiveDateTime,
}

/// Form input for creating or updating an entry.
///
/// The date is always required; at least one of `income`/`expense` must
/// be filled in. Validation happens locally, before any collaborator
/// call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl EntryDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            income: None,
            expense: None,
            date,
            notes: None,
        }
    }

    /// Convenience setters for building drafts in form-fill order
    #[must_use]
    pub fn with_income(mut self, amount: f64) -> Self {
        self.income = Some(amount);
        self
    }

    #[must_use]
    pub fn with_expense(mut self, amount: f64) -> Self {
        self.expense = Some(amount);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// The record shape the storage collaborator accepts for create/update.
///
/// Absent form amounts are defaulted to 0 and `savings` is derived from
/// the form values, so the durable copy matches what the user submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPayload {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
    pub date: NaiveDate,
    pub notes: String,
}

use serde::{Deserialize, Serialize};

use super::entry::{EntryId, LedgerEntry};

/// The session's in-memory copy of the user's financial records,
/// newest-first.
///
/// The storage collaborator owns the durable copy. This ledger is
/// replaced wholesale on load and reconciled entry-by-entry after each
/// confirmed mutation; it is owned exclusively by the current view
/// session, so no locking is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All entries, newest first
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its id.
    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Position of the entry matching `id` in the ordered sequence.
    #[must_use]
    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}

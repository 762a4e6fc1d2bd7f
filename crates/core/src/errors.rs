use thiserror::Error;

/// Unified error type for the entire loan-advisor-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Errors are caught at the operation boundary and rendered inline by
/// the presentation layer; none are fatal to the session except
/// `SessionExpired`, which forcibly ends it.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation (no network round-trip) ────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    // ── Session / auth ──────────────────────────────────────────────
    #[error("Session expired, please sign in again")]
    SessionExpired,

    // ── Storage collaborator ────────────────────────────────────────
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("API error ({endpoint}): {message}")]
    Api { endpoint: String, message: String },

    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // credential can never leak through an error string. reqwest
        // errors often contain full request URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

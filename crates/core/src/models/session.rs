/// Opaque bearer credential issued by the auth collaborator.
///
/// The core never inspects or parses the token; it only forwards it in
/// the Authorization header of every collaborator call. Passed
/// explicitly into each call rather than read from ambient state, so
/// there is exactly one place a session can live: the facade.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for building the Authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Credentials must never end up in logs via {:?}
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(<redacted>)")
    }
}

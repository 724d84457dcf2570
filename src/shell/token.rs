//! One-time delimiters separating script output from the variable dump.

use std::fmt;

use uuid::Uuid;

/// Marker line printed between untrusted script output and the dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Wraps `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh correlation tokens.
///
/// Tests inject a fixed source so fake shells can echo the token back.
pub trait TokenSource {
    /// Returns a token not used before.
    fn next_token(&self) -> CorrelationToken;
}

/// Production token source producing random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&self) -> CorrelationToken {
        CorrelationToken(Uuid::new_v4().to_string())
    }
}

//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Maximum accepted length of a client supplied session key.
const MAX_SESSION_KEY_LEN: usize = 128;

/// Opaque identity of one conversation.
///
/// Keys are supplied by the caller (a browser tab, a chat id) and are
/// never interpreted beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a new SessionKey, returning error if empty or oversized.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_key"));
        }
        if trimmed.len() > MAX_SESSION_KEY_LEN {
            return Err(ValidationError::too_long(
                "session_key",
                MAX_SESSION_KEY_LEN,
                trimmed.len(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Creates a fresh random key for callers that did not bring one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_accepts_opaque_strings() {
        let key = SessionKey::new("s1").unwrap();
        assert_eq!(key.as_str(), "s1");
        assert_eq!(key.to_string(), "s1");
    }

    #[test]
    fn session_key_trims_whitespace() {
        let key = SessionKey::new("  tab-42 ").unwrap();
        assert_eq!(key.as_str(), "tab-42");
    }

    #[test]
    fn session_key_rejects_empty() {
        assert_eq!(
            SessionKey::new("   "),
            Err(ValidationError::empty_field("session_key"))
        );
    }

    #[test]
    fn session_key_rejects_oversized() {
        let long = "k".repeat(MAX_SESSION_KEY_LEN + 1);
        assert!(matches!(
            SessionKey::new(long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(SessionKey::generate(), SessionKey::generate());
    }

    #[test]
    fn session_key_serializes_transparently() {
        let key = SessionKey::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
    }
}

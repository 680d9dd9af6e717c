//! Redaction wrapper for secret values.
//!
//! Pre-shared keys (VPN site keys, connection shared keys) must never appear
//! in logs, human output, or serialized result objects. This type displays
//! `[REDACTED]` everywhere; the actual value is only reachable through
//! `expose()`, which the gateways call when assembling a wire body.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A string wrapper that prevents the value from being logged or printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive {
    value: String,
}

impl Sensitive {
    /// Create a new sensitive string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Expose the underlying value.
    ///
    /// Only call this at the point the secret actually has to leave the
    /// process, such as when building a request body.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consume and return the underlying value.
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<String> for Sensitive {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensitive([REDACTED])")
    }
}

// Result objects are user-facing: secrets serialize redacted. The management
// API never echoes keys back, so nothing is lost feeding such an object into
// a later command via --in-file.
impl Serialize for Sensitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for Sensitive {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(String::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_redacted() {
        let key = Sensitive::new("hunter2");
        assert_eq!(format!("{}", key), "[REDACTED]");
        assert_eq!(format!("{:?}", key), "Sensitive([REDACTED])");
    }

    #[test]
    fn test_expose_returns_value() {
        let key = Sensitive::new("hunter2");
        assert_eq!(key.expose(), "hunter2");
        assert_eq!(key.into_inner(), "hunter2");
    }

    #[test]
    fn test_serialize_is_redacted() {
        let key = Sensitive::new("hunter2");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"[REDACTED]\"");
    }
}

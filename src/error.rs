//! Error types for vwanctl.
//!
//! This module defines the error types used throughout vwanctl, providing
//! rich error information for debugging and operator feedback.

use thiserror::Error;

/// Result type alias for vwanctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for vwanctl.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Identity Errors
    // ========================================================================
    /// A resource-ID string did not match the expected segment structure.
    #[error("Malformed resource id '{id}': {reason}")]
    MalformedResourceId {
        /// The offending resource-ID string
        id: String,
        /// What was wrong with it
        reason: String,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// The remote API reported no such resource.
    #[error("{resource_type} '{name}' was not found")]
    NotFound {
        /// Resource type, e.g. "Virtual hub"
        resource_type: String,
        /// Resource name
        name: String,
    },

    /// The parent of a nested resource could not be found.
    #[error("The parent {resource_type} '{name}' could not be found")]
    ParentNotFound {
        /// Parent resource type, e.g. "virtual hub"
        resource_type: String,
        /// Parent resource name
        name: String,
    },

    /// A nested child was absent from its parent's embedded list.
    #[error("The {child_type} '{name}' could not be found in '{parent}'")]
    ChildNotFound {
        /// Child type, e.g. "hub virtual network connection"
        child_type: String,
        /// Child name that was looked up (case-insensitively)
        name: String,
        /// Parent resource name
        parent: String,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// An IP address string failed to parse as an IPv4/IPv6 literal.
    #[error("The IP address '{0}' is invalid")]
    InvalidIpAddress(String),

    /// A required weak reference (e.g. the Virtual WAN) could not be resolved.
    #[error("Required reference could not be resolved: {0}")]
    MissingRequiredReference(String),

    /// A parameter value failed validation.
    #[error("Invalid value for '{name}': {message}")]
    InvalidParameter {
        /// Parameter name as the operator typed it
        name: String,
        /// What was wrong with it
        message: String,
    },

    /// A tag key or pair failed tag-codec validation.
    #[error("Invalid tag '{key}': {message}")]
    InvalidTag {
        /// The offending tag key
        key: String,
        /// What was wrong with it
        message: String,
    },

    // ========================================================================
    // Remote API Errors
    // ========================================================================
    /// The management endpoint rejected our credentials.
    #[error("Authentication against the management endpoint failed: {message}")]
    AuthenticationFailed {
        /// Server-reported detail
        message: String,
    },

    /// The remote API returned a non-success status (opaque passthrough).
    #[error("The management API returned {status}: {message}")]
    RemoteApi {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body, or the raw body
        message: String,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ========================================================================
    // Ambient Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operator declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new malformed-resource-id error.
    pub fn malformed_resource_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResourceId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Creates a new parent-not-found error.
    pub fn parent_not_found(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ParentNotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Creates a new child-not-found error.
    pub fn child_not_found(
        child_type: impl Into<String>,
        name: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self::ChildNotFound {
            child_type: child_type.into(),
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Creates a new invalid-parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid-tag error.
    pub fn invalid_tag(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTag {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new HTTP error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new HTTP error with source.
    pub fn http_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Http {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the error means the resource simply is not there,
    /// as opposed to the request itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::ParentNotFound { .. } | Error::ChildNotFound { .. }
        )
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MalformedResourceId { .. }
            | Error::InvalidIpAddress(_)
            | Error::MissingRequiredReference(_)
            | Error::InvalidParameter { .. }
            | Error::InvalidTag { .. } => 2,
            Error::NotFound { .. } | Error::ParentNotFound { .. } | Error::ChildNotFound { .. } => {
                3
            }
            Error::AuthenticationFailed { .. } => 4,
            Error::RemoteApi { .. } | Error::Http { .. } => 5,
            Error::Cancelled => 6,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Http {
                message: format!(
                    "request to '{}' timed out",
                    err.url().map(|u| u.as_str()).unwrap_or("unknown")
                ),
                source: Some(Box::new(err)),
            }
        } else if err.is_connect() {
            Error::Http {
                message: format!(
                    "failed to connect to '{}'",
                    err.url()
                        .and_then(|u| u.host_str())
                        .unwrap_or("unknown host")
                ),
                source: Some(Box::new(err)),
            }
        } else {
            Error::Http {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed_resource_id("/foo", "missing '/subscriptions/' prefix");
        let msg = err.to_string();
        assert!(msg.contains("/foo"));
        assert!(msg.contains("missing '/subscriptions/' prefix"));
    }

    #[test]
    fn test_child_not_found_display() {
        let err = Error::child_not_found("hub virtual network connection", "conn1", "hub1");
        assert_eq!(
            err.to_string(),
            "The hub virtual network connection 'conn1' could not be found in 'hub1'"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::InvalidIpAddress("999.1.1.1".into()).exit_code(), 2);
        assert_eq!(Error::not_found("Virtual hub", "hub1").exit_code(), 3);
        assert_eq!(
            Error::AuthenticationFailed {
                message: "expired token".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            Error::RemoteApi {
                status: 409,
                message: "conflict".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(Error::Cancelled.exit_code(), 6);
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("VPN site", "site1").is_not_found());
        assert!(Error::parent_not_found("virtual hub", "hub1").is_not_found());
        assert!(!Error::Cancelled.is_not_found());
    }
}

//! Reconciliation error types

use crate::identity::IdParseError;
use crate::operation::OperationKind;
use crate::validation::Violations;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by the remote API, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP-like status code, when the transport exposes one
    pub status: Option<u16>,

    /// Machine-readable error code (e.g. "ResourceNotFound")
    pub code: String,

    /// Human-readable detail
    pub message: String,
}

impl RemoteError {
    pub fn new(status: Option<u16>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Some(404), "ResourceNotFound", message)
    }

    /// Whether the remote reported that the addressed resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Reconciliation errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error(transparent)]
    Parse(#[from] IdParseError),

    #[error("invalid configuration for {resource}: {violations}")]
    Validation {
        resource: String,
        violations: Violations,
    },

    #[error("cannot encode `{attribute}` ({value:?}): {reason}")]
    Encode {
        attribute: String,
        value: String,
        reason: String,
    },

    #[error(
        "a resource with the ID {id:?} already exists - it must be imported into the state to be managed as `{resource_type}`"
    )]
    AlreadyExists { resource_type: String, id: String },

    #[error("{operation} of {resource} failed: {source}")]
    Remote {
        operation: OperationKind,
        resource: String,
        #[source]
        source: RemoteError,
    },

    #[error("{operation} of {resource} did not complete within {timeout:?}")]
    DeadlineExceeded {
        operation: OperationKind,
        resource: String,
        timeout: Duration,
    },

    #[error("remote API returned no ID for {0}")]
    MissingRemoteId(String),

    #[error("attribute `{name}`: {reason}")]
    Attribute { name: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    pub(crate) fn attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Remote failures and deadlines may succeed on a later attempt; local
    /// parse, validation and encode errors always recur.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::DeadlineExceeded { .. })
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::new(Some(409), "Conflict", "operation in progress");
        assert_eq!(err.to_string(), "Conflict (status 409): operation in progress");

        let err = RemoteError::new(None, "InternalServerError", "boom");
        assert_eq!(err.to_string(), "InternalServerError: boom");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(RemoteError::not_found("gone").is_not_found());
        assert!(!RemoteError::new(Some(500), "Internal", "x").is_not_found());
        assert!(!RemoteError::new(None, "ResourceNotFound", "no status").is_not_found());
    }

    #[test]
    fn test_retryable_classification() {
        let remote = CloudError::Remote {
            operation: OperationKind::Create,
            resource: "server".into(),
            source: RemoteError::new(Some(500), "Internal", "x"),
        };
        assert!(remote.is_retryable());

        let deadline = CloudError::DeadlineExceeded {
            operation: OperationKind::Delete,
            resource: "server".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(deadline.is_retryable());

        let encode = CloudError::Encode {
            attribute: "sku_name".into(),
            value: "GP_4".into(),
            reason: "wrong number of parts".into(),
        };
        assert!(!encode.is_retryable());
    }
}

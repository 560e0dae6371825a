//! Error taxonomy
//!
//! `RequestError` covers everything that can go wrong once a request leaves
//! the client. `SyncError` adds the failures the controller raises before a
//! request is ever issued.

use std::time::Duration;

use thiserror::Error;

use crate::domain::FieldErrors;

/// Common result type for controller operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of a single remote call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Network unreachable, connection reset, CORS rejection...
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// Non-2xx response
    #[error("server responded with {status}: {body}")]
    Server { status: u16, body: String },
    /// 2xx response whose body could not be decoded
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl RequestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RequestError::Server { status: 404, .. })
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RequestError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return RequestError::Server {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        RequestError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}

/// Errors surfaced by [`crate::CollectionController`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Rejected client-side, no request was issued
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Request(#[from] RequestError),
    /// A mutation is already in flight for this collection
    #[error("another submission is still in progress")]
    Busy,
    #[error("no item is being edited")]
    NotEditing,
    #[error("item {found} is not the item being edited ({expected})")]
    IdentifierMismatch { expected: String, found: String },
    #[error("item has no identifier")]
    MissingIdentifier,
    /// A create draft must not name an existing item
    #[error("new item already carries identifier {0}")]
    UnexpectedIdentifier(String),
}

/// Tri-state classification of a failed mutation (success is `Ok`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ValidationRejected,
    TransportFailed,
    /// The controller refused the call in its current state
    Precondition,
}

impl SyncError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SyncError::Validation(_) => FailureKind::ValidationRejected,
            SyncError::Request(_) => FailureKind::TransportFailed,
            SyncError::Busy
            | SyncError::NotEditing
            | SyncError::IdentifierMismatch { .. }
            | SyncError::MissingIdentifier
            | SyncError::UnexpectedIdentifier(_) => FailureKind::Precondition,
        }
    }

    /// Whether the user may repeat the action once the remote side answers
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Request(_) | SyncError::Busy)
    }

    /// The server understood the request and refused it (4xx)
    pub fn is_rejected_by_server(&self) -> bool {
        matches!(
            self,
            SyncError::Request(RequestError::Server { status, .. }) if (400..500).contains(status)
        )
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SyncError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Invalid API configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
    #[error("invalid API base URL {0:?}: expected http:// or https://")]
    InvalidBaseUrl(String),
    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            SyncError::Validation(FieldErrors::default()).kind(),
            FailureKind::ValidationRejected
        );
        assert_eq!(
            SyncError::from(RequestError::Timeout(Duration::from_secs(1))).kind(),
            FailureKind::TransportFailed
        );
        assert_eq!(SyncError::NotEditing.kind(), FailureKind::Precondition);
    }

    #[test]
    fn test_retryable() {
        let server = |status| SyncError::from(RequestError::Server { status, body: String::new() });
        assert!(server(503).is_retryable());
        assert!(server(409).is_retryable());
        assert!(server(409).is_rejected_by_server());
        assert!(!server(503).is_rejected_by_server());
        assert!(SyncError::from(RequestError::Transport("reset".into())).is_retryable());
        assert!(!SyncError::Validation(FieldErrors::default()).is_retryable());
        assert!(!SyncError::NotEditing.is_retryable());
    }

    #[test]
    fn test_field_errors_only_for_validation() {
        let mut errors = FieldErrors::default();
        errors.push("name", "Category name is required");
        let err = SyncError::Validation(errors.clone());
        assert_eq!(err.field_errors(), Some(&errors));
        assert_eq!(SyncError::Busy.field_errors(), None);
    }

    #[test]
    fn test_timeout_message() {
        let err = RequestError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "request timed out after 1500ms");
    }
}

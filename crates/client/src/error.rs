//! Client-side error taxonomy.
//!
//! Domain failures (validation, insufficient stock) are raised locally and
//! never reach the wire. Remote rejections and transport failures stay
//! distinct so callers can tell "the service refused this" from "the service
//! was unreachable".

use thiserror::Error;

use stockfront_core::DomainError;

/// Result type used across the client layer.
pub type ClientResult<T> = Result<T, ClientError>;

/// Stock service operation error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local domain failure, raised before any request is constructed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The entity id is absent server-side.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The server was reachable and rejected the request.
    #[error("remote service error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The server was unreachable, timed out, or returned a malformed body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The caller aborted the in-flight operation.
    #[error("operation canceled")]
    Canceled,
}

impl ClientError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // Connect failures, timeouts and body decode failures are all
        // transport-level: the service never rejected anything.
        Self::Transport(err.to_string())
    }
}

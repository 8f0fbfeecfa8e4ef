//! Error types for client invocations.

use thiserror::Error;

/// Errors produced by a client invocation.
///
/// Decorators are pass-through by default: whatever the terminal client
/// returns must reach the caller unchanged. The derives on this type
/// (`Clone`, `PartialEq`) exist so that callers and tests can assert that
/// pass-through directly on the error value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Request failed validation at construction time
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The call context was cancelled before the call completed
    #[error("Call cancelled")]
    Cancelled,

    /// The call context's deadline passed before the call completed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Connectivity failure between client and remote endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote side reported an application-level failure
    #[error("Remote error: {0}")]
    Remote(String),

    /// No process-wide default client has been configured
    #[error("No default client configured - call set_default() first")]
    NoDefaultClient,
}

//! Application-level errors

use domain::{DomainError, LookupKind};
use thiserror::Error;

/// Errors surfaced to callers of the weather gateway
///
/// The `Display` output is the text meant for the user: a `Lookup` error
/// renders as its bare message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicationError {
    /// Domain-level error (bad input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The network call produced no response at all
    #[error("Network error: {0}")]
    Transport(String),

    /// The service answered but reported the request as unsuccessful
    #[error("{0}")]
    Lookup(String),

    /// The service answered successfully but the body did not match the contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Lookup failure with the service's own message, or the kind's default
    #[must_use]
    pub fn lookup(kind: LookupKind, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| kind.not_found_message().to_owned());
        Self::Lookup(message)
    }

    /// Whether the failure happened before any response was received
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

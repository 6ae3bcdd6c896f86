use std::fmt;

use tessera_core::CoreError;

/// The external read-only collaborators the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    CredentialStore,
    IssuerRegistry,
    RuleStore,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialStore => write!(f, "credential store"),
            Self::IssuerRegistry => write!(f, "issuer registry"),
            Self::RuleStore => write!(f, "composition rule store"),
        }
    }
}

/// A failed read from a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{collaborator} unavailable: {reason}")]
pub struct SourceError {
    pub collaborator: Collaborator,
    pub reason: String,
}

impl SourceError {
    pub fn new(collaborator: Collaborator, reason: impl Into<String>) -> Self {
        Self {
            collaborator,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by a verification call. Everything else is reported
/// inside the verification report.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error(transparent)]
    CollaboratorUnavailable(#[from] SourceError),
}

/// Errors from mutating or loading the in-memory store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential not found: {0}")]
    CredentialNotFound(String),

    #[error("issuer not found: {0}")]
    IssuerNotFound(String),

    #[error("dataset error: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

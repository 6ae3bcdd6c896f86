use crate::status::{CredentialEvent, CredentialStatus};

/// Core protocol errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid status transition from {from} on {event:?}")]
    InvalidStatusTransition {
        from: CredentialStatus,
        event: CredentialEvent,
    },

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("invalid composition rule: {0}")]
    InvalidRule(String),
}

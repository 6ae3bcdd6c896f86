use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Lifecycle status of an issued credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStatus {
    /// Credential is in force.
    Active,
    /// Credential has been permanently revoked. Final state.
    Revoked,
}

impl CredentialStatus {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Revoked)
    }

    /// Apply a lifecycle event, returning the new status.
    ///
    /// Valid transitions:
    /// - Active → Revoked (Revoke)
    pub fn transition(self, event: CredentialEvent) -> Result<CredentialStatus, CoreError> {
        let next = match (self, event) {
            (Self::Active, CredentialEvent::Revoke) => Self::Revoked,
            _ => {
                return Err(CoreError::InvalidStatusTransition { from: self, event });
            }
        };

        tracing::debug!(from = %self, to = %next, event = ?event, "credential status transition");

        Ok(next)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(self, event: CredentialEvent) -> bool {
        self.transition(event).is_ok()
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// Events that change a credential's status. Issued by external actors only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialEvent {
    /// Issuer permanently revokes the credential.
    Revoke,
}

/// Trust-registry status of an issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuerStatus {
    /// Issuer is currently authorized.
    Active,
    /// Issuer is temporarily barred from issuing.
    Suspended,
    /// Issuer has been removed from the registry.
    Revoked,
}

impl IssuerStatus {
    /// Only `Active` counts as authorized.
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for IssuerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

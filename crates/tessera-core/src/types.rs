use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::CoreError;
use crate::status::{CredentialStatus, IssuerStatus};

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// A claim issued to one identity by one issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Opaque stable identifier.
    pub id: String,
    /// Identifies the claim's definition.
    pub credential_type_id: String,
    /// Identifier of the issuing authority.
    pub issuer_address: String,
    /// Identifier of the holding identity.
    pub recipient_address: String,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// Classification tag (e.g. "education", "certification").
    pub category: String,
    /// Classification tag (e.g. "basic", "expert").
    pub tier: String,
    /// Expiry time. `None` means the credential never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_uri: Option<String>,
}

impl Credential {
    /// Create an active, non-expiring credential without evidence.
    pub fn new(
        id: impl Into<String>,
        credential_type_id: impl Into<String>,
        issuer_address: impl Into<String>,
        recipient_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            credential_type_id: credential_type_id.into(),
            issuer_address: issuer_address.into(),
            recipient_address: recipient_address.into(),
            status: CredentialStatus::Active,
            category: String::new(),
            tier: String::new(),
            expires_at: None,
            evidence_hash: None,
            evidence_uri: None,
        }
    }

    /// Set the classification tags.
    pub fn with_classification(mut self, category: impl Into<String>, tier: impl Into<String>) -> Self {
        self.category = category.into();
        self.tier = tier.into();
        self
    }

    /// Set the expiry time.
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: CredentialStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach evidence references.
    pub fn with_evidence(mut self, hash: impl Into<String>, uri: impl Into<String>) -> Self {
        self.evidence_hash = Some(hash.into());
        self.evidence_uri = Some(uri.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == CredentialStatus::Active
    }
}

/// A trust-registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    /// Unique issuer identifier.
    pub address: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registry status.
    pub status: IssuerStatus,
}

impl Issuer {
    /// Create an issuer record with the given status.
    pub fn new(address: impl Into<String>, status: IssuerStatus) -> Self {
        Self {
            address: address.into(),
            name: None,
            status,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({}, {})", name, self.address, self.status),
            None => write!(f, "{} ({})", self.address, self.status),
        }
    }
}

/// Declares that a composite credential type requires a fixed set of
/// component credential types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRule {
    /// The credential type this rule governs.
    pub composite_credential_type_id: String,
    /// Component types that must be held, in declaration order.
    pub required_credential_type_ids: Vec<String>,
    /// Issuer that authored the rule.
    pub defined_by: String,
}

impl CompositionRule {
    pub fn new(
        composite_credential_type_id: impl Into<String>,
        required_credential_type_ids: Vec<String>,
        defined_by: impl Into<String>,
    ) -> Self {
        Self {
            composite_credential_type_id: composite_credential_type_id.into(),
            required_credential_type_ids,
            defined_by: defined_by.into(),
        }
    }

    /// Check the rule is well-formed: non-empty composite type, at least one
    /// required type, and no repeated required type.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.composite_credential_type_id.is_empty() {
            return Err(CoreError::InvalidRule(
                "composite credential type id is empty".into(),
            ));
        }
        if self.required_credential_type_ids.is_empty() {
            return Err(CoreError::InvalidRule(format!(
                "rule for {} requires no credential types",
                self.composite_credential_type_id
            )));
        }
        let mut seen = HashSet::new();
        for type_id in &self.required_credential_type_ids {
            if !seen.insert(type_id.as_str()) {
                return Err(CoreError::InvalidRule(format!(
                    "rule for {} lists {} more than once",
                    self.composite_credential_type_id, type_id
                )));
            }
        }
        Ok(())
    }
}

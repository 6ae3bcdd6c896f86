use serde::{Deserialize, Serialize};

use tessera_core::{CompositionRule, Credential, Issuer};

use crate::error::SourceError;

/// Read-only supplier of credential records by recipient.
pub trait CredentialSource: Send + Sync {
    /// Every credential whose recipient is `recipient`, in a stable order.
    fn credentials_for(&self, recipient: &str) -> Result<Vec<Credential>, SourceError>;
}

/// Read-only supplier of issuer trust records.
pub trait IssuerSource: Send + Sync {
    fn issuers(&self) -> Result<Vec<Issuer>, SourceError>;
}

/// Read-only supplier of composition rules.
pub trait RuleSource: Send + Sync {
    fn rules(&self) -> Result<Vec<CompositionRule>, SourceError>;
}

/// The three collaborators a verification reads from.
#[derive(Clone, Copy)]
pub struct Sources<'s> {
    pub credentials: &'s dyn CredentialSource,
    pub issuers: &'s dyn IssuerSource,
    pub rules: &'s dyn RuleSource,
}

impl<'s> Sources<'s> {
    pub fn new(
        credentials: &'s dyn CredentialSource,
        issuers: &'s dyn IssuerSource,
        rules: &'s dyn RuleSource,
    ) -> Self {
        Self {
            credentials,
            issuers,
            rules,
        }
    }

    /// Use a single backend for all three collaborators.
    pub fn from_backend<B>(backend: &'s B) -> Self
    where
        B: CredentialSource + IssuerSource + RuleSource,
    {
        Self::new(backend, backend, backend)
    }

    /// Read one identity's credentials, the issuer registry, and the rules,
    /// in that order. The first failing read aborts the fetch.
    pub fn snapshot(&self, identity: &str) -> Result<Snapshot, SourceError> {
        let credentials = self.credentials.credentials_for(identity)?;
        let issuers = self.issuers.issuers()?;
        let rules = self.rules.rules()?;

        tracing::debug!(
            identity,
            credentials = credentials.len(),
            issuers = issuers.len(),
            rules = rules.len(),
            "collaborator snapshot fetched"
        );

        Ok(Snapshot {
            credentials,
            issuers,
            rules,
        })
    }
}

/// Read-only inputs for one verification call.
///
/// `credentials` are the identity's own credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub issuers: Vec<Issuer>,
    #[serde(default)]
    pub rules: Vec<CompositionRule>,
}

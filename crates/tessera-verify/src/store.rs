use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use tessera_core::{
    CompositionRule, Credential, CredentialEvent, CredentialStatus, Issuer, IssuerStatus,
};

use crate::error::{SourceError, StoreError};
use crate::source::{CredentialSource, IssuerSource, RuleSource};

/// Serialized contents of a [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub issuers: Vec<Issuer>,
    #[serde(default)]
    pub rules: Vec<CompositionRule>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// In-memory credential store, issuer registry, and rule store.
pub struct MemoryStore {
    /// Recipient address → credentials in insertion order.
    credentials: DashMap<String, Vec<Credential>>,
    /// Issuer address → issuer record.
    issuers: DashMap<String, Issuer>,
    /// Composite credential type → rule.
    rules: DashMap<String, CompositionRule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            credentials: DashMap::new(),
            issuers: DashMap::new(),
            rules: DashMap::new(),
        }
    }

    /// Build a store from a dataset. Rules are validated on the way in.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let store = Self::new();
        for issuer in dataset.issuers {
            store.upsert_issuer(issuer);
        }
        for rule in dataset.rules {
            store.register_rule(rule)?;
        }
        for credential in dataset.credentials {
            store.insert_credential(credential);
        }
        tracing::info!(
            credentials = store.credential_count(),
            issuers = store.issuer_count(),
            rules = store.rule_count(),
            "dataset loaded"
        );
        Ok(store)
    }

    /// Export the current contents in deterministic order.
    pub fn to_dataset(&self) -> Dataset {
        let mut recipients: Vec<String> = self.credentials.iter().map(|e| e.key().clone()).collect();
        recipients.sort();
        let credentials = recipients
            .iter()
            .flat_map(|r| self.list_credentials(r))
            .collect();
        Dataset {
            credentials,
            issuers: self.list_issuers(),
            rules: self.list_rules(),
        }
    }

    // --- Credentials ---

    /// Record an issued credential under its recipient.
    pub fn insert_credential(&self, credential: Credential) {
        tracing::debug!(
            credential_id = %credential.id,
            recipient = %credential.recipient_address,
            "credential stored"
        );
        self.credentials
            .entry(credential.recipient_address.clone())
            .or_default()
            .push(credential);
    }

    /// Revoke every record carrying `id` and return the revoked copies.
    ///
    /// Revocation is terminal: fails when every matching record is already
    /// revoked.
    pub fn revoke_credential(&self, id: &str) -> Result<Vec<Credential>, StoreError> {
        let mut revoked = Vec::new();
        let mut rejected = None;
        for mut entry in self.credentials.iter_mut() {
            for credential in entry.value_mut().iter_mut().filter(|c| c.id == id) {
                match credential.status.transition(CredentialEvent::Revoke) {
                    Ok(next) => {
                        credential.status = next;
                        revoked.push(credential.clone());
                    }
                    Err(e) => {
                        rejected.get_or_insert(e);
                    }
                }
            }
        }

        match rejected {
            _ if !revoked.is_empty() => {
                tracing::info!(credential_id = id, records = revoked.len(), "credential revoked");
                Ok(revoked)
            }
            Some(e) => Err(e.into()),
            None => Err(StoreError::CredentialNotFound(id.to_string())),
        }
    }

    /// Credentials held by `recipient`, in insertion order.
    pub fn list_credentials(&self, recipient: &str) -> Vec<Credential> {
        self.credentials
            .get(recipient)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// Find a credential by id.
    pub fn get_credential(&self, id: &str) -> Option<Credential> {
        self.credentials
            .iter()
            .find_map(|e| e.value().iter().find(|c| c.id == id).cloned())
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.iter().map(|e| e.value().len()).sum()
    }

    /// Count of a recipient's credentials in each status.
    pub fn status_count(&self, recipient: &str, status: CredentialStatus) -> usize {
        self.credentials
            .get(recipient)
            .map(|e| e.value().iter().filter(|c| c.status == status).count())
            .unwrap_or(0)
    }

    // --- Issuers ---

    /// Insert or replace an issuer record; returns the previous record.
    pub fn upsert_issuer(&self, issuer: Issuer) -> Option<Issuer> {
        tracing::debug!(issuer = %issuer.address, status = %issuer.status, "issuer registered");
        self.issuers.insert(issuer.address.clone(), issuer)
    }

    /// Change an issuer's registry status.
    pub fn set_issuer_status(&self, address: &str, status: IssuerStatus) -> Result<(), StoreError> {
        let mut issuer = self
            .issuers
            .get_mut(address)
            .ok_or_else(|| StoreError::IssuerNotFound(address.to_string()))?;
        tracing::info!(issuer = address, from = %issuer.status, to = %status, "issuer status changed");
        issuer.status = status;
        Ok(())
    }

    pub fn get_issuer(&self, address: &str) -> Option<Issuer> {
        self.issuers.get(address).map(|e| e.clone())
    }

    /// All issuers, sorted by address.
    pub fn list_issuers(&self) -> Vec<Issuer> {
        let mut issuers: Vec<Issuer> = self.issuers.iter().map(|e| e.value().clone()).collect();
        issuers.sort_by(|a, b| a.address.cmp(&b.address));
        issuers
    }

    pub fn issuer_count(&self) -> usize {
        self.issuers.len()
    }

    // --- Composition rules ---

    /// Register a rule, replacing any rule for the same composite type.
    pub fn register_rule(&self, rule: CompositionRule) -> Result<Option<CompositionRule>, StoreError> {
        rule.validate()?;
        tracing::debug!(
            composite = %rule.composite_credential_type_id,
            required = rule.required_credential_type_ids.len(),
            defined_by = %rule.defined_by,
            "composition rule registered"
        );
        Ok(self
            .rules
            .insert(rule.composite_credential_type_id.clone(), rule))
    }

    pub fn remove_rule(&self, composite_credential_type_id: &str) -> Option<CompositionRule> {
        self.rules
            .remove(composite_credential_type_id)
            .map(|(_, rule)| rule)
    }

    /// All rules, sorted by composite credential type.
    pub fn list_rules(&self) -> Vec<CompositionRule> {
        let mut rules: Vec<CompositionRule> = self.rules.iter().map(|e| e.value().clone()).collect();
        rules.sort_by(|a, b| a.composite_credential_type_id.cmp(&b.composite_credential_type_id));
        rules
    }

    /// Rules authored by `issuer`, sorted by composite credential type.
    pub fn rules_defined_by(&self, issuer: &str) -> Vec<CompositionRule> {
        self.list_rules()
            .into_iter()
            .filter(|r| r.defined_by == issuer)
            .collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for MemoryStore {
    fn credentials_for(&self, recipient: &str) -> Result<Vec<Credential>, SourceError> {
        Ok(self.list_credentials(recipient))
    }
}

impl IssuerSource for MemoryStore {
    fn issuers(&self) -> Result<Vec<Issuer>, SourceError> {
        Ok(self.list_issuers())
    }
}

impl RuleSource for MemoryStore {
    fn rules(&self) -> Result<Vec<CompositionRule>, SourceError> {
        Ok(self.list_rules())
    }
}

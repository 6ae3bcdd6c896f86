//! Shared fixtures for the Tessera integration tests.

use tessera_core::{CompositionRule, Credential, Issuer, IssuerStatus, Timestamp};
use tessera_verify::{
    Collaborator, CredentialSource, IssuerSource, MemoryStore, RuleSource, SourceError,
};

pub const NOW: Timestamp = 1_700_000_000;
pub const DAY: i64 = 24 * 60 * 60;

pub const HOLDER: &str = "0xa11ce00000000000000000000000000000000001";
pub const OTHER_HOLDER: &str = "0xb0b0000000000000000000000000000000000002";
pub const ACADEMY: &str = "0x1000000000000000000000000000000000000aca";
pub const GUILD: &str = "0x2000000000000000000000000000000000000911";
pub const SHADY: &str = "0x3000000000000000000000000000000000005bad";

pub const T_RUST: &str = "cred-type:rust-basics";
pub const T_SYSTEMS: &str = "cred-type:systems-design";
pub const T_SECURITY: &str = "cred-type:secure-coding";
pub const T_MASTER: &str = "cred-type:master-engineer";

/// Registry with one active, one suspended, and one revoked issuer.
pub fn issuers() -> Vec<Issuer> {
    vec![
        Issuer::new(ACADEMY, IssuerStatus::Active).with_name("Rust Academy"),
        Issuer::new(GUILD, IssuerStatus::Suspended).with_name("Systems Guild"),
        Issuer::new(SHADY, IssuerStatus::Revoked),
    ]
}

pub fn master_rule(required: &[&str]) -> CompositionRule {
    CompositionRule::new(
        T_MASTER,
        required.iter().map(|t| t.to_string()).collect(),
        ACADEMY,
    )
}

pub fn credential(id: &str, type_id: &str, issuer: &str) -> Credential {
    Credential::new(id, type_id, issuer, HOLDER).with_classification("education", "basic")
}

pub fn master_credential(id: &str) -> Credential {
    Credential::new(id, T_MASTER, ACADEMY, HOLDER).with_classification("certification", "expert")
}

/// A store seeded with the standard issuers.
pub fn store_with_issuers() -> MemoryStore {
    let store = MemoryStore::new();
    for issuer in issuers() {
        store.upsert_issuer(issuer);
    }
    store
}

/// Collaborator that fails every read of one kind and delegates the rest.
pub struct Unavailable<'a> {
    pub failing: Collaborator,
    pub inner: &'a MemoryStore,
}

impl Unavailable<'_> {
    fn check(&self, collaborator: Collaborator) -> Result<(), SourceError> {
        if self.failing == collaborator {
            Err(SourceError::new(collaborator, "connection refused"))
        } else {
            Ok(())
        }
    }
}

impl CredentialSource for Unavailable<'_> {
    fn credentials_for(&self, recipient: &str) -> Result<Vec<Credential>, SourceError> {
        self.check(Collaborator::CredentialStore)?;
        self.inner.credentials_for(recipient)
    }
}

impl IssuerSource for Unavailable<'_> {
    fn issuers(&self) -> Result<Vec<Issuer>, SourceError> {
        self.check(Collaborator::IssuerRegistry)?;
        self.inner.issuers()
    }
}

impl RuleSource for Unavailable<'_> {
    fn rules(&self) -> Result<Vec<CompositionRule>, SourceError> {
        self.check(Collaborator::RuleStore)?;
        self.inner.rules()
    }
}

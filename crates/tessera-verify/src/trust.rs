use std::collections::HashMap;

use tessera_core::Issuer;

/// Issuer registry snapshot indexed by address.
///
/// If the registry lists an address more than once, the first record wins.
#[derive(Debug, Default)]
pub struct IssuerIndex<'a> {
    by_address: HashMap<&'a str, &'a Issuer>,
}

impl<'a> IssuerIndex<'a> {
    /// Index a registry snapshot.
    pub fn build(issuers: &'a [Issuer]) -> Self {
        let mut by_address = HashMap::with_capacity(issuers.len());
        for issuer in issuers {
            by_address.entry(issuer.address.as_str()).or_insert(issuer);
        }
        Self { by_address }
    }

    /// Look up an issuer by exact address.
    pub fn get(&self, address: &str) -> Option<&'a Issuer> {
        self.by_address.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

/// Outcome of resolving an issuer against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustResolution<'a> {
    /// Issuer exists and is currently active.
    pub authorized: bool,
    /// The matching registry record, if any.
    pub issuer: Option<&'a Issuer>,
}

/// Decide whether an issuer is currently authorized.
pub fn resolve_trust<'a>(issuer_address: &str, registry: &IssuerIndex<'a>) -> TrustResolution<'a> {
    let issuer = registry.get(issuer_address);
    let authorized = issuer.is_some_and(|i| i.status.is_authorized());

    if !authorized {
        tracing::debug!(
            issuer = issuer_address,
            known = issuer.is_some(),
            "issuer not authorized"
        );
    }

    TrustResolution { authorized, issuer }
}

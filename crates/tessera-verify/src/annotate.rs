use serde::Serialize;

use tessera_core::{Credential, Issuer, Timestamp};

use crate::expiry::{classify_expiry, ExpiryState};
use crate::trust::{resolve_trust, IssuerIndex};

/// A credential viewed together with its issuer trust and expiry state.
///
/// Borrows the credential and issuer record from the snapshot it was
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCredential<'a> {
    #[serde(flatten)]
    pub credential: &'a Credential,
    pub issuer_verified: bool,
    pub issuer_info: Option<&'a Issuer>,
    pub expiry_state: ExpiryState,
}

impl<'a> VerifiedCredential<'a> {
    /// Whether this credential can satisfy a composition requirement:
    /// active status and an authorized issuer.
    pub fn is_valid_component(&self) -> bool {
        self.credential.is_active() && self.issuer_verified
    }

    pub fn credential_type_id(&self) -> &'a str {
        &self.credential.credential_type_id
    }
}

/// Annotate every credential with issuer trust and expiry state.
///
/// One output per input, in input order. Duplicates are kept.
pub fn annotate<'a>(
    credentials: impl IntoIterator<Item = &'a Credential>,
    issuers: &IssuerIndex<'a>,
    now: Timestamp,
    window_secs: i64,
) -> Vec<VerifiedCredential<'a>> {
    credentials
        .into_iter()
        .map(|credential| {
            let trust = resolve_trust(&credential.issuer_address, issuers);
            VerifiedCredential {
                credential,
                issuer_verified: trust.authorized,
                issuer_info: trust.issuer,
                expiry_state: classify_expiry(credential.expires_at, now, window_secs),
            }
        })
        .collect()
}

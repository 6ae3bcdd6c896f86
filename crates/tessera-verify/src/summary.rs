use serde::{Deserialize, Serialize};

use crate::annotate::VerifiedCredential;
use crate::composition::CompositeGroup;

/// Count-based statistics over one identity's verified credentials.
///
/// `active + revoked + expired == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub total_credentials: usize,
    /// Active status and not expired.
    pub active_credentials: usize,
    pub revoked_credentials: usize,
    /// Active status but expired.
    pub expired_credentials: usize,
    pub composite_credentials: usize,
    /// Every credential's issuer is authorized. True for an empty set.
    pub all_issuers_verified: bool,
}

/// Reduce annotated credentials and resolved composites into a summary.
///
/// Expiry is read from each credential's already-classified state, so the
/// counts agree with the per-credential view.
pub fn summarize(verified: &[VerifiedCredential<'_>], composites: &[CompositeGroup<'_>]) -> VerificationSummary {
    let mut summary = VerificationSummary {
        total_credentials: verified.len(),
        composite_credentials: composites.len(),
        all_issuers_verified: true,
        ..Default::default()
    };

    for credential in verified {
        if !credential.credential.is_active() {
            summary.revoked_credentials += 1;
        } else if credential.expiry_state.is_expired() {
            summary.expired_credentials += 1;
        } else {
            summary.active_credentials += 1;
        }
        summary.all_issuers_verified &= credential.issuer_verified;
    }

    summary
}

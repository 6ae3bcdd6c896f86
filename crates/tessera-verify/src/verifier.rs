use serde::Serialize;

use tessera_core::{EngineConfig, Timestamp};

use crate::annotate::{annotate, VerifiedCredential};
use crate::composition::{resolve_composites, CompositeGroup, RuleIndex};
use crate::error::VerifyError;
use crate::source::{Snapshot, Sources};
use crate::summary::{summarize, VerificationSummary};
use crate::trust::IssuerIndex;

/// Full output of one verification call. Borrows from the [`Snapshot`] it
/// was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport<'a> {
    pub identity: &'a str,
    /// The `now` the report was computed against.
    pub checked_at: Timestamp,
    pub verified: Vec<VerifiedCredential<'a>>,
    pub composites: Vec<CompositeGroup<'a>>,
    pub summary: VerificationSummary,
}

/// Drives a verification: identity check, fetch, annotation, composite
/// resolution, and summary.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: EngineConfig,
}

impl Verifier {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reject empty or malformed identities.
    pub fn check_identity(&self, identity: &str) -> Result<(), VerifyError> {
        self.config
            .address_format
            .validate(identity)
            .map_err(|e| VerifyError::InvalidIdentity(e.to_string()))
    }

    /// Validate the identity and read its snapshot from the collaborators.
    ///
    /// Collaborator failures are returned unmodified; nothing is retried.
    pub fn fetch(&self, identity: &str, sources: &Sources<'_>) -> Result<Snapshot, VerifyError> {
        self.check_identity(identity)?;
        sources.snapshot(identity).map_err(|e| {
            tracing::warn!(identity, error = %e, "collaborator read failed");
            VerifyError::CollaboratorUnavailable(e)
        })
    }

    /// Compute the report for `identity` over an already-fetched snapshot.
    ///
    /// Credentials in the snapshot held by any other identity are ignored.
    /// Deterministic for a given snapshot and `now`.
    pub fn verify<'a>(
        &self,
        identity: &'a str,
        snapshot: &'a Snapshot,
        now: Timestamp,
    ) -> Result<VerificationReport<'a>, VerifyError> {
        self.check_identity(identity)?;

        let issuers = IssuerIndex::build(&snapshot.issuers);
        let rules = RuleIndex::build(&snapshot.rules);

        let held = snapshot.credentials.iter().filter(|credential| {
            let own = credential.recipient_address == identity;
            if !own {
                tracing::debug!(
                    identity,
                    credential_id = %credential.id,
                    recipient = %credential.recipient_address,
                    "skipping credential held by another identity"
                );
            }
            own
        });
        let verified = annotate(
            held,
            &issuers,
            now,
            self.config.expiring_soon_window_secs,
        );
        let composites = resolve_composites(&verified, &rules);
        let summary = summarize(&verified, &composites);

        tracing::info!(
            identity,
            total = summary.total_credentials,
            active = summary.active_credentials,
            revoked = summary.revoked_credentials,
            expired = summary.expired_credentials,
            composites = summary.composite_credentials,
            all_issuers_verified = summary.all_issuers_verified,
            "identity verified"
        );

        Ok(VerificationReport {
            identity,
            checked_at: now,
            verified,
            composites,
            summary,
        })
    }

    /// Fetch and verify in one call, handing the borrowed report to `render`.
    pub fn run<T, F>(
        &self,
        identity: &str,
        sources: &Sources<'_>,
        now: Timestamp,
        render: F,
    ) -> Result<T, VerifyError>
    where
        F: FnOnce(VerificationReport<'_>) -> T,
    {
        let snapshot = self.fetch(identity, sources)?;
        let report = self.verify(identity, &snapshot, now)?;
        Ok(render(report))
    }
}

//! Tessera Verify — Computes a verification report for one identity from
//! snapshots of its credentials, the issuer registry, and composition rules.
//!
//! Pipeline, leaves first:
//! - trust resolution and expiry classification
//! - credential annotation
//! - composite resolution
//! - summary aggregation
//!
//! [`Verifier`] drives the pipeline. [`MemoryStore`] is an in-memory
//! implementation of the three collaborator traits.

pub mod annotate;
pub mod composition;
pub mod error;
pub mod expiry;
pub mod source;
pub mod store;
pub mod summary;
pub mod trust;
pub mod verifier;

pub use annotate::{annotate, VerifiedCredential};
pub use composition::{
    resolve_composites, ComponentResolution, CompositeGroup, ResolutionOutcome, RuleIndex,
};
pub use error::{Collaborator, SourceError, StoreError, VerifyError};
pub use expiry::{classify_expiry, ExpiryState};
pub use source::{CredentialSource, IssuerSource, RuleSource, Snapshot, Sources};
pub use store::{Dataset, MemoryStore};
pub use summary::{summarize, VerificationSummary};
pub use trust::{resolve_trust, IssuerIndex, TrustResolution};
pub use verifier::{VerificationReport, Verifier};

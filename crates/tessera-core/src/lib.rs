//! Tessera Core — Credential, issuer, and composition-rule records, their
//! status lifecycles, and the configuration shared by the verification engine.

pub mod config;
pub mod error;
pub mod identity;
pub mod status;
pub mod types;

pub use config::EngineConfig;
pub use error::CoreError;
pub use identity::AddressFormat;
pub use status::{CredentialEvent, CredentialStatus, IssuerStatus};
pub use types::{CompositionRule, Credential, Issuer, Timestamp};

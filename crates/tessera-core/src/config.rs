use serde::{Deserialize, Serialize};

use crate::identity::AddressFormat;

/// 30 days.
pub const DEFAULT_EXPIRING_SOON_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for the verification engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lead window (seconds) before expiry in which a credential is reported
    /// as expiring soon.
    #[serde(default = "default_expiring_soon_window_secs")]
    pub expiring_soon_window_secs: i64,
    /// Identity format accepted by the orchestrator.
    #[serde(default)]
    pub address_format: AddressFormat,
}

fn default_expiring_soon_window_secs() -> i64 {
    DEFAULT_EXPIRING_SOON_WINDOW_SECS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expiring_soon_window_secs: default_expiring_soon_window_secs(),
            address_format: AddressFormat::default(),
        }
    }
}

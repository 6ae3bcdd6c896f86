use serde::{Deserialize, Serialize};
use std::fmt;

use tessera_core::Timestamp;

/// Temporal validity of a credential relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryState {
    /// No expiry time set.
    NeverExpires,
    /// Expires after the lead window.
    Active,
    /// Expires within the lead window, but not yet.
    ExpiringSoon,
    /// Expiry time is at or before now.
    Expired,
}

impl ExpiryState {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for ExpiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverExpires => write!(f, "NEVER_EXPIRES"),
            Self::Active => write!(f, "ACTIVE"),
            Self::ExpiringSoon => write!(f, "EXPIRING_SOON"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Classify an optional expiry time against `now`.
///
/// `expires_at == now` is expired. A credential expiring within
/// `window_secs` after `now` is expiring soon; a non-positive window
/// disables that state.
pub fn classify_expiry(expires_at: Option<Timestamp>, now: Timestamp, window_secs: i64) -> ExpiryState {
    match expires_at {
        None => ExpiryState::NeverExpires,
        Some(at) if at <= now => ExpiryState::Expired,
        Some(at) if at.saturating_sub(now) <= window_secs => ExpiryState::ExpiringSoon,
        Some(_) => ExpiryState::Active,
    }
}

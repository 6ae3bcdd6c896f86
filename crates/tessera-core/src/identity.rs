use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Length of a hex wallet address body, in hex digits.
const HEX_ADDRESS_DIGITS: usize = 40;

/// Policy deciding which identity strings are well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// `0x` followed by 40 hex digits (20 bytes), case-insensitive.
    #[default]
    Hex,
    /// Any non-empty string without whitespace.
    Opaque,
}

impl AddressFormat {
    /// Validate an identity string against this policy.
    pub fn validate(&self, identity: &str) -> Result<(), CoreError> {
        if identity.is_empty() {
            return Err(CoreError::InvalidIdentity("identity is empty".into()));
        }
        if identity.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidIdentity(format!(
                "identity contains whitespace: {:?}",
                identity
            )));
        }

        match self {
            Self::Opaque => Ok(()),
            Self::Hex => {
                let body = identity.strip_prefix("0x").ok_or_else(|| {
                    CoreError::InvalidIdentity(format!(
                        "address must start with '0x', got: {}",
                        identity
                    ))
                })?;
                if body.len() != HEX_ADDRESS_DIGITS {
                    return Err(CoreError::InvalidIdentity(format!(
                        "address must have {} hex digits, got {}",
                        HEX_ADDRESS_DIGITS,
                        body.len()
                    )));
                }
                hex::decode(body).map_err(|e| {
                    CoreError::InvalidIdentity(format!("address is not hex: {}", e))
                })?;
                Ok(())
            }
        }
    }

    pub fn is_valid(&self, identity: &str) -> bool {
        self.validate(identity).is_ok()
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

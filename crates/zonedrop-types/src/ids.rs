//! Identifiers used throughout ZoneDrop.
//!
//! User identities are bech32 account addresses (`quick1…`, `osmo1…`).
//! They are validated once at the edge ([`Address::parse`]) so every
//! `Address` held by the engine is known to be well-formed.

use std::fmt;

use bech32::{Bech32, Hrp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, ZonedropError, constants};

/// Identifier of a zone / distribution program (e.g. `"cosmoshub-4"`).
pub type ChainId = String;

/// Governance proposal identifier.
pub type ProposalId = u64;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A bech32-encoded account address, stored in canonical lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    encoded: String,
    hrp_len: usize,
}

impl Address {
    /// Parse and checksum-verify a bech32 address.
    ///
    /// # Errors
    /// Returns [`ZonedropError::InvalidAddress`] describing the first defect.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| ZonedropError::InvalidAddress {
            address: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty address"));
        }
        if s.len() > constants::MAX_ADDRESS_LEN {
            return Err(invalid("address too long"));
        }
        let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(invalid("mixed case"));
        }

        let lowered = s.to_ascii_lowercase();
        let (hrp, _) = bech32::decode(&lowered).map_err(|e| match e {
            bech32::DecodeError::Checksum(_) => invalid("invalid checksum"),
            other => invalid(&other.to_string()),
        })?;

        Ok(Self {
            hrp_len: hrp.as_str().len(),
            encoded: lowered,
        })
    }

    /// Encode raw account bytes under the given human-readable prefix.
    pub fn from_data(hrp: &str, data: &[u8]) -> Result<Self> {
        let invalid = |reason: String| ZonedropError::InvalidAddress {
            address: format!("{hrp}1…"),
            reason,
        };
        let hrp = Hrp::parse(hrp).map_err(|e| invalid(e.to_string()))?;
        let encoded = bech32::encode::<Bech32>(hrp, data).map_err(|e| invalid(e.to_string()))?;
        Self::parse(&encoded)
    }

    /// The human-readable prefix (`"quick"` for `quick1…`).
    #[must_use]
    pub fn hrp(&self) -> &str {
        &self.encoded[..self.hrp_len]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl TryFrom<String> for Address {
    type Error = ZonedropError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.encoded
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// Deterministic `quick1…` address derived from a single seed byte.
    pub fn dummy(seed: u8) -> Self {
        Self::from_data("quick", &[seed; 20]).expect("valid bech32 encoding")
    }
}

// ---------------------------------------------------------------------------
// BlockContext
// ---------------------------------------------------------------------------

/// The block a claim executes in. Time is monotonic and deterministic
/// across replaying nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub height: u64,
    pub time: DateTime<Utc>,
}

impl BlockContext {
    #[must_use]
    pub fn new(height: u64, time: DateTime<Utc>) -> Self {
        Self { height, time }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

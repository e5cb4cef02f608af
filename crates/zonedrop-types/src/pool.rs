//! Remote liquidity pool model.
//!
//! Two kinds of remote data flow into liquidity valuation:
//! - a [`LockedResponse`] decoded from an authenticated [`crate::Proof`],
//!   describing pool shares a user has locked;
//! - [`OsmosisPoolProtocolData`], pool metadata ingested by another module
//!   and stored as raw [`ProtocolData`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ChainId, Coins, Result, ZonedropError, constants};

// ---------------------------------------------------------------------------
// Locked positions
// ---------------------------------------------------------------------------

/// Pool shares locked by an owner on the liquidity chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLock {
    #[serde(rename = "ID")]
    pub id: u64,
    pub owner: String,
    /// Lock duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub coins: Coins,
}

/// Remote query response carried in a lockup proof's `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedResponse {
    pub lock: PeriodLock,
}

impl LockedResponse {
    /// Decode the `data` field of a lockup proof.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

// ---------------------------------------------------------------------------
// Pool protocol data
// ---------------------------------------------------------------------------

/// Raw protocol data record as stored by the ingesting module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolData {
    /// Decoder selector, e.g. `"osmosispool"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<u8>,
}

/// Pool state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Total pool share tokens in existence.
    pub total_shares: Decimal,
    /// Liquidity held by the pool, per asset denom.
    pub pool_assets: Coins,
}

/// Liquidity pool metadata for pools holding zone assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsmosisPoolProtocolData {
    pub pool_id: u64,
    pub pool_name: String,
    /// Zone chain id → the zone asset's denom inside the pool.
    pub zones: BTreeMap<ChainId, String>,
    pub pool_data: PoolState,
}

impl OsmosisPoolProtocolData {
    #[must_use]
    pub fn total_shares(&self) -> Decimal {
        self.pool_data.total_shares
    }

    #[must_use]
    pub fn total_pool_liquidity(&self) -> &Coins {
        &self.pool_data.pool_assets
    }

    /// The pool denom of `chain_id`'s asset, if the pool holds one.
    #[must_use]
    pub fn zone_denom(&self, chain_id: &str) -> Option<&str> {
        self.zones
            .get(chain_id)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Wrap this pool as a raw protocol data record.
    pub fn to_protocol_data(&self) -> Result<ProtocolData> {
        Ok(ProtocolData {
            kind: constants::DEFAULT_POOL_PROTOCOL_KIND.to_string(),
            data: serde_json::to_vec(self)?,
        })
    }
}

/// Decode raw protocol data of the given kind into pool metadata.
///
/// # Errors
/// Returns [`ZonedropError::Serialization`] for unknown kinds or malformed
/// payloads.
pub fn unmarshal_protocol_data(kind: &str, raw: &[u8]) -> Result<OsmosisPoolProtocolData> {
    if kind != constants::DEFAULT_POOL_PROTOCOL_KIND {
        return Err(ZonedropError::Serialization(format!(
            "unsupported protocol data kind {kind:?}"
        )));
    }
    Ok(serde_json::from_slice(raw)?)
}

//! Claim completion events.
//!
//! Every settled claim produces one [`ClaimEvent`]. Events form
//! an append-only notification stream; the `event_id` is derived from the
//! event contents so every replaying node computes the same identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Action, Address, BlockContext, ChainId, Coins};

/// A settled claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEvent {
    /// SHA-256 over the event contents.
    pub event_id: [u8; 32],
    pub address: Address,
    pub chain_id: ChainId,
    /// The action requested (lower cascaded tiers are not listed).
    pub action: Action,
    /// Total amount credited by the claim.
    pub amount: u64,
    /// Coins transferred (empty when `amount` is zero).
    pub coins: Coins,
    pub block_height: u64,
    pub block_time: DateTime<Utc>,
}

impl ClaimEvent {
    #[must_use]
    pub fn new(
        ctx: &BlockContext,
        address: Address,
        chain_id: ChainId,
        action: Action,
        amount: u64,
        coins: Coins,
    ) -> Self {
        let event_id = Self::compute_id(ctx, &address, &chain_id, action, amount);
        Self {
            event_id,
            address,
            chain_id,
            action,
            amount,
            coins,
            block_height: ctx.height,
            block_time: ctx.time,
        }
    }

    /// `SHA-256(domain_sep || height || chain_id || address || action || amount)`
    fn compute_id(
        ctx: &BlockContext,
        address: &Address,
        chain_id: &str,
        action: Action,
        amount: u64,
    ) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"zonedrop:claim:v1:");
        hasher.update(ctx.height.to_le_bytes());
        hasher.update(chain_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(address.as_str().as_bytes());
        hasher.update(action.code().to_le_bytes());
        hasher.update(amount.to_le_bytes());
        hasher.finalize().into()
    }

    #[must_use]
    pub fn event_id_hex(&self) -> String {
        hex::encode(self.event_id)
    }
}

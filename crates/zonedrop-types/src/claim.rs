//! Claim records: per-user, per-zone eligibility state.
//!
//! ## Lifecycle
//!
//! ```text
//!   registration          successful claim (adds ≥ 1 entry)
//!   ────────────▶ record ─────────────────────────────────▶ record'
//!                 (empty actions_completed)
//! ```
//!
//! Entries in `actions_completed` are append-only: once an action is
//! present it is never removed and its amount never changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Action, Address, ChainId, Result, ZonedropError};

/// Settlement of a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedAction {
    /// Block time at which the action was settled.
    pub complete_time: DateTime<Utc>,
    /// Amount credited for this action.
    pub claim_amount: u64,
}

/// A user's eligibility record for one zone drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// The claimant.
    pub address: Address,
    /// The zone this record belongs to.
    pub chain_id: ChainId,
    /// Maximum reward the user can receive across all actions.
    pub max_allocation: u64,
    /// The user's total eligible base amount; deposit thresholds scale by it.
    pub base_value: u64,
    /// Settled actions.
    #[serde(default)]
    pub actions_completed: BTreeMap<Action, CompletedAction>,
}

impl ClaimRecord {
    /// A fresh record with no completed actions.
    #[must_use]
    pub fn new(
        address: Address,
        chain_id: impl Into<ChainId>,
        max_allocation: u64,
        base_value: u64,
    ) -> Self {
        Self {
            address,
            chain_id: chain_id.into(),
            max_allocation,
            base_value,
            actions_completed: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn has_completed(&self, action: Action) -> bool {
        self.actions_completed.contains_key(&action)
    }

    /// Sum of all amounts credited so far.
    #[must_use]
    pub fn total_claimed(&self) -> u64 {
        self.actions_completed
            .values()
            .map(|c| c.claim_amount)
            .fold(0u64, u64::saturating_add)
    }

    /// Record a settled action.
    ///
    /// # Errors
    /// Returns [`ZonedropError::AlreadyClaimed`] if `action` is already
    /// present; the existing entry is left untouched.
    pub fn complete(&mut self, action: Action, completed: CompletedAction) -> Result<()> {
        if self.has_completed(action) {
            return Err(ZonedropError::AlreadyClaimed {
                action,
                chain_id: self.chain_id.clone(),
                address: self.address.to_string(),
            });
        }
        self.actions_completed.insert(action, completed);
        Ok(())
    }

    /// Stateless validity checks applied at registration.
    pub fn validate_basic(&self) -> Result<()> {
        if self.chain_id.trim().is_empty() {
            return Err(ZonedropError::InvalidClaimRecord {
                reason: format!("{}: chain id must not be empty", self.address),
            });
        }
        if self.base_value == 0 {
            return Err(ZonedropError::InvalidClaimRecord {
                reason: format!("{}: base value must be positive", self.address),
            });
        }
        if self.max_allocation == 0 {
            return Err(ZonedropError::InvalidClaimRecord {
                reason: format!("{}: max allocation must be positive", self.address),
            });
        }
        if let Some(action) = self
            .actions_completed
            .keys()
            .find(|a| **a == Action::Undefined)
        {
            return Err(ZonedropError::InvalidClaimRecord {
                reason: format!("{}: {action} cannot be completed", self.address),
            });
        }
        Ok(())
    }
}

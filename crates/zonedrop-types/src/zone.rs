//! Read-only views of state owned by other modules: zone registrations,
//! deposit receipts, delegation intents, and governance votes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ChainId, Coins, ProposalId};

/// A registered host zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub chain_id: ChainId,
    /// Bech32 prefix of accounts on the zone (`"cosmos"`, `"osmo"`).
    pub account_prefix: String,
    /// Light-client connection anchoring the zone's state.
    pub connection_id: String,
    /// Native staking denom on the zone (`"uatom"`).
    pub base_denom: String,
    /// Liquid staked denom minted locally (`"uqatom"`).
    pub local_denom: String,
}

/// Evidence of a deposit made by a user into a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub chain_id: ChainId,
    pub sender: String,
    pub txhash: String,
    pub amount: Coins,
}

/// Weighted preference for a single validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorIntent {
    pub valoper_address: String,
    pub weight: Decimal,
}

/// A delegator's validator-selection intent for a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorIntent {
    pub delegator: String,
    pub intents: Vec<ValidatorIntent>,
}

impl DelegatorIntent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

/// A vote cast on a governance proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: ProposalId,
    pub voter: String,
    pub option: VoteOption,
}

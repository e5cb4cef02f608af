//! Interfaces to the modules that own the state claims are verified against.
//!
//! Implementations are expected to read from one consistent snapshot for
//! the duration of a claim. None of these calls mutate state.

use rust_decimal::Decimal;
use zonedrop_types::{
    Address, DelegatorIntent, DepositReceipt, ProofOp, ProposalId, ProtocolData, Result, Vote,
    ZoneConfig,
};

/// Registered host zones.
pub trait ZoneRegistry {
    fn zone(&self, chain_id: &str) -> Option<ZoneConfig>;

    /// All zones, lazily. Callers stop at the first match they need.
    fn zones(&self) -> Box<dyn Iterator<Item = ZoneConfig> + '_>;
}

/// Deposit evidence recorded by the liquid staking module.
pub trait DepositLedger {
    fn user_zone_receipts(&self, zone: &ZoneConfig, address: &Address)
    -> Result<Vec<DepositReceipt>>;
}

/// Native-chain staking state.
pub trait StakingView {
    /// Total bonded delegation of `address`, in the bond denom.
    fn delegator_bonded(&self, address: &Address) -> Decimal;

    fn bond_denom(&self) -> String;
}

/// Validator-selection intents.
pub trait IntentStore {
    /// `snapshot` selects the epoch snapshot instead of the live intent.
    fn intent(&self, zone: &ZoneConfig, address: &Address, snapshot: bool)
    -> Option<DelegatorIntent>;
}

/// Governance proposals and votes.
pub trait GovernanceView {
    /// Every proposal id ever recorded, lazily.
    fn proposal_ids(&self) -> Box<dyn Iterator<Item = ProposalId> + '_>;

    fn vote(&self, proposal_id: ProposalId, voter: &Address) -> Option<Vote>;
}

/// Light-client backed verification of remote store proofs.
pub trait ProofChecker {
    /// Verify that `key → data` is committed in `store_key` of `chain_id`
    /// at `height`, as seen through `connection_id`.
    #[allow(clippy::too_many_arguments)]
    fn validate_proof_ops(
        &self,
        connection_id: &str,
        chain_id: &str,
        height: u64,
        store_key: &str,
        key: &[u8],
        data: &[u8],
        proof_ops: &[ProofOp],
    ) -> Result<()>;
}

/// Protocol data ingested from remote chains (pool metadata).
pub trait ProtocolDataStore {
    fn protocol_data(&self, id: &str) -> Option<ProtocolData>;
}

/// Handles to every read-only collaborator a verifier needs.
#[derive(Clone, Copy)]
pub struct ChainViews<'a> {
    pub zones: &'a dyn ZoneRegistry,
    pub deposits: &'a dyn DepositLedger,
    pub staking: &'a dyn StakingView,
    pub intents: &'a dyn IntentStore,
    pub governance: &'a dyn GovernanceView,
    pub proofs: &'a dyn ProofChecker,
    pub protocol_data: &'a dyn ProtocolDataStore,
}

impl<'a> ChainViews<'a> {
    /// Use one object that implements every view.
    pub fn from_all<T>(all: &'a T) -> Self
    where
        T: ZoneRegistry
            + DepositLedger
            + StakingView
            + IntentStore
            + GovernanceView
            + ProofChecker
            + ProtocolDataStore,
    {
        Self {
            zones: all,
            deposits: all,
            staking: all,
            intents: all,
            governance: all,
            proofs: all,
            protocol_data: all,
        }
    }
}

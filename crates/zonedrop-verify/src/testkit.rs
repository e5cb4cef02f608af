//! In-memory collaborators for tests.
//!
//! [`MockChain`] implements every view trait over plain maps, so a test
//! can describe chain state declaratively and hand it to a verifier with
//! [`ChainViews::from_all`].

use std::{
    cell::Cell,
    collections::{BTreeMap, HashMap, HashSet},
};

use rust_decimal::Decimal;
use zonedrop_types::{
    Address, ChainId, Coin, Coins, DelegatorIntent, DepositReceipt, LockedResponse,
    OsmosisPoolProtocolData, PeriodLock, PoolState, Proof, ProofOp, ProposalId, ProtocolData,
    Result, ValidatorIntent, Vote, VoteOption, ZoneConfig, ZonedropError, constants,
};

use crate::keepers::{
    ChainViews, DepositLedger, GovernanceView, IntentStore, ProofChecker, ProtocolDataStore,
    StakingView, ZoneRegistry,
};

pub const HUB_CHAIN_ID: &str = "cosmoshub-4";
pub const HUB_DENOM: &str = "uatom";
pub const OSMO_CHAIN_ID: &str = "osmosis-1";
pub const BOND_DENOM: &str = "uqck";

/// The zone whose drop the tests claim against.
pub fn hub_zone() -> ZoneConfig {
    ZoneConfig {
        chain_id: HUB_CHAIN_ID.into(),
        account_prefix: "cosmos".into(),
        connection_id: "connection-0".into(),
        base_denom: HUB_DENOM.into(),
        local_denom: "uqatom".into(),
    }
}

/// The liquidity chain.
pub fn osmosis_zone() -> ZoneConfig {
    ZoneConfig {
        chain_id: OSMO_CHAIN_ID.into(),
        account_prefix: constants::DEFAULT_LIQUIDITY_ACCOUNT_PREFIX.into(),
        connection_id: "connection-1".into(),
        base_denom: "uosmo".into(),
        local_denom: "uqosmo".into(),
    }
}

/// Pool `pool_id` holding `zone_liquidity` of the hub's asset.
pub fn hub_pool(pool_id: u64, total_shares: u64, zone_liquidity: u64) -> OsmosisPoolProtocolData {
    OsmosisPoolProtocolData {
        pool_id,
        pool_name: format!("pool-{pool_id}"),
        zones: BTreeMap::from([(HUB_CHAIN_ID.to_string(), "ibc/QATOM".to_string())]),
        pool_data: PoolState {
            total_shares: Decimal::from(total_shares),
            pool_assets: Coins::new([
                Coin::new("ibc/QATOM", zone_liquidity),
                Coin::new("uosmo", zone_liquidity.saturating_mul(3)),
            ]),
        },
    }
}

/// A lockup proof asserting `owner` has locked `shares` of pool `pool_id`.
pub fn lock_proof(key: &[u8], owner: &Address, pool_id: u64, shares: u64) -> Proof {
    let resp = LockedResponse {
        lock: PeriodLock {
            id: 1,
            owner: owner.to_string(),
            duration: 1_209_600,
            end_time: None,
            coins: Coins::single(format!("gamm/pool/{pool_id}"), shares),
        },
    };
    Proof::new(100, key.to_vec(), resp.encode().expect("lock encodes"))
}

/// Declarative chain state implementing every view trait.
#[derive(Default)]
pub struct MockChain {
    pub zones: Vec<ZoneConfig>,
    pub receipts: HashMap<(ChainId, Address), Vec<DepositReceipt>>,
    pub receipts_unavailable: bool,
    pub bonded: HashMap<Address, Decimal>,
    pub intents: HashMap<(ChainId, Address), DelegatorIntent>,
    pub proposals: Vec<ProposalId>,
    pub votes: HashMap<(ProposalId, Address), Vote>,
    pub protocol_data: HashMap<String, ProtocolData>,
    pub rejected_proof_keys: HashSet<Vec<u8>>,
    /// Number of proofs handed to the checker.
    pub proof_checks: Cell<usize>,
}

impl MockChain {
    /// A chain with the hub and liquidity zones registered.
    pub fn new() -> Self {
        Self {
            zones: vec![hub_zone(), osmosis_zone()],
            ..Self::default()
        }
    }

    pub fn views(&self) -> ChainViews<'_> {
        ChainViews::from_all(self)
    }

    pub fn deposit(&mut self, chain_id: &str, address: &Address, denom: &str, amount: u64) {
        let receipts = self
            .receipts
            .entry((chain_id.to_string(), address.clone()))
            .or_default();
        let n = receipts.len();
        receipts.push(DepositReceipt {
            chain_id: chain_id.to_string(),
            sender: address.to_string(),
            txhash: format!("{:064x}", n + 1),
            amount: Coins::single(denom, amount),
        });
    }

    pub fn bond(&mut self, address: &Address, amount: u64) {
        self.bonded.insert(address.clone(), Decimal::from(amount));
    }

    pub fn signal_intent(&mut self, chain_id: &str, address: &Address, valopers: &[&str]) {
        let intents = valopers
            .iter()
            .map(|v| ValidatorIntent {
                valoper_address: (*v).to_string(),
                weight: Decimal::ONE / Decimal::from(valopers.len().max(1)),
            })
            .collect();
        self.intents.insert(
            (chain_id.to_string(), address.clone()),
            DelegatorIntent {
                delegator: address.to_string(),
                intents,
            },
        );
    }

    pub fn add_proposal(&mut self, id: ProposalId) {
        self.proposals.push(id);
    }

    pub fn vote(&mut self, id: ProposalId, voter: &Address) {
        self.votes.insert(
            (id, voter.clone()),
            Vote {
                proposal_id: id,
                voter: voter.to_string(),
                option: VoteOption::Yes,
            },
        );
    }

    pub fn add_pool(&mut self, pool: &OsmosisPoolProtocolData) {
        let id = format!("{}/{}", constants::DEFAULT_POOL_ID_PREFIX, pool.pool_id);
        self.protocol_data
            .insert(id, pool.to_protocol_data().expect("pool encodes"));
    }

    pub fn reject_proof(&mut self, key: &[u8]) {
        self.rejected_proof_keys.insert(key.to_vec());
    }
}

impl ZoneRegistry for MockChain {
    fn zone(&self, chain_id: &str) -> Option<ZoneConfig> {
        self.zones.iter().find(|z| z.chain_id == chain_id).cloned()
    }

    fn zones(&self) -> Box<dyn Iterator<Item = ZoneConfig> + '_> {
        Box::new(self.zones.iter().cloned())
    }
}

impl DepositLedger for MockChain {
    fn user_zone_receipts(
        &self,
        zone: &ZoneConfig,
        address: &Address,
    ) -> Result<Vec<DepositReceipt>> {
        if self.receipts_unavailable {
            return Err(ZonedropError::External("receipt index unavailable".into()));
        }
        Ok(self
            .receipts
            .get(&(zone.chain_id.clone(), address.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

impl StakingView for MockChain {
    fn delegator_bonded(&self, address: &Address) -> Decimal {
        self.bonded.get(address).copied().unwrap_or(Decimal::ZERO)
    }

    fn bond_denom(&self) -> String {
        BOND_DENOM.to_string()
    }
}

impl IntentStore for MockChain {
    fn intent(
        &self,
        zone: &ZoneConfig,
        address: &Address,
        _snapshot: bool,
    ) -> Option<DelegatorIntent> {
        self.intents
            .get(&(zone.chain_id.clone(), address.clone()))
            .cloned()
    }
}

impl GovernanceView for MockChain {
    fn proposal_ids(&self) -> Box<dyn Iterator<Item = ProposalId> + '_> {
        Box::new(self.proposals.iter().copied())
    }

    fn vote(&self, proposal_id: ProposalId, voter: &Address) -> Option<Vote> {
        self.votes.get(&(proposal_id, voter.clone())).cloned()
    }
}

impl ProofChecker for MockChain {
    fn validate_proof_ops(
        &self,
        connection_id: &str,
        chain_id: &str,
        _height: u64,
        store_key: &str,
        key: &[u8],
        _data: &[u8],
        _proof_ops: &[ProofOp],
    ) -> Result<()> {
        self.proof_checks.set(self.proof_checks.get() + 1);
        let known = self
            .zones
            .iter()
            .any(|z| z.chain_id == chain_id && z.connection_id == connection_id);
        if !known {
            return Err(ZonedropError::External(format!(
                "no client state for {connection_id} / {chain_id}"
            )));
        }
        if store_key != constants::DEFAULT_LOCKUP_STORE_KEY {
            return Err(ZonedropError::External(format!("unexpected store {store_key}")));
        }
        if self.rejected_proof_keys.contains(key) {
            return Err(ZonedropError::External("merkle root mismatch".into()));
        }
        Ok(())
    }
}

impl ProtocolDataStore for MockChain {
    fn protocol_data(&self, id: &str) -> Option<ProtocolData> {
        self.protocol_data.get(id).cloned()
    }
}

//! The claim engine.
//!
//! Owns the claim records and registered zone drops, and executes claim
//! requests against injected chain views.
//!
//! ## Claim pipeline
//!
//! ```text
//! parse action ─▶ parse address ─▶ load record ─▶ one-shot check
//!   ─▶ dispatch ─▶ verify ─▶ settle on staged copy
//!   ─▶ transfer escrow → user ─▶ commit record ─▶ emit event
//! ```
//!
//! Claims are serialised by `&mut self`. A failure at any step returns
//! before the commit, so the store either sees the whole claim or none
//! of it.

use std::collections::BTreeMap;

use zonedrop_types::{
    Action, Address, BlockContext, ChainId, ClaimEvent, ClaimRecord, Coins, EngineConfig, Proof,
    RegisterZoneDropProposal, Result, ZoneDrop, ZonedropError,
};
use zonedrop_verify::{ChainViews, Verifier};

use crate::{
    cascade::settle_action,
    dispatch::{Handler, HandlerTable},
    ledger::{Bank, EventSink},
    record_store::ClaimRecordStore,
    schedule::{RewardSchedule, ZoneDropSchedule},
};

/// A user's request to claim one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    /// Bech32 address of the claimant.
    pub address: String,
    pub chain_id: ChainId,
    /// Wire code of the action.
    pub action: i32,
    /// Cross-chain evidence, for actions that take any.
    pub proofs: Vec<Proof>,
}

impl ClaimRequest {
    #[must_use]
    pub fn new(address: impl Into<String>, chain_id: impl Into<ChainId>, action: i32) -> Self {
        Self {
            address: address.into(),
            chain_id: chain_id.into(),
            action,
            proofs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_proofs(mut self, proofs: Vec<Proof>) -> Self {
        self.proofs = proofs;
        self
    }
}

pub struct ClaimEngine<'a> {
    config: EngineConfig,
    views: ChainViews<'a>,
    schedule: &'a dyn RewardSchedule,
    records: ClaimRecordStore,
    zone_drops: BTreeMap<ChainId, ZoneDrop>,
    handlers: HandlerTable,
}

impl<'a> ClaimEngine<'a> {
    /// An engine with no zone drops, the default handler table and the
    /// [`ZoneDropSchedule`].
    #[must_use]
    pub fn new(config: EngineConfig, views: ChainViews<'a>) -> Self {
        Self {
            config,
            views,
            schedule: &ZoneDropSchedule,
            records: ClaimRecordStore::new(),
            zone_drops: BTreeMap::new(),
            handlers: HandlerTable::default(),
        }
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: &'a dyn RewardSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_handler(mut self, action: Action, handler: Handler) -> Self {
        self.handlers.insert(action, handler);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn claim_record(&self, chain_id: &str, address: &Address) -> Option<&ClaimRecord> {
        self.records.get(chain_id, address)
    }

    #[must_use]
    pub fn records(&self) -> &ClaimRecordStore {
        &self.records
    }

    #[must_use]
    pub fn zone_drop(&self, chain_id: &str) -> Option<&ZoneDrop> {
        self.zone_drops.get(chain_id)
    }

    /// Apply an approved registration proposal: store the zone drop and
    /// insert its claim records.
    ///
    /// # Errors
    /// - `InvalidProposal` / `InvalidClaimRecord` if validation fails
    /// - `ZoneDropExists` if the chain already has a zone drop
    pub fn register_zone_drop(&mut self, proposal: RegisterZoneDropProposal) -> Result<()> {
        proposal.validate_basic()?;

        let chain_id = proposal.zone_drop.chain_id.clone();
        if self.zone_drops.contains_key(&chain_id) {
            return Err(ZonedropError::ZoneDropExists(chain_id));
        }
        for record in &proposal.claim_records {
            if !record.actions_completed.is_empty() {
                return Err(ZonedropError::InvalidClaimRecord {
                    reason: format!(
                        "{}: new records must not carry completed actions",
                        record.address
                    ),
                });
            }
            if self.records.get(&record.chain_id, &record.address).is_some() {
                return Err(ZonedropError::InvalidClaimRecord {
                    reason: format!("{}: record already exists on {chain_id}", record.address),
                });
            }
        }

        let records = proposal.claim_records.len();
        for record in proposal.claim_records {
            self.records.insert(record)?;
        }
        tracing::info!(
            zone = %chain_id,
            allocation = proposal.zone_drop.allocation,
            start = %proposal.zone_drop.start_time,
            records,
            "Zone drop registered"
        );
        self.zone_drops.insert(chain_id, proposal.zone_drop);
        Ok(())
    }

    /// Execute a claim, returning the amount credited.
    ///
    /// # Errors
    /// - `InvalidAction` / `InvalidAddress` for malformed requests
    /// - `NotFound` if no record or zone drop exists
    /// - `AlreadyClaimed` if the action was settled before
    /// - `NotImplemented` if the action has no handler
    /// - any verification error of the action's verifier
    /// - `TransferFailed` if the escrow transfer fails
    pub fn claim(
        &mut self,
        ctx: &BlockContext,
        bank: &mut dyn Bank,
        events: &mut dyn EventSink,
        request: &ClaimRequest,
    ) -> Result<u64> {
        match self.execute(ctx, bank, events, request) {
            Ok(amount) => {
                tracing::info!(
                    address = %request.address,
                    zone = %request.chain_id,
                    action = request.action,
                    amount,
                    height = ctx.height,
                    "Claim settled"
                );
                Ok(amount)
            }
            Err(err) => {
                tracing::warn!(
                    address = %request.address,
                    zone = %request.chain_id,
                    action = request.action,
                    error = %err,
                    "Claim rejected"
                );
                Err(err)
            }
        }
    }

    fn execute(
        &mut self,
        ctx: &BlockContext,
        bank: &mut dyn Bank,
        events: &mut dyn EventSink,
        request: &ClaimRequest,
    ) -> Result<u64> {
        let action = Action::from_code(request.action)?;
        let address = Address::parse(&request.address)?;
        let record = self.records.require(&request.chain_id, &address)?;
        if record.has_completed(action) {
            return Err(ZonedropError::AlreadyClaimed {
                action,
                chain_id: record.chain_id.clone(),
                address: record.address.to_string(),
            });
        }

        let handler = self.handlers.get(action)?;
        let verifier = Verifier::new(self.views, &self.config);
        handler.check(&verifier, record, &request.proofs)?;
        if !handler.settles() {
            return Ok(0);
        }

        let zone_drop = self
            .zone_drops
            .get(&request.chain_id)
            .ok_or_else(|| ZonedropError::not_found("zone drop", request.chain_id.as_str()))?;
        let mut staged = record.clone();
        let amount = settle_action(ctx, self.schedule, zone_drop, &mut staged, action)?;

        let coins = Coins::single(self.views.staking.bond_denom(), amount);
        if !coins.is_empty() {
            let escrow = self.config.escrow_account(&request.chain_id);
            bank.send_from_escrow_to_account(&escrow, &address, &coins)
                .map_err(|err| ZonedropError::TransferFailed {
                    escrow,
                    address: address.to_string(),
                    coins: coins.to_string(),
                    reason: err.to_string(),
                })?;
        }

        self.records.set(staged)?;
        events.emit(ClaimEvent::new(
            ctx,
            address,
            request.chain_id.clone(),
            action,
            amount,
            coins,
        ));
        Ok(amount)
    }
}

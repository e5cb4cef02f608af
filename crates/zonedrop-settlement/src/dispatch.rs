//! Action → verifier dispatch table.
//!
//! | Action            | Handler                                 |
//! |-------------------|-----------------------------------------|
//! | InitialClaim      | `Noop` (pays nothing, records nothing)  |
//! | DepositT1..T5     | `Deposit(threshold)`                    |
//! | StakeQCK          | bonded delegation                       |
//! | SignalIntent      | zone intent                             |
//! | QSGov             | governance participation                |
//! | Osmosis           | cross-chain liquidity proofs            |
//!
//! Actions missing from the table are defined but not claimable yet and
//! fail with `NotImplemented`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use zonedrop_types::{Action, ClaimRecord, Proof, Result, ZonedropError};
use zonedrop_verify::Verifier;

/// Eligibility check for one action.
pub type VerifyFn = fn(&Verifier<'_>, &ClaimRecord, &[Proof]) -> Result<()>;

#[derive(Clone, Copy)]
pub enum Handler {
    /// Accepted without verification and without effect.
    Noop,
    /// Deposits must reach this fraction of the record's base value.
    Deposit(Decimal),
    Verify(VerifyFn),
}

impl Handler {
    /// Run the eligibility check for `record`.
    pub fn check(
        &self,
        verifier: &Verifier<'_>,
        record: &ClaimRecord,
        proofs: &[Proof],
    ) -> Result<()> {
        match self {
            Self::Noop => Ok(()),
            Self::Deposit(threshold) => verifier.verify_deposit(record, *threshold),
            Self::Verify(f) => f(verifier, record, proofs),
        }
    }

    /// Whether a successful check settles anything.
    #[must_use]
    pub fn settles(&self) -> bool {
        !matches!(self, Self::Noop)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Deposit(t) => write!(f, "Deposit({t})"),
            Self::Verify(_) => f.write_str("Verify(..)"),
        }
    }
}

fn bonded_delegation(v: &Verifier<'_>, record: &ClaimRecord, _: &[Proof]) -> Result<()> {
    v.verify_bonded_delegation(&record.address)
}

fn zone_intent(v: &Verifier<'_>, record: &ClaimRecord, _: &[Proof]) -> Result<()> {
    v.verify_zone_intent(&record.chain_id, &record.address)
}

fn governance(v: &Verifier<'_>, record: &ClaimRecord, _: &[Proof]) -> Result<()> {
    v.verify_governance_participation(&record.address)
}

fn liquidity(v: &Verifier<'_>, record: &ClaimRecord, proofs: &[Proof]) -> Result<()> {
    v.verify_liquidity(proofs, record)
}

/// The handlers an engine dispatches to.
#[derive(Debug, Clone)]
pub struct HandlerTable {
    handlers: BTreeMap<Action, Handler>,
}

impl Default for HandlerTable {
    fn default() -> Self {
        let mut handlers = BTreeMap::new();
        handlers.insert(Action::InitialClaim, Handler::Noop);
        for tier in Action::DEPOSIT_TIERS {
            if let Some(threshold) = tier.deposit_threshold() {
                handlers.insert(tier, Handler::Deposit(threshold));
            }
        }
        handlers.insert(Action::StakeQCK, Handler::Verify(bonded_delegation));
        handlers.insert(Action::SignalIntent, Handler::Verify(zone_intent));
        handlers.insert(Action::QSGov, Handler::Verify(governance));
        handlers.insert(Action::Osmosis, Handler::Verify(liquidity));
        Self { handlers }
    }
}

impl HandlerTable {
    /// Handler for `action`, or `NotImplemented`.
    pub fn get(&self, action: Action) -> Result<Handler> {
        self.handlers
            .get(&action)
            .copied()
            .ok_or(ZonedropError::NotImplemented { action })
    }

    /// Install or replace the handler for `action`.
    pub fn insert(&mut self, action: Action, handler: Handler) -> Option<Handler> {
        self.handlers.insert(action, handler)
    }

    pub fn remove(&mut self, action: Action) -> Option<Handler> {
        self.handlers.remove(&action)
    }
}

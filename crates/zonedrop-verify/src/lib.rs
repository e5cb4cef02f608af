//! # zonedrop-verify
//!
//! **Eligibility plane**: pure predicates deciding whether a claim record
//! has earned an action, evaluated against read-only views of the chain.
//!
//! ## Architecture
//!
//! The verifiers never mutate state. Everything they read comes through
//! the collaborator traits in [`keepers`], bundled into [`ChainViews`]:
//! 1. **Deposit**: summed zone receipts ≥ tier fraction × base value
//! 2. **Participation**: bonded delegation, zone intent, governance votes
//! 3. **Proof**: remote key/value assertions authenticated by the light client
//! 4. **Liquidity**: pro-rata pool valuation of authenticated locked positions
//!
//! ```text
//! ClaimRecord ─▶ Verifier ─┬─▶ ZoneRegistry / DepositLedger
//!                          ├─▶ StakingView / IntentStore / GovernanceView
//!                          └─▶ ProofChecker ─▶ LockedResponse ─▶ ProtocolDataStore
//! ```

pub mod deposit;
pub mod keepers;
pub mod liquidity;
pub mod participation;
pub mod proof;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;
pub mod verifier;

pub use deposit::deposit_target;
pub use keepers::{
    ChainViews, DepositLedger, GovernanceView, IntentStore, ProofChecker, ProtocolDataStore,
    StakingView, ZoneRegistry,
};
pub use liquidity::{pool_id_for_denom, user_asset_amount};
pub use verifier::Verifier;

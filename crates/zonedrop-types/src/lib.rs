//! # zonedrop-types
//!
//! Shared types, errors, and configuration for the **ZoneDrop** claim engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`ChainId`], [`BlockContext`]
//! - **Claim model**: [`Action`], [`ClaimRecord`], [`CompletedAction`]
//! - **Cross-chain evidence**: [`Proof`], [`ProofOp`], [`LockedResponse`]
//! - **Ledger values**: [`Coin`], [`Coins`]
//! - **External state views**: [`ZoneConfig`], [`DepositReceipt`], [`DelegatorIntent`], [`Vote`]
//! - **Pool model**: [`ProtocolData`], [`OsmosisPoolProtocolData`]
//! - **Registration**: [`ZoneDrop`], [`RegisterZoneDropProposal`]
//! - **Events**: [`ClaimEvent`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`ZonedropError`] with `ZD_ERR_` prefix codes
//! - **Constants**: deposit tier thresholds and defaults

pub mod action;
pub mod claim;
pub mod coin;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod pool;
pub mod proof;
pub mod zone;
pub mod zone_drop;

pub use action::*;
pub use claim::*;
pub use coin::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use pool::*;
pub use proof::*;
pub use zone::*;
pub use zone_drop::*;

// Constants are accessed via `zonedrop_types::constants::FOO`
// (not re-exported to avoid name collisions).

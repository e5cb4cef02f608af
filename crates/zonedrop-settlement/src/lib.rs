//! # zonedrop-settlement
//!
//! **Claim plane**: claim record storage, reward schedule, verifier
//! dispatch, cascading settlement, and the [`ClaimEngine`] that ties them
//! together.
//!
//! ## Architecture
//!
//! A claim request flows through:
//! 1. Action parsing and the one-shot check (`AlreadyClaimed`)
//! 2. The dispatch table, which picks the verifier for the action
//! 3. Cascading settlement on a staged copy of the claim record
//! 4. The escrow → user transfer through the [`Bank`]
//! 5. Committing the staged record and emitting a [`ClaimEvent`]
//!
//! ```text
//! ClaimRequest ─▶ ClaimEngine ─▶ dispatch ─▶ Verifier (zonedrop-verify)
//!                      │
//!                      ├─▶ cascade ─▶ RewardSchedule   (staged record)
//!                      ├─▶ Bank::send_from_escrow_to_account
//!                      └─▶ ClaimRecordStore::set ─▶ EventSink::emit
//! ```
//!
//! If any step before the commit fails the store is untouched.
//!
//! [`ClaimEvent`]: zonedrop_types::ClaimEvent

pub mod cascade;
pub mod dispatch;
pub mod engine;
pub mod ledger;
pub mod record_store;
pub mod schedule;

pub use cascade::settle_action;
pub use dispatch::{Handler, HandlerTable};
pub use engine::{ClaimEngine, ClaimRequest};
pub use ledger::{Bank, EventSink, MemoryBank};
pub use record_store::ClaimRecordStore;
pub use schedule::{RewardSchedule, ZoneDropSchedule};

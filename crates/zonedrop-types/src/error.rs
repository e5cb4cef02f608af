//! Error types for the ZoneDrop claim engine.
//!
//! All errors use the `ZD_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Claim / action errors
//! - 2xx: Eligibility errors
//! - 3xx: Proof / cross-chain errors
//! - 4xx: Liquidity pool errors
//! - 5xx: Ledger errors
//! - 6xx: Registration errors
//! - 9xx: General / internal errors
//!
//! No error is retried internally: each one is either unmet eligibility
//! (the user must act elsewhere first) or a caller mistake.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Action, ChainId};

/// Central error enum for all ZoneDrop operations.
#[derive(Debug, Error)]
pub enum ZonedropError {
    // =================================================================
    // Claim / Action Errors (1xx)
    // =================================================================
    /// The action is already present in the claim record.
    #[error("ZD_ERR_100: {action} already completed for {address} on {chain_id}")]
    AlreadyClaimed {
        action: Action,
        chain_id: ChainId,
        address: String,
    },

    /// The action is defined but has no handler.
    #[error("ZD_ERR_101: handler not implemented for [{}] {action}", action.code())]
    NotImplemented { action: Action },

    /// The action code is not a claimable action.
    #[error("ZD_ERR_102: undefined action [{0}]")]
    InvalidAction(i32),

    /// A zone, record, zone drop, or pool could not be found.
    #[error("ZD_ERR_103: {kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The address is not a well-formed bech32 account address.
    #[error("ZD_ERR_104: invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    // =================================================================
    // Eligibility Errors (2xx)
    // =================================================================
    /// The user has not reached the required amount for an action.
    #[error("ZD_ERR_200: insufficient amount ({context}): required {required}, got {actual}")]
    InsufficientAmount {
        context: String,
        required: Decimal,
        actual: Decimal,
    },

    /// The user's provided liquidity is below the liquidity target.
    #[error("ZD_ERR_201: insufficient liquidity on {chain_id}: need {required}, got {actual}")]
    InsufficientLiquidity {
        chain_id: ChainId,
        required: Decimal,
        actual: Decimal,
    },

    // =================================================================
    // Proof / Cross-chain Errors (3xx)
    // =================================================================
    /// Two proofs in one claim request share a key.
    #[error("ZD_ERR_300: duplicate proof submitted at index {index}, key {key_hex}")]
    DuplicateProof { index: usize, key_hex: String },

    /// The action needs at least one proof and none was supplied.
    #[error("ZD_ERR_301: {action} expects at least one proof")]
    NoProofs { action: Action },

    /// The consensus-proof checker rejected a proof.
    #[error("ZD_ERR_302: proofs [{index}]: verification failed: {reason}")]
    VerificationFailed { index: usize, reason: String },

    /// A locked position belongs to someone other than the claimant.
    #[error("ZD_ERR_303: proofs [{index}]: invalid lock owner, expected {expected} got {actual}")]
    OwnerMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    // =================================================================
    // Liquidity Pool Errors (4xx)
    // =================================================================
    /// A pool share denomination could not be mapped to a pool id.
    #[error("ZD_ERR_400: invalid pool denom {denom:?}: {reason}")]
    InvalidDenom { denom: String, reason: String },

    /// The pool has no asset for the claim record's zone.
    #[error("ZD_ERR_401: invalid zone, pool {pool_id} zone must match {chain_id}")]
    InvalidZone { pool_id: String, chain_id: ChainId },

    /// The pool has zero total shares.
    #[error("ZD_ERR_402: empty pool, {pool_id}")]
    EmptyPool { pool_id: String },

    // =================================================================
    // Ledger Errors (5xx)
    // =================================================================
    /// The escrow → user transfer failed; nothing was committed.
    #[error("ZD_ERR_500: transfer of {coins} from {escrow} to {address} failed: {reason}")]
    TransferFailed {
        escrow: String,
        address: String,
        coins: String,
        reason: String,
    },

    // =================================================================
    // Registration Errors (6xx)
    // =================================================================
    /// A zone drop is already registered for this chain.
    #[error("ZD_ERR_600: zone drop already registered for {0}")]
    ZoneDropExists(ChainId),

    /// The zone drop has not started or has fully decayed.
    #[error("ZD_ERR_601: zone drop for {chain_id} is not active")]
    ZoneDropInactive { chain_id: ChainId },

    /// A registration proposal or zone drop failed validation.
    #[error("ZD_ERR_602: invalid proposal: {reason}")]
    InvalidProposal { reason: String },

    /// A claim record failed validation.
    #[error("ZD_ERR_603: invalid claim record: {reason}")]
    InvalidClaimRecord { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Decimal arithmetic exceeded the representable range.
    #[error("ZD_ERR_900: arithmetic overflow: {context}")]
    ArithmeticOverflow { context: String },

    /// Serialization / deserialization error.
    #[error("ZD_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// An external collaborator reported a failure.
    #[error("ZD_ERR_902: External collaborator error: {0}")]
    External(String),

    /// Unrecoverable internal error.
    #[error("ZD_ERR_999: Internal error: {0}")]
    Internal(String),
}

impl ZonedropError {
    /// Shorthand for [`ZonedropError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ZonedropError>;

impl From<serde_json::Error> for ZonedropError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = ZonedropError::InvalidAction(42);
        let msg = format!("{err}");
        assert!(msg.starts_with("ZD_ERR_102"), "Got: {msg}");
        assert!(msg.contains("42"));
    }

    #[test]
    fn insufficient_amount_display() {
        let err = ZonedropError::InsufficientAmount {
            context: "ActionDepositT2 on cosmoshub-4".into(),
            required: Decimal::new(100, 0),
            actual: Decimal::new(99, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("ZD_ERR_200"));
        assert!(msg.contains("cosmoshub-4"));
        assert!(msg.contains("100"));
        assert!(msg.contains("99"));
    }

    #[test]
    fn not_implemented_shows_code_and_name() {
        let err = ZonedropError::NotImplemented { action: Action::GbP };
        let msg = format!("{err}");
        assert!(msg.contains("[10]"), "Got: {msg}");
        assert!(msg.contains("ActionGbP"), "Got: {msg}");
    }

    #[test]
    fn all_errors_have_zd_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(ZonedropError::not_found("zone", "osmosis-1")),
            Box::new(ZonedropError::EmptyPool {
                pool_id: "osmosis/pool/1".into(),
            }),
            Box::new(ZonedropError::VerificationFailed {
                index: 3,
                reason: "bad root".into(),
            }),
            Box::new(ZonedropError::ZoneDropExists("cosmoshub-4".into())),
            Box::new(ZonedropError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("ZD_ERR_"),
                "Error missing ZD_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: ZonedropError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, ZonedropError::Serialization(_)));
    }
}

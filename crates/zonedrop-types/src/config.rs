//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Static parameters of a claim engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Account prefix identifying the liquidity chain among registered zones.
    pub liquidity_account_prefix: String,
    /// Remote store key lockup proofs are checked against.
    pub lockup_store_key: String,
    /// Prefix of liquidity pool protocol data ids.
    pub pool_id_prefix: String,
    /// Module account prefix for per-zone escrow accounts.
    pub escrow_account_prefix: String,
    /// Decimal places kept on pool share ratios.
    pub share_ratio_precision: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            liquidity_account_prefix: constants::DEFAULT_LIQUIDITY_ACCOUNT_PREFIX.to_string(),
            lockup_store_key: constants::DEFAULT_LOCKUP_STORE_KEY.to_string(),
            pool_id_prefix: constants::DEFAULT_POOL_ID_PREFIX.to_string(),
            escrow_account_prefix: constants::DEFAULT_ESCROW_ACCOUNT_PREFIX.to_string(),
            share_ratio_precision: constants::SHARE_RATIO_PRECISION,
        }
    }
}

impl EngineConfig {
    /// Escrow account funding the zone drop of `chain_id` (`zonedrop.cosmoshub-4`).
    #[must_use]
    pub fn escrow_account(&self, chain_id: &str) -> String {
        format!("{}.{chain_id}", self.escrow_account_prefix)
    }
}

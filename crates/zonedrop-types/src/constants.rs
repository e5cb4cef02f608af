//! System-wide constants for the ZoneDrop claim engine.

use rust_decimal::Decimal;

/// Deposit tier 1 threshold, in hundredths of the claim record's base value.
pub const TIER_1_PERCENT: i64 = 5;

/// Deposit tier 2 threshold, in hundredths of the base value.
pub const TIER_2_PERCENT: i64 = 10;

/// Deposit tier 3 threshold, in hundredths of the base value.
pub const TIER_3_PERCENT: i64 = 15;

/// Deposit tier 4 threshold, in hundredths of the base value.
/// Also the floor for the liquidity-provision action.
pub const TIER_4_PERCENT: i64 = 22;

/// Deposit tier 5 threshold, in hundredths of the base value.
pub const TIER_5_PERCENT: i64 = 30;

/// Exact decimal fraction for a tier expressed in percent (`22` → `0.22`).
#[must_use]
pub fn tier_threshold(percent: i64) -> Decimal {
    Decimal::new(percent, 2)
}

/// Proto-style wire code of the highest defined action.
pub const MAX_ACTION_CODE: i32 = 11;

/// Account prefix identifying the remote liquidity chain.
pub const DEFAULT_LIQUIDITY_ACCOUNT_PREFIX: &str = "osmo";

/// Remote store holding locked liquidity positions.
pub const DEFAULT_LOCKUP_STORE_KEY: &str = "lockup";

/// Protocol data id prefix for liquidity pools (`osmosis/pool/<id>`).
pub const DEFAULT_POOL_ID_PREFIX: &str = "osmosis/pool";

/// Protocol data kind used to decode liquidity pool records.
pub const DEFAULT_POOL_PROTOCOL_KIND: &str = "osmosispool";

/// Module account prefix for per-chain escrow accounts (`zonedrop.<chain>`).
pub const DEFAULT_ESCROW_ACCOUNT_PREFIX: &str = "zonedrop";

/// Decimal places kept on a pool share ratio before the final multiply.
pub const SHARE_RATIO_PRECISION: u32 = 18;

/// Maximum proposal title length (governance content limit).
pub const MAX_TITLE_LEN: usize = 140;

/// Maximum proposal description length (governance content limit).
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Maximum length of an encoded bech32 address.
pub const MAX_ADDRESS_LEN: usize = 90;

/// Proposal type string for zone drop registration.
pub const PROPOSAL_TYPE_REGISTER_ZONE_DROP: &str = "RegisterZoneDrop";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

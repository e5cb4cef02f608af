//! Cross-chain liquidity verification and pool valuation.
//!
//! ## Flow
//!
//! ```text
//! proofs ──▶ dedupe key ──▶ authenticate ──▶ decode lock ──▶ owner check
//!        ──▶ pool id from share denom ──▶ pool metadata ──▶ zone denom
//!        ──▶ floor(user_shares / total_shares × zone_liquidity) ──▶ Σ
//! Σ ≥ trunc(tier4 × (base_value / 2))  and  deposits ≥ tier4
//! ```
//!
//! The share ratio is cut to a fixed number of decimal places and the
//! product is truncated once, so every replaying node computes the same
//! integer amount. Neither step goes through a rounded `Decimal`
//! quotient; pools near the 28-digit limit value the same as small ones.

use std::collections::HashSet;

use rust_decimal::Decimal;
use zonedrop_types::{
    Action, ClaimRecord, LockedResponse, PeriodLock, Proof, Result, ZonedropError,
    constants::{self, tier_threshold},
    unmarshal_protocol_data,
};

use crate::{deposit::deposit_target, verifier::Verifier};

/// Protocol data id of the pool whose share token is `share_denom`.
///
/// The pool number is the suffix after the last `/`:
/// `gamm/pool/7` under prefix `osmosis/pool` → `osmosis/pool/7`.
pub fn pool_id_for_denom(prefix: &str, share_denom: &str) -> Result<String> {
    let invalid = |reason: &str| ZonedropError::InvalidDenom {
        denom: share_denom.to_string(),
        reason: reason.to_string(),
    };
    let sep = share_denom
        .rfind('/')
        .ok_or_else(|| invalid("missing path separator"))?;
    let suffix = &share_denom[sep..];
    if suffix.len() == 1 {
        return Err(invalid("empty pool id"));
    }
    Ok(format!("{prefix}{suffix}"))
}

/// The user's pro-rata claim on a pool's zone asset.
///
/// `ratio = user_shares / total_shares` cut to `precision` decimal places,
/// then `trunc(ratio × zone_liquidity)`. Both steps are computed exactly
/// on the integer mantissas, so the result never rounds up.
pub fn user_asset_amount(
    pool_id: &str,
    user_shares: Decimal,
    total_shares: Decimal,
    zone_liquidity: Decimal,
    precision: u32,
) -> Result<Decimal> {
    if total_shares <= Decimal::ZERO {
        return Err(ZonedropError::EmptyPool {
            pool_id: pool_id.to_string(),
        });
    }
    if user_shares < Decimal::ZERO || zone_liquidity < Decimal::ZERO {
        return Err(ZonedropError::Internal(format!(
            "negative amount valuing {pool_id}: {user_shares} shares, {zone_liquidity} liquidity"
        )));
    }
    floor_share(user_shares, total_shares, zone_liquidity, precision).ok_or_else(|| {
        ZonedropError::ArithmeticOverflow {
            context: format!(
                "share of {pool_id}: {user_shares}/{total_shares} × {zone_liquidity}"
            ),
        }
    })
}

/// Exact `trunc(cut(user / total, precision) × liquidity)` for non-negative
/// inputs, or `None` when an intermediate leaves `u128`.
fn floor_share(
    user_shares: Decimal,
    total_shares: Decimal,
    zone_liquidity: Decimal,
    precision: u32,
) -> Option<Decimal> {
    let parts = |d: Decimal| (d.mantissa().unsigned_abs(), d.scale());
    let (user, user_scale) = parts(user_shares);
    let (total, total_scale) = parts(total_shares);
    let (liquidity, liquidity_scale) = parts(zone_liquidity);
    let pow10 = |exp: u32| 10u128.checked_pow(exp);

    // ratio in units of 10^-precision
    let units = mul_div_floor(
        user,
        pow10(precision.checked_add(total_scale)?)?,
        total.checked_mul(pow10(user_scale)?)?,
    )?;
    let amount = mul_div_floor(
        units,
        liquidity,
        pow10(precision.checked_add(liquidity_scale)?)?,
    )?;
    Decimal::try_from_i128_with_scale(i128::try_from(amount).ok()?, 0).ok()
}

/// `floor(x × y / d)` without a wider intermediate, or `None` when the
/// quotient does not fit.
fn mul_div_floor(x: u128, y: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let (xq, xr) = (x / d, x % d);
    // long multiplication of xr by the bits of y, keeping q·d + r = xr·y so far
    let (mut q, mut r) = (0u128, 0u128);
    for bit in (0..u128::BITS - y.leading_zeros()).rev() {
        q = q.checked_mul(2)?;
        if r >= d - r {
            r -= d - r;
            q += 1;
        } else {
            r *= 2;
        }
        if (y >> bit) & 1 == 1 {
            if r >= d - xr {
                r -= d - xr;
                q = q.checked_add(1)?;
            } else {
                r += xr;
            }
        }
    }
    xq.checked_mul(y)?.checked_add(q)
}

impl Verifier<'_> {
    /// Verify liquidity provided on the liquidity chain, evidenced by
    /// lockup proofs, is worth at least the liquidity target.
    ///
    /// Processing stops at the first failing proof; nothing is accumulated
    /// across calls.
    pub fn verify_liquidity(&self, proofs: &[Proof], record: &ClaimRecord) -> Result<()> {
        let prefix = &self.config.liquidity_account_prefix;
        let zone = self
            .views
            .zones
            .zones()
            .find(|z| z.account_prefix == *prefix)
            .ok_or_else(|| ZonedropError::not_found("liquidity zone", prefix.as_str()))?;

        if proofs.is_empty() {
            return Err(ZonedropError::NoProofs {
                action: Action::Osmosis,
            });
        }

        let mut seen: HashSet<&[u8]> = HashSet::with_capacity(proofs.len());
        let mut provided = Decimal::ZERO;
        for (index, proof) in proofs.iter().enumerate() {
            if !seen.insert(proof.key.as_slice()) {
                return Err(ZonedropError::DuplicateProof {
                    index,
                    key_hex: proof.key_hex(),
                });
            }

            self.authenticate_proof(&zone, index, proof)?;

            let locked = LockedResponse::decode(&proof.data).map_err(|err| {
                ZonedropError::Serialization(format!("proofs [{index}]: {err}"))
            })?;
            if locked.lock.owner != record.address.as_str() {
                return Err(ZonedropError::OwnerMismatch {
                    index,
                    expected: record.address.to_string(),
                    actual: locked.lock.owner,
                });
            }

            let amount = self.pool_asset_amount(&locked.lock, record)?;
            provided = provided
                .checked_add(amount)
                .ok_or_else(|| ZonedropError::ArithmeticOverflow {
                    context: format!("liquidity sum at proof [{index}]"),
                })?;

            tracing::debug!(
                index,
                lock = locked.lock.id,
                %amount,
                %provided,
                "Locked liquidity valued"
            );
        }

        let floor = tier_threshold(constants::TIER_4_PERCENT);
        self.verify_deposit(record, floor).map_err(|err| match err {
            ZonedropError::InsufficientAmount {
                context,
                required,
                actual,
            } => ZonedropError::InsufficientAmount {
                context: format!(
                    "{}: {context}, must reach at least {floor} of {}",
                    Action::Osmosis,
                    record.base_value
                ),
                required,
                actual,
            },
            other => other,
        })?;

        let target = deposit_target(floor, record.base_value / 2)?;
        if provided < target {
            return Err(ZonedropError::InsufficientLiquidity {
                chain_id: record.chain_id.clone(),
                required: target,
                actual: provided,
            });
        }
        Ok(())
    }

    /// Value of `lock` in the record zone's asset.
    fn pool_asset_amount(&self, lock: &PeriodLock, record: &ClaimRecord) -> Result<Decimal> {
        let share_denom = lock
            .coins
            .denom_by_index(0)
            .ok_or_else(|| ZonedropError::InvalidDenom {
                denom: String::new(),
                reason: format!("lock {} holds no coins", lock.id),
            })?;
        let pool_id = pool_id_for_denom(&self.config.pool_id_prefix, share_denom)?;

        let raw = self
            .views
            .protocol_data
            .protocol_data(&pool_id)
            .ok_or_else(|| ZonedropError::not_found("protocol data", pool_id.as_str()))?;
        let pool = unmarshal_protocol_data(&raw.kind, &raw.data)?;

        let zone_denom =
            pool.zone_denom(&record.chain_id)
                .ok_or_else(|| ZonedropError::InvalidZone {
                    pool_id: pool_id.clone(),
                    chain_id: record.chain_id.clone(),
                })?;

        user_asset_amount(
            &pool_id,
            lock.coins.amount_of(share_denom),
            pool.total_shares(),
            pool.total_pool_liquidity().amount_of(zone_denom),
            self.config.share_ratio_precision,
        )
    }
}

//! Reward schedule: how much an action pays right now.
//!
//! ```text
//! claimable(action) = trunc(max_allocation × weight(action) × decay(now))
//! ```

use rust_decimal::{Decimal, prelude::ToPrimitive};
use zonedrop_types::{Action, BlockContext, ClaimRecord, Result, ZoneDrop, ZonedropError};

/// Source of per-action claimable amounts.
pub trait RewardSchedule {
    /// Amount `record` may claim for `action` at `ctx.time`.
    fn claimable_amount_for_action(
        &self,
        ctx: &BlockContext,
        zone_drop: &ZoneDrop,
        record: &ClaimRecord,
        action: Action,
    ) -> Result<u64>;
}

/// Weights and linear decay taken from the registered [`ZoneDrop`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneDropSchedule;

impl RewardSchedule for ZoneDropSchedule {
    fn claimable_amount_for_action(
        &self,
        ctx: &BlockContext,
        zone_drop: &ZoneDrop,
        record: &ClaimRecord,
        action: Action,
    ) -> Result<u64> {
        if !zone_drop.is_active(ctx.time) {
            return Err(ZonedropError::ZoneDropInactive {
                chain_id: zone_drop.chain_id.clone(),
            });
        }
        let weight = zone_drop
            .action_weight(action)
            .ok_or(ZonedropError::InvalidAction(action.code()))?;

        let overflow = || ZonedropError::ArithmeticOverflow {
            context: format!("{action} reward for {}", record.address),
        };
        let amount = Decimal::from(record.max_allocation)
            .checked_mul(weight)
            .and_then(|v| v.checked_mul(zone_drop.decay_factor(ctx.time)))
            .ok_or_else(overflow)?
            .trunc();
        amount.to_u64().ok_or_else(overflow)
    }
}

//! Deposit threshold verification.
//!
//! A deposit tier is reached when the user's summed deposits into the
//! zone, in the zone's base denom, are at least
//! `trunc(threshold × base_value)`. The boundary is inclusive.

use rust_decimal::Decimal;
use zonedrop_types::{ClaimRecord, Result, ZonedropError};

use crate::verifier::Verifier;

/// Integer deposit target for a tier: `threshold × base_value`, truncated
/// toward zero.
pub fn deposit_target(threshold: Decimal, base_value: u64) -> Result<Decimal> {
    threshold
        .checked_mul(Decimal::from(base_value))
        .map(|t| t.trunc())
        .ok_or_else(|| ZonedropError::ArithmeticOverflow {
            context: format!("{threshold} × {base_value}"),
        })
}

impl Verifier<'_> {
    /// Check that `record`'s owner has deposited at least `threshold` of
    /// its base value into the record's zone.
    ///
    /// # Errors
    /// - `NotFound` if the zone is not registered
    /// - `External` if the receipts cannot be read
    /// - `InsufficientAmount` if the deposits fall short
    pub fn verify_deposit(&self, record: &ClaimRecord, threshold: Decimal) -> Result<()> {
        let zone = self.zone(&record.chain_id)?;

        let receipts = self
            .views
            .deposits
            .user_zone_receipts(&zone, &record.address)
            .map_err(|err| {
                ZonedropError::External(format!(
                    "unable to obtain zone receipts for {} on zone {}: {err}",
                    record.address, record.chain_id
                ))
            })?;

        let deposited: Decimal = receipts
            .iter()
            .map(|r| r.amount.amount_of(&zone.base_denom))
            .sum();
        let target = deposit_target(threshold, record.base_value)?;

        if deposited < target {
            return Err(ZonedropError::InsufficientAmount {
                context: format!(
                    "deposits by {} on {} at threshold {threshold}",
                    record.address, record.chain_id
                ),
                required: target,
                actual: deposited,
            });
        }

        tracing::debug!(
            address = %record.address,
            zone = %record.chain_id,
            %threshold,
            %deposited,
            %target,
            receipts = receipts.len(),
            "Deposit threshold reached"
        );
        Ok(())
    }
}

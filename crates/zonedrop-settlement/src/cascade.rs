//! Cascading settlement.
//!
//! Deposit tiers are cumulative: reaching T3 implies T1 and T2 were
//! reached too. Claiming a tier therefore settles every lower tier that
//! is still open, in ascending order, in the same step:
//!
//! ```text
//! before:  { T1 }                     claim T4
//! after:   { T1, T2, T3, T4 }         paid = c(T2) + c(T3) + c(T4)
//! ```
//!
//! Every other action settles on its own.

use zonedrop_types::{
    Action, BlockContext, ClaimRecord, CompletedAction, Result, ZoneDrop, ZonedropError,
};

use crate::schedule::RewardSchedule;

/// Settle `action` (and for deposit tiers, every open lower tier) on
/// `record`, returning the total credited.
///
/// All amounts are looked up before the record is touched; on error the
/// record is unchanged.
pub fn settle_action(
    ctx: &BlockContext,
    schedule: &dyn RewardSchedule,
    zone_drop: &ZoneDrop,
    record: &mut ClaimRecord,
    action: Action,
) -> Result<u64> {
    if record.has_completed(action) {
        return Err(ZonedropError::AlreadyClaimed {
            action,
            chain_id: record.chain_id.clone(),
            address: record.address.to_string(),
        });
    }

    let settle: Vec<Action> = if action.is_deposit_tier() {
        action
            .tiers_through()
            .filter(|tier| !record.has_completed(*tier))
            .collect()
    } else {
        vec![action]
    };

    let mut amounts = Vec::with_capacity(settle.len());
    let mut total = 0u64;
    for a in settle {
        let amount = schedule.claimable_amount_for_action(ctx, zone_drop, record, a)?;
        total = total
            .checked_add(amount)
            .ok_or_else(|| ZonedropError::ArithmeticOverflow {
                context: format!("cascade total through {action}"),
            })?;
        amounts.push((a, amount));
    }

    for (a, amount) in amounts {
        record.complete(
            a,
            CompletedAction {
                complete_time: ctx.time,
                claim_amount: amount,
            },
        )?;
        tracing::debug!(
            address = %record.address,
            zone = %record.chain_id,
            action = %a,
            amount,
            "Action settled"
        );
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use zonedrop_types::Address;

    use super::*;
    use crate::schedule::ZoneDropSchedule;

    fn zone_drop() -> ZoneDrop {
        ZoneDrop {
            chain_id: "cosmoshub-4".into(),
            start_time: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            duration: 864_000,
            decay: 864_000,
            allocation: 1_000_000,
            actions: [0, 1, 2, 3, 4, 5, 10, 10, 10, 0, 20]
                .into_iter()
                .map(|p| Decimal::new(p, 2))
                .collect(),
            is_concluded: false,
        }
    }

    fn ctx() -> BlockContext {
        BlockContext::new(7, Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap())
    }

    fn record() -> ClaimRecord {
        ClaimRecord::new(Address::dummy(1), "cosmoshub-4", 10_000, 1_000)
    }

    /// Records which actions were priced.
    struct Recording {
        inner: ZoneDropSchedule,
        seen: RefCell<Vec<Action>>,
        fail_on: Option<Action>,
    }

    impl Recording {
        fn new(fail_on: Option<Action>) -> Self {
            Self {
                inner: ZoneDropSchedule,
                seen: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl RewardSchedule for Recording {
        fn claimable_amount_for_action(
            &self,
            ctx: &BlockContext,
            zone_drop: &ZoneDrop,
            record: &ClaimRecord,
            action: Action,
        ) -> Result<u64> {
            self.seen.borrow_mut().push(action);
            if self.fail_on == Some(action) {
                return Err(ZonedropError::Internal("schedule unavailable".into()));
            }
            self.inner.claimable_amount_for_action(ctx, zone_drop, record, action)
        }
    }

    #[test]
    fn cascade_from_empty_settles_all_lower_tiers() {
        let mut r = record();
        let total =
            settle_action(&ctx(), &ZoneDropSchedule, &zone_drop(), &mut r, Action::DepositT3)
                .unwrap();
        // 10 000 × (0.01 + 0.02 + 0.03)
        assert_eq!(total, 600);
        assert_eq!(r.actions_completed.len(), 3);
        assert_eq!(r.actions_completed[&Action::DepositT1].claim_amount, 100);
        assert_eq!(r.actions_completed[&Action::DepositT2].claim_amount, 200);
        assert_eq!(r.actions_completed[&Action::DepositT3].claim_amount, 300);
        assert!(r.actions_completed.values().all(|c| c.complete_time == ctx().time));
    }

    #[test]
    fn cascade_skips_completed_tiers() {
        let mut r = record();
        let earlier = CompletedAction {
            complete_time: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
            claim_amount: 42,
        };
        r.complete(Action::DepositT1, earlier.clone()).unwrap();

        let schedule = Recording::new(None);
        let total =
            settle_action(&ctx(), &schedule, &zone_drop(), &mut r, Action::DepositT3).unwrap();
        assert_eq!(total, 500);
        assert_eq!(*schedule.seen.borrow(), vec![Action::DepositT2, Action::DepositT3]);
        assert_eq!(r.actions_completed[&Action::DepositT1], earlier);
    }

    #[test]
    fn non_deposit_actions_settle_alone() {
        let mut r = record();
        let total = settle_action(&ctx(), &ZoneDropSchedule, &zone_drop(), &mut r, Action::Osmosis)
            .unwrap();
        assert_eq!(total, 2_000);
        assert_eq!(r.actions_completed.len(), 1);
    }

    #[test]
    fn lookup_failure_leaves_record_untouched() {
        let mut r = record();
        let before = r.clone();
        let schedule = Recording::new(Some(Action::DepositT4));
        let err = settle_action(&ctx(), &schedule, &zone_drop(), &mut r, Action::DepositT5)
            .unwrap_err();
        assert!(matches!(err, ZonedropError::Internal(_)));
        assert_eq!(r, before);
    }

    #[test]
    fn completed_action_rejected() {
        let mut r = record();
        settle_action(&ctx(), &ZoneDropSchedule, &zone_drop(), &mut r, Action::QSGov).unwrap();
        let err = settle_action(&ctx(), &ZoneDropSchedule, &zone_drop(), &mut r, Action::QSGov)
            .unwrap_err();
        assert!(matches!(err, ZonedropError::AlreadyClaimed { action: Action::QSGov, .. }));
    }
}

//! Zone drop registration: the reward schedule for one zone, and the
//! proposal that introduces it together with its claim records.
//!
//! ## Schedule timeline
//!
//! ```text
//!   start_time        start + duration          start + duration + decay
//!       │── full rewards ──│──── linear decay to 0 ────│── inactive
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Action, ChainId, ClaimRecord, Result, ZonedropError, constants};

/// Upper bound accepted for `duration` and `decay` (100 years).
const MAX_PERIOD_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// The airdrop schedule for a single zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDrop {
    pub chain_id: ChainId,
    pub start_time: DateTime<Utc>,
    /// Full-reward period, in seconds.
    pub duration: u64,
    /// Linear decay period following `duration`, in seconds.
    pub decay: u64,
    /// Total tokens allocated to this zone drop.
    pub allocation: u64,
    /// Weight per action, indexed by `action.code() - 1`.
    pub actions: Vec<Decimal>,
    #[serde(default)]
    pub is_concluded: bool,
}

impl ZoneDrop {
    /// Stateless validity checks.
    pub fn validate_basic(&self) -> Result<()> {
        let invalid = |reason: String| Err(ZonedropError::InvalidProposal { reason });

        if self.chain_id.trim().is_empty() {
            return invalid("zone drop chain id must not be empty".into());
        }
        if self.duration == 0 || self.duration > MAX_PERIOD_SECS {
            return invalid(format!("invalid duration {}s", self.duration));
        }
        if self.decay > MAX_PERIOD_SECS {
            return invalid(format!("invalid decay {}s", self.decay));
        }
        if self.allocation == 0 {
            return invalid("allocation must be positive".into());
        }
        let max_actions = usize::try_from(constants::MAX_ACTION_CODE).unwrap_or(usize::MAX);
        if self.actions.is_empty() || self.actions.len() > max_actions {
            return invalid(format!(
                "expects between 1 and {max_actions} action weights, got {}",
                self.actions.len()
            ));
        }

        let mut total = Decimal::ZERO;
        for (i, weight) in self.actions.iter().enumerate() {
            if weight.is_sign_negative() || *weight > Decimal::ONE {
                return invalid(format!("action weight [{i}] {weight} out of range [0, 1]"));
            }
            total += weight;
        }
        if total > Decimal::ONE {
            return invalid(format!("sum of action weights {total} exceeds 1"));
        }
        Ok(())
    }

    /// Reward weight of `action`, if the schedule defines one.
    #[must_use]
    pub fn action_weight(&self, action: Action) -> Option<Decimal> {
        let index = usize::try_from(action.code().checked_sub(1)?).ok()?;
        self.actions.get(index).copied()
    }

    /// End of the full-reward period.
    #[must_use]
    pub fn decay_start(&self) -> DateTime<Utc> {
        offset(self.start_time, self.duration)
    }

    /// Moment the schedule stops paying anything.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        offset(self.decay_start(), self.decay)
    }

    /// Whether claims are accepted at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_concluded && self.start_time <= now && now < self.end_time()
    }

    /// Fraction of full rewards payable at `now`: 1 before decay starts,
    /// falling linearly to 0 at [`Self::end_time`].
    #[must_use]
    pub fn decay_factor(&self, now: DateTime<Utc>) -> Decimal {
        let decay_start = self.decay_start();
        if now <= decay_start {
            return Decimal::ONE;
        }
        if self.decay == 0 || now >= self.end_time() {
            return Decimal::ZERO;
        }
        let elapsed = u64::try_from((now - decay_start).num_seconds()).unwrap_or(0);
        let remaining = self.decay.saturating_sub(elapsed);
        Decimal::from(remaining) / Decimal::from(self.decay)
    }
}

fn offset(from: DateTime<Utc>, secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ---------------------------------------------------------------------------
// RegisterZoneDropProposal
// ---------------------------------------------------------------------------

/// Governance content registering a zone drop and its claim records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterZoneDropProposal {
    pub title: String,
    pub description: String,
    pub zone_drop: ZoneDrop,
    pub claim_records: Vec<ClaimRecord>,
}

impl RegisterZoneDropProposal {
    #[must_use]
    pub fn proposal_type(&self) -> &'static str {
        constants::PROPOSAL_TYPE_REGISTER_ZONE_DROP
    }

    /// Stateless validity checks over the whole proposal.
    pub fn validate_basic(&self) -> Result<()> {
        let invalid = |reason: String| Err(ZonedropError::InvalidProposal { reason });

        if self.title.trim().is_empty() {
            return invalid("proposal title cannot be blank".into());
        }
        if self.title.len() > constants::MAX_TITLE_LEN {
            return invalid(format!(
                "proposal title is longer than max length of {}",
                constants::MAX_TITLE_LEN
            ));
        }
        if self.description.trim().is_empty() {
            return invalid("proposal description cannot be blank".into());
        }
        if self.description.len() > constants::MAX_DESCRIPTION_LEN {
            return invalid(format!(
                "proposal description is longer than max length of {}",
                constants::MAX_DESCRIPTION_LEN
            ));
        }

        self.zone_drop.validate_basic()?;

        let mut seen = HashSet::with_capacity(self.claim_records.len());
        for record in &self.claim_records {
            record.validate_basic()?;
            if record.chain_id != self.zone_drop.chain_id {
                return invalid(format!(
                    "claim record for {} has chain id {}, expected {}",
                    record.address, record.chain_id, self.zone_drop.chain_id
                ));
            }
            if !seen.insert(&record.address) {
                return invalid(format!("duplicate claim record for {}", record.address));
            }
        }
        Ok(())
    }
}

impl fmt::Display for RegisterZoneDropProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zd = &self.zone_drop;
        writeln!(f, "Airdrop - ZoneDrop Registration Proposal:")?;
        writeln!(f, "\tTitle:       {}", self.title)?;
        writeln!(f, "\tDescription: {}", self.description)?;
        writeln!(f, "\tZoneDrop:")?;
        writeln!(f, "\t\tChain ID:   {}", zd.chain_id)?;
        writeln!(f, "\t\tStart Time: {}", zd.start_time.to_rfc3339())?;
        writeln!(f, "\t\tDuration:   {}s", zd.duration)?;
        writeln!(f, "\t\tDecay:      {}s", zd.decay)?;
        writeln!(f, "\t\tAllocation: {}", zd.allocation)?;
        writeln!(f, "\tClaim Records: {}", self.claim_records.len())?;
        write!(f, "\n----------\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Address;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn zone_drop() -> ZoneDrop {
        ZoneDrop {
            chain_id: "cosmoshub-4".into(),
            start_time: start(),
            duration: 1_000,
            decay: 500,
            allocation: 1_000_000,
            actions: vec![
                Decimal::new(10, 2), // InitialClaim
                Decimal::new(5, 2),  // DepositT1
                Decimal::new(5, 2),
                Decimal::new(5, 2),
                Decimal::new(5, 2),
                Decimal::new(5, 2),  // DepositT5
                Decimal::new(15, 2), // StakeQCK
                Decimal::new(10, 2), // SignalIntent
                Decimal::new(10, 2), // QSGov
                Decimal::new(10, 2), // GbP
                Decimal::new(20, 2), // Osmosis
            ],
            is_concluded: false,
        }
    }

    fn proposal() -> RegisterZoneDropProposal {
        RegisterZoneDropProposal {
            title: "Cosmos Hub zone drop".into(),
            description: "Rewards for qAtom depositors".into(),
            zone_drop: zone_drop(),
            claim_records: vec![
                ClaimRecord::new(Address::dummy(1), "cosmoshub-4", 5_000, 1_000),
                ClaimRecord::new(Address::dummy(2), "cosmoshub-4", 7_000, 2_000),
            ],
        }
    }

    #[test]
    fn valid_zone_drop_passes() {
        assert!(zone_drop().validate_basic().is_ok());
    }

    #[test]
    fn weights_over_one_rejected() {
        let mut zd = zone_drop();
        zd.actions[0] = Decimal::new(50, 2);
        let err = zd.validate_basic().unwrap_err();
        assert!(matches!(err, ZonedropError::InvalidProposal { .. }));
    }

    #[test]
    fn too_many_weights_rejected() {
        let mut zd = zone_drop();
        zd.actions.push(Decimal::ZERO);
        assert!(zd.validate_basic().is_err());
    }

    #[test]
    fn action_weight_indexing() {
        let zd = zone_drop();
        assert_eq!(zd.action_weight(Action::InitialClaim), Some(Decimal::new(10, 2)));
        assert_eq!(zd.action_weight(Action::Osmosis), Some(Decimal::new(20, 2)));
        assert_eq!(zd.action_weight(Action::Undefined), None);
    }

    #[test]
    fn decay_is_linear() {
        let zd = zone_drop();
        let at = |secs: i64| start() + TimeDelta::try_seconds(secs).unwrap();
        assert_eq!(zd.decay_factor(at(0)), Decimal::ONE);
        assert_eq!(zd.decay_factor(at(1_000)), Decimal::ONE);
        assert_eq!(zd.decay_factor(at(1_250)), Decimal::new(5, 1));
        assert_eq!(zd.decay_factor(at(1_500)), Decimal::ZERO);
    }

    #[test]
    fn activity_window() {
        let zd = zone_drop();
        let at = |secs: i64| start() + TimeDelta::try_seconds(secs).unwrap();
        assert!(!zd.is_active(at(-1)));
        assert!(zd.is_active(at(0)));
        assert!(zd.is_active(at(1_499)));
        assert!(!zd.is_active(at(1_500)));

        let mut concluded = zd.clone();
        concluded.is_concluded = true;
        assert!(!concluded.is_active(at(10)));
    }

    #[test]
    fn proposal_validation() {
        assert!(proposal().validate_basic().is_ok());
        assert_eq!(proposal().proposal_type(), "RegisterZoneDrop");

        let mut p = proposal();
        p.title = String::new();
        assert!(p.validate_basic().is_err());

        let mut p = proposal();
        p.title = "x".repeat(constants::MAX_TITLE_LEN + 1);
        assert!(p.validate_basic().is_err());

        let mut p = proposal();
        p.claim_records[1].chain_id = "osmosis-1".into();
        assert!(p.validate_basic().is_err());

        let mut p = proposal();
        let dup = p.claim_records[0].clone();
        p.claim_records.push(dup);
        let err = p.validate_basic().unwrap_err();
        assert!(format!("{err}").contains("duplicate claim record"));
    }

    #[test]
    fn display_lists_title_and_zone() {
        let out = proposal().to_string();
        assert!(out.starts_with("Airdrop - ZoneDrop Registration Proposal:"));
        assert!(out.contains("Cosmos Hub zone drop"));
        assert!(out.contains("cosmoshub-4"));
        assert!(out.contains("Claim Records: 2"));
    }
}

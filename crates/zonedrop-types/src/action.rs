//! Claimable actions.
//!
//! Wire codes follow the registration format: `0` is reserved
//! (`Undefined`) and never claimable. Only the deposit tiers carry an
//! ordering that matters: `DepositT1 < DepositT2 < … < DepositT5`.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ZonedropError, constants};

/// A qualifying action a user can claim a reward for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    /// Reserved code 0.
    Undefined,
    /// Registration claim, always succeeds with no payout.
    InitialClaim,
    DepositT1,
    DepositT2,
    DepositT3,
    DepositT4,
    DepositT5,
    /// Bonded delegation of the native staking token.
    StakeQCK,
    /// Validator-selection intent set for the zone.
    SignalIntent,
    /// Voted on a governance proposal.
    QSGov,
    /// Not yet claimable.
    GbP,
    /// Liquidity provided on the remote liquidity chain.
    Osmosis,
}

impl Action {
    /// Every action in wire-code order.
    pub const ALL: [Self; 12] = [
        Self::Undefined,
        Self::InitialClaim,
        Self::DepositT1,
        Self::DepositT2,
        Self::DepositT3,
        Self::DepositT4,
        Self::DepositT5,
        Self::StakeQCK,
        Self::SignalIntent,
        Self::QSGov,
        Self::GbP,
        Self::Osmosis,
    ];

    /// The deposit tiers in ascending order.
    pub const DEPOSIT_TIERS: [Self; 5] = [
        Self::DepositT1,
        Self::DepositT2,
        Self::DepositT3,
        Self::DepositT4,
        Self::DepositT5,
    ];

    /// Parse a wire code into a claimable action.
    ///
    /// # Errors
    /// Returns [`ZonedropError::InvalidAction`] for unknown codes and for
    /// the reserved `Undefined` code.
    pub fn from_code(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .filter(|a| *a != Self::Undefined)
            .ok_or(ZonedropError::InvalidAction(code))
    }

    /// The wire code of this action.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::InitialClaim => 1,
            Self::DepositT1 => 2,
            Self::DepositT2 => 3,
            Self::DepositT3 => 4,
            Self::DepositT4 => 5,
            Self::DepositT5 => 6,
            Self::StakeQCK => 7,
            Self::SignalIntent => 8,
            Self::QSGov => 9,
            Self::GbP => 10,
            Self::Osmosis => constants::MAX_ACTION_CODE,
        }
    }

    #[must_use]
    pub fn is_deposit_tier(self) -> bool {
        Self::DEPOSIT_TIERS.contains(&self)
    }

    /// Fraction of the base value a deposit tier requires.
    #[must_use]
    pub fn deposit_threshold(self) -> Option<Decimal> {
        let percent = match self {
            Self::DepositT1 => constants::TIER_1_PERCENT,
            Self::DepositT2 => constants::TIER_2_PERCENT,
            Self::DepositT3 => constants::TIER_3_PERCENT,
            Self::DepositT4 => constants::TIER_4_PERCENT,
            Self::DepositT5 => constants::TIER_5_PERCENT,
            _ => return None,
        };
        Some(constants::tier_threshold(percent))
    }

    /// Deposit tiers from `DepositT1` up to and including `self`.
    /// Empty for non-deposit actions.
    pub fn tiers_through(self) -> impl Iterator<Item = Self> {
        Self::DEPOSIT_TIERS
            .into_iter()
            .take_while(move |tier| self.is_deposit_tier() && *tier <= self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "ActionUndefined",
            Self::InitialClaim => "ActionInitialClaim",
            Self::DepositT1 => "ActionDepositT1",
            Self::DepositT2 => "ActionDepositT2",
            Self::DepositT3 => "ActionDepositT3",
            Self::DepositT4 => "ActionDepositT4",
            Self::DepositT5 => "ActionDepositT5",
            Self::StakeQCK => "ActionStakeQCK",
            Self::SignalIntent => "ActionSignalIntent",
            Self::QSGov => "ActionQSGov",
            Self::GbP => "ActionGbP",
            Self::Osmosis => "ActionOsmosis",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for action in Action::ALL.into_iter().skip(1) {
            assert_eq!(Action::from_code(action.code()).unwrap(), action);
        }
    }

    #[test]
    fn undefined_and_unknown_codes_rejected() {
        for code in [0, -1, 12, 99, i32::MAX] {
            let err = Action::from_code(code).unwrap_err();
            assert!(matches!(err, ZonedropError::InvalidAction(c) if c == code));
        }
    }

    #[test]
    fn deposit_tiers_are_ordered() {
        assert!(Action::DepositT1 < Action::DepositT2);
        assert!(Action::DepositT4 < Action::DepositT5);
        assert!(!Action::Osmosis.is_deposit_tier());
        assert!(Action::DepositT3.is_deposit_tier());
    }

    #[test]
    fn thresholds_match_tiers() {
        assert_eq!(Action::DepositT1.deposit_threshold(), Some(Decimal::new(5, 2)));
        assert_eq!(Action::DepositT2.deposit_threshold(), Some(Decimal::new(10, 2)));
        assert_eq!(Action::DepositT3.deposit_threshold(), Some(Decimal::new(15, 2)));
        assert_eq!(Action::DepositT4.deposit_threshold(), Some(Decimal::new(22, 2)));
        assert_eq!(Action::DepositT5.deposit_threshold(), Some(Decimal::new(30, 2)));
        assert_eq!(Action::QSGov.deposit_threshold(), None);
    }

    #[test]
    fn tiers_through_is_ascending_and_inclusive() {
        let tiers: Vec<_> = Action::DepositT3.tiers_through().collect();
        assert_eq!(
            tiers,
            vec![Action::DepositT1, Action::DepositT2, Action::DepositT3]
        );
        assert_eq!(Action::DepositT1.tiers_through().count(), 1);
        assert_eq!(Action::StakeQCK.tiers_through().count(), 0);
    }

    #[test]
    fn display_uses_action_prefix() {
        assert_eq!(format!("{}", Action::StakeQCK), "ActionStakeQCK");
        assert_eq!(format!("{}", Action::Osmosis), "ActionOsmosis");
    }
}

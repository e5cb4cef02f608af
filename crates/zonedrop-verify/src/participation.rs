//! Native-chain participation checks: bonded delegation, zone intent, and
//! governance voting. Each is an existence predicate; the amounts in the
//! errors only describe how far off the user is.

use rust_decimal::Decimal;
use zonedrop_types::{Action, Address, Result, ZonedropError};

use crate::verifier::Verifier;

impl Verifier<'_> {
    /// The user must hold a strictly positive bonded delegation.
    pub fn verify_bonded_delegation(&self, address: &Address) -> Result<()> {
        let bonded = self.views.staking.delegator_bonded(address);
        if bonded <= Decimal::ZERO {
            return Err(ZonedropError::InsufficientAmount {
                context: format!("{}: no bonded delegation for {address}", Action::StakeQCK),
                required: Decimal::ONE,
                actual: bonded,
            });
        }
        Ok(())
    }

    /// The user must have a non-empty validator intent for `chain_id`.
    pub fn verify_zone_intent(&self, chain_id: &str, address: &Address) -> Result<()> {
        let zone = self.zone(chain_id)?;

        let signalled = self
            .views
            .intents
            .intent(&zone, address, false)
            .is_some_and(|intent| !intent.is_empty());
        if !signalled {
            return Err(ZonedropError::InsufficientAmount {
                context: format!(
                    "{}: intent not found or no intents set for {address} on {chain_id}",
                    Action::SignalIntent
                ),
                required: Decimal::ONE,
                actual: Decimal::ZERO,
            });
        }
        Ok(())
    }

    /// The user must have voted on at least one proposal. Stops at the
    /// first vote found.
    pub fn verify_governance_participation(&self, address: &Address) -> Result<()> {
        let gov = self.views.governance;
        let voted = gov
            .proposal_ids()
            .any(|id| gov.vote(id, address).is_some());

        if !voted {
            return Err(ZonedropError::InsufficientAmount {
                context: format!("{}: no governance votes by {address}", Action::QSGov),
                required: Decimal::ONE,
                actual: Decimal::ZERO,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{HUB_CHAIN_ID, MockChain};
    use zonedrop_types::EngineConfig;

    fn with_verifier<R>(chain: &MockChain, f: impl FnOnce(Verifier<'_>) -> R) -> R {
        let config = EngineConfig::default();
        f(Verifier::new(chain.views(), &config))
    }

    #[test]
    fn bonded_delegation_must_be_positive() {
        let user = Address::dummy(1);
        let mut chain = MockChain::new();
        let err = with_verifier(&chain, |v| v.verify_bonded_delegation(&user)).unwrap_err();
        assert!(matches!(err, ZonedropError::InsufficientAmount { .. }));
        assert!(format!("{err}").contains("ActionStakeQCK"));

        chain.bond(&user, 1);
        with_verifier(&chain, |v| v.verify_bonded_delegation(&user)).unwrap();
    }

    #[test]
    fn zone_intent_requires_non_empty_set() {
        let user = Address::dummy(1);
        let mut chain = MockChain::new();
        assert!(with_verifier(&chain, |v| v.verify_zone_intent(HUB_CHAIN_ID, &user)).is_err());

        chain.signal_intent(HUB_CHAIN_ID, &user, &[]);
        assert!(with_verifier(&chain, |v| v.verify_zone_intent(HUB_CHAIN_ID, &user)).is_err());

        chain.signal_intent(HUB_CHAIN_ID, &user, &["cosmosvaloper1a", "cosmosvaloper1b"]);
        with_verifier(&chain, |v| v.verify_zone_intent(HUB_CHAIN_ID, &user)).unwrap();
    }

    #[test]
    fn zone_intent_unknown_zone() {
        let user = Address::dummy(1);
        let chain = MockChain::new();
        let err = with_verifier(&chain, |v| v.verify_zone_intent("juno-1", &user)).unwrap_err();
        assert!(matches!(err, ZonedropError::NotFound { .. }));
    }

    #[test]
    fn governance_needs_one_vote() {
        let user = Address::dummy(1);
        let other = Address::dummy(2);
        let mut chain = MockChain::new();
        for id in 1..=5 {
            chain.add_proposal(id);
        }
        chain.vote(2, &other);

        let err = with_verifier(&chain, |v| v.verify_governance_participation(&user)).unwrap_err();
        assert!(matches!(err, ZonedropError::InsufficientAmount { .. }));

        chain.vote(4, &user);
        with_verifier(&chain, |v| v.verify_governance_participation(&user)).unwrap();
    }

    #[test]
    fn governance_with_no_proposals_fails() {
        let chain = MockChain::new();
        let user = Address::dummy(9);
        assert!(with_verifier(&chain, |v| v.verify_governance_participation(&user)).is_err());
    }
}

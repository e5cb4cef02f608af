//! Token movement and event emission.
//!
//! The engine never touches balances directly: rewards leave the zone's
//! escrow account through a [`Bank`], and every paying claim is announced
//! through an [`EventSink`].
//!
//! [`MemoryBank`] is a self-contained ledger that also tracks the supply
//! conservation invariant:
//! ```text
//! ∀ denom: Σ balances == Σ funded
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use zonedrop_types::{Address, ClaimEvent, Coins, Result, ZonedropError};

/// Escrow-to-account transfers.
pub trait Bank {
    /// Move `coins` from the module account `escrow` to `to`.
    ///
    /// Must be all-or-nothing: on error no balance has changed.
    fn send_from_escrow_to_account(&mut self, escrow: &str, to: &Address, coins: &Coins)
    -> Result<()>;
}

/// Append-only sink for claim events.
pub trait EventSink {
    fn emit(&mut self, event: ClaimEvent);
}

impl EventSink for Vec<ClaimEvent> {
    fn emit(&mut self, event: ClaimEvent) {
        self.push(event);
    }
}

/// In-memory account balances keyed by `(account, denom)`.
#[derive(Debug, Default)]
pub struct MemoryBank {
    balances: HashMap<(String, String), Decimal>,
    /// Total ever funded per denom.
    funded: HashMap<String, Decimal>,
    /// When set, every transfer fails with this reason.
    halted: Option<String>,
}

impl MemoryBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `coins` into `account`.
    pub fn fund(&mut self, account: &str, coins: &Coins) {
        for coin in coins.iter() {
            *self
                .balances
                .entry((account.to_string(), coin.denom.clone()))
                .or_insert(Decimal::ZERO) += coin.amount;
            *self
                .funded
                .entry(coin.denom.clone())
                .or_insert(Decimal::ZERO) += coin.amount;
        }
    }

    #[must_use]
    pub fn balance(&self, account: &str, denom: &str) -> Decimal {
        self.balances
            .get(&(account.to_string(), denom.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Make every subsequent transfer fail with `reason`.
    pub fn halt(&mut self, reason: impl Into<String>) {
        self.halted = Some(reason.into());
    }

    pub fn resume(&mut self) {
        self.halted = None;
    }

    /// Check that balances of `denom` still sum to what was funded.
    pub fn verify_supply(&self, denom: &str) -> Result<()> {
        let actual: Decimal = self
            .balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .map(|(_, amount)| *amount)
            .sum();
        let expected = self.funded.get(denom).copied().unwrap_or(Decimal::ZERO);
        if actual != expected {
            return Err(ZonedropError::Internal(format!(
                "supply of {denom} is {actual}, expected {expected}"
            )));
        }
        Ok(())
    }
}

impl Bank for MemoryBank {
    fn send_from_escrow_to_account(
        &mut self,
        escrow: &str,
        to: &Address,
        coins: &Coins,
    ) -> Result<()> {
        if let Some(reason) = &self.halted {
            return Err(ZonedropError::External(reason.clone()));
        }
        for coin in coins.iter() {
            let available = self.balance(escrow, &coin.denom);
            if available < coin.amount {
                return Err(ZonedropError::External(format!(
                    "insufficient funds in {escrow}: {available}{} < {coin}",
                    coin.denom
                )));
            }
        }
        for coin in coins.iter() {
            *self
                .balances
                .entry((escrow.to_string(), coin.denom.clone()))
                .or_insert(Decimal::ZERO) -= coin.amount;
            *self
                .balances
                .entry((to.to_string(), coin.denom.clone()))
                .or_insert(Decimal::ZERO) += coin.amount;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESCROW: &str = "zonedrop.cosmoshub-4";

    #[test]
    fn transfer_moves_funds_and_conserves_supply() {
        let user = Address::dummy(1);
        let mut bank = MemoryBank::new();
        bank.fund(ESCROW, &Coins::single("uqck", 1_000u64));

        bank.send_from_escrow_to_account(ESCROW, &user, &Coins::single("uqck", 300u64))
            .unwrap();
        assert_eq!(bank.balance(ESCROW, "uqck"), Decimal::from(700));
        assert_eq!(bank.balance(user.as_str(), "uqck"), Decimal::from(300));
        bank.verify_supply("uqck").unwrap();
    }

    #[test]
    fn overdraft_changes_nothing() {
        let user = Address::dummy(1);
        let mut bank = MemoryBank::new();
        bank.fund(ESCROW, &Coins::single("uqck", 10u64));

        let coins = Coins::new([
            zonedrop_types::Coin::new("uqck", 5u64),
            zonedrop_types::Coin::new("uatom", 1u64),
        ]);
        let err = bank.send_from_escrow_to_account(ESCROW, &user, &coins).unwrap_err();
        assert!(matches!(err, ZonedropError::External(ref m) if m.contains("insufficient funds")));
        assert_eq!(bank.balance(ESCROW, "uqck"), Decimal::from(10));
        assert_eq!(bank.balance(user.as_str(), "uqck"), Decimal::ZERO);
    }

    #[test]
    fn halted_bank_rejects_transfers() {
        let user = Address::dummy(1);
        let mut bank = MemoryBank::new();
        bank.fund(ESCROW, &Coins::single("uqck", 10u64));
        bank.halt("module account blocked");
        assert!(bank
            .send_from_escrow_to_account(ESCROW, &user, &Coins::single("uqck", 1u64))
            .is_err());
        bank.resume();
        bank.send_from_escrow_to_account(ESCROW, &user, &Coins::single("uqck", 1u64))
            .unwrap();
    }

    #[test]
    fn vec_collects_events() {
        let mut sink: Vec<ClaimEvent> = Vec::new();
        let ctx = zonedrop_types::BlockContext::new(1, chrono::Utc::now());
        sink.emit(ClaimEvent::new(
            &ctx,
            Address::dummy(1),
            "cosmoshub-4".into(),
            zonedrop_types::Action::StakeQCK,
            5,
            Coins::single("uqck", 5u64),
        ));
        assert_eq!(sink.len(), 1);
    }
}

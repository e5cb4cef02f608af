//! Denominated amounts.
//!
//! Amounts are whole base units carried as [`Decimal`] so ratio and
//! threshold arithmetic never leaves exact decimal space.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single denominated amount (e.g. `1000uatom`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Decimal,
}

impl Coin {
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: impl Into<Decimal>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A bag of amounts keyed by denomination.
///
/// Kept sorted by denom with duplicates merged and zero entries dropped,
/// so two bags holding the same value compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a normalised bag from arbitrary coins.
    #[must_use]
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut sorted: Vec<Coin> = coins.into_iter().collect();
        sorted.sort_by(|a, b| a.denom.cmp(&b.denom));

        let mut merged: Vec<Coin> = Vec::with_capacity(sorted.len());
        for coin in sorted {
            match merged.last_mut() {
                Some(last) if last.denom == coin.denom => last.amount += coin.amount,
                _ => merged.push(coin),
            }
        }
        merged.retain(|c| !c.amount.is_zero());
        Self(merged)
    }

    /// A bag with one entry, or empty when `amount` is zero.
    #[must_use]
    pub fn single(denom: impl Into<String>, amount: impl Into<Decimal>) -> Self {
        Self::new([Coin::new(denom, amount)])
    }

    /// Amount held in `denom`, zero if absent.
    #[must_use]
    pub fn amount_of(&self, denom: &str) -> Decimal {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map_or(Decimal::ZERO, |c| c.amount)
    }

    /// Denomination at position `index` in sorted order.
    #[must_use]
    pub fn denom_by_index(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|c| c.denom.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_merges_and_drops_zero() {
        let coins = Coins::new([
            Coin::new("uqck", 5u64),
            Coin::new("uatom", 10u64),
            Coin::new("uqck", 7u64),
            Coin::new("uosmo", 0u64),
        ]);
        assert_eq!(coins.len(), 2);
        assert_eq!(coins.denom_by_index(0), Some("uatom"));
        assert_eq!(coins.amount_of("uqck"), Decimal::new(12, 0));
        assert_eq!(coins.amount_of("uosmo"), Decimal::ZERO);
    }

    #[test]
    fn single_zero_is_empty() {
        assert!(Coins::single("uqck", 0u64).is_empty());
        assert!(!Coins::single("uqck", 1u64).is_empty());
    }

    #[test]
    fn display_is_comma_separated() {
        let coins = Coins::new([Coin::new("uqck", 3u64), Coin::new("uatom", 2u64)]);
        assert_eq!(coins.to_string(), "2uatom,3uqck");
    }

    #[test]
    fn deserialisation_normalises() {
        let json = r#"[
            {"denom":"b","amount":"1"},
            {"denom":"a","amount":"2"},
            {"denom":"b","amount":"3"}
        ]"#;
        let coins: Coins = serde_json::from_str(json).unwrap();
        assert_eq!(coins.denom_by_index(0), Some("a"));
        assert_eq!(coins.amount_of("b"), Decimal::new(4, 0));
    }
}

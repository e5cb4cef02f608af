//! Claim record store, keyed by `(chain_id, address)`.
//!
//! Like a UTXO set, the store only ever grows: records are inserted at
//! registration and afterwards only replaced by a successor that carries
//! every completed action of its predecessor. Iteration order is by key,
//! so every node walks the store identically.

use std::collections::BTreeMap;

use zonedrop_types::{Address, ChainId, ClaimRecord, Result, ZonedropError};

/// Persistent claim records.
#[derive(Debug, Default)]
pub struct ClaimRecordStore {
    records: BTreeMap<(ChainId, Address), ClaimRecord>,
}

impl ClaimRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, chain_id: &str, address: &Address) -> Option<&ClaimRecord> {
        self.records.get(&(chain_id.to_string(), address.clone()))
    }

    /// Look up a record, failing with `NotFound`.
    pub fn require(&self, chain_id: &str, address: &Address) -> Result<&ClaimRecord> {
        self.get(chain_id, address).ok_or_else(|| {
            ZonedropError::not_found("claim record", format!("{chain_id}/{address}"))
        })
    }

    /// Insert a new record.
    ///
    /// # Errors
    /// Returns `InvalidClaimRecord` if a record already exists for the key.
    pub fn insert(&mut self, record: ClaimRecord) -> Result<()> {
        let key = (record.chain_id.clone(), record.address.clone());
        if self.records.contains_key(&key) {
            return Err(ZonedropError::InvalidClaimRecord {
                reason: format!("record for {} on {} already exists", key.1, key.0),
            });
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Replace an existing record with its successor.
    ///
    /// # Errors
    /// - `NotFound` if no record exists for the key
    /// - `Internal` if `record` changes the allocation or base value, or
    ///   drops or rewrites a completed action
    pub fn set(&mut self, record: ClaimRecord) -> Result<()> {
        let key = (record.chain_id.clone(), record.address.clone());
        let current = self.records.get(&key).ok_or_else(|| {
            ZonedropError::not_found("claim record", format!("{}/{}", key.0, key.1))
        })?;

        if record.max_allocation != current.max_allocation
            || record.base_value != current.base_value
        {
            return Err(ZonedropError::Internal(format!(
                "allocation of {} on {} is fixed at {}/{}, got {}/{}",
                key.1,
                key.0,
                current.max_allocation,
                current.base_value,
                record.max_allocation,
                record.base_value
            )));
        }

        let rewritten = current
            .actions_completed
            .iter()
            .find(|(action, done)| record.actions_completed.get(action) != Some(*done));
        if let Some((action, _)) = rewritten {
            return Err(ZonedropError::Internal(format!(
                "completed {action} of {} on {} may not change",
                key.1, key.0
            )));
        }

        self.records.insert(key, record);
        Ok(())
    }

    /// All records, ordered by `(chain_id, address)`.
    pub fn iter(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.records.values()
    }

    /// Records of one zone.
    pub fn for_chain<'a>(&'a self, chain_id: &'a str) -> impl Iterator<Item = &'a ClaimRecord> {
        self.records
            .values()
            .filter(move |r| r.chain_id == chain_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use zonedrop_types::{Action, CompletedAction};

    use super::*;

    fn record(seed: u8, chain: &str) -> ClaimRecord {
        ClaimRecord::new(Address::dummy(seed), chain, 10_000, 1_000)
    }

    fn done(amount: u64) -> CompletedAction {
        CompletedAction {
            complete_time: Utc::now(),
            claim_amount: amount,
        }
    }

    #[test]
    fn insert_and_get() {
        let mut store = ClaimRecordStore::new();
        store.insert(record(1, "cosmoshub-4")).unwrap();
        assert!(store.get("cosmoshub-4", &Address::dummy(1)).is_some());
        assert!(store.get("osmosis-1", &Address::dummy(1)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_insert_blocked() {
        let mut store = ClaimRecordStore::new();
        store.insert(record(1, "cosmoshub-4")).unwrap();
        let err = store.insert(record(1, "cosmoshub-4")).unwrap_err();
        assert!(matches!(err, ZonedropError::InvalidClaimRecord { .. }), "Got: {err:?}");
        // same address on another zone is a different record
        store.insert(record(1, "juno-1")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn require_missing_is_not_found() {
        let store = ClaimRecordStore::new();
        let err = store.require("cosmoshub-4", &Address::dummy(1)).unwrap_err();
        assert!(matches!(err, ZonedropError::NotFound { kind: "claim record", .. }));
    }

    #[test]
    fn set_extends_record() {
        let mut store = ClaimRecordStore::new();
        store.insert(record(1, "cosmoshub-4")).unwrap();

        let mut next = store.require("cosmoshub-4", &Address::dummy(1)).unwrap().clone();
        next.complete(Action::StakeQCK, done(5)).unwrap();
        store.set(next.clone()).unwrap();
        assert_eq!(store.get("cosmoshub-4", &Address::dummy(1)), Some(&next));
    }

    #[test]
    fn set_cannot_drop_completed_action() {
        let mut store = ClaimRecordStore::new();
        let mut r = record(1, "cosmoshub-4");
        r.complete(Action::QSGov, done(7)).unwrap();
        store.insert(r.clone()).unwrap();

        let mut wiped = r.clone();
        wiped.actions_completed.clear();
        assert!(matches!(store.set(wiped).unwrap_err(), ZonedropError::Internal(_)));

        let mut rewritten = r.clone();
        rewritten.actions_completed.insert(Action::QSGov, done(8));
        assert!(store.set(rewritten).is_err());

        let mut rebased = r.clone();
        rebased.base_value = 1;
        assert!(matches!(store.set(rebased).unwrap_err(), ZonedropError::Internal(_)));

        let mut inflated = r.clone();
        inflated.max_allocation = u64::MAX;
        assert!(matches!(store.set(inflated).unwrap_err(), ZonedropError::Internal(_)));

        assert_eq!(store.get("cosmoshub-4", &Address::dummy(1)), Some(&r));
    }

    #[test]
    fn set_unknown_record_fails() {
        let mut store = ClaimRecordStore::new();
        assert!(matches!(
            store.set(record(1, "cosmoshub-4")).unwrap_err(),
            ZonedropError::NotFound { .. }
        ));
    }

    #[test]
    fn for_chain_filters_and_orders() {
        let mut store = ClaimRecordStore::new();
        for seed in [3, 1, 2] {
            store.insert(record(seed, "cosmoshub-4")).unwrap();
        }
        store.insert(record(1, "juno-1")).unwrap();

        let hub: Vec<_> = store.for_chain("cosmoshub-4").collect();
        assert_eq!(hub.len(), 3);
        assert!(hub.windows(2).all(|w| w[0].address < w[1].address));
    }
}

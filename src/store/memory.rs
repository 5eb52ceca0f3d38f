//! In-memory panchang store

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::{PanchangaError, Result};

use super::{CacheKey, PanchangStore, StoredPanchang};

/// Thread-safe in-process store. The natural default: computation is cheap
/// enough that per-process memoization already removes the recompute cost
/// for the hot (date, location) pairs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<CacheKey, StoredPanchang>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PanchangStore for MemoryStore {
    fn get(&self, key: &CacheKey) -> Result<Option<StoredPanchang>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PanchangaError::CacheUnavailable("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &CacheKey, value: StoredPanchang) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PanchangaError::CacheUnavailable("store lock poisoned".to_string()))?;
        if let Entry::Vacant(slot) = entries.entry(*key) {
            slot.insert(value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AnalyticEphemeris, EphemerisProvider};
    use crate::ObservationPoint;
    use chrono::NaiveDate;

    fn sample(day: u32) -> (CacheKey, StoredPanchang) {
        let point = ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            17.38333,
            78.4666,
            5.5,
        );
        let eph = AnalyticEphemeris::new();
        let positions = eph.positions(&point).unwrap();
        let panchang = crate::panchang::compute(&eph, &positions, &point).unwrap();
        let muhurta = crate::muhurta::derive(&panchang, &positions, &point).unwrap();
        (CacheKey::for_point(&point), StoredPanchang { panchang, muhurta })
    }

    #[test]
    fn round_trip() {
        let store = MemoryStore::new();
        let (key, value) = sample(15);
        store.put(&key, value.clone()).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(value));
    }

    #[test]
    fn miss_returns_none() {
        let store = MemoryStore::new();
        let (key, _) = sample(15);
        assert_eq!(store.get(&key).unwrap(), None);
    }

    #[test]
    fn first_writer_wins() {
        let store = MemoryStore::new();
        let (key, first) = sample(15);
        let (_, second) = sample(16);
        store.put(&key, first.clone()).unwrap();
        store.put(&key, second).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(first));
        assert_eq!(store.len(), 1);
    }
}

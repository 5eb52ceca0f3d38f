//! Panchang cache/store
//!
//! Results are deterministic and a past date's almanac never changes, so
//! the store is an append-only archive: `put` for an existing key is a
//! no-op (first writer wins) and there is no eviction. The cache is a
//! performance layer, never a correctness dependency — callers degrade to
//! uncached computation when a store operation fails.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::CACHE_COORD_SCALE;
use crate::muhurta::MuhurtaResult;
use crate::panchang::PanchangResult;
use crate::{ObservationPoint, Result};

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Cache key: date plus coordinates rounded to 4 decimal places (~11 m).
/// The coordinates are stored as scaled integers so float noise cannot
/// split a cell into distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Latitude in units of 1e-4 degrees
    pub lat_e4: i32,
    /// Longitude in units of 1e-4 degrees
    pub lon_e4: i32,
}

impl CacheKey {
    /// Build the key for an observation point.
    pub fn for_point(point: &ObservationPoint) -> Self {
        Self {
            date: point.date,
            lat_e4: (point.latitude * CACHE_COORD_SCALE).round() as i32,
            lon_e4: (point.longitude * CACHE_COORD_SCALE).round() as i32,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.date, self.lat_e4, self.lon_e4)
    }
}

/// The persisted tuple: the almanac and its derived windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPanchang {
    /// The computed almanac
    pub panchang: PanchangResult,
    /// The derived muhurta windows (owned 1:1 by the almanac)
    pub muhurta: MuhurtaResult,
}

/// Keyed lookup of previously computed almanacs.
///
/// Implementations must be safe to share across threads; computation is
/// embarrassingly parallel and the store is the only shared state.
pub trait PanchangStore: Send + Sync {
    /// Fetch a previously stored result, if any.
    fn get(&self, key: &CacheKey) -> Result<Option<StoredPanchang>>;

    /// Store a result. A key that already exists is left untouched —
    /// results are deterministic, so the race just wasted one computation.
    fn put(&self, key: &CacheKey, value: StoredPanchang) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn key_rounds_to_four_decimals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let a = CacheKey::for_point(&ObservationPoint::new(date, 17.38333, 78.4666, 5.5));
        let b = CacheKey::for_point(&ObservationPoint::new(date, 17.383349, 78.466551, 5.5));
        assert_eq!(a, b, "sub-cell coordinate noise must not split keys");

        let c = CacheKey::for_point(&ObservationPoint::new(date, 17.3845, 78.4666, 5.5));
        assert_ne!(a, c, "a different cell is a different key");
    }

    #[test]
    fn key_display_is_stable() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let key = CacheKey::for_point(&ObservationPoint::new(date, 17.38333, 78.4666, 5.5));
        assert_eq!(key.to_string(), "2024-01-15:173833:784666");
    }

    #[test]
    fn key_distinguishes_dates() {
        let a = CacheKey::for_point(&ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            17.38333,
            78.4666,
            5.5,
        ));
        let b = CacheKey::for_point(&ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            17.38333,
            78.4666,
            5.5,
        ));
        assert_ne!(a, b);
    }
}

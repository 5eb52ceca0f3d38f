//! Panchanga: Vedic almanac computation engine
//!
//! Given a calendar date, geographic coordinates, and a timezone offset,
//! this crate derives the five panchang elements (tithi, vara, nakshatra,
//! yoga, karana) together with sunrise/sunset, the amanta lunar month,
//! season, solstice half, era years, and the traditional muhurta windows
//! (Brahma Muhurta, Abhijit Muhurta, Rahu Kaal, Yamaganda, Gulika Kaal).
//!
//! Everything is deterministic for a given input — there is no hidden
//! current-time dependency — so results are cached indefinitely through a
//! pluggable store. The [`Panchanga`] façade orchestrates the lookup:
//! cache check, then ephemeris + calculation on a miss, then persistence.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use panchanga::{ObservationPoint, Panchanga};
//!
//! let engine = Panchanga::new();
//! let point = ObservationPoint::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!     17.38333,
//!     78.4666,
//!     5.5,
//! );
//! let bundle = engine.panchang(&point, true).unwrap();
//! println!("{} tithi, sunrise {}", bundle.panchang.tithi.name, bundle.panchang.sun_rise);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constants;
pub mod ephemeris;
pub mod muhurta;
pub mod panchang;
pub mod response;
pub mod store;
pub mod time;

// Re-export commonly used types
pub use ephemeris::{AnalyticEphemeris, CelestialPositions, EphemerisProvider};
pub use muhurta::MuhurtaResult;
pub use panchang::PanchangResult;
pub use response::{PanchangRequest, PanchangResponse};
pub use store::{CacheKey, JsonFileStore, MemoryStore, PanchangStore, StoredPanchang};

/// Main error type for the panchanga library
#[derive(Debug, Error)]
pub enum PanchangaError {
    /// The astronomical source could not produce usable positions.
    /// Retryable.
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    /// Sunrise/sunset ordering is invalid for the location and date
    /// (polar night or midnight sun). Not retryable.
    #[error("No usable sunrise/sunset on {date} at latitude {latitude}")]
    DegenerateDayWindow {
        /// The requested calendar date
        date: NaiveDate,
        /// The observer latitude in degrees
        latitude: f64,
    },

    /// A boundary search exceeded its iteration cap. Treated as a bug
    /// signal; never silently swallowed.
    #[error("Boundary search did not converge: {0}")]
    ConvergenceFailure(&'static str),

    /// The cache/store could not be reached. Computation proceeds
    /// without caching; the façade only logs this.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Invalid calendar input from the caller.
    #[error("Time error: {0}")]
    TimeError(String),
}

/// Result type for panchanga operations
pub type Result<T> = std::result::Result<T, PanchangaError>;

/// One computation request: a calendar date and an observer.
///
/// Two points are cache-equivalent when the date matches and the
/// coordinates agree at 4 decimal places (about 11 m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Observer latitude in degrees, positive north
    pub latitude: f64,
    /// Observer longitude in degrees, positive east
    pub longitude: f64,
    /// Offset from UTC in hours (e.g. 5.5 for IST)
    pub timezone_offset_hours: f64,
}

impl ObservationPoint {
    /// Create an observation point.
    pub fn new(date: NaiveDate, latitude: f64, longitude: f64, timezone_offset_hours: f64) -> Self {
        Self {
            date,
            latitude,
            longitude,
            timezone_offset_hours,
        }
    }

    /// The default observer location (Hyderabad, IST) for the given date,
    /// used by callers when geolocation is unavailable.
    pub fn default_location(date: NaiveDate) -> Self {
        Self::new(
            date,
            constants::DEFAULT_LATITUDE_DEG,
            constants::DEFAULT_LONGITUDE_DEG,
            constants::DEFAULT_TZ_OFFSET_HOURS,
        )
    }
}

/// Where a returned result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Served from the archive
    Database,
    /// Freshly computed for this request
    Computed,
}

/// The combined result handed back by the façade.
#[derive(Debug, Clone, PartialEq)]
pub struct PanchangBundle {
    /// The computed almanac
    pub panchang: PanchangResult,
    /// The derived windows, when requested
    pub muhurta: Option<MuhurtaResult>,
    /// Archive hit or fresh computation
    pub source: Provenance,
}

/// Entry point: cache-first panchang queries.
///
/// Holds the ephemeris provider and the store behind trait objects so
/// either can be swapped; the defaults are the built-in analytic series
/// and an in-memory store.
pub struct Panchanga {
    provider: Box<dyn EphemerisProvider>,
    store: Box<dyn PanchangStore>,
}

impl Panchanga {
    /// Engine with the analytic ephemeris and an in-memory store.
    pub fn new() -> Self {
        Self {
            provider: Box::new(AnalyticEphemeris::new()),
            store: Box::new(MemoryStore::new()),
        }
    }

    /// Replace the store (e.g. with a [`JsonFileStore`]).
    pub fn with_store(mut self, store: Box<dyn PanchangStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the ephemeris provider.
    pub fn with_provider(mut self, provider: Box<dyn EphemerisProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Compute or fetch the almanac for an observation point.
    ///
    /// Flow: cache check → on hit return the archived tuple → on miss
    /// compute positions, the panchang, and the muhurta windows, persist
    /// the tuple, and return it. Computation errors propagate typed;
    /// store errors are logged and the request continues uncached.
    pub fn panchang(&self, point: &ObservationPoint, include_muhurta: bool) -> Result<PanchangBundle> {
        // The longitude series degrade far from J2000; refuse dates where
        // the almanac would be astronomy-shaped noise
        let year = point.date.year();
        if !(1600..=2600).contains(&year) {
            return Err(PanchangaError::TimeError(format!(
                "year {year} is outside the supported range 1600-2600"
            )));
        }

        let key = CacheKey::for_point(point);

        match self.store.get(&key) {
            Ok(Some(stored)) => {
                log::debug!("panchang cache hit for {key}");
                return Ok(PanchangBundle {
                    panchang: stored.panchang,
                    muhurta: include_muhurta.then_some(stored.muhurta),
                    source: Provenance::Database,
                });
            }
            Ok(None) => {}
            Err(err) => {
                // The cache is an optimization, not a dependency
                log::warn!("panchang store lookup failed, computing uncached: {err}");
            }
        }

        let positions = self.provider.positions(point)?;
        let panchang = panchang::compute(self.provider.as_ref(), &positions, point)?;
        let muhurta = muhurta::derive(&panchang, &positions, point)?;

        let stored = StoredPanchang {
            panchang: panchang.clone(),
            muhurta: muhurta.clone(),
        };
        if let Err(err) = self.store.put(&key, stored) {
            log::warn!("panchang store write failed, result not cached: {err}");
        }

        Ok(PanchangBundle {
            panchang,
            muhurta: include_muhurta.then_some(muhurta),
            source: Provenance::Computed,
        })
    }

    /// Compute or fetch the almanac and shape it for the wire.
    pub fn response(&self, point: &ObservationPoint, include_muhurta: bool) -> Result<PanchangResponse> {
        let bundle = self.panchang(point, include_muhurta)?;
        Ok(PanchangResponse::from_results(
            &bundle.panchang,
            bundle.muhurta.as_ref(),
            bundle.source,
        ))
    }
}

impl Default for Panchanga {
    fn default() -> Self {
        Self::new()
    }
}

//! Ephemeris provider: solar/lunar longitudes and rise/set times
//!
//! The almanac engine consumes positions through the [`EphemerisProvider`]
//! trait so the analytic series here can be swapped for a kernel-backed or
//! remote source. Every implementation must be deterministic for identical
//! input — the cache layer depends on it.

use chrono::NaiveDateTime;

use crate::time::local_to_julian_date;
use crate::{ObservationPoint, PanchangaError, Result};

pub mod lunar;
pub mod riseset;
pub mod solar;

pub use riseset::RiseSetOutcome;

/// Sun and Moon state for one observation point, evaluated at the local
/// sunrise reference instant. Computed once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialPositions {
    /// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360)
    pub sun_longitude: f64,
    /// Apparent geocentric ecliptic longitude of the Moon in degrees [0, 360)
    pub moon_longitude: f64,
    /// Local clock time of sunrise
    pub sunrise: NaiveDateTime,
    /// Local clock time of sunset
    pub sunset: NaiveDateTime,
}

/// Source of solar/lunar ephemeris data.
///
/// `sun_longitude_at`/`moon_longitude_at` take a Julian date (UTC) and are
/// what the boundary-crossing searches iterate on; `positions` assembles
/// the per-request snapshot.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360).
    fn sun_longitude_at(&self, jd: f64) -> Result<f64>;

    /// Apparent geocentric ecliptic longitude of the Moon in degrees [0, 360).
    fn moon_longitude_at(&self, jd: f64) -> Result<f64>;

    /// Local sunrise and sunset for the observation point's date.
    fn rise_set(&self, point: &ObservationPoint) -> Result<RiseSetOutcome>;

    /// Full position snapshot for an observation point, evaluated at local
    /// sunrise. Fails with [`PanchangaError::DegenerateDayWindow`] when the
    /// date/location has no sunrise to anchor on.
    fn positions(&self, point: &ObservationPoint) -> Result<CelestialPositions> {
        let (sunrise, sunset) = match self.rise_set(point)? {
            RiseSetOutcome::Event { sunrise, sunset } => (sunrise, sunset),
            RiseSetOutcome::NeverRises | RiseSetOutcome::NeverSets => {
                return Err(PanchangaError::DegenerateDayWindow {
                    date: point.date,
                    latitude: point.latitude,
                });
            }
        };

        let jd = local_to_julian_date(&sunrise, point.timezone_offset_hours);
        let sun_longitude = self.sun_longitude_at(jd)?;
        let moon_longitude = self.moon_longitude_at(jd)?;

        Ok(CelestialPositions {
            sun_longitude,
            moon_longitude,
            sunrise,
            sunset,
        })
    }
}

/// Built-in analytic ephemeris: truncated longitude series plus the
/// hour-angle rise/set solver. Pure CPU, no external data.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    /// Create the analytic provider.
    pub fn new() -> Self {
        Self
    }
}

/// Reject non-finite series output before it can poison downstream math.
fn checked_longitude(value: f64, body: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PanchangaError::EphemerisUnavailable(format!(
            "{body} longitude evaluated to a non-finite value"
        )))
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn sun_longitude_at(&self, jd: f64) -> Result<f64> {
        checked_longitude(solar::apparent_longitude_deg(jd), "solar")
    }

    fn moon_longitude_at(&self, jd: f64) -> Result<f64> {
        checked_longitude(lunar::apparent_longitude_deg(jd), "lunar")
    }

    fn rise_set(&self, point: &ObservationPoint) -> Result<RiseSetOutcome> {
        if !point.latitude.is_finite() || !point.longitude.is_finite() {
            return Err(PanchangaError::EphemerisUnavailable(
                "observer coordinates are not finite".to_string(),
            ));
        }
        Ok(riseset::sun_rise_set(
            point.date,
            point.latitude,
            point.longitude,
            point.timezone_offset_hours,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hyderabad() -> ObservationPoint {
        ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            17.38333,
            78.4666,
            5.5,
        )
    }

    #[test]
    fn positions_snapshot_is_normalized() {
        let eph = AnalyticEphemeris::new();
        let pos = eph.positions(&hyderabad()).unwrap();
        assert!((0.0..360.0).contains(&pos.sun_longitude));
        assert!((0.0..360.0).contains(&pos.moon_longitude));
        assert!(pos.sunset > pos.sunrise);
    }

    #[test]
    fn positions_deterministic() {
        let eph = AnalyticEphemeris::new();
        let a = eph.positions(&hyderabad()).unwrap();
        let b = eph.positions(&hyderabad()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn polar_night_is_degenerate() {
        let eph = AnalyticEphemeris::new();
        let point = ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 12, 21).unwrap(),
            78.0,
            15.6,
            1.0,
        );
        match eph.positions(&point) {
            Err(PanchangaError::DegenerateDayWindow { .. }) => {}
            other => panic!("expected DegenerateDayWindow, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        let eph = AnalyticEphemeris::new();
        let mut point = hyderabad();
        point.latitude = f64::NAN;
        match eph.rise_set(&point) {
            Err(PanchangaError::EphemerisUnavailable(_)) => {}
            other => panic!("expected EphemerisUnavailable, got {other:?}"),
        }
    }
}

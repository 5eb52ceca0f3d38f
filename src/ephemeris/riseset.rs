//! Sunrise and sunset computation
//!
//! Hour-angle method: from the Sun's declination and the equation of time,
//! find when the Sun's center sits at the standard rise/set altitude of
//! -0.8333 deg (refraction plus semidiameter). The declination and the
//! equation of time are re-evaluated at the estimated event time for a few
//! refinement passes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::DAY_MIN;
use crate::time::{julian_date_of_local_midnight, julian_date_to_local};

use super::solar;

/// Standard rise/set altitude of the Sun's center in degrees.
const RISE_SET_ALTITUDE_DEG: f64 = -0.8333;

/// Refinement passes for the event time. The declination changes by at
/// most ~0.4 deg/day, so two passes already settle well below a second.
const REFINEMENT_PASSES: usize = 3;

/// Outcome of a rise/set computation for one date and location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetOutcome {
    /// The Sun rises and sets; local clock times for both events.
    Event {
        sunrise: NaiveDateTime,
        sunset: NaiveDateTime,
    },
    /// Polar night: the Sun stays below the rise/set altitude all day.
    NeverRises,
    /// Midnight sun: the Sun stays above the rise/set altitude all day.
    NeverSets,
}

/// Hour angle of the Sun at the rise/set altitude, in degrees, or `None`
/// when the Sun never reaches that altitude (polar day/night).
fn hour_angle_deg(latitude_deg: f64, declination_deg: f64) -> Option<f64> {
    let phi = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    let h0 = RISE_SET_ALTITUDE_DEG.to_radians();

    let cos_ha = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !(-1.0..=1.0).contains(&cos_ha) {
        return None;
    }
    Some(cos_ha.acos().to_degrees())
}

/// Minutes after local midnight (clock time) of a rise or set event.
///
/// `event_sign` is -1 for sunrise, +1 for sunset. Starts from solar noon
/// and refines against the declination at the event itself.
fn event_minutes(
    jd_local_midnight: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    tz_offset_hours: f64,
    event_sign: f64,
) -> Option<f64> {
    // First guess: local clock noon
    let mut minutes = 720.0;

    for _ in 0..REFINEMENT_PASSES {
        let jd = jd_local_midnight + minutes / DAY_MIN;
        let dec = solar::declination_deg(jd);
        let eqtime = solar::equation_of_time_min(jd);
        let ha = hour_angle_deg(latitude_deg, dec)?;

        // Solar noon in local clock minutes, then offset by the hour angle
        let noon = 720.0 - 4.0 * longitude_deg - eqtime + tz_offset_hours * 60.0;
        minutes = noon + event_sign * 4.0 * ha;
    }

    Some(minutes)
}

/// Compute sunrise and sunset local clock times for a civil date.
///
/// `longitude_deg` is positive east. The result is a [`RiseSetOutcome`];
/// the polar variants are returned instead of nonsense event times when
/// the Sun never crosses the rise/set altitude.
pub fn sun_rise_set(
    date: NaiveDate,
    latitude_deg: f64,
    longitude_deg: f64,
    tz_offset_hours: f64,
) -> RiseSetOutcome {
    let jd_midnight = julian_date_of_local_midnight(date, tz_offset_hours);

    // Polar check at local noon: decides which way the day degenerates
    let dec_noon = solar::declination_deg(jd_midnight + 0.5);
    if hour_angle_deg(latitude_deg, dec_noon).is_none() {
        let phi = latitude_deg.to_radians();
        let dec = dec_noon.to_radians();
        let noon_altitude =
            (phi.sin() * dec.sin() + phi.cos() * dec.cos()).asin().to_degrees();
        return if noon_altitude > RISE_SET_ALTITUDE_DEG {
            RiseSetOutcome::NeverSets
        } else {
            RiseSetOutcome::NeverRises
        };
    }

    let rise = event_minutes(jd_midnight, latitude_deg, longitude_deg, tz_offset_hours, -1.0);
    let set = event_minutes(jd_midnight, latitude_deg, longitude_deg, tz_offset_hours, 1.0);

    match (rise, set) {
        (Some(rise_min), Some(set_min)) => {
            let sunrise =
                julian_date_to_local(jd_midnight + rise_min / DAY_MIN, tz_offset_hours);
            let sunset = julian_date_to_local(jd_midnight + set_min / DAY_MIN, tz_offset_hours);
            RiseSetOutcome::Event { sunrise, sunset }
        }
        // Refinement wandered into a polar condition (high latitudes near
        // the terminator date)
        _ => {
            if dec_noon * latitude_deg > 0.0 {
                RiseSetOutcome::NeverSets
            } else {
                RiseSetOutcome::NeverRises
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hyderabad_winter_day() {
        let outcome = sun_rise_set(date(2024, 1, 15), 17.38333, 78.4666, 5.5);
        match outcome {
            RiseSetOutcome::Event { sunrise, sunset } => {
                // Mid-January Hyderabad: sunrise ~06:45, sunset ~18:00 IST
                assert_eq!(sunrise.hour(), 6, "sunrise {sunrise}");
                assert!(
                    (17..=18).contains(&sunset.hour()),
                    "sunset {sunset} outside evening band"
                );
                assert!(sunset > sunrise);
            }
            other => panic!("expected an event day, got {other:?}"),
        }
    }

    #[test]
    fn equator_day_near_twelve_hours() {
        let outcome = sun_rise_set(date(2024, 3, 20), 0.0, 0.0, 0.0);
        match outcome {
            RiseSetOutcome::Event { sunrise, sunset } => {
                let len_min = (sunset - sunrise).num_minutes();
                // Equatorial equinox day: ~12h plus a few minutes of
                // refraction/semidiameter
                assert!(
                    (715..=735).contains(&len_min),
                    "equator day length {len_min} min"
                );
            }
            other => panic!("expected an event day, got {other:?}"),
        }
    }

    #[test]
    fn polar_night_in_december() {
        let outcome = sun_rise_set(date(2024, 12, 21), 78.0, 15.6, 1.0);
        assert_eq!(outcome, RiseSetOutcome::NeverRises);
    }

    #[test]
    fn midnight_sun_in_june() {
        let outcome = sun_rise_set(date(2024, 6, 21), 78.0, 15.6, 1.0);
        assert_eq!(outcome, RiseSetOutcome::NeverSets);
    }

    #[test]
    fn deterministic_for_same_input() {
        let a = sun_rise_set(date(2024, 5, 5), 17.38333, 78.4666, 5.5);
        let b = sun_rise_set(date(2024, 5, 5), 17.38333, 78.4666, 5.5);
        assert_eq!(a, b);
    }
}

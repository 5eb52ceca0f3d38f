//! Muhurta deriver: named auspicious and inauspicious windows
//!
//! Rahu Kaal, Yamaganda, and Gulika Kaal each occupy one of eight equal
//! daylight segments; which one depends on the weekday through fixed
//! lookup tables (the traditional assignments do not follow a formula).
//! Brahma Muhurta is the 96 minutes ending at sunrise; Abhijit Muhurta is
//! the middle fifteenth of the daylight span, centered on local solar
//! noon.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{ABHIJIT_DIVISIONS, BRAHMA_MUHURTA_MIN, DAYLIGHT_SEGMENTS};
use crate::ephemeris::CelestialPositions;
use crate::panchang::PanchangResult;
use crate::{ObservationPoint, PanchangaError, Result};

/// Which of the 8 daylight segments is Rahu Kaal, indexed by civil
/// weekday (0 = Sunday). Traditional assignment; not derivable.
pub const RAHU_KAAL_SEGMENT: [usize; 7] = [7, 1, 6, 4, 5, 3, 2];

/// Which of the 8 daylight segments is Yamaganda, indexed by civil
/// weekday (0 = Sunday).
pub const YAMAGANDA_SEGMENT: [usize; 7] = [4, 3, 2, 1, 0, 6, 5];

/// Which of the 8 daylight segments is Gulika Kaal, indexed by civil
/// weekday (0 = Sunday).
pub const GULIKA_SEGMENT: [usize; 7] = [6, 5, 4, 3, 2, 1, 0];

/// Whether a window is traditionally favorable or unfavorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Favorable for new undertakings
    Auspicious,
    /// To be avoided for new undertakings
    Inauspicious,
}

/// One named time window of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuhurtaWindow {
    /// Window name, e.g. "Rahu Kaal"
    pub name: String,
    /// Local start time
    pub start: NaiveDateTime,
    /// Local end time
    pub end: NaiveDateTime,
    /// Favorable or unfavorable
    pub category: Category,
    /// Human-readable description for display
    pub description: String,
}

/// Daylight length, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDuration {
    /// Whole hours of daylight
    pub hours: i64,
    /// Remaining minutes
    pub minutes: i64,
}

impl DayDuration {
    /// The whole daylight span in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

/// The derived windows for one day. Owned by the panchang of the same
/// observation point; never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuhurtaResult {
    /// The 96 minutes ending at sunrise
    pub brahma_muhurta: MuhurtaWindow,
    /// The middle fifteenth of daylight, centered on solar noon
    pub abhijit_muhurta: MuhurtaWindow,
    /// Rahu's segment of the day
    pub rahu_kaal: MuhurtaWindow,
    /// Yama's segment of the day
    pub yamaganda: MuhurtaWindow,
    /// Gulika's segment of the day
    pub gulika_kaal: MuhurtaWindow,
    /// Sunrise-to-sunset length
    pub day_duration: DayDuration,
}

impl MuhurtaResult {
    /// The favorable windows, in start order.
    pub fn auspicious(&self) -> Vec<&MuhurtaWindow> {
        let mut windows = vec![&self.brahma_muhurta, &self.abhijit_muhurta];
        windows.sort_by_key(|w| w.start);
        windows
    }

    /// The unfavorable windows, in start order.
    pub fn inauspicious(&self) -> Vec<&MuhurtaWindow> {
        let mut windows = vec![&self.rahu_kaal, &self.yamaganda, &self.gulika_kaal];
        windows.sort_by_key(|w| w.start);
        windows
    }
}

/// The n-th of the 8 equal daylight segments as a (start, end) pair.
fn daylight_segment(
    sunrise: NaiveDateTime,
    daylight_seconds: i64,
    segment: usize,
) -> (NaiveDateTime, NaiveDateTime) {
    let seg_len = daylight_seconds as f64 / DAYLIGHT_SEGMENTS as f64;
    let start = sunrise + Duration::seconds((segment as f64 * seg_len).round() as i64);
    let end = sunrise + Duration::seconds(((segment as f64 + 1.0) * seg_len).round() as i64);
    (start, end)
}

fn window(
    name: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    category: Category,
    description: &str,
) -> MuhurtaWindow {
    MuhurtaWindow {
        name: name.to_string(),
        start,
        end,
        category,
        description: description.to_string(),
    }
}

/// Derive the muhurta windows for a computed panchang.
///
/// Fails with [`PanchangaError::DegenerateDayWindow`] when sunrise is not
/// strictly before sunset, rather than emitting negative-length windows.
pub fn derive(
    panchang: &PanchangResult,
    positions: &CelestialPositions,
    point: &ObservationPoint,
) -> Result<MuhurtaResult> {
    let sunrise = positions.sunrise;
    let sunset = positions.sunset;
    if sunrise >= sunset {
        return Err(PanchangaError::DegenerateDayWindow {
            date: point.date,
            latitude: point.latitude,
        });
    }

    let daylight_seconds = (sunset - sunrise).num_seconds();
    let weekday = (panchang.weekday.weekday_number - 1) as usize;

    let (rahu_start, rahu_end) =
        daylight_segment(sunrise, daylight_seconds, RAHU_KAAL_SEGMENT[weekday]);
    let (yama_start, yama_end) =
        daylight_segment(sunrise, daylight_seconds, YAMAGANDA_SEGMENT[weekday]);
    let (gulika_start, gulika_end) =
        daylight_segment(sunrise, daylight_seconds, GULIKA_SEGMENT[weekday]);

    // Abhijit: the middle of the 15 daylight divisions, i.e. divisions
    // [7/15, 8/15] around solar noon
    let abhijit_start = sunrise
        + Duration::seconds(
            (daylight_seconds as f64 * 7.0 / ABHIJIT_DIVISIONS as f64).round() as i64,
        );
    let abhijit_end = sunrise
        + Duration::seconds(
            (daylight_seconds as f64 * 8.0 / ABHIJIT_DIVISIONS as f64).round() as i64,
        );

    let brahma_start = sunrise - Duration::minutes(BRAHMA_MUHURTA_MIN);

    Ok(MuhurtaResult {
        brahma_muhurta: window(
            "Brahma Muhurta",
            brahma_start,
            sunrise,
            Category::Auspicious,
            "The creator's hour: the final 96 minutes before sunrise, suited to study and meditation",
        ),
        abhijit_muhurta: window(
            "Abhijit Muhurta",
            abhijit_start,
            abhijit_end,
            Category::Auspicious,
            "The victorious midday muhurta, centered on local solar noon",
        ),
        rahu_kaal: window(
            "Rahu Kaal",
            rahu_start,
            rahu_end,
            Category::Inauspicious,
            "Rahu's portion of the day; new ventures are traditionally avoided",
        ),
        yamaganda: window(
            "Yamaganda",
            yama_start,
            yama_end,
            Category::Inauspicious,
            "Yama's portion of the day; work begun now is said to wither",
        ),
        gulika_kaal: window(
            "Gulika Kaal",
            gulika_start,
            gulika_end,
            Category::Inauspicious,
            "Gulika's portion of the day; avoided for beginnings, acceptable for routine",
        ),
        day_duration: DayDuration {
            hours: daylight_seconds / 3600,
            minutes: (daylight_seconds % 3600) / 60,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AnalyticEphemeris, EphemerisProvider};
    use chrono::NaiveDate;

    fn derived(date: NaiveDate) -> (MuhurtaResult, CelestialPositions) {
        let point = ObservationPoint::new(date, 17.38333, 78.4666, 5.5);
        let eph = AnalyticEphemeris::new();
        let positions = eph.positions(&point).unwrap();
        let panchang = crate::panchang::compute(&eph, &positions, &point).unwrap();
        (derive(&panchang, &positions, &point).unwrap(), positions)
    }

    #[test]
    fn segment_tables_cover_distinct_slots() {
        // Within any weekday the three kaals occupy three different
        // segments
        for wd in 0..7 {
            let slots = [
                RAHU_KAAL_SEGMENT[wd],
                YAMAGANDA_SEGMENT[wd],
                GULIKA_SEGMENT[wd],
            ];
            assert!(slots.iter().all(|&s| s < 8));
            assert_ne!(slots[0], slots[1]);
            assert_ne!(slots[0], slots[2]);
            assert_ne!(slots[1], slots[2]);
        }
    }

    #[test]
    fn brahma_ends_at_sunrise() {
        let (muhurta, positions) = derived(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(muhurta.brahma_muhurta.end, positions.sunrise);
        assert_eq!(
            (muhurta.brahma_muhurta.end - muhurta.brahma_muhurta.start).num_minutes(),
            96
        );
    }

    #[test]
    fn abhijit_centered_on_solar_noon() {
        let (muhurta, positions) = derived(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let daylight = (positions.sunset - positions.sunrise).num_seconds();
        let noon = positions.sunrise + Duration::seconds(daylight / 2);
        let mid = muhurta.abhijit_muhurta.start
            + Duration::seconds(
                (muhurta.abhijit_muhurta.end - muhurta.abhijit_muhurta.start).num_seconds() / 2,
            );
        assert!((mid - noon).num_seconds().abs() <= 2, "abhijit off-center");
    }

    #[test]
    fn all_windows_positive_length() {
        let (muhurta, _) = derived(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        for w in [
            &muhurta.brahma_muhurta,
            &muhurta.abhijit_muhurta,
            &muhurta.rahu_kaal,
            &muhurta.yamaganda,
            &muhurta.gulika_kaal,
        ] {
            assert!(w.start < w.end, "{} has no span", w.name);
        }
    }

    #[test]
    fn monday_rahu_kaal_is_second_segment() {
        // 2024-01-15 is a Monday: Rahu Kaal occupies segment index 1
        let (muhurta, positions) = derived(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let daylight = (positions.sunset - positions.sunrise).num_seconds();
        let expected = positions.sunrise + Duration::seconds((daylight as f64 / 8.0).round() as i64);
        assert_eq!(muhurta.rahu_kaal.start, expected);
    }

    #[test]
    fn category_split() {
        let (muhurta, _) = derived(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(muhurta.auspicious().len(), 2);
        assert_eq!(muhurta.inauspicious().len(), 3);
        assert!(muhurta
            .inauspicious()
            .iter()
            .all(|w| w.category == Category::Inauspicious));
    }

    #[test]
    fn day_duration_consistent() {
        let (muhurta, positions) = derived(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        let daylight_min = (positions.sunset - positions.sunrise).num_minutes();
        assert_eq!(muhurta.day_duration.total_minutes(), daylight_min);
        // A tropical-latitude June day runs long
        assert!((12 * 60..14 * 60).contains(&daylight_min));
    }

    #[test]
    fn degenerate_day_rejected() {
        let point = ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            17.38333,
            78.4666,
            5.5,
        );
        let eph = AnalyticEphemeris::new();
        let positions = eph.positions(&point).unwrap();
        let panchang = crate::panchang::compute(&eph, &positions, &point).unwrap();

        // Force an inverted day
        let mut inverted = positions;
        inverted.sunrise = positions.sunset;
        inverted.sunset = positions.sunrise;
        match derive(&panchang, &inverted, &point) {
            Err(PanchangaError::DegenerateDayWindow { .. }) => {}
            other => panic!("expected DegenerateDayWindow, got {other:?}"),
        }
    }
}

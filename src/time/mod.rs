//! Calendar and Julian date conversions
//!
//! The almanac computations work internally in Julian dates (UTC-based;
//! the sub-minute difference to TT is far below the precision of the
//! longitude series). Callers deal in civil dates and local clock times
//! with a fractional-hour timezone offset, so this module provides the
//! conversions between the two.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::constants::{DAY_S, J2000, JULIAN_CENTURY_DAYS};

/// Convert (year, month, day) to Julian day number (the JD at noon).
///
/// Uses the proleptic Gregorian calendar.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let janfeb = month < 3;

    1461 * (year + 4800 - if janfeb { 1 } else { 0 }) / 4
        + 367 * (month - 2 + if janfeb { 12 } else { 0 }) / 12
        - 3 * ((year + 4900 - if janfeb { 1 } else { 0 }) / 100) / 4
        - 32075
        + day
}

/// Convert a Julian day number back to a calendar date (year, month, day).
///
/// Proleptic Gregorian; see the Explanatory Supplement to the Astronomical
/// Almanac 15.11.
pub fn calendar_from_julian_day(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (4 * jdn + 274_277) / 146_097 * 3 / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Julian date of a civil datetime taken as UTC.
pub fn julian_date(dt: &NaiveDateTime) -> f64 {
    let jdn = julian_day_number(dt.year(), dt.month(), dt.day()) as f64;
    let day_fraction = dt.num_seconds_from_midnight() as f64 / DAY_S;
    jdn - 0.5 + day_fraction
}

/// Julian date of local midnight for a civil date and timezone offset.
pub fn julian_date_of_local_midnight(date: NaiveDate, tz_offset_hours: f64) -> f64 {
    let jdn = julian_day_number(date.year(), date.month(), date.day()) as f64;
    jdn - 0.5 - tz_offset_hours / 24.0
}

/// Julian date (UTC) of a local clock time with a fractional-hour offset.
pub fn local_to_julian_date(local: &NaiveDateTime, tz_offset_hours: f64) -> f64 {
    julian_date(local) - tz_offset_hours / 24.0
}

/// Local clock time for a Julian date (UTC), rounded to whole seconds.
pub fn julian_date_to_local(jd: f64, tz_offset_hours: f64) -> NaiveDateTime {
    let jd_local = jd + tz_offset_hours / 24.0;
    let mut jdn = (jd_local + 0.5).floor() as i64;
    let mut seconds = ((jd_local + 0.5 - jdn as f64) * DAY_S).round() as u32;
    if seconds >= DAY_S as u32 {
        // Rounding pushed us across midnight
        seconds -= DAY_S as u32;
        jdn += 1;
    }

    let (year, month, day) = calendar_from_julian_day(jdn);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .expect("Julian day conversion produced a valid calendar date");
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .expect("seconds of day within range");
    NaiveDateTime::new(date, time)
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / JULIAN_CENTURY_DAYS
}

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

/// Normalize an angle in degrees to [-180, 180).
pub fn normalize_pm180(deg: f64) -> f64 {
    normalize_360(deg + 180.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn julian_day_anchors() {
        // J2000 epoch
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(julian_day_number(2020, 1, 1), 2_458_850);
        assert_eq!(julian_day_number(1969, 7, 20), 2_440_423);
        assert_eq!(julian_day_number(1900, 1, 1), 2_415_021);
    }

    #[test]
    fn calendar_round_trip() {
        for &jdn in &[2_451_545_i64, 2_458_850, 2_440_423, 2_415_021] {
            let (y, m, d) = calendar_from_julian_day(jdn);
            assert_eq!(julian_day_number(y, m, d), jdn);
        }
    }

    #[test]
    fn julian_date_of_midnight() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!((julian_date(&dt) - 2_451_544.5).abs() < 1e-9);
    }

    #[test]
    fn julian_date_of_noon() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!((julian_date(&dt) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn local_round_trip_ist() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(6, 45, 30)
            .unwrap();
        let jd = local_to_julian_date(&local, 5.5);
        assert_eq!(julian_date_to_local(jd, 5.5), local);
    }

    #[test]
    fn local_round_trip_negative_offset() {
        let local = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let jd = local_to_julian_date(&local, -7.0);
        assert_eq!(julian_date_to_local(jd, -7.0), local);
    }

    #[test]
    fn midnight_rounding_carries_to_next_day() {
        // A JD a hair before local midnight must round into the next day,
        // not into second 86400 of the current one.
        let local = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let jd = local_to_julian_date(&local, 0.0) - 1e-9;
        assert_eq!(julian_date_to_local(jd, 0.0), local);
    }

    #[test]
    fn centuries_at_j2000() {
        assert!(julian_centuries(J2000).abs() < 1e-12);
        assert!((julian_centuries(J2000 + 36_525.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_wraps() {
        assert!((normalize_360(370.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-10);
        assert!((normalize_pm180(350.0) + 10.0).abs() < 1e-10);
        assert!((normalize_pm180(190.0) + 170.0).abs() < 1e-10);
    }
}

//! Panchang calculator
//!
//! Turns ephemeris positions into the five almanac elements plus lunar
//! month, season, solstice half, and era years.
//!
//! Tithi and karana live on the Moon-Sun elongation, where the ayanamsha
//! cancels, so tropical longitudes are used directly. Nakshatra, yoga and
//! the calendar mappings are sidereal: the Lahiri ayanamsha is subtracted
//! before segmenting.
//!
//! Boundary instants (when an element completes) are found by marching
//! until the relevant angle brackets the target, then bisecting. Every
//! search carries a fixed step and iteration cap so it terminates.

use chrono::{Datelike, NaiveDateTime};

use crate::constants::{
    KARANA_ARC_DEG, KARANA_COUNT, LAHIRI_AYANAMSHA_J2000_DEG, NAKSHATRA_ARC_DEG, NAKSHATRA_COUNT,
    PRECESSION_DEG_PER_CENTURY, RASHI_ARC_DEG, SAKA_YEAR_OFFSET, SAMVATSARA_EPOCH_YEAR,
    SYNODIC_MONTH_DAYS, TITHI_ARC_DEG, TITHI_COUNT, VIKRAM_CYCLE_SHIFT, VIKRAM_YEAR_OFFSET,
    YOGA_ARC_DEG, YOGA_COUNT,
};
use crate::ephemeris::{CelestialPositions, EphemerisProvider};
use crate::time::{
    julian_centuries, julian_date_of_local_midnight, julian_date_to_local, local_to_julian_date,
    normalize_360, normalize_pm180,
};
use crate::{ObservationPoint, PanchangaError, Result};

pub mod names;
pub mod types;

pub use types::{
    Aayanam, KaranaInfo, LunarMonthInfo, NakshatraInfo, Paksha, PanchangResult, RituInfo,
    TithiInfo, WeekdayInfo, YearInfo, YogaInfo,
};

/// Bisection tolerance in days (~0.9 s), well under the sub-minute target.
const BOUNDARY_TOLERANCE_DAYS: f64 = 1.0e-5;

/// Iteration cap for one bisection.
const MAX_BISECTIONS: usize = 60;

/// At most this many yoga/karana periods are reported per civil day.
const MAX_DAILY_ENTRIES: usize = 2;

/// Nudge past a found boundary before searching for the next one.
const BOUNDARY_EPSILON_DAYS: f64 = 1.0e-4;

/// Lahiri (Chitrapaksha) ayanamsha in degrees at a Julian date.
pub fn lahiri_ayanamsha_deg(jd: f64) -> f64 {
    LAHIRI_AYANAMSHA_J2000_DEG + PRECESSION_DEG_PER_CENTURY * julian_centuries(jd)
}

/// Moon-Sun elongation in degrees [0, 360). Tropical; the ayanamsha
/// cancels in the difference.
pub fn elongation_at(eph: &dyn EphemerisProvider, jd: f64) -> Result<f64> {
    Ok(normalize_360(
        eph.moon_longitude_at(jd)? - eph.sun_longitude_at(jd)?,
    ))
}

/// Moon's sidereal (Lahiri) longitude in degrees [0, 360).
pub fn moon_sidereal_at(eph: &dyn EphemerisProvider, jd: f64) -> Result<f64> {
    Ok(normalize_360(
        eph.moon_longitude_at(jd)? - lahiri_ayanamsha_deg(jd),
    ))
}

/// Sun's sidereal (Lahiri) longitude in degrees [0, 360).
pub fn sun_sidereal_at(eph: &dyn EphemerisProvider, jd: f64) -> Result<f64> {
    Ok(normalize_360(
        eph.sun_longitude_at(jd)? - lahiri_ayanamsha_deg(jd),
    ))
}

/// Sum of the sidereal Moon and Sun longitudes in degrees [0, 360).
/// The ayanamsha does not cancel in the sum.
pub fn sidereal_sum_at(eph: &dyn EphemerisProvider, jd: f64) -> Result<f64> {
    let aya = lahiri_ayanamsha_deg(jd);
    let moon = normalize_360(eph.moon_longitude_at(jd)? - aya);
    let sun = normalize_360(eph.sun_longitude_at(jd)? - aya);
    Ok(normalize_360(moon + sun))
}

/// Find the instant where `f` crosses `target_deg` (mod 360).
///
/// Marches from `jd_start` in `step_days` increments (negative steps
/// search backwards) until the sign of the wrapped offset flips, then
/// bisects. A sign flip that jumps the far side of the circle (the
/// antipodal point of the target) is not a crossing and is skipped.
fn find_boundary<F>(
    f: &F,
    jd_start: f64,
    target_deg: f64,
    step_days: f64,
    max_steps: usize,
    what: &'static str,
) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let g = |t: f64| -> Result<f64> { Ok(normalize_pm180(f(t)? - target_deg)) };

    let mut t0 = jd_start;
    let mut g0 = g(t0)?;
    for _ in 0..max_steps {
        let t1 = t0 + step_days;
        let g1 = g(t1)?;
        if g0.signum() != g1.signum() && (g1 - g0).abs() < 180.0 {
            let (mut lo, mut hi, mut g_lo) = if t0 < t1 { (t0, t1, g0) } else { (t1, t0, g1) };
            for _ in 0..MAX_BISECTIONS {
                if hi - lo < BOUNDARY_TOLERANCE_DAYS {
                    return Ok(0.5 * (lo + hi));
                }
                let mid = 0.5 * (lo + hi);
                let g_mid = g(mid)?;
                if g_lo.signum() != g_mid.signum() {
                    hi = mid;
                } else {
                    lo = mid;
                    g_lo = g_mid;
                }
            }
            return Err(PanchangaError::ConvergenceFailure(what));
        }
        t0 = t1;
        g0 = g1;
    }
    Err(PanchangaError::ConvergenceFailure(what))
}

/// Percentage of a segment remaining, given its end boundary and the
/// current angle, clamped to [0, 100].
fn percentage_remaining(end_target_deg: f64, value_deg: f64, arc_deg: f64) -> f64 {
    (normalize_pm180(end_target_deg - value_deg) / arc_deg * 100.0).clamp(0.0, 100.0)
}

/// Current tithi at the reference instant, with its completion time.
pub fn tithi_at(
    eph: &dyn EphemerisProvider,
    elongation_deg: f64,
    jd_ref: f64,
    tz_offset_hours: f64,
) -> Result<TithiInfo> {
    let index = ((elongation_deg / TITHI_ARC_DEG).floor() as u8).min(TITHI_COUNT - 1);
    let number = index + 1;
    let end_target = (index as f64 + 1.0) * TITHI_ARC_DEG;

    let elong_fn = |t: f64| elongation_at(eph, t);
    let end_jd = find_boundary(&elong_fn, jd_ref, end_target, 0.25, 8, "tithi completion")?;

    Ok(TithiInfo {
        number,
        name: names::TITHI_NAMES[index as usize].to_string(),
        paksha: if number <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        },
        ends_at: julian_date_to_local(end_jd, tz_offset_hours),
        percentage_remaining: percentage_remaining(end_target, elongation_deg, TITHI_ARC_DEG),
    })
}

/// Current nakshatra at the reference instant, with its span.
pub fn nakshatra_at(
    eph: &dyn EphemerisProvider,
    moon_sidereal_deg: f64,
    jd_ref: f64,
    tz_offset_hours: f64,
) -> Result<NakshatraInfo> {
    let index = ((moon_sidereal_deg / NAKSHATRA_ARC_DEG).floor() as u8).min(NAKSHATRA_COUNT - 1);
    let start_target = index as f64 * NAKSHATRA_ARC_DEG;
    let end_target = (index as f64 + 1.0) * NAKSHATRA_ARC_DEG;

    let moon_fn = |t: f64| moon_sidereal_at(eph, t);
    let start_jd = find_boundary(&moon_fn, jd_ref, start_target, -0.25, 8, "nakshatra start")?;
    let end_jd = find_boundary(&moon_fn, jd_ref, end_target, 0.25, 8, "nakshatra end")?;

    Ok(NakshatraInfo {
        number: index + 1,
        name: names::NAKSHATRA_NAMES[index as usize].to_string(),
        starts_at: julian_date_to_local(start_jd, tz_offset_hours),
        ends_at: julian_date_to_local(end_jd, tz_offset_hours),
        percentage_remaining: percentage_remaining(end_target, moon_sidereal_deg, NAKSHATRA_ARC_DEG),
    })
}

/// All yoga periods touching the civil day, in start order (at most
/// [`MAX_DAILY_ENTRIES`]). The sum advances fast enough that two yogas in
/// one day is routine.
pub fn yogas_for_day(
    eph: &dyn EphemerisProvider,
    jd_day_start: f64,
    jd_day_end: f64,
    sum_ref_deg: f64,
    tz_offset_hours: f64,
) -> Result<Vec<YogaInfo>> {
    let sum_start = sidereal_sum_at(eph, jd_day_start)?;
    let mut index = ((sum_start / YOGA_ARC_DEG).floor() as u8).min(YOGA_COUNT - 1);

    let sum_fn = |t: f64| sidereal_sum_at(eph, t);
    let mut entries = Vec::new();
    let mut cursor = jd_day_start;
    while entries.len() < MAX_DAILY_ENTRIES {
        let end_target = (index as f64 + 1.0) * YOGA_ARC_DEG;
        let end_jd = find_boundary(&sum_fn, cursor, end_target, 0.25, 8, "yoga completion")?;

        entries.push(YogaInfo {
            number: index + 1,
            name: names::YOGA_NAMES[index as usize].to_string(),
            ends_at: julian_date_to_local(end_jd, tz_offset_hours),
            percentage_remaining: percentage_remaining(end_target, sum_ref_deg, YOGA_ARC_DEG),
        });

        if end_jd >= jd_day_end {
            break;
        }
        cursor = end_jd + BOUNDARY_EPSILON_DAYS;
        index = (index + 1) % YOGA_COUNT;
    }
    Ok(entries)
}

/// All karana periods touching the civil day, in start order (at most
/// [`MAX_DAILY_ENTRIES`]). A karana spans ~12 hours, so two per civil day
/// is the norm.
pub fn karanas_for_day(
    eph: &dyn EphemerisProvider,
    jd_day_start: f64,
    jd_day_end: f64,
    elongation_ref_deg: f64,
    tz_offset_hours: f64,
) -> Result<Vec<KaranaInfo>> {
    let elong_start = elongation_at(eph, jd_day_start)?;
    let mut index = ((elong_start / KARANA_ARC_DEG).floor() as u8).min(KARANA_COUNT - 1);

    let elong_fn = |t: f64| elongation_at(eph, t);
    let mut entries = Vec::new();
    let mut cursor = jd_day_start;
    while entries.len() < MAX_DAILY_ENTRIES {
        let end_target = (index as f64 + 1.0) * KARANA_ARC_DEG;
        let end_jd = find_boundary(&elong_fn, cursor, end_target, 0.25, 8, "karana completion")?;

        entries.push(KaranaInfo {
            number: index + 1,
            name: names::karana_name(index).to_string(),
            ends_at: julian_date_to_local(end_jd, tz_offset_hours),
            percentage_remaining: percentage_remaining(
                end_target,
                elongation_ref_deg,
                KARANA_ARC_DEG,
            ),
        });

        if end_jd >= jd_day_end {
            break;
        }
        cursor = end_jd + BOUNDARY_EPSILON_DAYS;
        index = (index + 1) % KARANA_COUNT;
    }
    Ok(entries)
}

/// Civil and Vedic weekday for a reference instant. The Vedic day begins
/// at sunrise: before it, the vara is still yesterday's.
pub fn weekday_info(
    point: &ObservationPoint,
    reference: &NaiveDateTime,
    sunrise: &NaiveDateTime,
) -> WeekdayInfo {
    let civil = point.date.weekday().num_days_from_sunday() as u8;
    let vedic = if reference < sunrise {
        (civil + 6) % 7
    } else {
        civil
    };

    WeekdayInfo {
        weekday_number: civil + 1,
        weekday_name: names::WEEKDAY_NAMES[civil as usize].to_string(),
        vedic_weekday_number: vedic + 1,
        vedic_weekday_name: names::VEDIC_WEEKDAY_NAMES[vedic as usize].to_string(),
    }
}

/// Amanta lunar month with intercalation flags, plus the Julian date of
/// the month's opening new moon and the 0-based month index (needed by the
/// era-year computation).
pub fn lunar_month_at(
    eph: &dyn EphemerisProvider,
    jd_ref: f64,
) -> Result<(LunarMonthInfo, f64, u8)> {
    let elong_fn = |t: f64| elongation_at(eph, t);
    let prev_nm = find_boundary(&elong_fn, jd_ref, 0.0, -1.0, 35, "previous new moon")?;
    let next_nm = find_boundary(&elong_fn, jd_ref, 0.0, 1.0, 35, "next new moon")?;

    let rashi_prev = (sun_sidereal_at(eph, prev_nm)? / RASHI_ARC_DEG).floor() as u8 % 12;
    let rashi_next = (sun_sidereal_at(eph, next_nm)? / RASHI_ARC_DEG).floor() as u8 % 12;

    // Amanta convention: the month is named for the rashi the Sun occupies
    // at the closing new moon. No sankranti in the lunation makes it an
    // adhika month; two make it a kshaya month.
    let diff = (rashi_next + 12 - rashi_prev) % 12;
    let (masa_idx, adhika, kshaya) = match diff {
        0 => ((rashi_prev + 1) % 12, true, false),
        2 => (rashi_next, false, true),
        _ => (rashi_next, false, false),
    };

    let name = names::MASA_NAMES[masa_idx as usize];
    let full_name = if adhika {
        format!("Adhika {name}")
    } else if kshaya {
        format!("Kshaya {name}")
    } else {
        name.to_string()
    };

    let info = LunarMonthInfo {
        number: masa_idx + 1,
        name: name.to_string(),
        full_name,
        adhika,
        kshaya,
        nija: !adhika && !kshaya,
    };
    Ok((info, prev_nm, masa_idx))
}

/// Ritu (season) from the Sun's sidereal longitude. Two rashis per ritu,
/// with Vasanta opening at Mina (330 deg).
pub fn ritu_from_longitude(sun_sidereal_deg: f64) -> RituInfo {
    let index = ((normalize_360(sun_sidereal_deg + 30.0) / 60.0).floor() as usize).min(5);
    RituInfo {
        number: index as u8 + 1,
        name: names::RITU_NAMES[index].to_string(),
    }
}

/// Aayanam (solstice half) from the Sun's sidereal longitude: Uttarayana
/// from Makara (270 deg) to Karka (90 deg), Dakshinayana otherwise.
pub fn aayanam_from_longitude(sun_sidereal_deg: f64) -> Aayanam {
    let lon = normalize_360(sun_sidereal_deg);
    if !(90.0..270.0).contains(&lon) {
        Aayanam::Uttarayana
    } else {
        Aayanam::Dakshinayana
    }
}

/// Saka and Vikram era years with samvatsara names for the running lunar
/// year. The year start (Chaitra Pratipada) is estimated by stepping whole
/// mean lunations back from the current month's opening new moon.
pub fn year_info(prev_new_moon_jd: f64, masa_idx: u8, tz_offset_hours: f64) -> YearInfo {
    let year_start_jd = prev_new_moon_jd - masa_idx as f64 * SYNODIC_MONTH_DAYS;
    let start_year = julian_date_to_local(year_start_jd, tz_offset_hours).year();

    let saka_cycle = (start_year - SAMVATSARA_EPOCH_YEAR).rem_euclid(60) as usize;
    let vikram_cycle =
        (start_year - SAMVATSARA_EPOCH_YEAR + VIKRAM_CYCLE_SHIFT).rem_euclid(60) as usize;

    YearInfo {
        saka_salivahana_number: start_year - SAKA_YEAR_OFFSET,
        saka_salivahana_year_name: names::SAMVATSARA_NAMES[saka_cycle].to_string(),
        vikram_chaitradi_number: start_year + VIKRAM_YEAR_OFFSET,
        vikram_chaitradi_year_name: names::SAMVATSARA_NAMES[vikram_cycle].to_string(),
    }
}

/// Compute the full panchang from a position snapshot.
///
/// The reference instant is the snapshot's sunrise; all shared angles are
/// taken from the snapshot so they are evaluated exactly once.
pub fn compute(
    eph: &dyn EphemerisProvider,
    positions: &CelestialPositions,
    point: &ObservationPoint,
) -> Result<PanchangResult> {
    let tz = point.timezone_offset_hours;
    let jd_ref = local_to_julian_date(&positions.sunrise, tz);
    let jd_day_start = julian_date_of_local_midnight(point.date, tz);
    let jd_day_end = jd_day_start + 1.0;

    let aya = lahiri_ayanamsha_deg(jd_ref);
    let elongation_ref = normalize_360(positions.moon_longitude - positions.sun_longitude);
    let moon_sidereal_ref = normalize_360(positions.moon_longitude - aya);
    let sun_sidereal_ref = normalize_360(positions.sun_longitude - aya);
    let sum_ref = normalize_360(moon_sidereal_ref + sun_sidereal_ref);

    let tithi = tithi_at(eph, elongation_ref, jd_ref, tz)?;
    let nakshatra = nakshatra_at(eph, moon_sidereal_ref, jd_ref, tz)?;
    let yoga = yogas_for_day(eph, jd_day_start, jd_day_end, sum_ref, tz)?;
    let karana = karanas_for_day(eph, jd_day_start, jd_day_end, elongation_ref, tz)?;
    let weekday = weekday_info(point, &positions.sunrise, &positions.sunrise);
    let (lunar_month, prev_nm, masa_idx) = lunar_month_at(eph, jd_ref)?;
    let year = year_info(prev_nm, masa_idx, tz);

    Ok(PanchangResult {
        sun_rise: positions.sunrise,
        sun_set: positions.sunset,
        weekday,
        tithi,
        nakshatra,
        yoga,
        karana,
        lunar_month,
        ritu: ritu_from_longitude(sun_sidereal_ref),
        aayanam: aayanam_from_longitude(sun_sidereal_ref),
        year,
    })
}

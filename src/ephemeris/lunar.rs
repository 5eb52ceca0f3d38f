//! Low-precision lunar position series
//!
//! Truncated main-problem series for the Moon's apparent geocentric
//! ecliptic longitude. The retained terms keep the error near 0.01 deg,
//! which at the Moon's ~13.2 deg/day motion is about one minute of time —
//! the boundary searches bisect on this same series, so crossing instants
//! are exactly reproducible for a given input.

use crate::time::{julian_centuries, normalize_360};

use super::solar;

/// One periodic term: coefficient in degrees and integer multipliers of
/// the fundamental arguments (D, M, M', F).
struct Term {
    coeff_deg: f64,
    d: i32,
    m: i32,
    mp: i32,
    f: i32,
}

const fn term(coeff_deg: f64, d: i32, m: i32, mp: i32, f: i32) -> Term {
    Term {
        coeff_deg,
        d,
        m,
        mp,
        f,
    }
}

/// Principal longitude terms of the lunar theory, largest first.
/// Terms involving the solar anomaly M are scaled by powers of the
/// eccentricity factor E at evaluation time.
const LONGITUDE_TERMS: [Term; 24] = [
    term(6.288_774, 0, 0, 1, 0),
    term(1.274_027, 2, 0, -1, 0),
    term(0.658_314, 2, 0, 0, 0),
    term(0.213_618, 0, 0, 2, 0),
    term(-0.185_116, 0, 1, 0, 0),
    term(-0.114_332, 0, 0, 0, 2),
    term(0.058_793, 2, 0, -2, 0),
    term(0.057_066, 2, -1, -1, 0),
    term(0.053_322, 2, 0, 1, 0),
    term(0.045_758, 2, -1, 0, 0),
    term(-0.040_923, 0, 1, -1, 0),
    term(-0.034_720, 1, 0, 0, 0),
    term(-0.030_383, 0, 1, 1, 0),
    term(0.015_327, 2, 0, 0, -2),
    term(-0.012_528, 0, 0, 1, 2),
    term(0.010_980, 0, 0, 1, -2),
    term(0.010_675, 4, 0, -1, 0),
    term(0.010_034, 0, 0, 3, 0),
    term(0.008_548, 4, 0, -2, 0),
    term(-0.007_888, 2, 1, -1, 0),
    term(-0.006_766, 2, 1, 0, 0),
    term(-0.005_163, 1, 0, -1, 0),
    term(0.004_987, 1, 1, 0, 0),
    term(0.004_036, 2, -1, 1, 0),
];

/// Moon's mean longitude in degrees.
pub fn mean_longitude_deg(t: f64) -> f64 {
    normalize_360(
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t * t
            + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0,
    )
}

/// Mean elongation of the Moon from the Sun in degrees.
fn mean_elongation_deg(t: f64) -> f64 {
    normalize_360(
        297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t * t
            + t * t * t / 545_868.0
            - t * t * t * t / 113_065_000.0,
    )
}

/// Moon's mean anomaly in degrees.
fn mean_anomaly_deg(t: f64) -> f64 {
    normalize_360(
        134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t * t
            + t * t * t / 69_699.0
            - t * t * t * t / 14_712_000.0,
    )
}

/// Moon's argument of latitude in degrees.
fn argument_of_latitude_deg(t: f64) -> f64 {
    normalize_360(
        93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t * t - t * t * t / 3_526_000.0
            + t * t * t * t / 863_310_000.0,
    )
}

/// Apparent geocentric ecliptic longitude of the Moon in degrees [0, 360).
pub fn apparent_longitude_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);

    let lp = mean_longitude_deg(t);
    let d = mean_elongation_deg(t).to_radians();
    let m = solar::mean_anomaly_deg(t).to_radians();
    let mp = mean_anomaly_deg(t).to_radians();
    let f = argument_of_latitude_deg(t).to_radians();

    // Eccentricity damping for terms in the solar anomaly
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let mut sum = 0.0;
    for term in &LONGITUDE_TERMS {
        let arg = term.d as f64 * d + term.m as f64 * m + term.mp as f64 * mp + term.f as f64 * f;
        let damping = match term.m.abs() {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        sum += term.coeff_deg * damping * arg.sin();
    }

    // Venus and Jupiter perturbations plus the flattening term
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    sum += 0.003_958 * a1.sin() + 0.001_962 * (lp.to_radians() - f).sin() + 0.000_318 * a2.sin();

    // Nutation in longitude, matching the solar apparent-place correction
    let omega = solar::ascending_node_deg(t).to_radians();
    let nutation = -0.004_78 * omega.sin();

    normalize_360(lp + sum + nutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;

    #[test]
    fn longitude_in_range() {
        for i in 0..60 {
            let lon = apparent_longitude_deg(J2000 + i as f64 * 3.7);
            assert!((0.0..360.0).contains(&lon), "lon {lon} out of range");
        }
    }

    #[test]
    fn longitude_advances_thirteen_degrees_per_day() {
        let jd = J2000 + 50.0;
        let advance = normalize_360(apparent_longitude_deg(jd + 1.0) - apparent_longitude_deg(jd));
        assert!(
            (11.5..15.5).contains(&advance),
            "daily lunar motion {advance} deg"
        );
    }

    #[test]
    fn meeus_example_epoch() {
        // 1992-04-12 00:00 TT (JD 2448724.5): apparent longitude
        // 133.1673 deg. The truncated series drops terms below 0.004 deg,
        // so allow a few hundredths.
        let lon = apparent_longitude_deg(2_448_724.5);
        assert!((lon - 133.167).abs() < 0.05, "1992-04-12 longitude {lon}");
    }

    #[test]
    fn sidereal_month_period() {
        // After one sidereal month (27.32166 days) the longitude returns
        // to roughly the same value.
        let jd = J2000 + 12.0;
        let lon0 = apparent_longitude_deg(jd);
        let lon1 = apparent_longitude_deg(jd + 27.321_66);
        let diff = crate::time::normalize_pm180(lon1 - lon0);
        assert!(diff.abs() < 8.0, "sidereal return offset {diff} deg");
    }
}

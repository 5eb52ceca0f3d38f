//! Low-precision solar position series
//!
//! Polynomial/trigonometric series for the Sun's apparent geocentric
//! ecliptic longitude, declination, and the equation of time. Accuracy is
//! on the order of 0.01 degrees over several centuries around J2000 —
//! comfortably below the sub-minute precision the boundary searches need
//! (the elongation moves ~12 deg/day, so 0.01 deg is ~70 s; boundary
//! bisection narrows on the same series, so the *reproducibility* of the
//! crossing instant is exact).

use crate::time::{julian_centuries, normalize_360};

/// Geometric mean longitude of the Sun in degrees, referred to the mean
/// equinox of date.
pub fn mean_longitude_deg(t: f64) -> f64 {
    normalize_360(280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t)
}

/// Mean anomaly of the Sun in degrees.
pub fn mean_anomaly_deg(t: f64) -> f64 {
    normalize_360(357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t)
}

/// Eccentricity of Earth's orbit.
pub fn eccentricity(t: f64) -> f64 {
    0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t
}

/// Equation of center in degrees.
fn equation_of_center_deg(t: f64) -> f64 {
    let m = mean_anomaly_deg(t).to_radians();
    (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin()
}

/// Longitude of the Moon's ascending node in degrees (used for the
/// nutation/aberration correction).
pub fn ascending_node_deg(t: f64) -> f64 {
    normalize_360(125.04452 - 1_934.136_261 * t)
}

/// True geometric longitude of the Sun in degrees.
pub fn true_longitude_deg(t: f64) -> f64 {
    normalize_360(mean_longitude_deg(t) + equation_of_center_deg(t))
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360),
/// corrected for nutation and aberration.
pub fn apparent_longitude_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let omega = ascending_node_deg(t).to_radians();
    normalize_360(true_longitude_deg(t) - 0.005_69 - 0.004_78 * omega.sin())
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    // 23 deg 26' 21.448" and the IAU 1980 rate terms, in degrees
    23.439_291_1 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// Obliquity corrected for nutation, for apparent-place work.
fn corrected_obliquity_deg(t: f64) -> f64 {
    let omega = ascending_node_deg(t).to_radians();
    mean_obliquity_deg(t) + 0.002_56 * omega.cos()
}

/// Apparent declination of the Sun in degrees.
pub fn declination_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let eps = corrected_obliquity_deg(t).to_radians();
    let lambda = apparent_longitude_deg(jd).to_radians();
    (eps.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in minutes (apparent solar time minus mean time).
pub fn equation_of_time_min(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let eps_half = corrected_obliquity_deg(t).to_radians() / 2.0;
    let y = eps_half.tan() * eps_half.tan();
    let l0 = mean_longitude_deg(t).to_radians();
    let m = mean_anomaly_deg(t).to_radians();
    let e = eccentricity(t);

    let eq_rad = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    4.0 * eq_rad.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_abs_diff_eq;

    #[test]
    fn longitude_in_range() {
        for i in 0..36 {
            let jd = J2000 + i as f64 * 10.13;
            let lon = apparent_longitude_deg(jd);
            assert!((0.0..360.0).contains(&lon), "lon {lon} out of range");
        }
    }

    #[test]
    fn longitude_advances_roughly_one_degree_per_day() {
        let jd = J2000 + 100.0;
        let advance = normalize_360(apparent_longitude_deg(jd + 1.0) - apparent_longitude_deg(jd));
        assert!(
            (0.9..1.1).contains(&advance),
            "daily solar motion {advance} deg"
        );
    }

    #[test]
    fn longitude_near_equinox() {
        // 2024 March equinox was on Mar 20 ~03:06 UT; apparent longitude
        // crosses 0 there. JD 2460389.63.
        let lon = apparent_longitude_deg(2_460_389.63);
        let dist = lon.min(360.0 - lon);
        assert!(dist < 0.05, "longitude at equinox = {lon}");
    }

    #[test]
    fn declination_bounds() {
        for i in 0..366 {
            let dec = declination_deg(J2000 + i as f64);
            assert!(dec.abs() < 23.5, "declination {dec} outside solar band");
        }
    }

    #[test]
    fn declination_at_june_solstice() {
        // 2000-06-21 ~01:48 UT, JD 2451716.57
        let dec = declination_deg(2_451_716.57);
        assert_abs_diff_eq!(dec, 23.44, epsilon = 0.05);
    }

    #[test]
    fn mean_obliquity_at_j2000() {
        // 23 deg 26' 21.4" at the epoch
        assert_abs_diff_eq!(mean_obliquity_deg(0.0), 23.4393, epsilon = 0.0005);
    }

    #[test]
    fn equation_of_time_magnitude() {
        // |EoT| never exceeds ~17 minutes
        for i in 0..366 {
            let eot = equation_of_time_min(J2000 + i as f64);
            assert!(eot.abs() < 17.5, "EoT {eot} min out of band");
        }
    }

    #[test]
    fn equation_of_time_early_november_peak() {
        // Around Nov 3 the EoT peaks near +16.4 minutes
        let eot = equation_of_time_min(2_451_851.5); // 2000-11-03
        assert!((15.5..17.0).contains(&eot), "EoT near Nov 3 = {eot}");
    }
}

//! # Lunar position series
//!
//! Truncated ELP2000 series for the geocentric position of the Moon.
//! Accuracy is on the order of 0.1 arcminute in longitude (a few hundred km),
//! which matches the display-quality target of the rest of the engine.

use nalgebra::Vector3;

use crate::constants::{AU, MJD, T2000};
use crate::pv_state::PvState;
use crate::ref_system::{obleq, prec, rotmt, spherical_to_cartesian};

/// Geocentric ecliptic-of-date spherical coordinates of the Moon.
///
/// Arguments
/// ---------
/// * `tt`: time (MJD, TT).
///
/// Return
/// ------
/// * `(λ, β, Δ)`: ecliptic longitude and latitude in degrees, distance in km.
fn ecliptic_spherical(tt: MJD) -> (f64, f64, f64) {
    let t = (tt - T2000) / 36525.0;

    // Fundamental arguments (degrees)
    let lp = (218.3164477 + 481267.88123421 * t - 0.0015786 * t * t).rem_euclid(360.0);
    let d = (297.8501921 + 445267.1114034 * t - 0.0018819 * t * t).rem_euclid(360.0);
    let m = (357.5291092 + 35999.0502909 * t - 0.0001536 * t * t).rem_euclid(360.0);
    let mp = (134.9633964 + 477198.8675055 * t + 0.0087414 * t * t).rem_euclid(360.0);
    let f = (93.2720950 + 483202.0175233 * t - 0.0036539 * t * t).rem_euclid(360.0);

    let d_r = d.to_radians();
    let m_r = m.to_radians();
    let mp_r = mp.to_radians();
    let f_r = f.to_radians();

    // Longitude terms (principal terms of the series)
    let sum_l = 6_288_774.0 * mp_r.sin()
        + 1_274_027.0 * (2.0 * d_r - mp_r).sin()
        + 658_314.0 * (2.0 * d_r).sin()
        + 213_618.0 * (2.0 * mp_r).sin()
        - 185_116.0 * m_r.sin()
        - 114_332.0 * (2.0 * f_r).sin()
        + 58_793.0 * (2.0 * d_r - 2.0 * mp_r).sin()
        + 57_066.0 * (2.0 * d_r - m_r - mp_r).sin()
        + 53_322.0 * (2.0 * d_r + mp_r).sin()
        + 45_758.0 * (2.0 * d_r - m_r).sin()
        - 40_923.0 * (m_r - mp_r).sin()
        - 34_720.0 * d_r.sin()
        - 30_383.0 * (m_r + mp_r).sin()
        + 15_327.0 * (2.0 * d_r - 2.0 * f_r).sin()
        - 12_528.0 * (mp_r + 2.0 * f_r).sin()
        + 10_980.0 * (mp_r - 2.0 * f_r).sin()
        + 10_675.0 * (4.0 * d_r - mp_r).sin()
        + 10_034.0 * (3.0 * mp_r).sin()
        + 8_548.0 * (4.0 * d_r - 2.0 * mp_r).sin()
        - 7_888.0 * (2.0 * d_r + m_r - mp_r).sin()
        - 6_766.0 * (2.0 * d_r + m_r).sin()
        - 5_163.0 * (d_r - mp_r).sin()
        + 4_987.0 * (d_r + m_r).sin()
        + 4_036.0 * (2.0 * d_r - m_r + mp_r).sin();

    // Latitude terms
    let sum_b = 5_128_122.0 * f_r.sin()
        + 280_602.0 * (mp_r + f_r).sin()
        + 277_693.0 * (mp_r - f_r).sin()
        + 173_237.0 * (2.0 * d_r - f_r).sin()
        + 55_413.0 * (2.0 * d_r - mp_r + f_r).sin()
        + 46_271.0 * (2.0 * d_r - mp_r - f_r).sin()
        + 32_573.0 * (2.0 * d_r + f_r).sin()
        + 17_198.0 * (2.0 * mp_r + f_r).sin()
        + 9_266.0 * (2.0 * d_r + mp_r - f_r).sin()
        + 8_822.0 * (2.0 * mp_r - f_r).sin();

    // Distance terms (km corrections to the mean distance)
    let sum_r = -20_905_355.0 * mp_r.cos()
        - 3_699_111.0 * (2.0 * d_r - mp_r).cos()
        - 2_955_968.0 * (2.0 * d_r).cos()
        - 569_925.0 * (2.0 * mp_r).cos()
        + 48_888.0 * m_r.cos()
        - 3_149.0 * (2.0 * f_r).cos()
        + 246_158.0 * (2.0 * d_r - 2.0 * mp_r).cos()
        - 152_138.0 * (2.0 * d_r - m_r - mp_r).cos()
        - 170_733.0 * (2.0 * d_r + mp_r).cos()
        - 204_586.0 * (2.0 * d_r - m_r).cos()
        - 129_620.0 * (m_r - mp_r).cos()
        + 108_743.0 * d_r.cos();

    let lon_deg = lp + sum_l / 1_000_000.0;
    let lat_deg = sum_b / 1_000_000.0;
    let dist_km = 385_000.56 + sum_r / 1_000.0;

    (lon_deg, lat_deg, dist_km)
}

/// Geocentric position of the Moon in equatorial J2000, in AU.
///
/// The series yields ecliptic-of-date coordinates; they are tilted onto the
/// equator of date with the mean obliquity, then precessed back to J2000.
pub fn geocentric_icrf_pos(tt: MJD) -> Vector3<f64> {
    let (lon_deg, lat_deg, dist_km) = ecliptic_spherical(tt);
    let ecl = spherical_to_cartesian(lon_deg.to_radians(), lat_deg.to_radians(), dist_km / AU);
    let equ_of_date = rotmt(obleq(tt), 0) * ecl;
    prec(tt).transpose() * equ_of_date
}

/// Geocentric position and velocity of the Moon in equatorial J2000.
///
/// The velocity is the one-day forward difference of the series, which is the
/// same linearization the coarse cache uses.
pub fn geocentric_icrf_pv(tt: MJD) -> PvState {
    let pos = geocentric_icrf_pos(tt);
    let next = geocentric_icrf_pos(tt + 1.0);
    PvState::new(pos, next - pos)
}

#[cfg(test)]
mod lunar_test {
    use super::*;
    use crate::constants::DEGRAD;

    #[test]
    fn test_distance_range() {
        // Lunar distance oscillates between roughly 356 000 and 407 000 km.
        for k in 0..28 {
            let (_, _, dist_km) = ecliptic_spherical(T2000 + k as f64);
            assert!(
                (350_000.0..413_000.0).contains(&dist_km),
                "day {k}: {dist_km} km"
            );
        }
    }

    #[test]
    fn test_latitude_bounded_by_inclination() {
        // The orbit is inclined ~5.1° to the ecliptic.
        for k in 0..28 {
            let (_, lat_deg, _) = ecliptic_spherical(T2000 + k as f64);
            assert!(lat_deg.abs() < 5.4, "day {k}: {lat_deg} deg");
        }
    }

    #[test]
    fn test_sidereal_period() {
        // The Moon returns to the same longitude after ~27.32 days.
        // The periodic terms do not close exactly over one mean period, so a
        // few degrees of residual is expected.
        let (lon0, _, _) = ecliptic_spherical(T2000);
        let (lon1, _, _) = ecliptic_spherical(T2000 + 27.321_582);
        let diff = (lon1 - lon0).rem_euclid(360.0);
        let diff = diff.min(360.0 - diff);
        assert!(diff < 4.0, "longitude drift {diff} deg");
    }

    #[test]
    fn test_daily_motion() {
        // Mean motion is ~13.2°/day.
        let p0 = geocentric_icrf_pos(T2000);
        let p1 = geocentric_icrf_pos(T2000 + 1.0);
        let sep = crate::ref_system::angular_sep(&p0, &p1) * DEGRAD;
        assert!((11.0..15.5).contains(&sep), "moved {sep} deg in one day");
    }

    #[test]
    fn test_velocity_matches_position_difference() {
        let pv = geocentric_icrf_pv(T2000);
        let expected = geocentric_icrf_pos(T2000 + 1.0) - geocentric_icrf_pos(T2000);
        assert_eq!(pv.velocity, expected);
    }
}

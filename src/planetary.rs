//! # Analytic major-planet series
//!
//! Low-precision heliocentric positions for Mercury through Neptune, from
//! mean Keplerian elements at J2000 plus secular rates (Standish's
//! approximate elements, valid 1800–2050). Accuracy is a few arcminutes over
//! that interval, which is enough for display purposes; bodies that need
//! better ephemerides are expected to come with their own orbital elements.

use crate::body::Elements;
use crate::constants::{DPI, MJD, RADEG, T2000};
use crate::kepler;
use crate::pv_state::PvState;
use crate::ref_system::{obleq, rotmt};

/// Mean elements at J2000 and secular rates per Julian century.
///
/// Angles in degrees, distances in AU. `l` is the mean longitude, `lp` the
/// longitude of perihelion, `om` the longitude of the ascending node, all
/// referred to the mean ecliptic and equinox of J2000.
struct PlanetSeries {
    a: f64,
    e: f64,
    i: f64,
    l: f64,
    lp: f64,
    om: f64,
    da: f64,
    de: f64,
    di: f64,
    dl: f64,
    dlp: f64,
    dom: f64,
}

/// Indexed 1 = Mercury … 8 = Neptune.
#[rustfmt::skip]
const SERIES: [PlanetSeries; 8] = [
    PlanetSeries { a: 0.38709927, e: 0.20563593, i: 7.00497902, l: 252.25032350, lp: 77.45779628, om: 48.33076593,
                   da: 0.00000037, de: 0.00001906, di: -0.00594749, dl: 149472.67411175, dlp: 0.16047689, dom: -0.12534081 },
    PlanetSeries { a: 0.72333566, e: 0.00677672, i: 3.39467605, l: 181.97909950, lp: 131.60246718, om: 76.67984255,
                   da: 0.00000390, de: -0.00004107, di: -0.00078890, dl: 58517.81538729, dlp: 0.00268329, dom: -0.27769418 },
    PlanetSeries { a: 1.00000261, e: 0.01671123, i: -0.00001531, l: 100.46457166, lp: 102.93768193, om: 0.0,
                   da: 0.00000562, de: -0.00004392, di: -0.01294668, dl: 35999.37244981, dlp: 0.32327364, dom: 0.0 },
    PlanetSeries { a: 1.52371034, e: 0.09339410, i: 1.84969142, l: -4.55343205, lp: -23.94362959, om: 49.55953891,
                   da: 0.00001847, de: 0.00007882, di: -0.00813131, dl: 19140.30268499, dlp: 0.44441088, dom: -0.29257343 },
    PlanetSeries { a: 5.20288700, e: 0.04838624, i: 1.30439695, l: 34.39644051, lp: 14.72847983, om: 100.47390909,
                   da: -0.00011607, de: -0.00013253, di: -0.00183714, dl: 3034.74612775, dlp: 0.21252668, dom: 0.20469106 },
    PlanetSeries { a: 9.53667594, e: 0.05386179, i: 2.48599187, l: 49.95424423, lp: 92.59887831, om: 113.66242448,
                   da: -0.00125060, de: -0.00050991, di: 0.00193609, dl: 1222.49362201, dlp: -0.41897216, dom: -0.28867794 },
    PlanetSeries { a: 19.18916464, e: 0.04725744, i: 0.77263783, l: 313.23810451, lp: 170.95427630, om: 74.01692503,
                   da: -0.00196176, de: -0.00004397, di: -0.00242939, dl: 428.48202785, dlp: 0.40805281, dom: 0.04240589 },
    PlanetSeries { a: 30.06992276, e: 0.00859048, i: 1.77004347, l: -55.12002969, lp: 44.96476227, om: 131.78422574,
                   da: 0.00026291, de: 0.00005105, di: 0.00035372, dl: 218.45945325, dlp: -0.32241464, dom: -0.00508664 },
];

/// Heliocentric state of a major planet in equatorial J2000.
///
/// Arguments
/// ---------
/// * `index`: planet index, 1 = Mercury … 8 = Neptune.
/// * `tt`: time (MJD, TT).
///
/// Return
/// ------
/// * Heliocentric position (AU) and velocity (AU/day).
///
/// # Panics
///
/// Panics if `index` is outside 1..=8.
pub fn heliocentric_pv(index: u8, tt: MJD) -> PvState {
    let series = &SERIES[index as usize - 1];
    let t = (tt - T2000) / 36525.0;

    // Elements of date.
    let a = series.a + series.da * t;
    let e = series.e + series.de * t;
    let inclination = (series.i + series.di * t) * RADEG;
    let l = (series.l + series.dl * t) * RADEG;
    let lp = (series.lp + series.dlp * t) * RADEG;
    let om = (series.om + series.dom * t) * RADEG;

    let elem = Elements {
        epoch: tt,
        inclination,
        ascending_node: om,
        periapsis_argument: (lp - om).rem_euclid(DPI),
        semi_major_axis: a,
        mean_motion: series.dl * RADEG / 36525.0,
        eccentricity: e,
        mean_anomaly: (l - lp).rem_euclid(DPI),
    };

    // The elements are referred to the ecliptic of J2000; tilt the resulting
    // state onto the equator.
    let ecl = kepler::elements_to_pv(&elem, tt);
    let rot = rotmt(obleq(T2000), 0);
    PvState::new(rot * ecl.position, rot * ecl.velocity)
}

#[cfg(test)]
mod planetary_test {
    use super::*;
    use crate::constants::DEGRAD;
    use crate::ref_system::angular_sep;

    #[test]
    fn test_earth_distance_and_plane() {
        // Earth stays within its orbital eccentricity of 1 AU.
        for k in 0..12 {
            let state = heliocentric_pv(3, T2000 + 30.44 * k as f64);
            let dist = state.position.norm();
            assert!((0.975..1.02).contains(&dist), "dist = {dist}");
        }
    }

    #[test]
    fn test_earth_period() {
        // After one Julian year the Earth is nearly back (but not exactly:
        // the sidereal year is slightly longer).
        let start = heliocentric_pv(3, T2000);
        let one_year = heliocentric_pv(3, T2000 + 365.25);
        let sep = angular_sep(&start.position, &one_year.position);
        assert!(sep * DEGRAD < 1.0, "sep = {} deg", sep * DEGRAD);
    }

    #[test]
    fn test_velocity_consistent_with_finite_difference() {
        let dt = 1e-3;
        for index in [1u8, 3, 5, 8] {
            let s0 = heliocentric_pv(index, T2000);
            let s1 = heliocentric_pv(index, T2000 + dt);
            let fd = (s1.position - s0.position) / dt;
            let err = (fd - s0.velocity).norm() / s0.velocity.norm();
            assert!(err < 1e-4, "planet {index}: velocity error {err}");
        }
    }

    #[test]
    fn test_jupiter_distance() {
        let state = heliocentric_pv(5, T2000);
        let dist = state.position.norm();
        assert!((4.9..5.5).contains(&dist), "dist = {dist}");
    }

    #[test]
    fn test_planets_orbit_same_sense() {
        // All planets move counter-clockwise seen from the north: the z
        // component of r × v is positive.
        for index in 1..=8u8 {
            let state = heliocentric_pv(index, T2000);
            let ell = state.position.cross(&state.velocity);
            assert!(ell.z > 0.0, "planet {index}");
        }
    }
}

//! # Galilean moon series
//!
//! Planetocentric positions of Io, Europa, Ganymede and Callisto from mean
//! circular orbits in Jupiter's equatorial plane, with the principal
//! longitude inequalities of the Laplace resonance. Good to a fraction of a
//! percent of the orbital radius, which is well below a pixel at any
//! realistic zoom.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{AU, MJD, RADEG, T2000};
use crate::pv_state::PvState;
use crate::ref_system::rotmt;

/// Jupiter pole, equatorial J2000 (IAU rotation model).
const POLE_RA: f64 = 268.056595 * RADEG;
const POLE_DE: f64 = 64.495303 * RADEG;

/// Orbital radius (km), mean longitude at J2000 (deg) and mean daily motion
/// (deg/day), indexed 1 = Io … 4 = Callisto.
#[rustfmt::skip]
const MOONS: [(f64, f64, f64); 4] = [
    (421_800.0,   342.021, 203.488_955_8),
    (671_100.0,   171.016, 101.374_723_5),
    (1_070_400.0, 317.540,  50.317_608_1),
    (1_882_700.0, 181.408,  21.571_071_5),
];

/// Mean longitudes of the four moons at `dt` days past J2000, in radians.
fn mean_longitudes(dt: f64) -> [f64; 4] {
    let mut l = [0.0; 4];
    for (k, (_, l0, rate)) in MOONS.iter().enumerate() {
        l[k] = (l0 + rate * dt).rem_euclid(360.0) * RADEG;
    }
    l
}

/// Corrected orbital longitude of moon `index` (1-based), in radians.
///
/// The corrections are the leading inequalities of the mutual perturbations;
/// the 1:2:4 Io–Europa–Ganymede resonance dominates.
fn orbital_longitude(index: u8, dt: f64) -> f64 {
    let l = mean_longitudes(dt);
    let correction_deg = match index {
        1 => 0.472 * (2.0 * (l[0] - l[1])).sin(),
        2 => 1.065 * (2.0 * (l[1] - l[2])).sin(),
        3 => 0.174 * (l[2] - l[3]).sin(),
        4 => 0.063 * (l[3] - l[2]).sin(),
        _ => unreachable!("moon index out of range"),
    };
    l[index as usize - 1] + correction_deg * RADEG
}

/// Rotation from Jupiter's equatorial frame to equatorial J2000.
fn jupiter_frame() -> Matrix3<f64> {
    rotmt(POLE_RA + std::f64::consts::FRAC_PI_2, 2)
        * rotmt(std::f64::consts::FRAC_PI_2 - POLE_DE, 0)
}

/// Planetocentric state of a Galilean moon in equatorial J2000.
///
/// Arguments
/// ---------
/// * `index`: moon index, 1 = Io … 4 = Callisto.
/// * `tt`: time (MJD, TT).
///
/// Return
/// ------
/// * Position (AU) and velocity (AU/day) relative to Jupiter's center.
///
/// # Panics
///
/// Panics if `index` is outside 1..=4.
pub fn planetocentric_pv(index: u8, tt: MJD) -> PvState {
    let (a_km, _, rate_deg) = MOONS[index as usize - 1];
    let dt = tt - T2000;

    let r = a_km / AU;
    let n = rate_deg * RADEG; // rad/day
    let lambda = orbital_longitude(index, dt);
    let (sin_l, cos_l) = lambda.sin_cos();

    let pos = Vector3::new(r * cos_l, r * sin_l, 0.0);
    let vel = Vector3::new(-r * n * sin_l, r * n * cos_l, 0.0);

    let rot = jupiter_frame();
    PvState::new(rot * pos, rot * vel)
}

#[cfg(test)]
mod giant_moons_test {
    use super::*;
    use crate::ref_system::angular_sep;

    #[test]
    fn test_orbital_radii() {
        for index in 1..=4u8 {
            let state = planetocentric_pv(index, T2000 + 17.3);
            let expected = MOONS[index as usize - 1].0 / AU;
            assert!(
                (state.position.norm() - expected).abs() < 1e-9,
                "moon {index}"
            );
        }
    }

    #[test]
    fn test_io_period() {
        // Io returns to the same direction after ~1.769 days.
        let p0 = planetocentric_pv(1, T2000).position;
        let p1 = planetocentric_pv(1, T2000 + 360.0 / 203.488_955_8).position;
        let sep = angular_sep(&p0, &p1);
        // The resonance correction moves slowly; one period is nearly closed.
        assert!(sep < 0.02, "sep = {sep} rad");
    }

    #[test]
    fn test_orbits_lie_in_jupiter_equator() {
        // Every moon's position is orthogonal to Jupiter's pole.
        let pole = jupiter_frame() * Vector3::new(0.0, 0.0, 1.0);
        for index in 1..=4u8 {
            let state = planetocentric_pv(index, T2000 + 5.0);
            let cos_angle = pole.dot(&state.position.normalize());
            assert!(cos_angle.abs() < 1e-12, "moon {index}: {cos_angle}");
        }
    }

    #[test]
    fn test_velocity_consistent_with_finite_difference() {
        let dt = 1e-4;
        for index in 1..=4u8 {
            let s0 = planetocentric_pv(index, T2000);
            let s1 = planetocentric_pv(index, T2000 + dt);
            let fd = (s1.position - s0.position) / dt;
            // The resonance-correction derivative is not part of the analytic
            // velocity, so the agreement is ~1%, not machine precision.
            let err = (fd - s0.velocity).norm() / s0.velocity.norm();
            assert!(err < 2e-2, "moon {index}: velocity error {err}");
        }
    }
}

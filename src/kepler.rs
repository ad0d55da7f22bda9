//! # Two-body propagation and element extraction
//!
//! Keplerian machinery shared by the position solver and the orbit-path
//! display: the Kepler equation solver, propagation of stored orbital
//! elements to a Cartesian state, and the inverse conversion from a
//! Cartesian state to osculating elements.
//!
//! All Cartesian states are expressed in the reference plane the elements are
//! defined in (the caller rotates to another frame when needed). Units are
//! AU, AU/day, radians and MJD throughout.

use nalgebra::Vector3;

use crate::body::Elements;
use crate::constants::{Radian, DPI, MJD};
use crate::pv_state::PvState;
use crate::ref_system::rotmt;

/// Principal value of an angle in radians, in [0, 2π).
pub(crate) fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Solve the elliptic Kepler equation `M = E − e·sin E` for the eccentric
/// anomaly `E` using Newton's method.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly M (radians, any range).
/// * `eccentricity`: orbital eccentricity, `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly E in radians.
///
/// For high eccentricities Newton's method started at M can diverge, so the
/// iteration starts at π instead; the step count is capped.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    const JMAX: usize = 50;
    let contr = 100.0 * f64::EPSILON;

    let m = principal_angle(mean_anomaly);
    let mut ea = if eccentricity < 0.8 { m } else { std::f64::consts::PI };

    for _ in 0..JMAX {
        let f = ea - eccentricity * ea.sin() - m;
        let fp = 1.0 - eccentricity * ea.cos();
        let dea = -f / fp;
        ea += dea;
        if dea.abs() < contr {
            break;
        }
    }
    ea
}

/// Propagate orbital elements to a Cartesian state at time `tt`.
///
/// Arguments
/// ---------
/// * `elem`: orbital elements, relative to the parent body.
/// * `tt`: target time (MJD, TT).
///
/// Return
/// ------
/// * Parent-relative position (AU) and velocity (AU/day) in the reference
///   plane of the elements.
pub fn elements_to_pv(elem: &Elements, tt: MJD) -> PvState {
    let e = elem.eccentricity;
    let a = elem.semi_major_axis;
    let n = elem.mean_motion;

    let m = principal_angle(elem.mean_anomaly + n * (tt - elem.epoch));
    let ea = solve_kepler(m, e);
    let (sin_e, cos_e) = ea.sin_cos();
    let root = (1.0 - e * e).sqrt();
    let r = a * (1.0 - e * cos_e);

    // In-plane state, X toward pericenter.
    let pos = Vector3::new(a * (cos_e - e), a * root * sin_e, 0.0);
    let vel = Vector3::new(-n * a * a * sin_e / r, n * a * a * root * cos_e / r, 0.0);

    // Pericenter → node → reference plane.
    let rot = rotmt(elem.ascending_node, 2)
        * rotmt(elem.inclination, 0)
        * rotmt(elem.periapsis_argument, 2);

    PvState::new(rot * pos, rot * vel)
}

/// Convert a Cartesian state to osculating Keplerian elements.
///
/// Arguments
/// ---------
/// * `position`: parent-relative position (AU).
/// * `velocity`: parent-relative velocity (AU/day).
/// * `mu`: gravitational parameter of the parent, AU³/day².
/// * `epoch`: time of the state (MJD, TT); becomes the element epoch.
///
/// Return
/// ------
/// * Osculating elements, or `None` when the state is degenerate (rectilinear
///   motion or an unbound orbit), which the engine never produces for a
///   well-formed body.
pub fn elements_from_pv(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    mu: f64,
    epoch: MJD,
) -> Option<Elements> {
    // Angular momentum vector
    let ell = position.cross(velocity);
    if ell.norm() == 0.0 {
        return None;
    }

    // Orbital inclination and longitude of the node
    let sini = ell.x.hypot(ell.y);
    let inclination = sini.atan2(ell.z);
    let ascending_node = if sini == 0.0 {
        0.0
    } else {
        principal_angle(ell.x.atan2(-ell.y))
    };

    // Reciprocal semimajor axis from the vis-viva integral
    let r = position.norm();
    let reca = 2.0 / r - velocity.norm_squared() / mu;
    if reca <= 0.0 {
        return None;
    }
    let a = 1.0 / reca;
    let n = (mu / (a * a * a)).sqrt();

    // Eccentricity and eccentric anomaly
    let esine = position.dot(velocity) / (n * a * a);
    let ecose = 1.0 - r / a;
    let e = esine.hypot(ecose);
    let ea = esine.atan2(ecose);
    let mean_anomaly = principal_angle(ea - e * ea.sin());

    // Argument of pericenter: position angle in the node frame minus the
    // true anomaly.
    let node_frame = rotmt(-inclination, 0) * (rotmt(-ascending_node, 2) * position);
    let theta = node_frame.y.atan2(node_frame.x);
    let root = (1.0 - e * e).sqrt();
    let nu = (root * ea.sin()).atan2(ea.cos() - e);
    let periapsis_argument = principal_angle(theta - nu);

    Some(Elements {
        epoch,
        inclination,
        ascending_node,
        periapsis_argument,
        semi_major_axis: a,
        mean_motion: n,
        eccentricity: e,
        mean_anomaly,
    })
}

//! # Body records
//!
//! The per-body static data and the two mutable cache slots the engine
//! attaches to it. Bodies live in the [`Orrery`](crate::orrery::Orrery)
//! arena; parent links are arena indices, so the hierarchy is a tree of
//! non-owning back-references, validated acyclic at load time.

use std::cell::Cell;

use crate::constants::{Degree, Meter, Radian, DPI, MJD};
use crate::pv_state::PvState;

/// Orbit elements, with ICRF reference plane, relative to the parent body.
///
/// Units:
/// * `epoch`: MJD (TT)
/// * `inclination`, `ascending_node`, `periapsis_argument`, `mean_anomaly`: radians
/// * `semi_major_axis`: AU
/// * `mean_motion`: radians/day
/// * `eccentricity`: unitless
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elements {
    pub epoch: MJD,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub periapsis_argument: Radian,
    pub semi_major_axis: f64,
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub mean_anomaly: Radian,
}

/// Rotation elements of a body around its own axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationModel {
    pub obliquity: Radian,
    /// Sidereal rotation period in days (0 when unknown).
    pub period: f64,
    pub offset: Radian,
    pub pole_ra: Radian,
    pub pole_de: Radian,
}

/// Ring dimensions of a ringed body.
#[derive(Debug, Clone, Copy)]
pub struct Rings {
    pub inner_radius: Meter,
    pub outer_radius: Meter,
}

/// Solver dispatch class of a body.
///
/// The position and magnitude algorithms are selected by this tag rather than
/// by virtual dispatch; each variant carries only what its algorithm needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    Sun,
    Earth,
    Moon,
    /// Major planet index: 1 = Mercury … 8 = Neptune.
    MajorPlanet(u8),
    /// Galilean moon index: 1 = Io … 4 = Callisto.
    GiantMoon(u8),
    /// Anything else: propagated from its stored orbital elements.
    Generic,
}

impl BodyClass {
    /// Derive the class from a JPL HORIZONS identifier.
    pub fn from_horizons_id(id: i32) -> Self {
        use crate::constants::*;
        match id {
            SUN_ID => BodyClass::Sun,
            EARTH_ID => BodyClass::Earth,
            MOON_ID => BodyClass::Moon,
            MERCURY_ID | VENUS_ID | MARS_ID | JUPITER_ID | SATURN_ID | URANUS_ID | NEPTUNE_ID => {
                BodyClass::MajorPlanet(((id - MERCURY_ID) / 100 + 1) as u8)
            }
            IO_ID..=CALLISTO_ID => BodyClass::GiantMoon((id - IO_ID + 1) as u8),
            _ => BodyClass::Generic,
        }
    }
}

/// Full-update cache payload: the state solved at `epoch`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FullCache {
    pub epoch: MJD,
    pub state: PvState,
}

/// Index of a body in the [`Orrery`](crate::orrery::Orrery) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyIndex(pub(crate) usize);

/// A solar-system body: static catalog data plus the engine's cached state.
#[derive(Debug)]
pub struct Body {
    // Constant data.
    pub name: String,
    /// Unique id number, as defined in JPL HORIZONS.
    pub id: i32,
    pub class: BodyClass,
    pub parent: Option<BodyIndex>,
    pub radius_m: Meter,
    pub albedo: f64,
    /// kg (0 if unknown).
    pub mass: f64,
    pub color: [f64; 4],
    pub rot: RotationModel,
    /// Orbit elements relative to the parent body (Generic bodies only).
    pub orbit: Option<Elements>,
    pub rings: Option<Rings>,

    /// Number of seconds between two full orbit updates. Jittered per body so
    /// that many bodies do not all miss their cache in the same frame.
    pub(crate) update_delta_s: f64,
    /// Last full solve, valid near its epoch.
    pub(crate) full_cache: Cell<Option<FullCache>>,
    /// Last light-time-corrected observer-relative state, keyed by the
    /// observer identity hash it was computed for.
    pub(crate) observed_cache: Cell<Option<(u64, PvState)>>,
    /// Count of full (non-extrapolated) solves, for diagnostics.
    pub(crate) solve_count: Cell<u64>,
}

impl Body {
    /// Rotation angle of the body around its axis at time `tt` (MJD, TT).
    ///
    /// Returns 0 for bodies without a known rotation period.
    pub fn rotation_angle(&self, tt: MJD) -> Radian {
        if self.rot.period == 0.0 {
            return 0.0;
        }
        (tt - crate::constants::T2000) / self.rot.period * DPI + self.rot.offset
    }

    /// Number of full solves performed for this body so far.
    ///
    /// Purely diagnostic: lets a host (or a test) observe the effect of the
    /// caches.
    pub fn solve_count(&self) -> u64 {
        self.solve_count.get()
    }

    /// Unit vector of the body's rotation pole in equatorial J2000, from the
    /// catalog pole right ascension / declination. `None` when the catalog
    /// does not provide a pole.
    pub fn pole(&self) -> Option<nalgebra::Vector3<f64>> {
        if self.rot.pole_ra == 0.0 && self.rot.pole_de == 0.0 {
            return None;
        }
        let (sin_ra, cos_ra) = self.rot.pole_ra.sin_cos();
        let (sin_de, cos_de) = self.rot.pole_de.sin_cos();
        Some(nalgebra::Vector3::new(
            cos_ra * cos_de,
            sin_ra * cos_de,
            sin_de,
        ))
    }
}

/// Degrees → radians helper for catalog angles.
pub(crate) fn deg_to_rad(deg: Degree) -> Radian {
    deg * crate::constants::RADEG
}

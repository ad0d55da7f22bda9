//! # Photometry
//!
//! Apparent visual magnitudes and phase fractions. Each body class has its
//! own empirical model:
//!
//! * the Sun follows the absolute-magnitude distance law, attenuated by the
//!   eclipse factor of the shadow module,
//! * the Moon uses an elongation/distance fit,
//! * major planets use the phase-angle polynomials of the Explanatory
//!   Supplement (1992), plus a ring-opening correction for Saturn,
//! * everything else falls back to the absolute magnitude implied by its
//!   albedo and physical radius.

use crate::body::{BodyClass, BodyIndex};
use crate::constants::{DEGRAD, MIN_ECLIPSE_FACTOR, RADSEC, SUN_ABS_MAG};
use crate::observer::Observer;
use crate::orrery::Orrery;
use crate::ref_system::angular_sep;

/// Visual elements of the major planets:
/// `[planet][0]` = angular size at 1 AU,
/// `[planet][1]` = magnitude at 1 AU from Sun and Earth at zero phase angle,
/// `[planet][2..5]` = A, B, C
///   where mag correction = A·(i/100) + B·(i/100)² + C·(i/100)³,
///   i = Sun–observer angle seen from the planet, in degrees.
/// From the Explanatory Supplement, 1992. Row 0 is padding; rows are indexed
/// by planet number (1 = Mercury … 8 = Neptune, Earth's row unused).
#[rustfmt::skip]
const VIS_ELEMENTS: [[f64; 5]; 9] = [
    /*         */ [0., 0., 0., 0., 0.],
    /* Mercury */ [6.74, -0.36, 3.8, -2.73, 2.00],
    /* Venus */   [16.92, -4.29, 0.09, 2.39, -0.65],
    /* Earth */   [0., 0., 0., 0., 0.],
    /* Mars */    [9.36, -1.52, 1.60, 0., 0.],
    /* Jupiter */ [196.74, -9.25, 0.50, 0., 0.],
    /* Saturn */  [165.6, -8.88, 4.40, 0., 0.],
    /* Uranus */  [70.481, -7.19, 0.28, 0., 0.],
    /* Neptune */ [68.294, -6.87, 0., 0., 0.],
];

impl Orrery {
    /// Apparent visual magnitude of a body for the given observer.
    pub fn visual_magnitude(&self, ix: BodyIndex, obs: &Observer) -> f64 {
        let body = self.body(ix);
        match body.class {
            BodyClass::Sun => self.sun_vmag(obs),
            BodyClass::Moon => self.moon_vmag(ix, obs),
            BodyClass::MajorPlanet(index) => self.planet_vmag(ix, index, obs),
            // Earth, the Galilean moons and every generic body use the
            // albedo/radius absolute-magnitude model.
            _ => self.small_body_vmag(ix, obs),
        }
    }

    /// Phase fraction of a body: ½(1 + cos i) with i the Sun–body–observer
    /// angle. 1.0 is full, 0.0 is new. Not defined for the Sun or for the
    /// observer's own planet; those return NaN and must be treated as
    /// non-comparable.
    pub fn phase(&self, ix: BodyIndex, obs: &Observer) -> f64 {
        let body = self.body(ix);
        if matches!(body.class, BodyClass::Sun | BodyClass::Earth) {
            return f64::NAN;
        }
        let pvh = self.position_heliocentric(ix, obs);
        let pvo = self.position_observed(ix, obs, true);
        let i = angular_sep(&pvh.position, &pvo.position);
        0.5 * i.cos() + 0.5
    }

    fn sun_vmag(&self, obs: &Observer) -> f64 {
        // Distance in parsec (RADSEC is also the AU → parsec factor).
        let dist_pc = obs.earth_pvh.position.norm() * RADSEC;
        let eclipse_factor = self.sun_eclipse_factor(obs).max(MIN_ECLIPSE_FACTOR);
        SUN_ABS_MAG + 5.0 * (dist_pc.log10() - 1.0) - 2.5 * eclipse_factor.log10()
    }

    fn moon_vmag(&self, ix: BodyIndex, obs: &Observer) -> f64 {
        let pi = std::f64::consts::PI;
        let pvo = self.position_observed(ix, obs, true);
        let dist = pvo.position.norm();
        let el = angular_sep(&pvo.position, &obs.sun_pvo.position); // Elongation.
        -12.7 + 2.5 * (pi.log10() - (pi / 2.0 * (1.0 + 1.0e-6 - el.cos())).log10())
            + 5.0 * (dist / 0.0025).log10()
    }

    fn planet_vmag(&self, ix: BodyIndex, index: u8, obs: &Observer) -> f64 {
        let pvh = self.position_heliocentric(ix, obs);
        let pvo = self.position_observed(ix, obs, true);
        // Phase angle in (degrees / 100), the unit of the polynomial.
        let i = angular_sep(&pvh.position, &pvo.position) * DEGRAD / 100.0;
        let rho = pvh.position.norm();
        let rp = pvo.position.norm();
        let vis = &VIS_ELEMENTS[index as usize];
        vis[1]
            + 5.0 * (rho * rp).log10()
            + i * (vis[2] + i * (vis[3] + i * vis[4]))
            + self.rings_vmag(ix, obs)
    }

    fn small_body_vmag(&self, ix: BodyIndex, obs: &Observer) -> f64 {
        let body = self.body(ix);
        let pvh = self.position_heliocentric(ix, obs);
        let pvo = self.position_observed(ix, obs, true);
        let rho = pvh.position.norm();
        let rp = pvo.position.norm();
        // Absolute magnitude from assumed albedo and diameter (the 1329 km
        // zero point of the H/D relation).
        let mag =
            -1.0 / 0.2 * (body.albedo.sqrt() * 2.0 * body.radius_m / 1000.0 / 1329.0).log10();
        mag + 5.0 * (rho * rp).log10()
    }

    /// Magnitude correction from the rings, for a ringed body with a known
    /// pole: brightening that grows with the ring opening toward the
    /// observer. Zero for everything else.
    fn rings_vmag(&self, ix: BodyIndex, obs: &Observer) -> f64 {
        let body = self.body(ix);
        let (Some(_), Some(pole)) = (body.rings, body.pole()) else {
            return 0.0;
        };
        let pvo = self.position_observed(ix, obs, true);
        // sin of the ring opening angle toward the observer.
        let set = pole.dot(&pvo.position.normalize()).abs();
        (-2.60 + 1.25 * set) * set
    }
}

//! # Position solver and light-time correction
//!
//! The heart of the engine: the recursive heliocentric solver with its
//! coarse per-body cache, and the observer-relative (apparent) state with
//! its hash-keyed cache and single-step light-time correction.
//!
//! The solver dispatches on [`BodyClass`]:
//! * Earth comes straight from the observer snapshot (never solved),
//! * the Sun is the heliocentric origin,
//! * the Moon uses the lunar series plus the Earth's state,
//! * major planets use the analytic planetary series,
//! * Galilean moons use their series plus the recursively solved Jupiter,
//! * everything else is two-body propagation of its stored elements plus the
//!   recursively solved parent.
//!
//! A body's resolved position always equals its parent's resolved position
//! plus its own parent-relative contribution; moons recurse through their
//! planet, never directly to the Sun.

use nalgebra::Vector4;

use crate::body::{BodyClass, BodyIndex, Elements, FullCache};
use crate::constants::{
    GRAV_CONST, METERS_PER_AU, Radian, SECONDS_PER_DAY, VLIGHT_AU,
};
use crate::giant_moons;
use crate::kepler;
use crate::lunar;
use crate::observer::Observer;
use crate::orrery::Orrery;
use crate::orrery_errors::OrreryError;
use crate::planetary;
use crate::pv_state::PvState;

impl Orrery {
    /// Heliocentric state of a body in equatorial J2000 (AU, AU/day).
    ///
    /// If the body's coarse cache is still valid — the last full solve is
    /// closer than the body's revalidation interval — the cached state is
    /// extrapolated linearly instead of re-solving. After a full solve the
    /// cache is refreshed and stamped with the solve epoch.
    pub fn position_heliocentric(&self, ix: BodyIndex, obs: &Observer) -> PvState {
        let body = self.body(ix);

        // Use cached value if possible.
        if let Some(cache) = body.full_cache.get() {
            let dt = obs.tt - cache.epoch;
            if dt.abs() < body.update_delta_s / SECONDS_PER_DAY {
                return cache.state.extrapolate(dt);
            }
        }

        let state = match body.class {
            BodyClass::Earth => return obs.earth_pvh,
            BodyClass::Sun => return PvState::zero(),
            BodyClass::Moon => lunar::geocentric_icrf_pv(obs.tt) + obs.earth_pvh,
            BodyClass::MajorPlanet(index) => planetary::heliocentric_pv(index, obs.tt),
            BodyClass::GiantMoon(index) => {
                let parent = self.position_heliocentric(self.parent_of(ix), obs);
                giant_moons::planetocentric_pv(index, obs.tt) + parent
            }
            BodyClass::Generic => {
                let parent = self.position_heliocentric(self.parent_of(ix), obs);
                let elements = body
                    .orbit
                    .as_ref()
                    .expect("generic body carries elements (validated at load)");
                kepler::elements_to_pv(elements, obs.tt) + parent
            }
        };

        // Cache the value for next time.
        body.solve_count.set(body.solve_count.get() + 1);
        body.full_cache.set(Some(FullCache {
            epoch: obs.tt,
            state,
        }));
        state
    }

    /// Observed state of a body: position and velocity relative to the
    /// observer, equatorial J2000.
    ///
    /// With `adjust_light_speed` set, the state is corrected for light travel
    /// time: the body is re-solved at `tt − ‖r‖/c` and recombined with the
    /// *current* observer terms. The correction is a single step; its error
    /// is bounded by the body's motion during one light-travel time.
    ///
    /// Only corrected results are cached, keyed by the observer identity
    /// hash; a matching hash returns the stored state without touching the
    /// solver. Geometric (uncorrected) requests are cheap and bypass the
    /// cache entirely.
    pub fn position_observed(
        &self,
        ix: BodyIndex,
        obs: &Observer,
        adjust_light_speed: bool,
    ) -> PvState {
        let body = self.body(ix);

        // Use cached value if possible.
        if adjust_light_speed {
            if let Some((hash, state)) = body.observed_cache.get() {
                if hash == obs.hash {
                    return state;
                }
            }
        }

        let pvh = self.position_heliocentric(ix, obs);
        let pvo = pvh + obs.sun_pvb - obs.obs_pvb;
        if !adjust_light_speed {
            return pvo;
        }

        // Apply light speed adjustment: re-solve at the retarded time, keep
        // the observer terms of the current instant.
        let ldt = pvo.position.norm() / VLIGHT_AU;
        let mut retarded = obs.clone();
        retarded.tt -= ldt;
        let pvh = self.position_heliocentric(ix, &retarded);
        let pvo = pvh + obs.sun_pvb - obs.obs_pvb;

        // Copy value into cache to speed up next access.
        body.observed_cache.set(Some((obs.hash, pvo)));
        pvo
    }

    /// Same as [`position_observed`](Self::position_observed) with light-time
    /// correction, as homogeneous 4-vectors (w = 1).
    pub fn position_observed_h(&self, ix: BodyIndex, obs: &Observer) -> [Vector4<f64>; 2] {
        self.position_observed(ix, obs, true).to_homogeneous()
    }

    /// Apparent angular radius of a body, in radians.
    pub fn angular_radius(&self, ix: BodyIndex, obs: &Observer) -> Radian {
        let pvo = self.position_observed(ix, obs, true);
        self.body(ix).radius_m / METERS_PER_AU / pvo.position.norm()
    }

    /// Osculating Keplerian elements of a body's motion around its parent at
    /// the observer's time, for orbit-path display.
    ///
    /// Both states are resolved, differenced, and converted with
    /// μ = G·M_parent. Recomputed on every call (at most one body per frame
    /// asks for this, so a cache would buy nothing).
    pub fn osculating_elements(
        &self,
        ix: BodyIndex,
        obs: &Observer,
    ) -> Result<Elements, OrreryError> {
        let body = self.body(ix);
        let parent_ix = body
            .parent
            .ok_or_else(|| OrreryError::MissingParent(body.name.clone()))?;
        let parent = self.body(parent_ix);

        // μ in AU³/day²
        let mu = GRAV_CONST * parent.mass / METERS_PER_AU.powi(3)
            * SECONDS_PER_DAY
            * SECONDS_PER_DAY;

        let parent_pvh = self.position_heliocentric(parent_ix, obs);
        let pvh = self.position_heliocentric(ix, obs);
        let rel = pvh - parent_pvh;

        kepler::elements_from_pv(&rel.position, &rel.velocity, mu, obs.tt)
            .ok_or_else(|| OrreryError::DegenerateState(body.name.clone()))
    }

    pub(crate) fn parent_of(&self, ix: BodyIndex) -> BodyIndex {
        self.body(ix)
            .parent
            .expect("non-Sun body has a parent (validated at load)")
    }
}

//! # Observer state
//!
//! The read-only snapshot of the observer the engine computes against: the
//! current time, the observer's barycentric state, the Sun's and Earth's
//! states, and an identity hash that changes whenever any of these change.
//! The hash is the cache key of every body's observer-relative cache slot, so
//! it must be equal only for byte-identical observer states.

use std::hash::{Hash, Hasher};

use crate::constants::MJD;
use crate::planetary;
use crate::pv_state::PvState;

/// Snapshot of the observer for one frame.
///
/// All states are in equatorial J2000 (AU, AU/day):
/// * `earth_pvh` — Earth, heliocentric
/// * `obs_pvb` — the observer, barycentric
/// * `sun_pvb` — the Sun, barycentric
/// * `sun_pvo` — the Sun, observer-relative (apparent)
#[derive(Debug, Clone)]
pub struct Observer {
    /// Current time (MJD, TT).
    pub tt: MJD,
    /// Identity of this snapshot; changes whenever any field changes.
    pub hash: u64,
    pub earth_pvh: PvState,
    pub obs_pvb: PvState,
    pub sun_pvb: PvState,
    pub sun_pvo: PvState,
}

impl Observer {
    /// Build an observer snapshot; the identity hash is computed from the
    /// supplied fields.
    pub fn new(
        tt: MJD,
        earth_pvh: PvState,
        obs_pvb: PvState,
        sun_pvb: PvState,
        sun_pvo: PvState,
    ) -> Self {
        let mut obs = Observer {
            tt,
            hash: 0,
            earth_pvh,
            obs_pvb,
            sun_pvb,
            sun_pvo,
        };
        obs.rehash();
        obs
    }

    /// Geocentric observer at time `tt`, built from the engine's own Earth
    /// series. A real host supplies richer state (topocentric offset,
    /// barycentric corrections); this constructor is enough for standalone
    /// use and for tests.
    pub fn geocentric(tt: MJD) -> Self {
        let earth_pvh = planetary::heliocentric_pv(3, tt);
        let sun_pvb = PvState::zero();
        let obs_pvb = earth_pvh;
        let sun_pvo = sun_pvb - obs_pvb;
        Observer::new(tt, earth_pvh, obs_pvb, sun_pvb, sun_pvo)
    }

    /// Recompute the identity hash from the current field values.
    ///
    /// Call after mutating any field in place. Two observers hash equal iff
    /// every field is bit-identical; numerically close states get distinct
    /// hashes, which is what the observer-relative cache requires.
    pub fn rehash(&mut self) {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        hash_f64(&mut hasher, self.tt);
        for state in [&self.earth_pvh, &self.obs_pvb, &self.sun_pvb, &self.sun_pvo] {
            for v in [&state.position, &state.velocity] {
                hash_f64(&mut hasher, v.x);
                hash_f64(&mut hasher, v.y);
                hash_f64(&mut hasher, v.z);
            }
        }
        self.hash = hasher.finish();
    }
}

fn hash_f64<H: Hasher>(hasher: &mut H, v: f64) {
    v.to_bits().hash(hasher);
}

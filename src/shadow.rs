//! # Eclipse and shadow geometry
//!
//! One geometric primitive — the overlap of two discs on the sky — serves two
//! consumers: the solar eclipse factor that attenuates the Sun's magnitude,
//! and the selection of shadow-casting candidates a renderer feeds to its
//! planet shader.

use nalgebra::Vector3;
use smallvec::SmallVec;

use crate::body::{BodyClass, BodyIndex};
use crate::constants::{JUPITER_ID, METERS_PER_AU, Radian, SUN_RADIUS_M};
use crate::observer::Observer;
use crate::orrery::Orrery;
use crate::ref_system::angular_sep;

/// Solar radius in AU, for penumbra cone geometry.
const SUN_RADIUS_AU: f64 = SUN_RADIUS_M / METERS_PER_AU;

/// A potential shadow caster, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCandidate {
    /// Observer-relative position, equatorial J2000 (AU), light-time corrected.
    pub position: Vector3<f64>,
    /// Physical radius (AU); the list is kept sorted by this, biggest first.
    pub radius: f64,
}

/// Visible fraction of a disc of angular radius `sun_r` occulted by a disc of
/// angular radius `occ_r` at angular separation `sep` (all radians).
///
/// Four regimes:
/// * no overlap (`sep ≥ sun_r + occ_r`) → 1.0
/// * total occultation (`sep ≤ occ_r − sun_r`, occluder at least as big) → 0.0
/// * transit (occluder fully inside the disc) → area ratio
/// * partial overlap → two-circle lens area
///
/// The result is clamped to [0, 1] so degenerate inputs can never leak a
/// negative or super-unity illumination downstream.
pub fn visible_fraction(sun_r: Radian, occ_r: Radian, sep: Radian) -> f64 {
    if sep >= sun_r + occ_r {
        return 1.0; // Outside of shadow.
    }
    if sep <= occ_r - sun_r {
        return 0.0; // Umbra.
    }
    if sep <= sun_r - occ_r {
        // Occluder transits the disc.
        return 1.0 - occ_r * occ_r / (sun_r * sun_r);
    }
    // Partial overlap: lens-shaped intersection of the two circles.
    let x = (sun_r * sun_r + sep * sep - occ_r * occ_r) / (2.0 * sep);
    let alpha = (x / sun_r).clamp(-1.0, 1.0).acos();
    let beta = ((sep - x) / occ_r).clamp(-1.0, 1.0).acos();
    let big_segment = sun_r * sun_r * (alpha - 0.5 * (2.0 * alpha).sin());
    let small_segment = occ_r * occ_r * (beta - 0.5 * (2.0 * beta).sin());
    let disc = std::f64::consts::PI * sun_r * sun_r;
    (1.0 - (big_segment + small_segment) / disc).clamp(0.0, 1.0)
}

impl Orrery {
    /// Illuminated fraction of the Sun's disc as seen by the observer,
    /// accounting for an eclipse by a moon. 1.0 when nothing is in front.
    pub fn sun_eclipse_factor(&self, obs: &Observer) -> f64 {
        let sun = self.body(self.sun());
        let sun_dist = obs.sun_pvo.position.norm();
        if sun_dist == 0.0 {
            return 1.0;
        }
        let sun_r = sun.radius_m / METERS_PER_AU / sun_dist;

        for (ix, body) in self.bodies() {
            if body.class != BodyClass::Moon {
                continue;
            }
            let pvo = self.position_observed(ix, obs, true);
            let occ_r = body.radius_m / METERS_PER_AU / pvo.position.norm();
            let sep = angular_sep(&obs.sun_pvo.position, &pvo.position);
            return visible_fraction(sun_r, occ_r, sep);
        }
        1.0
    }

    /// Could body `a` cast a shadow on body `b`?
    ///
    /// With `a == None`, answers whether *anything* is allowed to shadow `b`
    /// at all. The allow-list is fixed: the Earth may shadow the Moon, and
    /// the jovian group (the Galilean moons and Jupiter) may shadow each
    /// other. A candidate must also sit closer to the Sun than the shadowed
    /// body, with the tip of its penumbra cone reaching past it.
    fn could_cast_shadow(&self, a: Option<BodyIndex>, b: BodyIndex, obs: &Observer) -> bool {
        let target = self.body(b);
        let in_jovian_group =
            |class: BodyClass, id: i32| matches!(class, BodyClass::GiantMoon(_)) || id == JUPITER_ID;

        let Some(a) = a else {
            return target.class == BodyClass::Moon
                || in_jovian_group(target.class, target.id);
        };

        let caster = self.body(a);
        if a == b {
            return false; // No self shadow.
        }
        if in_jovian_group(target.class, target.id) && !in_jovian_group(caster.class, caster.id) {
            return false;
        }
        if target.class == BodyClass::Moon && caster.class != BodyClass::Earth {
            return false;
        }

        let apvh = self.position_heliocentric(a, obs);
        let bpvh = self.position_heliocentric(b, obs);
        if apvh.position.norm_squared() > bpvh.position.norm_squared() {
            return false;
        }

        // Similar triangles: the penumbra cone's apex sits between the Sun
        // and the caster, and widens past it.
        let axis = apvh.position.normalize();
        let shadow_dist = axis.dot(&bpvh.position);
        let caster_radius = caster.radius_m / METERS_PER_AU;
        let apex = apvh.position.norm() / (caster_radius / SUN_RADIUS_AU + 1.0);
        let penumbra_r = (shadow_dist - apex) / apex * SUN_RADIUS_AU;
        let off_axis = (axis * shadow_dist - bpvh.position).norm();
        off_axis < penumbra_r + target.radius_m / METERS_PER_AU
    }

    /// The potential shadow casters a renderer should consider when drawing
    /// `target`: observer-relative position plus physical radius, at most
    /// `nb_max` entries, biggest radius first. When the list is full a new,
    /// larger candidate evicts the smallest; smaller candidates are dropped.
    pub fn shadow_candidates(
        &self,
        target: BodyIndex,
        obs: &Observer,
        nb_max: usize,
    ) -> SmallVec<[ShadowCandidate; 4]> {
        let mut spheres = SmallVec::new();
        if nb_max == 0 || !self.could_cast_shadow(None, target, obs) {
            return spheres;
        }

        for (ix, body) in self.bodies() {
            if !self.could_cast_shadow(Some(ix), target, obs) {
                continue;
            }
            let radius = body.radius_m / METERS_PER_AU;
            // No more space: replace the smallest one in the list if we can.
            if spheres.len() >= nb_max {
                if radius < spheres[nb_max - 1].radius {
                    continue;
                }
                spheres.pop();
            }
            let pvo = self.position_observed(ix, obs, true);
            spheres.push(ShadowCandidate {
                position: pvo.position,
                radius,
            });
            spheres.sort_by(|x, y| y.radius.total_cmp(&x.radius));
        }
        spheres
    }
}

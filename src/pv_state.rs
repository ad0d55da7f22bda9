use std::ops::{Add, Neg, Sub};

use nalgebra::{Vector3, Vector4};

use crate::constants::MJD;

/// A position + velocity pair in the equatorial J2000 frame.
///
/// Units:
/// * `position`: AU
/// * `velocity`: AU/day
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PvState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl PvState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        PvState { position, velocity }
    }

    /// The zero state (used for the body that defines the origin).
    pub fn zero() -> Self {
        PvState {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Propagate the state linearly over `dt` days (constant velocity).
    ///
    /// This is the cheap revalidation path of the coarse cache: for short
    /// intervals the quadratic term (the body's acceleration) is negligible.
    pub fn extrapolate(&self, dt: MJD) -> Self {
        PvState {
            position: self.position + self.velocity * dt,
            velocity: self.velocity,
        }
    }

    /// Homogeneous 4-vector view `[position, velocity]`, w = 1.
    pub fn to_homogeneous(&self) -> [Vector4<f64>; 2] {
        [
            Vector4::new(self.position.x, self.position.y, self.position.z, 1.0),
            Vector4::new(self.velocity.x, self.velocity.y, self.velocity.z, 1.0),
        ]
    }
}

impl Add for PvState {
    type Output = PvState;

    fn add(self, rhs: PvState) -> PvState {
        PvState {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Sub for PvState {
    type Output = PvState;

    fn sub(self, rhs: PvState) -> PvState {
        PvState {
            position: self.position - rhs.position,
            velocity: self.velocity - rhs.velocity,
        }
    }
}

impl Neg for PvState {
    type Output = PvState;

    fn neg(self) -> PvState {
        PvState {
            position: -self.position,
            velocity: -self.velocity,
        }
    }
}

#[cfg(test)]
mod pv_state_test {
    use super::*;

    #[test]
    fn test_extrapolate() {
        let state = PvState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, -0.5, 0.25));
        let moved = state.extrapolate(2.0);
        assert_eq!(moved.position, Vector3::new(2.0, 1.0, 3.5));
        assert_eq!(moved.velocity, state.velocity);

        // dt = 0 must be the identity.
        assert_eq!(state.extrapolate(0.0), state);
    }

    #[test]
    fn test_add_sub() {
        let a = PvState::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let b = PvState::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 0.0, 3.0));
        let sum = a + b;
        assert_eq!(sum.position, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(sum.velocity, Vector3::new(0.0, 1.0, 3.0));
        assert_eq!(sum - b, a);
    }

    #[test]
    fn test_to_homogeneous() {
        let state = PvState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        let [p, v] = state.to_homogeneous();
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(v, Vector4::new(4.0, 5.0, 6.0, 1.0));
    }
}

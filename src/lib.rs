pub mod body;
mod catalog;
pub mod constants;
mod ephemeris;
mod giant_moons;
mod kepler;
mod lunar;
pub mod observer;
pub mod orrery;
pub mod orrery_errors;
mod photometry;
mod planetary;
pub mod pv_state;
pub mod ref_system;
mod shadow;
pub mod time;

pub use body::{Body, BodyClass, BodyIndex, Elements};
pub use observer::Observer;
pub use orrery::Orrery;
pub use orrery_errors::OrreryError;
pub use pv_state::PvState;
pub use shadow::{visible_fraction, ShadowCandidate};

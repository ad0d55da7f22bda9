//! # Orrery: the body arena and engine façade
//!
//! [`Orrery`] owns the tree of bodies loaded from a catalog and exposes the
//! whole engine surface: the recursive position solver, the light-time
//! corrected observed state, photometry, shadow geometry and orbit-element
//! extraction (implemented in the `ephemeris`, `photometry` and `shadow`
//! modules).
//!
//! ## Typical usage
//!
//! ```rust
//! use orrery::observer::Observer;
//! use orrery::orrery::Orrery;
//!
//! let orrery = Orrery::from_default_catalog().unwrap();
//! let obs = Observer::geocentric(60000.0);
//!
//! let mars = orrery.body_by_name("mars").unwrap();
//! let pvo = orrery.position_observed(mars, &obs, true);
//! let vmag = orrery.visual_magnitude(mars, &obs);
//! println!("Mars at {:?}, V = {vmag:.2}", pvo.position);
//! ```
//!
//! The arena is immutable after load; all per-frame state lives in interior
//! cache cells, so every accessor takes `&self`. Those cells also make the
//! type `!Sync`, which matches the engine's single-frame-update contract.

use std::collections::HashMap;

use nalgebra::Matrix3;

use crate::body::{Body, BodyClass, BodyIndex};
use crate::catalog::parse_catalog;
use crate::constants::T2000;
use crate::observer::Observer;
use crate::orrery_errors::OrreryError;
use crate::ref_system::{obleq, rotmt};

#[derive(Debug)]
pub struct Orrery {
    bodies: Vec<Body>,
    by_name: HashMap<String, BodyIndex>,
    by_id: HashMap<i32, BodyIndex>,
    sun: BodyIndex,
    earth: BodyIndex,
    rot_eclmj2000_to_equmj2000: Matrix3<f64>,
}

impl Orrery {
    /// Build the engine from the embedded default catalog (Sun, the eight
    /// planets, the Moon, the Galilean moons, the Martian moons and Pluto).
    pub fn from_default_catalog() -> Result<Self, OrreryError> {
        Self::from_catalog_str(include_str!("../data/planets.toml"))
    }

    /// Build the engine from a TOML catalog string.
    ///
    /// Return
    /// ------
    /// * The engine, or the structural fault that makes the catalog unusable
    ///   (missing/unknown parent, parent cycle, missing Sun or Earth, a
    ///   generic body without elements).
    pub fn from_catalog_str(text: &str) -> Result<Self, OrreryError> {
        let bodies = parse_catalog(text)?;

        let find = |class: BodyClass| {
            bodies
                .iter()
                .position(|b| b.class == class)
                .map(BodyIndex)
        };
        let sun = find(BodyClass::Sun)
            .ok_or_else(|| OrreryError::InvalidCatalog("no Sun in catalog".into()))?;
        let earth = find(BodyClass::Earth)
            .ok_or_else(|| OrreryError::InvalidCatalog("no Earth in catalog".into()))?;

        let by_name = bodies
            .iter()
            .enumerate()
            .map(|(ix, b)| (b.name.to_lowercase(), BodyIndex(ix)))
            .collect();
        let by_id = bodies
            .iter()
            .enumerate()
            .map(|(ix, b)| (b.id, BodyIndex(ix)))
            .collect();

        Ok(Orrery {
            bodies,
            by_name,
            by_id,
            sun,
            earth,
            rot_eclmj2000_to_equmj2000: rotmt(obleq(T2000), 0),
        })
    }

    /// Build the engine from a TOML catalog file.
    pub fn from_catalog_file(path: &std::path::Path) -> Result<Self, OrreryError> {
        Self::from_catalog_str(&std::fs::read_to_string(path)?)
    }

    pub fn body(&self, ix: BodyIndex) -> &Body {
        &self.bodies[ix.0]
    }

    pub fn sun(&self) -> BodyIndex {
        self.sun
    }

    pub fn earth(&self) -> BodyIndex {
        self.earth
    }

    /// Iterate over every body with its arena index.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyIndex, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(ix, b)| (BodyIndex(ix), b))
    }

    /// Look a body up by case-insensitive name.
    pub fn body_by_name(&self, name: &str) -> Option<BodyIndex> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Look a body up by its JPL HORIZONS identifier.
    pub fn body_by_id(&self, id: i32) -> Option<BodyIndex> {
        self.by_id.get(&id).copied()
    }

    /// Body indices sorted by decreasing observed distance (far to near), the
    /// order a renderer draws them in.
    pub fn bodies_by_distance(&self, obs: &Observer) -> Vec<BodyIndex> {
        let mut order: Vec<(f64, BodyIndex)> = self
            .bodies()
            .map(|(ix, _)| {
                let pvo = self.position_observed(ix, obs, true);
                (pvo.position.norm(), ix)
            })
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));
        order.into_iter().map(|(_, ix)| ix).collect()
    }

    /// Rotation from mean ecliptic J2000 to mean equator J2000.
    pub fn rot_eclmj2000_to_equmj2000(&self) -> &Matrix3<f64> {
        &self.rot_eclmj2000_to_equmj2000
    }
}

#[cfg(test)]
mod orrery_test {
    use super::*;

    #[test]
    fn test_default_catalog_lookup() {
        let orrery = Orrery::from_default_catalog().unwrap();

        let sun = orrery.sun();
        assert_eq!(orrery.body(sun).name, "Sun");
        assert_eq!(orrery.body(orrery.earth()).name, "Earth");

        assert_eq!(orrery.body_by_name("MARS"), orrery.body_by_name("mars"));
        let moon = orrery.body_by_name("moon").unwrap();
        assert_eq!(orrery.body_by_id(301), Some(moon));
        assert_eq!(orrery.body_by_name("nibiru"), None);
    }

    #[test]
    fn test_catalog_without_earth_rejected() {
        let err = Orrery::from_catalog_str(
            r#"
            [sun]
            horizons_id = 10
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            OrreryError::InvalidCatalog("no Earth in catalog".into())
        );
    }

    #[test]
    fn test_bodies_by_distance() {
        let orrery = Orrery::from_default_catalog().unwrap();
        let obs = crate::observer::Observer::geocentric(60000.0);
        let order = orrery.bodies_by_distance(&obs);
        assert_eq!(order.len(), orrery.bodies().count());

        let dist = |ix| {
            orrery
                .position_observed(ix, &obs, true)
                .position
                .norm()
        };
        for pair in order.windows(2) {
            assert!(dist(pair[0]) >= dist(pair[1]));
        }
        // For a geocentric observer the Earth itself sits at distance zero,
        // and the Moon is the closest of everything else.
        assert_eq!(*order.last().unwrap(), orrery.earth());
        assert_eq!(
            order[order.len() - 2],
            orrery.body_by_name("moon").unwrap()
        );
    }
}

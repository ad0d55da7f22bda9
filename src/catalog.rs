//! # Body catalog loading
//!
//! Parses a TOML catalog (one table per body) into [`Body`] records and
//! validates the hierarchy. Structural faults — a missing or unknown parent,
//! a parent cycle, no Sun or Earth — abort the load; malformed values of
//! non-essential fields (a radius without its unit, an albedo out of range)
//! are logged and skipped so a partially bad catalog still loads.

use std::cell::Cell;
use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::body::{deg_to_rad, Body, BodyClass, BodyIndex, Elements, RotationModel, Rings};
use crate::constants::RADEG;
use crate::orrery_errors::OrreryError;

/// One `[body]` table of the catalog, units still attached.
#[derive(Debug, Deserialize)]
pub(crate) struct BodyRecord {
    pub horizons_id: i32,
    pub parent: Option<String>,
    /// e.g. `"6371.0 km"`
    pub radius: Option<String>,
    pub albedo: Option<f64>,
    pub color: Option<[f64; 3]>,
    /// e.g. `"5.97237e24 kg"`
    pub mass: Option<String>,
    /// degrees
    pub rot_obliquity: Option<f64>,
    /// e.g. `"24.6229 h"` or `"0.997 d"`
    pub rot_period: Option<String>,
    /// degrees
    pub rot_offset: Option<f64>,
    /// degrees
    pub rot_pole_ra: Option<f64>,
    /// degrees
    pub rot_pole_de: Option<f64>,
    pub rings_inner_radius: Option<String>,
    pub rings_outer_radius: Option<String>,
    pub orbit: Option<OrbitRecord>,
}

/// Orbit elements as stored in the catalog: angles in degrees, mean motion in
/// degrees/day, semi-major axis in AU, epoch in MJD (TT).
#[derive(Debug, Deserialize)]
pub(crate) struct OrbitRecord {
    pub epoch: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub periapsis_argument: f64,
    pub semi_major_axis: f64,
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
}

impl OrbitRecord {
    fn to_elements(&self) -> Elements {
        Elements {
            epoch: self.epoch,
            inclination: deg_to_rad(self.inclination),
            ascending_node: deg_to_rad(self.ascending_node),
            periapsis_argument: deg_to_rad(self.periapsis_argument),
            semi_major_axis: self.semi_major_axis,
            mean_motion: self.mean_motion * RADEG,
            eccentricity: self.eccentricity,
            mean_anomaly: deg_to_rad(self.mean_anomaly),
        }
    }
}

/// Parse a `"<number> <unit>"` quantity. A malformed value is logged and
/// yields `None` so the field falls back to its default.
fn parse_quantity(section: &str, attr: &str, value: &str, unit: &str) -> Option<f64> {
    let parsed = value
        .trim()
        .strip_suffix(unit)
        .and_then(|num| num.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());
    if parsed.is_none() {
        warn!("cannot parse body attribute: [{section}] {attr} = {value:?} (expected \"<number> {unit}\")");
    }
    parsed
}

/// Parse a rotation period with its unit (`h` or `d`), returned in days.
fn parse_period(section: &str, value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let parsed = if let Some(num) = trimmed.strip_suffix('h') {
        num.trim().parse::<f64>().ok().map(|v| v / 24.0)
    } else if let Some(num) = trimmed.strip_suffix('d') {
        num.trim().parse::<f64>().ok()
    } else {
        None
    };
    let parsed = parsed.filter(|v| v.is_finite());
    if parsed.is_none() {
        warn!("cannot parse body attribute: [{section}] rot_period = {value:?} (expected \"<number> h|d\")");
    }
    parsed
}

/// An angle field in degrees; non-finite values are logged and skipped.
fn checked_angle(section: &str, attr: &str, value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => deg_to_rad(v),
        Some(v) => {
            warn!("cannot use body attribute: [{section}] {attr} = {v} (not finite)");
            0.0
        }
        None => 0.0,
    }
}

fn build_body(section: &str, record: &BodyRecord) -> Body {
    // Display name: the section key with the first letter upper-cased.
    let mut name = section.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    let radius_m = record
        .radius
        .as_deref()
        .and_then(|v| parse_quantity(section, "radius", v, "km"))
        .map_or(0.0, |km| km * 1000.0);

    let mass = record
        .mass
        .as_deref()
        .and_then(|v| parse_quantity(section, "mass", v, "kg"))
        .unwrap_or(0.0);

    let albedo = match record.albedo {
        Some(v) if (0.0..=1.0).contains(&v) => v,
        Some(v) => {
            warn!("cannot use body attribute: [{section}] albedo = {v} (outside [0, 1])");
            0.0
        }
        None => 0.0,
    };

    let color = match record.color {
        Some([r, g, b]) => [r, g, b, 1.0],
        None => [0.0; 4],
    };

    let rot = RotationModel {
        obliquity: checked_angle(section, "rot_obliquity", record.rot_obliquity),
        period: record
            .rot_period
            .as_deref()
            .and_then(|v| parse_period(section, v))
            .unwrap_or(0.0),
        offset: checked_angle(section, "rot_offset", record.rot_offset),
        pole_ra: checked_angle(section, "rot_pole_ra", record.rot_pole_ra),
        pole_de: checked_angle(section, "rot_pole_de", record.rot_pole_de),
    };

    let rings = match (&record.rings_inner_radius, &record.rings_outer_radius) {
        (Some(inner), Some(outer)) => {
            let inner = parse_quantity(section, "rings_inner_radius", inner, "km");
            let outer = parse_quantity(section, "rings_outer_radius", outer, "km");
            match (inner, outer) {
                (Some(inner), Some(outer)) => Some(Rings {
                    inner_radius: inner * 1000.0,
                    outer_radius: outer * 1000.0,
                }),
                _ => None,
            }
        }
        _ => None,
    };

    Body {
        name,
        id: record.horizons_id,
        class: BodyClass::from_horizons_id(record.horizons_id),
        parent: None,
        radius_m,
        albedo,
        mass,
        color,
        rot,
        orbit: record.orbit.as_ref().map(OrbitRecord::to_elements),
        rings,
        update_delta_s: 1.0 + rand::random::<f64>(),
        full_cache: Cell::new(None),
        observed_cache: Cell::new(None),
        solve_count: Cell::new(0),
    }
}

/// Parse and validate a catalog.
///
/// Return
/// ------
/// * The body arena, parent links resolved, or the structural fault that
///   makes the catalog unusable.
pub(crate) fn parse_catalog(text: &str) -> Result<Vec<Body>, OrreryError> {
    let records: HashMap<String, BodyRecord> = toml::from_str(text)?;

    // Deterministic arena order regardless of the map's iteration order.
    let mut sections: Vec<&String> = records.keys().collect();
    sections.sort();

    let mut bodies: Vec<Body> = sections
        .iter()
        .map(|section| build_body(section, &records[*section]))
        .collect();

    let index_of: HashMap<String, BodyIndex> = sections
        .iter()
        .enumerate()
        .map(|(ix, section)| (section.to_lowercase(), BodyIndex(ix)))
        .collect();

    // Resolve parent links.
    for (ix, section) in sections.iter().enumerate() {
        let record = &records[*section];
        match (&record.parent, bodies[ix].class) {
            (None, BodyClass::Sun) => {}
            (None, _) => return Err(OrreryError::MissingParent(bodies[ix].name.clone())),
            (Some(parent), _) => {
                let parent_ix = index_of
                    .get(&parent.to_lowercase())
                    .copied()
                    .ok_or_else(|| OrreryError::UnknownBody(parent.clone()))?;
                bodies[ix].parent = Some(parent_ix);
            }
        }
    }

    // Reject parent cycles: the chain above any body must terminate within
    // the arena size.
    for (ix, body) in bodies.iter().enumerate() {
        let mut cursor = BodyIndex(ix);
        for _ in 0..=bodies.len() {
            match bodies[cursor.0].parent {
                None => break,
                Some(up) if up.0 == ix => {
                    return Err(OrreryError::ParentCycle(body.name.clone()))
                }
                Some(up) => cursor = up,
            }
        }
    }

    // A Generic body has no dedicated series: it needs elements.
    for body in &bodies {
        if body.class == BodyClass::Generic && body.orbit.is_none() {
            return Err(OrreryError::MissingOrbit(body.name.clone()));
        }
    }

    Ok(bodies)
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("x", "radius", "6371.0 km", "km"), Some(6371.0));
        assert_eq!(parse_quantity("x", "radius", " 2439.7km ", "km"), Some(2439.7));
        assert_eq!(parse_quantity("x", "mass", "5.97e24 kg", "kg"), Some(5.97e24));
        assert_eq!(parse_quantity("x", "radius", "6371.0", "km"), None);
        assert_eq!(parse_quantity("x", "radius", "large km", "km"), None);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("x", "24.6229 h"), Some(24.6229 / 24.0));
        assert_eq!(parse_period("x", "0.99726968 d"), Some(0.99726968));
        assert_eq!(parse_period("x", "-243.025 d"), Some(-243.025));
        assert_eq!(parse_period("x", "fast"), None);
    }

    #[test]
    fn test_missing_parent_rejected() {
        let err = parse_catalog(
            r#"
            [sun]
            horizons_id = 10

            [lonely]
            horizons_id = 42
            "#,
        )
        .unwrap_err();
        assert_eq!(err, OrreryError::MissingParent("Lonely".into()));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = parse_catalog(
            r#"
            [sun]
            horizons_id = 10

            [wanderer]
            horizons_id = 42
            parent = "Nibiru"
            [wanderer.orbit]
            epoch = 51544.5
            inclination = 0.0
            ascending_node = 0.0
            periapsis_argument = 0.0
            semi_major_axis = 1.0
            mean_motion = 1.0
            eccentricity = 0.0
            mean_anomaly = 0.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err, OrreryError::UnknownBody("Nibiru".into()));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let err = parse_catalog(
            r#"
            [alpha]
            horizons_id = 43
            parent = "Beta"
            [alpha.orbit]
            epoch = 51544.5
            inclination = 0.0
            ascending_node = 0.0
            periapsis_argument = 0.0
            semi_major_axis = 1.0
            mean_motion = 1.0
            eccentricity = 0.0
            mean_anomaly = 0.0

            [beta]
            horizons_id = 44
            parent = "Alpha"
            [beta.orbit]
            epoch = 51544.5
            inclination = 0.0
            ascending_node = 0.0
            periapsis_argument = 0.0
            semi_major_axis = 1.0
            mean_motion = 1.0
            eccentricity = 0.0
            mean_anomaly = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, OrreryError::ParentCycle(_)));
    }

    #[test]
    fn test_generic_without_orbit_rejected() {
        let err = parse_catalog(
            r#"
            [sun]
            horizons_id = 10

            [rock]
            horizons_id = 2001
            parent = "Sun"
            "#,
        )
        .unwrap_err();
        assert_eq!(err, OrreryError::MissingOrbit("Rock".into()));
    }

    #[test]
    fn test_malformed_nonessential_fields_are_skipped() {
        let bodies = parse_catalog(
            r#"
            [sun]
            horizons_id = 10
            radius = "six hundred thousand km"
            albedo = 3.5
            "#,
        )
        .unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].radius_m, 0.0);
        assert_eq!(bodies[0].albedo, 0.0);
    }

    #[test]
    fn test_default_catalog_parses() {
        let bodies = parse_catalog(include_str!("../data/planets.toml")).unwrap();
        assert!(bodies.len() >= 17);

        let saturn = bodies.iter().find(|b| b.name == "Saturn").unwrap();
        let rings = saturn.rings.as_ref().unwrap();
        assert_eq!(rings.inner_radius, 74_510_000.0);
        assert_eq!(rings.outer_radius, 140_390_000.0);
        assert!(saturn.pole().is_some());

        let moon = bodies.iter().find(|b| b.name == "Moon").unwrap();
        assert_eq!(moon.class, BodyClass::Moon);
        let earth_ix = moon.parent.unwrap();
        assert_eq!(bodies[earth_ix.0].name, "Earth");

        // Every body's revalidation interval is jittered into [1, 2) s.
        for body in &bodies {
            assert!((1.0..2.0).contains(&body.update_delta_s));
        }
    }
}

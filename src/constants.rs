//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `orrery` library, together with the catalog identifiers of
//! the solar-system bodies the engine treats specially.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - JPL HORIZONS identifiers for solar system bodies
//!
//! These definitions are used by all main modules, including the position solver, photometry,
//! and shadow geometry.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Astronomical Unit in meters
pub const METERS_PER_AU: f64 = AU * 1000.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Arcseconds → radians (also AU → parsec, by the definition of the parsec)
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Gaussian gravitational constant k (used in classical orbit dynamics)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², often used in Kepler’s third law
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

/// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²)
pub const GRAV_CONST: f64 = 6.674e-11;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Solar photospheric radius in meters
pub const SUN_RADIUS_M: f64 = 695_508_000.0;

/// Absolute visual magnitude of the Sun
pub const SUN_ABS_MAG: f64 = 4.83;

/// Floor applied to the solar eclipse factor so the magnitude law stays finite
/// during a total eclipse.
pub const MIN_ECLIPSE_FACTOR: f64 = 0.000128;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Body identifiers
// -------------------------------------------------------------------------------------------------

/// Identifiers of the known bodies, as defined by the JPL HORIZONS service.
/// They let the solver test quickly for a given body.
pub const SUN_ID: i32 = 10;
pub const MERCURY_ID: i32 = 199;
pub const VENUS_ID: i32 = 299;
pub const MOON_ID: i32 = 301;
pub const EARTH_ID: i32 = 399;
pub const MARS_ID: i32 = 499;
pub const IO_ID: i32 = 501;
pub const EUROPA_ID: i32 = 502;
pub const GANYMEDE_ID: i32 = 503;
pub const CALLISTO_ID: i32 = 504;
pub const JUPITER_ID: i32 = 599;
pub const SATURN_ID: i32 = 699;
pub const URANUS_ID: i32 = 799;
pub const NEPTUNE_ID: i32 = 899;

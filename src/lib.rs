//! Sail Sim - real-time sailing dinghy physics
//!
//! Core modules:
//! - `sim`: Physics core (lift surfaces, boom rig, hull integration, boats)
//! - `config`: Simulation and boat configuration records
//! - `error`: Configuration errors
//! - `wasm`: Browser host bindings (wasm32 only)
//!
//! Angles are compass bearings in degrees: 0 points along +y, positive
//! rotation is clockwise. Boat-local points use the same convention with
//! the bow toward +y.

pub mod config;
pub mod error;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{BoatConfig, DragCoefficients, SimulationConfig, SurfaceDrag};
pub use error::ConfigError;

use glam::DVec2;

/// Physical defaults
pub mod consts {
    /// Air density at sea level (kg/m³)
    pub const AIR_DENSITY: f64 = 1.204;
    /// Fresh water density (kg/m³)
    pub const WATER_DENSITY: f64 = 1_000.0;

    /// Flow within this many degrees of the chord line makes a sail flap
    pub const PINCHING_ANGLE: f64 = 10.0;
    /// Largest random boom kick while flapping (degrees)
    pub const FLAP_JITTER: f64 = 2.0;

    /// Rudder increment per control input (degrees)
    pub const RUDDER_STEP: f64 = 3.0;
    /// Rudder deflection limit (degrees either side)
    pub const RUDDER_LIMIT: f64 = 50.0;
    /// Mainsheet increment per control input (degrees)
    pub const SHEET_STEP: f64 = 5.0;
    /// Mainsheet can never let the boom past square
    pub const MAX_MAINSHEET: f64 = 90.0;

    /// Fraction of the boom length at which sail force is concentrated
    pub const SAIL_EFFORT_FRACTION: f64 = 0.7;

    /// Longest frame gap integrated in one step (tab switches, stalls)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Normalize a bearing to [0, 360)
#[inline]
pub fn normalize_bearing(bearing: f64) -> f64 {
    let b = bearing.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if b >= 360.0 { 0.0 } else { b }
}

/// Rotate a point clockwise around the origin by `degrees`
#[inline]
pub fn rotate(point: DVec2, degrees: f64) -> DVec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    DVec2::new(point.x * cos + point.y * sin, point.y * cos - point.x * sin)
}

/// Rotate a point clockwise around `pivot` by `degrees`
#[inline]
pub fn rotate_about(point: DVec2, pivot: DVec2, degrees: f64) -> DVec2 {
    pivot + rotate(point - pivot, degrees)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a - b).length()
}

/// Compass bearing of a vector in degrees, (-180, 180]
///
/// A zero vector (of either sign) has bearing 0.
#[inline]
pub fn bearing_of(v: DVec2) -> f64 {
    if v == DVec2::ZERO {
        return 0.0;
    }
    v.x.atan2(v.y).to_degrees()
}

/// Vector of length `magnitude` pointing along compass `bearing`
#[inline]
pub fn from_bearing(magnitude: f64, bearing: f64) -> DVec2 {
    let (sin, cos) = bearing.to_radians().sin_cos();
    DVec2::new(magnitude * sin, magnitude * cos)
}

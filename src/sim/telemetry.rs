//! Per-boat readout for HUDs, logs and hosts

use serde::{Deserialize, Serialize};

use super::rig::BoomState;

/// Snapshot of one boat's navigational state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub x: f64,
    pub y: f64,
    /// Degrees, [0, 360)
    pub heading: f64,
    /// m/s
    pub speed_over_ground: f64,
    /// Direction of travel, degrees [0, 360)
    pub course_over_ground: f64,
    /// rad/s, positive clockwise
    pub rotational_velocity: f64,
    pub sail_angle: f64,
    pub rudder_angle: f64,
    pub mainsheet: f64,
    pub boom: BoomState,
    pub flapping: bool,
    /// Air speed felt at the mast (m/s)
    pub apparent_wind_speed: f64,
    /// Bearing the apparent wind blows from
    pub apparent_wind_bearing: f64,
}

impl Telemetry {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Speed in knots
    #[inline]
    pub fn knots(&self) -> f64 {
        self.speed_over_ground * 3600.0 / 1852.0
    }
}

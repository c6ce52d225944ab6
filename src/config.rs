//! Simulation and boat configuration
//!
//! Both records load from JSON and are validated before any boat is built.
//! Every `SimulationConfig` field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, positive, within};
use crate::sim::BoatGeometry;

/// Process-independent physical constants and control tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// kg/m³
    pub air_density: f64,
    /// kg/m³
    pub water_density: f64,
    /// Degrees between flow and chord below which a sail flaps
    pub pinching_angle: f64,
    /// Largest random boom kick while flapping (degrees, 0 disables)
    pub flap_jitter: f64,
    pub rudder_step: f64,
    pub rudder_limit: f64,
    pub sheet_step: f64,
    /// Where along the boom the sail force acts (0 = mast, 1 = clew)
    pub sail_effort_fraction: f64,
    /// Frame gaps longer than this are shortened before integrating
    pub max_frame_ms: f64,
    /// Seed for the flutter RNG
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            air_density: AIR_DENSITY,
            water_density: WATER_DENSITY,
            pinching_angle: PINCHING_ANGLE,
            flap_jitter: FLAP_JITTER,
            rudder_step: RUDDER_STEP,
            rudder_limit: RUDDER_LIMIT,
            sheet_step: SHEET_STEP,
            sail_effort_fraction: SAIL_EFFORT_FRACTION,
            max_frame_ms: MAX_FRAME_MS,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("Loaded simulation config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("air_density", self.air_density)?;
        positive("water_density", self.water_density)?;
        within("pinching_angle", self.pinching_angle, 0.0, 90.0)?;
        within("flap_jitter", self.flap_jitter, 0.0, MAX_MAINSHEET)?;
        positive("rudder_step", self.rudder_step)?;
        within("rudder_limit", self.rudder_limit, 0.0, 90.0)?;
        positive("rudder_limit", self.rudder_limit)?;
        within("sheet_step", self.sheet_step, 0.0, MAX_MAINSHEET)?;
        positive("sheet_step", self.sheet_step)?;
        within("sail_effort_fraction", self.sail_effort_fraction, 0.0, 1.0)?;
        positive("max_frame_ms", self.max_frame_ms)?;
        Ok(())
    }
}

/// Drag coefficients and leading-edge area of one lift surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDrag {
    /// Skin drag coefficient for flow along the chord
    pub parallel: f64,
    /// Replaces `parallel` while the surface is pinched (sails only)
    #[serde(default)]
    pub pinching: Option<f64>,
    /// m²
    pub leading_edge_area: f64,
}

impl SurfaceDrag {
    fn validate(&self, fields: [&'static str; 3]) -> Result<(), ConfigError> {
        let [parallel, pinching, edge] = fields;
        within(parallel, self.parallel, 0.0, f64::MAX)?;
        within(edge, self.leading_edge_area, 0.0, f64::MAX)?;
        if let Some(c) = self.pinching {
            within(pinching, c, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

/// Per-surface drag settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragCoefficients {
    pub sail: SurfaceDrag,
    pub keel: SurfaceDrag,
    pub rudder: SurfaceDrag,
}

impl Default for DragCoefficients {
    fn default() -> Self {
        Self {
            sail: SurfaceDrag {
                parallel: 0.004,
                pinching: Some(0.4),
                leading_edge_area: 0.7,
            },
            keel: SurfaceDrag {
                parallel: 0.004,
                pinching: None,
                leading_edge_area: 0.01,
            },
            rudder: SurfaceDrag {
                parallel: 0.004,
                pinching: None,
                leading_edge_area: 0.01,
            },
        }
    }
}

/// Physical description of one boat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatConfig {
    /// Length overall (m)
    pub loa: f64,
    /// m
    pub beam: f64,
    /// kg
    pub mass: f64,
    /// m²
    pub sail_area: f64,
    /// m²
    pub keel_area: f64,
    /// m²
    pub rudder_area: f64,
    #[serde(default)]
    pub drag: DragCoefficients,
    /// Hull yaw inertia (kg·m²)
    pub moment_of_inertia: f64,
    /// kg
    pub boom_mass: f64,
    /// Named points; derived from `loa`/`beam` when absent
    #[serde(default)]
    pub geometry: Option<BoatGeometry>,
}

impl Default for BoatConfig {
    fn default() -> Self {
        Self::dinghy()
    }
}

impl BoatConfig {
    /// A 4.2 m single-hander
    pub fn dinghy() -> Self {
        let loa = 4.2;
        let mass = 120.0;
        Self {
            loa,
            beam: 1.6,
            mass,
            sail_area: 7.0,
            keel_area: 0.6,
            rudder_area: 0.15,
            drag: DragCoefficients::default(),
            moment_of_inertia: Self::derived_moment_of_inertia(mass, loa),
            boom_mass: 5.0,
            geometry: None,
        }
    }

    /// Rough hull yaw inertia, `mass · (loa / 4)²`
    pub fn derived_moment_of_inertia(mass: f64, loa: f64) -> f64 {
        mass * (loa / 4.0).powi(2)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("Loaded boat config: loa={} mass={}", config.loa, config.mass);
        Ok(config)
    }

    /// Explicit geometry, or the standard layout for this hull
    pub fn resolved_geometry(&self) -> BoatGeometry {
        self.geometry
            .unwrap_or_else(|| BoatGeometry::for_hull(self.loa, self.beam))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("loa", self.loa)?;
        positive("beam", self.beam)?;
        positive("mass", self.mass)?;
        positive("sail_area", self.sail_area)?;
        positive("keel_area", self.keel_area)?;
        positive("rudder_area", self.rudder_area)?;
        positive("moment_of_inertia", self.moment_of_inertia)?;
        positive("boom_mass", self.boom_mass)?;
        self.drag.sail.validate([
            "drag.sail.parallel",
            "drag.sail.pinching",
            "drag.sail.leading_edge_area",
        ])?;
        self.drag.keel.validate([
            "drag.keel.parallel",
            "drag.keel.pinching",
            "drag.keel.leading_edge_area",
        ])?;
        self.drag.rudder.validate([
            "drag.rudder.parallel",
            "drag.rudder.pinching",
            "drag.rudder.leading_edge_area",
        ])?;
        self.resolved_geometry().validate()
    }
}

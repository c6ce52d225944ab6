//! Named boat-local geometry points
//!
//! Points are relative to the hull's center of rotation with the bow along +y
//! (bearing 0). They never change after construction; posed copies for
//! rendering are produced by [`BoatGeometry::map`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::distance;
use crate::error::ConfigError;

/// Hull outline and rig attachment points (meters, boat-local)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoatGeometry {
    pub bow: DVec2,
    pub port_stern: DVec2,
    pub starboard_stern: DVec2,
    /// Boom pivot
    pub mast: DVec2,
    /// Boom end when the sail is centered
    pub clew: DVec2,
    /// Keel center of effort
    pub keel: DVec2,
    /// Rudder pivot
    pub stern: DVec2,
    pub tiller_tip: DVec2,
    pub rudder_tip: DVec2,
}

impl BoatGeometry {
    /// Standard dinghy layout scaled to the given hull
    pub fn for_hull(loa: f64, beam: f64) -> Self {
        Self {
            bow: DVec2::new(0.0, 0.5 * loa),
            port_stern: DVec2::new(-0.5 * beam, -0.5 * loa),
            starboard_stern: DVec2::new(0.5 * beam, -0.5 * loa),
            mast: DVec2::new(0.0, loa / 7.0),
            clew: DVec2::new(0.0, -0.5 * loa),
            keel: DVec2::ZERO,
            stern: DVec2::new(0.0, -0.5 * loa),
            tiller_tip: DVec2::new(0.0, -0.25 * loa),
            rudder_tip: DVec2::new(0.0, -0.55 * loa),
        }
    }

    /// Mast to clew
    #[inline]
    pub fn boom_length(&self) -> f64 {
        distance(self.mast, self.clew)
    }

    /// Stern to rudder tip
    #[inline]
    pub fn rudder_length(&self) -> f64 {
        distance(self.stern, self.rudder_tip)
    }

    /// Apply `f` to every point
    pub fn map(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Self {
            bow: f(self.bow),
            port_stern: f(self.port_stern),
            starboard_stern: f(self.starboard_stern),
            mast: f(self.mast),
            clew: f(self.clew),
            keel: f(self.keel),
            stern: f(self.stern),
            tiller_tip: f(self.tiller_tip),
            rudder_tip: f(self.rudder_tip),
        }
    }

    /// Named points in a stable order
    pub fn points(&self) -> [(&'static str, DVec2); 9] {
        [
            ("bow", self.bow),
            ("port_stern", self.port_stern),
            ("starboard_stern", self.starboard_stern),
            ("mast", self.mast),
            ("clew", self.clew),
            ("keel", self.keel),
            ("stern", self.stern),
            ("tiller_tip", self.tiller_tip),
            ("rudder_tip", self.rudder_tip),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points().iter().any(|(_, p)| !p.is_finite()) {
            return Err(ConfigError::DegenerateGeometry("non-finite point"));
        }
        if self.boom_length() <= 0.0 {
            return Err(ConfigError::DegenerateGeometry("mast and clew coincide"));
        }
        if self.rudder_length() <= 0.0 {
            return Err(ConfigError::DegenerateGeometry("stern and rudder tip coincide"));
        }
        Ok(())
    }
}

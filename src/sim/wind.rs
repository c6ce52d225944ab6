//! Wind supplied by the surrounding environment
//!
//! The physics core owns no wind state. Each tick it asks a [`WindProvider`]
//! for the current wind.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{from_bearing, normalize_bearing};

/// True wind, immutable for the duration of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    /// Compass bearing the wind blows FROM (degrees)
    pub bearing: f64,
}

impl Wind {
    pub fn new(speed: f64, bearing: f64) -> Self {
        Self {
            speed,
            bearing: normalize_bearing(bearing),
        }
    }

    pub const CALM: Wind = Wind {
        speed: 0.0,
        bearing: 0.0,
    };

    /// Velocity of the air mass (m/s, world frame)
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        -from_bearing(self.speed, self.bearing)
    }
}

/// Capability returning the current wind
pub trait WindProvider {
    fn wind(&self) -> Wind;
}

impl WindProvider for Wind {
    fn wind(&self) -> Wind {
        *self
    }
}

impl<F> WindProvider for F
where
    F: Fn() -> Wind,
{
    fn wind(&self) -> Wind {
        self()
    }
}

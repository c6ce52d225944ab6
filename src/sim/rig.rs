//! Boom and mainsheet
//!
//! The boom swings freely about the mast until it reaches the angle the
//! mainsheet allows, where it stops dead. While pressed against the sheet it
//! is part of the hull and the whole sail force drives the boat; while free,
//! the sail's cross-chord push only swings the boom.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::controls::SheetTrim;
use super::surface::SurfaceForce;
use crate::consts::MAX_MAINSHEET;
use crate::from_bearing;

/// How the boom is coupled to the hull this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoomState {
    /// Held at the sheet limit; sail force acts on the hull
    #[default]
    Locked,
    /// Swinging; only chordwise force reaches the hull
    Free,
}

/// Boom rotational state and mainsheet limit
#[derive(Debug, Clone, PartialEq)]
pub struct SailRig {
    /// Degrees from the centerline, positive clockwise
    angle: f64,
    /// rad/s
    angular_velocity: f64,
    /// rad/s²
    angular_acceleration: f64,
    /// Largest allowed |angle|, degrees in [0, 90]
    mainsheet: f64,
    /// kg·m², rod about one end
    boom_inertia: f64,
    state: BoomState,
    flapping: bool,
}

impl SailRig {
    pub fn new(boom_mass: f64, boom_length: f64) -> Self {
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            mainsheet: 0.0,
            boom_inertia: boom_mass * boom_length * boom_length / 3.0,
            state: BoomState::Locked,
            flapping: false,
        }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    #[inline]
    pub fn angular_acceleration(&self) -> f64 {
        self.angular_acceleration
    }

    #[inline]
    pub fn mainsheet(&self) -> f64 {
        self.mainsheet
    }

    #[inline]
    pub fn boom_inertia(&self) -> f64 {
        self.boom_inertia
    }

    #[inline]
    pub fn state(&self) -> BoomState {
        self.state
    }

    #[inline]
    pub fn flapping(&self) -> bool {
        self.flapping
    }

    /// Haul in or ease out by `step` degrees
    pub fn trim(&mut self, trim: SheetTrim, step: f64) {
        let target = match trim {
            SheetTrim::In => self.mainsheet - step,
            SheetTrim::Out => self.mainsheet + step,
        };
        self.set_mainsheet(target);
    }

    /// Set the sheet limit, clamped to [0, 90]; the boom is pulled in at once
    pub fn set_mainsheet(&mut self, degrees: f64) {
        self.mainsheet = degrees.clamp(0.0, MAX_MAINSHEET);
        self.clamp_to_sheet();
    }

    /// Advance boom rotation by `dt` seconds using last tick's acceleration
    pub fn integrate(&mut self, dt: f64) {
        let swing = self.angular_velocity * dt + 0.5 * self.angular_acceleration * dt * dt;
        self.angle += swing.to_degrees();
        self.angular_velocity += self.angular_acceleration * dt;
        self.clamp_to_sheet();
    }

    /// Split the sail force between hull and boom
    ///
    /// `mast` is the world-oriented offset of the boom pivot from the hull
    /// center. Returns the share of the sail force carried by the hull, acting
    /// at the sail's application point.
    pub fn resolve(&mut self, sail: &SurfaceForce, mast: DVec2, hull_bearing: f64) -> SurfaceForce {
        let moment = sail.moment_about(mast);
        self.flapping = sail.flapping;

        let at_limit = self.angle.abs() >= self.mainsheet;
        let pressing = self.mainsheet == 0.0 || moment * self.angle >= 0.0;
        let next = if at_limit && pressing {
            BoomState::Locked
        } else {
            BoomState::Free
        };
        if next != self.state {
            log::trace!("Boom {:?} -> {:?} at {:.1} deg", self.state, next, self.angle);
            self.state = next;
        }

        match self.state {
            BoomState::Locked => {
                self.angular_velocity = 0.0;
                self.angular_acceleration = 0.0;
                *sail
            }
            BoomState::Free => {
                self.angular_acceleration = moment / self.boom_inertia;
                let chord = from_bearing(1.0, hull_bearing + self.angle);
                SurfaceForce {
                    force: chord * sail.force.dot(chord),
                    ..*sail
                }
            }
        }
    }

    /// Free and flapping: the boom will take a flutter kick
    #[inline]
    pub fn is_fluttering(&self) -> bool {
        self.state == BoomState::Free && self.flapping
    }

    /// Random flutter of a flapping, free boom
    pub fn flutter(&mut self, kick_degrees: f64) {
        if self.is_fluttering() {
            self.angle += kick_degrees;
            self.clamp_to_sheet();
        }
    }

    /// Inelastic stop at the sheet limit
    fn clamp_to_sheet(&mut self) {
        if self.angle.abs() >= self.mainsheet {
            self.angle = self.mainsheet.copysign(self.angle);
            self.angular_velocity = 0.0;
            self.angular_acceleration = 0.0;
        }
    }
}

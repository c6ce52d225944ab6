//! The boat entity
//!
//! Owns the hull, rig and rudder of one boat. A boat is built once from a
//! validated configuration and then advanced by [`Boat::update`] once per
//! frame. Controls only touch the rudder and mainsheet.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::controls::{BoatControls, RudderTurn, SheetTrim};
use super::geometry::BoatGeometry;
use super::hull::{HullDynamics, Kinematics, SurfaceLoads};
use super::rig::{BoomState, SailRig};
use super::telemetry::Telemetry;
use super::wind::WindProvider;
use crate::config::{BoatConfig, SimulationConfig};
use crate::error::ConfigError;
use crate::{bearing_of, normalize_bearing, rotate, rotate_about};

/// A sailing boat and its physical state
#[derive(Debug, Clone)]
pub struct Boat {
    hull: HullDynamics,
    rig: SailRig,
    /// Degrees, positive turns the bow to port
    rudder_angle: f64,
    rudder_step: f64,
    rudder_limit: f64,
    sheet_step: f64,
    flap_jitter: f64,
    loads: SurfaceLoads,
    flutter: Pcg32,
}

impl Boat {
    /// Build a boat at rest at `position` facing `bearing`
    ///
    /// The sail starts centered with the mainsheet hauled in.
    pub fn new(
        config: &BoatConfig,
        sim: &SimulationConfig,
        position: DVec2,
        bearing: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        sim.validate()?;
        if !position.is_finite() || !bearing.is_finite() {
            return Err(ConfigError::NonFinite { field: "pose" });
        }

        let hull = HullDynamics::new(config, sim, position, bearing);
        let rig = SailRig::new(config.boom_mass, hull.geometry().boom_length());
        log::debug!(
            "Boat launched at ({:.1}, {:.1}) heading {:.0}, boom inertia {:.2}",
            position.x,
            position.y,
            hull.kinematics().bearing,
            rig.boom_inertia()
        );

        Ok(Self {
            hull,
            rig,
            rudder_angle: 0.0,
            rudder_step: sim.rudder_step,
            rudder_limit: sim.rudder_limit,
            sheet_step: sim.sheet_step,
            flap_jitter: sim.flap_jitter,
            loads: SurfaceLoads::default(),
            flutter: Pcg32::seed_from_u64(sim.seed),
        })
    }

    /// Reseed the flutter RNG (boats sharing a config should differ)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.flutter = Pcg32::seed_from_u64(seed);
        self
    }

    /// Advance the physics by `delta_ms` milliseconds
    ///
    /// Zero, negative or NaN elapsed time leaves the boat untouched.
    pub fn update<W: WindProvider + ?Sized>(&mut self, delta_ms: f64, wind: &W) {
        if !(delta_ms > 0.0) {
            return;
        }
        let dt = delta_ms / 1000.0;

        self.hull.advance(dt);
        self.rig.integrate(dt);

        let wind = wind.wind();
        self.loads = self
            .hull
            .compute_loads(&mut self.rig, wind.velocity(), self.rudder_angle);
        self.hull.accelerate(&self.loads);

        if self.flap_jitter > 0.0 && self.rig.is_fluttering() {
            let kick = self
                .flutter
                .random_range(-self.flap_jitter..=self.flap_jitter);
            self.rig.flutter(kick);
        }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.hull.kinematics().position
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position().x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position().y
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.hull.kinematics().velocity
    }

    #[inline]
    pub fn acceleration(&self) -> DVec2 {
        self.hull.kinematics().acceleration
    }

    /// Degrees, [0, 360)
    #[inline]
    pub fn bearing(&self) -> f64 {
        self.hull.kinematics().bearing
    }

    /// rad/s
    #[inline]
    pub fn rotational_velocity(&self) -> f64 {
        self.hull.kinematics().rotational_velocity
    }

    /// rad/s²
    #[inline]
    pub fn rotational_acceleration(&self) -> f64 {
        self.hull.kinematics().rotational_acceleration
    }

    #[inline]
    pub fn kinematics(&self) -> &Kinematics {
        self.hull.kinematics()
    }

    /// Degrees from the centerline, within ±mainsheet
    #[inline]
    pub fn sail_angle(&self) -> f64 {
        self.rig.angle()
    }

    #[inline]
    pub fn rudder_angle(&self) -> f64 {
        self.rudder_angle
    }

    #[inline]
    pub fn mainsheet(&self) -> f64 {
        self.rig.mainsheet()
    }

    #[inline]
    pub fn rig(&self) -> &SailRig {
        &self.rig
    }

    #[inline]
    pub fn boom_state(&self) -> BoomState {
        self.rig.state()
    }

    #[inline]
    pub fn flapping(&self) -> bool {
        self.rig.flapping()
    }

    /// Forces from the latest tick
    #[inline]
    pub fn loads(&self) -> &SurfaceLoads {
        &self.loads
    }

    #[inline]
    pub fn geometry(&self) -> &BoatGeometry {
        self.hull.geometry()
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.hull.mass()
    }

    #[inline]
    pub fn moment_of_inertia(&self) -> f64 {
        self.hull.moment_of_inertia()
    }

    /// Set the mainsheet directly (clamped, boom pulled in if needed)
    pub fn set_mainsheet(&mut self, degrees: f64) {
        self.rig.set_mainsheet(degrees);
    }

    /// Set the rudder directly (clamped to the configured limit)
    pub fn set_rudder_angle(&mut self, degrees: f64) {
        self.rudder_angle = degrees.clamp(-self.rudder_limit, self.rudder_limit);
    }

    /// Whether every pose and rate is a real number
    pub fn is_finite(&self) -> bool {
        self.hull.kinematics().is_finite()
            && self.rig.angle().is_finite()
            && self.rig.angular_velocity().is_finite()
    }

    /// Wrap the position onto a `width` × `height` torus
    pub fn wrap_position(&mut self, width: f64, height: f64) {
        let k = self.hull.kinematics_mut();
        k.position = DVec2::new(k.position.x.rem_euclid(width), k.position.y.rem_euclid(height));
    }

    /// Every named point in world coordinates, with boom and rudder posed
    pub fn outline(&self) -> BoatGeometry {
        let g = self.hull.geometry();
        let posed = BoatGeometry {
            clew: rotate_about(g.clew, g.mast, self.rig.angle()),
            tiller_tip: rotate_about(g.tiller_tip, g.stern, self.rudder_angle),
            rudder_tip: rotate_about(g.rudder_tip, g.stern, self.rudder_angle),
            ..*g
        };
        let k = self.hull.kinematics();
        posed.map(|p| k.position + rotate(p, k.bearing))
    }

    /// Readout for HUDs and logs
    pub fn telemetry<W: WindProvider + ?Sized>(&self, wind: &W) -> Telemetry {
        let velocity = self.velocity();
        let apparent = self.hull.apparent_wind(wind.wind().velocity());
        Telemetry {
            x: self.x(),
            y: self.y(),
            heading: self.bearing(),
            speed_over_ground: velocity.length(),
            course_over_ground: normalize_bearing(bearing_of(velocity)),
            rotational_velocity: self.rotational_velocity(),
            sail_angle: self.sail_angle(),
            rudder_angle: self.rudder_angle,
            mainsheet: self.mainsheet(),
            boom: self.boom_state(),
            flapping: self.flapping(),
            apparent_wind_speed: apparent.length(),
            // Air moving along `apparent` comes from the opposite bearing
            apparent_wind_bearing: normalize_bearing(bearing_of(-apparent)),
        }
    }
}

impl BoatControls for Boat {
    fn adjust_rudder(&mut self, turn: RudderTurn) {
        self.rudder_angle = match turn {
            RudderTurn::Port => (self.rudder_angle + self.rudder_step).min(self.rudder_limit),
            RudderTurn::Starboard => (self.rudder_angle - self.rudder_step).max(-self.rudder_limit),
        };
    }

    fn adjust_mainsheet(&mut self, trim: SheetTrim) {
        self.rig.trim(trim, self.sheet_step);
    }
}

//! Hull rigid-body dynamics
//!
//! Explicit integration: each tick first advances the pose with the
//! accelerations found at the end of the previous tick, then evaluates forces
//! at the new pose to produce the accelerations for the next one. Drag depends
//! on velocity, so the one-tick lag avoids solving for a fixed point; it is
//! accurate enough at frame rates of tens of Hz.

use std::iter::Sum;
use std::ops::Add;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::BoatGeometry;
use super::rig::SailRig;
use super::surface::{HullMotion, LiftSurfaceModel, SurfaceForce, Wing, WingMount};
use crate::config::{BoatConfig, SimulationConfig};
use crate::{normalize_bearing, rotate};

/// Translational and rotational state of the hull
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// m, world frame
    pub position: DVec2,
    /// m/s
    pub velocity: DVec2,
    /// m/s²
    pub acceleration: DVec2,
    /// degrees, [0, 360)
    pub bearing: f64,
    /// rad/s, positive clockwise
    pub rotational_velocity: f64,
    /// rad/s²
    pub rotational_acceleration: f64,
}

impl Kinematics {
    /// Constant-acceleration step of `dt` seconds
    pub fn integrate(&mut self, dt: f64) {
        let dt2 = 0.5 * dt * dt;
        self.position += self.velocity * dt + self.acceleration * dt2;
        self.velocity += self.acceleration * dt;

        let turn = self.rotational_velocity * dt + self.rotational_acceleration * dt2;
        self.bearing = normalize_bearing(self.bearing + turn.to_degrees());
        self.rotational_velocity += self.rotational_acceleration * dt;
    }

    #[inline]
    pub fn motion(&self) -> HullMotion {
        HullMotion {
            bearing: self.bearing,
            velocity: self.velocity,
            rotational_velocity: self.rotational_velocity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.bearing.is_finite()
            && self.rotational_velocity.is_finite()
            && self.rotational_acceleration.is_finite()
    }
}

/// Net force and clockwise moment about the hull center
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetLoad {
    pub force: DVec2,
    pub moment: f64,
}

impl From<SurfaceForce> for NetLoad {
    fn from(f: SurfaceForce) -> Self {
        Self {
            force: f.force,
            moment: f.moment(),
        }
    }
}

impl Add for NetLoad {
    type Output = NetLoad;

    fn add(self, rhs: NetLoad) -> NetLoad {
        NetLoad {
            force: self.force + rhs.force,
            moment: self.moment + rhs.moment,
        }
    }
}

impl Sum for NetLoad {
    fn sum<I: Iterator<Item = NetLoad>>(iter: I) -> NetLoad {
        iter.fold(NetLoad::default(), Add::add)
    }
}

/// Per-surface forces from the latest evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceLoads {
    /// Full aerodynamic force on the sail
    pub sail: SurfaceForce,
    /// Part of the sail force carried by the hull
    pub sail_on_hull: SurfaceForce,
    pub keel: SurfaceForce,
    pub rudder: SurfaceForce,
}

impl SurfaceLoads {
    /// Everything acting on the hull
    pub fn net(&self) -> NetLoad {
        [self.sail_on_hull, self.keel, self.rudder]
            .into_iter()
            .map(NetLoad::from)
            .sum()
    }
}

/// Hull mass properties, surfaces, and motion
#[derive(Debug, Clone, PartialEq)]
pub struct HullDynamics {
    mass: f64,
    moment_of_inertia: f64,
    air_density: f64,
    water_density: f64,
    sail_effort_fraction: f64,
    model: LiftSurfaceModel,
    sail: Wing,
    keel: Wing,
    rudder: Wing,
    geometry: BoatGeometry,
    kinematics: Kinematics,
}

impl HullDynamics {
    /// Build from an already validated configuration
    pub fn new(config: &BoatConfig, sim: &SimulationConfig, position: DVec2, bearing: f64) -> Self {
        Self {
            mass: config.mass,
            moment_of_inertia: config.moment_of_inertia,
            air_density: sim.air_density,
            water_density: sim.water_density,
            sail_effort_fraction: sim.sail_effort_fraction,
            model: LiftSurfaceModel::new(sim),
            sail: Wing::new(config.sail_area, &config.drag.sail),
            keel: Wing::new(config.keel_area, &config.drag.keel),
            rudder: Wing::new(config.rudder_area, &config.drag.rudder),
            geometry: config.resolved_geometry(),
            kinematics: Kinematics {
                position,
                bearing: normalize_bearing(bearing),
                ..Default::default()
            },
        }
    }

    #[inline]
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    #[inline]
    pub(crate) fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    #[inline]
    pub fn geometry(&self) -> &BoatGeometry {
        &self.geometry
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    /// Advance the pose by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        self.kinematics.integrate(dt);
    }

    /// World-oriented offset of the mast from the hull center
    pub fn mast_offset(&self) -> DVec2 {
        rotate(DVec2::new(0.0, self.geometry.mast.y), self.kinematics.bearing)
    }

    /// Air velocity relative to the mast
    pub fn apparent_wind(&self, wind_velocity: DVec2) -> DVec2 {
        self.kinematics
            .motion()
            .apparent_velocity(wind_velocity, self.mast_offset())
    }

    /// Evaluate sail, keel and rudder at the current pose
    ///
    /// The rig decides how much of the sail force reaches the hull and picks
    /// up the boom's own acceleration.
    pub fn compute_loads(&self, rig: &mut SailRig, wind_velocity: DVec2, rudder_angle: f64) -> SurfaceLoads {
        let motion = self.kinematics.motion();
        let bearing = motion.bearing;
        let g = &self.geometry;

        let sail = self.model.compute_force(
            self.air_density,
            wind_velocity,
            &self.sail,
            WingMount {
                bearing: bearing + rig.angle(),
                rotation_distance: g.mast.y,
                center_distance: -g.boom_length() * self.sail_effort_fraction,
            },
            &motion,
        );
        let sail_on_hull = rig.resolve(&sail, self.mast_offset(), bearing);

        let keel = self.model.compute_force(
            self.water_density,
            DVec2::ZERO,
            &self.keel,
            WingMount {
                bearing,
                rotation_distance: g.keel.y,
                center_distance: 0.0,
            },
            &motion,
        );

        let rudder = self.model.compute_force(
            self.water_density,
            DVec2::ZERO,
            &self.rudder,
            WingMount {
                bearing: bearing + rudder_angle,
                rotation_distance: g.stern.y,
                center_distance: -g.rudder_length() / 2.0,
            },
            &motion,
        );

        SurfaceLoads {
            sail,
            sail_on_hull,
            keel,
            rudder,
        }
    }

    /// Store the accelerations produced by `loads` for the next step
    pub fn accelerate(&mut self, loads: &SurfaceLoads) {
        let net = loads.net();
        self.kinematics.acceleration = net.force / self.mass;
        self.kinematics.rotational_acceleration = net.moment / self.moment_of_inertia;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::controls::SheetTrim;
    use crate::sim::rig::BoomState;
    use crate::sim::wind::Wind;

    fn hull() -> HullDynamics {
        HullDynamics::new(
            &BoatConfig::dinghy(),
            &SimulationConfig::default(),
            DVec2::ZERO,
            0.0,
        )
    }

    fn rig() -> SailRig {
        let g = BoatConfig::dinghy().resolved_geometry();
        SailRig::new(5.0, g.boom_length())
    }

    #[test]
    fn test_integrate_constant_acceleration() {
        let mut k = Kinematics {
            velocity: DVec2::new(1.0, 0.0),
            acceleration: DVec2::new(0.0, 2.0),
            ..Default::default()
        };
        k.integrate(0.5);
        assert!((k.position - DVec2::new(0.5, 0.25)).length() < 1e-12);
        assert!((k.velocity - DVec2::new(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_integrate_rotation_wraps() {
        let mut k = Kinematics {
            bearing: 359.0,
            rotational_velocity: 2.0_f64.to_radians(),
            ..Default::default()
        };
        k.integrate(1.0);
        assert!((k.bearing - 1.0).abs() < 1e-9);

        let mut k = Kinematics {
            bearing: 0.5,
            rotational_velocity: -1.0_f64.to_radians(),
            ..Default::default()
        };
        k.integrate(1.0);
        assert!((k.bearing - 359.5).abs() < 1e-9);
    }

    #[test]
    fn test_net_load_sums_moments() {
        let loads = SurfaceLoads {
            sail_on_hull: SurfaceForce {
                force: DVec2::new(1.0, 0.0),
                point: DVec2::new(0.0, 2.0),
                flapping: false,
            },
            rudder: SurfaceForce {
                force: DVec2::new(1.0, 0.0),
                point: DVec2::new(0.0, -2.0),
                flapping: false,
            },
            ..Default::default()
        };
        let net = loads.net();
        assert_eq!(net.force, DVec2::new(2.0, 0.0));
        assert_eq!(net.moment, 0.0);
    }

    #[test]
    fn test_calm_at_rest_has_no_load() {
        let h = hull();
        let mut r = rig();
        let loads = h.compute_loads(&mut r, Wind::CALM.velocity(), 50.0);
        let net = loads.net();
        assert_eq!(net.force, DVec2::ZERO);
        assert_eq!(net.moment, 0.0);
    }

    #[test]
    fn test_beam_wind_on_locked_sail_pushes_hull_downwind() {
        let mut h = hull();
        let mut r = rig();
        // Wind from the west, sheet fully in
        let loads = h.compute_loads(&mut r, Wind::new(5.0, 270.0).velocity(), 0.0);
        assert_eq!(r.state(), BoomState::Locked);
        assert!(loads.sail.force.x > 0.0);
        assert_eq!(loads.sail_on_hull, loads.sail);
        h.accelerate(&loads);
        assert!(h.kinematics().acceleration.x > 0.0);
    }

    #[test]
    fn test_free_boom_shields_hull_from_cross_force() {
        let h = hull();
        let mut r = rig();
        r.trim(SheetTrim::Out, 45.0);
        let loads = h.compute_loads(&mut r, Wind::new(5.0, 270.0).velocity(), 0.0);
        assert_eq!(r.state(), BoomState::Free);
        assert!(loads.sail.force.x > 0.0);
        assert!(loads.sail_on_hull.force.x.abs() < 1e-9);
        // Pushed east from aft of the mast, the boom swings counter-clockwise
        assert!(r.angular_acceleration() < 0.0);
    }

    #[test]
    fn test_keel_resists_leeway() {
        let mut h = hull();
        h.kinematics_mut().velocity = DVec2::new(0.5, 0.0);
        let mut r = rig();
        let loads = h.compute_loads(&mut r, DVec2::ZERO, 0.0);
        assert!(loads.keel.force.x < 0.0);
        // Still air becomes an apparent wind from the east
        assert!(loads.sail.force.x < 0.0);
    }

    #[test]
    fn test_apparent_wind_at_rest_equals_true_wind() {
        let h = hull();
        let wind = Wind::new(6.0, 45.0).velocity();
        assert!((h.apparent_wind(wind) - wind).length() < 1e-12);
    }
}

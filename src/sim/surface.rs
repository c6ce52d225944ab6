//! Lift surface force model
//!
//! Sail, keel and rudder are all treated as flat wings. A wing stops the
//! medium flowing across it (perpendicular momentum-flux force) and drags on
//! the medium flowing along it (parallel skin drag). Circulation lift is not
//! modeled.
//!
//! All formulas are continuous through zero flow: there is no normalization
//! of a velocity vector and `atan2(0, 0)` is defined as 0.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{SimulationConfig, SurfaceDrag};
use crate::{bearing_of, rotate};

/// Physical constants of one wing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wing {
    /// Flat (side) area, m²
    pub area: f64,
    /// Area presented edge-on, m²
    pub leading_edge_area: f64,
    pub drag_parallel: f64,
    /// Drag coefficient while pinched; `None` for surfaces that never flap
    pub drag_pinching: Option<f64>,
}

impl Wing {
    pub fn new(area: f64, drag: &SurfaceDrag) -> Self {
        Self {
            area,
            leading_edge_area: drag.leading_edge_area,
            drag_parallel: drag.parallel,
            drag_pinching: drag.pinching,
        }
    }
}

/// Where a wing sits and which way it points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingMount {
    /// Absolute compass bearing of the chord (degrees)
    pub bearing: f64,
    /// Hull center to the wing's pivot, along the centerline (m)
    pub rotation_distance: f64,
    /// Pivot to the center of effort, along the chord (m, negative = aft)
    pub center_distance: f64,
}

/// Hull motion seen by every surface during one force evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HullMotion {
    /// degrees
    pub bearing: f64,
    /// m/s
    pub velocity: DVec2,
    /// rad/s, positive clockwise
    pub rotational_velocity: f64,
}

impl HullMotion {
    /// Velocity of the medium relative to a point fixed on the hull
    ///
    /// `point` is the world-oriented offset from the hull's center.
    pub fn apparent_velocity(&self, medium_velocity: DVec2, point: DVec2) -> DVec2 {
        let radius = point.length();
        let (sin, cos) = bearing_of(point).to_radians().sin_cos();
        let tangential = self.rotational_velocity * radius;
        let from_rotation = DVec2::new(tangential * cos, -tangential * sin);
        medium_velocity - self.velocity - from_rotation
    }
}

/// Force exerted by one wing and where it acts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceForce {
    /// N, world frame
    pub force: DVec2,
    /// Application point, world-oriented offset from the hull center (m)
    pub point: DVec2,
    /// The pinching coefficient was used
    pub flapping: bool,
}

impl SurfaceForce {
    /// Clockwise moment about the hull center (N·m)
    #[inline]
    pub fn moment(&self) -> f64 {
        self.force.perp_dot(self.point)
    }

    /// Clockwise moment about another world-oriented offset
    #[inline]
    pub fn moment_about(&self, pivot: DVec2) -> f64 {
        self.force.perp_dot(self.point - pivot)
    }
}

/// Computes [`SurfaceForce`]s for any wing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftSurfaceModel {
    pinching_angle: f64,
}

impl LiftSurfaceModel {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            pinching_angle: config.pinching_angle,
        }
    }

    /// Force on `wing` mounted at `mount` in a medium of `density` moving at
    /// `medium_velocity`, for a hull moving as `hull`
    pub fn compute_force(
        &self,
        density: f64,
        medium_velocity: DVec2,
        wing: &Wing,
        mount: WingMount,
        hull: &HullMotion,
    ) -> SurfaceForce {
        // Center of effort in hull-local space, then world-oriented
        let relative = mount.bearing - hull.bearing;
        let (rel_sin, rel_cos) = relative.to_radians().sin_cos();
        let local = DVec2::new(
            rel_sin * mount.center_distance,
            mount.rotation_distance + rel_cos * mount.center_distance,
        );
        let point = rotate(local, hull.bearing);

        let apparent = hull.apparent_velocity(medium_velocity, point);
        let magnitude = apparent.length();
        let relative_bearing = bearing_of(apparent) - mount.bearing;
        let (flow_sin, flow_cos) = relative_bearing.to_radians().sin_cos();
        let parallel = flow_cos * magnitude;
        let perpendicular = flow_sin * magnitude;

        // Acute angle between the flow and the chord line
        let attack = perpendicular.abs().atan2(parallel.abs()).to_degrees();
        let pinched = wing
            .drag_pinching
            .filter(|_| magnitude > 0.0 && attack < self.pinching_angle);
        let drag_coefficient = pinched.unwrap_or(wing.drag_parallel);

        // Skin drag, signed with the flow: 0.5·ρ·v·|v|·Cd·A
        let drag_parallel =
            0.5 * density * parallel * parallel.abs() * drag_coefficient * wing.leading_edge_area;

        // The wing brings the perpendicular flow to rest; the reaction is
        // mass flow rate times the velocity removed.
        let mass_flow = perpendicular.abs() * wing.area * density;
        let force_perpendicular = -(mass_flow * (0.0 - perpendicular));

        let (wing_sin, wing_cos) = mount.bearing.to_radians().sin_cos();
        let force = DVec2::new(
            drag_parallel * wing_sin + force_perpendicular * wing_cos,
            drag_parallel * wing_cos - force_perpendicular * wing_sin,
        );

        SurfaceForce {
            force,
            point,
            flapping: pinched.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn model() -> LiftSurfaceModel {
        LiftSurfaceModel::new(&SimulationConfig::default())
    }

    fn plate() -> Wing {
        Wing {
            area: 2.0,
            leading_edge_area: 0.1,
            drag_parallel: 0.01,
            drag_pinching: None,
        }
    }

    fn centered(bearing: f64) -> WingMount {
        WingMount {
            bearing,
            rotation_distance: 0.0,
            center_distance: 0.0,
        }
    }

    #[test]
    fn test_zero_flow_zero_force() {
        let hull = HullMotion::default();
        let f = model().compute_force(1000.0, DVec2::ZERO, &plate(), centered(37.0), &hull);
        assert_eq!(f.force, DVec2::ZERO);
        assert!(!f.flapping);
        assert!(f.force.is_finite());
    }

    #[test]
    fn test_cross_flow_pushes_downstream() {
        // North-pointing plate in a 2 m/s eastward flow
        let hull = HullMotion::default();
        let flow = DVec2::new(2.0, 0.0);
        let f = model().compute_force(1.0, flow, &plate(), centered(0.0), &hull);
        // |v|·A·ρ·v = 2·2·1·2
        assert!((f.force.x - 8.0).abs() < EPS);
        assert!(f.force.y.abs() < EPS);
    }

    #[test]
    fn test_parallel_flow_is_skin_drag() {
        let hull = HullMotion::default();
        let flow = DVec2::new(0.0, -3.0);
        let f = model().compute_force(1000.0, flow, &plate(), centered(0.0), &hull);
        let expected = -0.5 * 1000.0 * 9.0 * 0.01 * 0.1;
        assert!(f.force.x.abs() < EPS);
        assert!((f.force.y - expected).abs() < EPS);
    }

    #[test]
    fn test_zero_area_has_no_perpendicular_force() {
        let wing = Wing {
            area: 0.0,
            ..plate()
        };
        let hull = HullMotion::default();
        let f = model().compute_force(1.0, DVec2::new(4.0, 0.0), &wing, centered(0.0), &hull);
        assert!(f.force.length() < EPS);
    }

    #[test]
    fn test_moving_hull_sees_opposing_flow() {
        // Hull sliding east through still water: keel pushed west
        let hull = HullMotion {
            velocity: DVec2::new(1.0, 0.0),
            ..Default::default()
        };
        let f = model().compute_force(1000.0, DVec2::ZERO, &plate(), centered(0.0), &hull);
        assert!((f.force.x + 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_induces_flow_at_lever() {
        // Clockwise yaw moves a point astern toward the west
        let hull = HullMotion {
            rotational_velocity: 1.0,
            ..Default::default()
        };
        let mount = WingMount {
            bearing: 0.0,
            rotation_distance: -2.0,
            center_distance: 0.0,
        };
        let f = model().compute_force(1000.0, DVec2::ZERO, &plate(), mount, &hull);
        assert!((f.point - DVec2::new(0.0, -2.0)).length() < EPS);
        // Apparent flow is eastward, so the force is eastward and resists the yaw
        assert!(f.force.x > 0.0);
        assert!(f.moment() < 0.0);
    }

    #[test]
    fn test_application_point_follows_wing_and_hull() {
        let hull = HullMotion {
            bearing: 90.0,
            ..Default::default()
        };
        let mount = WingMount {
            bearing: 90.0,
            rotation_distance: 1.0,
            center_distance: -2.0,
        };
        let f = model().compute_force(1.0, DVec2::ZERO, &plate(), mount, &hull);
        // Local (0, -1) turned to face east lies to the west
        assert!((f.point - DVec2::new(-1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_pinching_coefficient_when_luffing() {
        let wing = Wing {
            drag_pinching: Some(0.5),
            ..plate()
        };
        let hull = HullMotion::default();
        let m = model();

        // 5 degrees off the chord: flapping
        let flow = crate::from_bearing(2.0, 185.0);
        let f = m.compute_force(1.0, flow, &wing, centered(0.0), &hull);
        assert!(f.flapping);

        // 30 degrees off the chord: drawing
        let flow = crate::from_bearing(2.0, 210.0);
        let f = m.compute_force(1.0, flow, &wing, centered(0.0), &hull);
        assert!(!f.flapping);

        // No pinching coefficient, never flaps
        let flow = crate::from_bearing(2.0, 181.0);
        let f = m.compute_force(1.0, flow, &plate(), centered(0.0), &hull);
        assert!(!f.flapping);
    }

    #[test]
    fn test_pinching_increases_parallel_drag() {
        let flow = DVec2::new(0.0, -2.0);
        let hull = HullMotion::default();
        let plain = model().compute_force(1.0, flow, &plate(), centered(0.0), &hull);
        let wing = Wing {
            drag_pinching: Some(0.5),
            ..plate()
        };
        let pinched = model().compute_force(1.0, flow, &wing, centered(0.0), &hull);
        assert!(pinched.force.y < plain.force.y);
        assert!((pinched.force.y / plain.force.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_symmetry() {
        let hull = HullMotion {
            velocity: DVec2::new(0.3, 2.0),
            rotational_velocity: 0.2,
            ..Default::default()
        };
        let mirrored_hull = HullMotion {
            velocity: DVec2::new(-0.3, 2.0),
            rotational_velocity: -0.2,
            ..Default::default()
        };
        let flow = DVec2::new(1.5, -0.5);
        let mirrored_flow = DVec2::new(-1.5, -0.5);
        for angle in [5.0, 20.0, 45.0] {
            let mount = WingMount {
                bearing: angle,
                rotation_distance: -2.1,
                center_distance: -0.1,
            };
            let mirrored_mount = WingMount {
                bearing: -angle,
                ..mount
            };
            let a = model().compute_force(1000.0, flow, &plate(), mount, &hull);
            let b = model().compute_force(1000.0, mirrored_flow, &plate(), mirrored_mount, &mirrored_hull);
            assert!((a.force.x + b.force.x).abs() < 1e-6);
            assert!((a.force.y - b.force.y).abs() < 1e-6);
            assert!((a.moment() + b.moment()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_moment_about_pivot() {
        let f = SurfaceForce {
            force: DVec2::new(10.0, 0.0),
            point: DVec2::new(0.0, -1.0),
            flapping: false,
        };
        // Eastward push behind the center turns the bow west
        assert!((f.moment() + 10.0).abs() < EPS);
        assert!((f.moment_about(DVec2::new(0.0, 1.0)) + 20.0).abs() < EPS);
    }
}

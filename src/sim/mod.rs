//! Sailing physics core
//!
//! Pure and deterministic given the same inputs and seed:
//! - No rendering or platform dependencies
//! - Seeded RNG only (boom flutter)
//! - Controls applied between ticks, never during one
//! - Stable iteration order (by boat index)

pub mod boat;
pub mod controls;
pub mod environment;
pub mod geometry;
pub mod hull;
pub mod rig;
pub mod surface;
pub mod telemetry;
pub mod wind;

pub use boat::Boat;
pub use controls::{BoatControls, ControlInput, RudderTurn, SheetTrim};
pub use environment::Environment;
pub use geometry::BoatGeometry;
pub use hull::{HullDynamics, Kinematics, NetLoad, SurfaceLoads};
pub use rig::{BoomState, SailRig};
pub use surface::{HullMotion, LiftSurfaceModel, SurfaceForce, Wing, WingMount};
pub use telemetry::Telemetry;
pub use wind::{Wind, WindProvider};

//! Control capability
//!
//! Hosts map their own inputs (keys, touch, autopilots) onto these calls.
//! Controls are applied between ticks, never during one.

use serde::{Deserialize, Serialize};

/// Rudder input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RudderTurn {
    /// Rudder angle increases; the bow swings to port
    Port,
    /// Rudder angle decreases; the bow swings to starboard
    Starboard,
}

/// Mainsheet input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetTrim {
    /// Haul in: less boom swing allowed
    In,
    /// Ease out: more boom swing allowed
    Out,
}

/// Anything that can be steered and trimmed
pub trait BoatControls {
    fn adjust_rudder(&mut self, turn: RudderTurn);
    fn adjust_mainsheet(&mut self, trim: SheetTrim);
}

/// Control commands collected for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub rudder: Option<RudderTurn>,
    pub sheet: Option<SheetTrim>,
}

impl ControlInput {
    pub fn is_empty(&self) -> bool {
        self.rudder.is_none() && self.sheet.is_none()
    }

    /// Apply every pending command
    pub fn apply(&self, controls: &mut impl BoatControls) {
        if let Some(turn) = self.rudder {
            controls.adjust_rudder(turn);
        }
        if let Some(trim) = self.sheet {
            controls.adjust_mainsheet(trim);
        }
    }
}

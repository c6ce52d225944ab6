//! Browser bindings
//!
//! The page owns the canvas, the input handling and the animation loop. It
//! drives a [`Simulation`] with `requestAnimationFrame` timestamps and reads
//! boat poses and outlines back as flat `Float64Array`s.

use glam::DVec2;
use wasm_bindgen::prelude::*;

use crate::config::{BoatConfig, SimulationConfig};
use crate::sim::{Boat, ControlInput, Environment, RudderTurn, SheetTrim, Wind};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only when the host page already installed a logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Sail Sim core loaded");
}

/// Water area with its boats, as seen from JavaScript
#[wasm_bindgen]
pub struct Simulation {
    env: Environment,
}

#[wasm_bindgen]
impl Simulation {
    /// `config_json` is a partial `SimulationConfig`; omitted fields take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        wind_speed: f64,
        wind_bearing: f64,
    ) -> Result<Simulation, JsError> {
        let config = match config_json {
            Some(json) => SimulationConfig::from_json(&json)?,
            None => SimulationConfig::default(),
        };
        let env = Environment::new(config, Wind::new(wind_speed, wind_bearing))?;
        Ok(Self { env })
    }

    /// Add a boat; `config_json` is a full `BoatConfig`, or the stock dinghy when absent
    pub fn add_boat(
        &mut self,
        x: f64,
        y: f64,
        bearing: f64,
        config_json: Option<String>,
    ) -> Result<usize, JsError> {
        let config = match config_json {
            Some(json) => BoatConfig::from_json(&json)?,
            None => BoatConfig::dinghy(),
        };
        Ok(self.env.add_boat(&config, DVec2::new(x, y), bearing)?)
    }

    pub fn boat_count(&self) -> usize {
        self.env.boats().len()
    }

    /// Advance from a `requestAnimationFrame` timestamp (ms)
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.env.frame(timestamp_ms);
    }

    /// Advance by an explicit number of milliseconds
    pub fn step(&mut self, delta_ms: f64) {
        self.env.step(delta_ms);
    }

    pub fn set_wind(&mut self, speed: f64, bearing: f64) {
        self.env.set_wind(Wind::new(speed, bearing));
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.env.set_bounds(Some((width, height)));
    }

    pub fn clear_bounds(&mut self) {
        self.env.set_bounds(None);
    }

    /// One rudder step to port (`true`) or starboard
    pub fn steer(&mut self, index: usize, port: bool) -> Result<(), JsError> {
        let input = ControlInput {
            rudder: Some(if port {
                RudderTurn::Port
            } else {
                RudderTurn::Starboard
            }),
            sheet: None,
        };
        input.apply(self.boat_mut(index)?);
        Ok(())
    }

    /// One mainsheet step out (`true`) or in
    pub fn trim(&mut self, index: usize, ease_out: bool) -> Result<(), JsError> {
        let input = ControlInput {
            rudder: None,
            sheet: Some(if ease_out { SheetTrim::Out } else { SheetTrim::In }),
        };
        input.apply(self.boat_mut(index)?);
        Ok(())
    }

    /// `[x, y, bearing, sail_angle, rudder_angle, mainsheet]`
    pub fn pose(&self, index: usize) -> Result<Vec<f64>, JsError> {
        let b = self.boat(index)?;
        Ok(vec![
            b.x(),
            b.y(),
            b.bearing(),
            b.sail_angle(),
            b.rudder_angle(),
            b.mainsheet(),
        ])
    }

    /// World-space outline as `[x0, y0, x1, y1, ...]`: bow, port stern,
    /// starboard stern, mast, clew, keel, stern, tiller tip, rudder tip
    pub fn outline(&self, index: usize) -> Result<Vec<f64>, JsError> {
        let outline = self.boat(index)?.outline();
        Ok(outline
            .points()
            .iter()
            .flat_map(|(_, p)| [p.x, p.y])
            .collect())
    }

    pub fn telemetry_json(&self, index: usize) -> Result<String, JsError> {
        let telemetry = self.boat(index)?.telemetry(&self.env);
        Ok(telemetry.to_json()?)
    }
}

impl Simulation {
    fn boat(&self, index: usize) -> Result<&Boat, JsError> {
        self.env
            .boat(index)
            .ok_or_else(|| JsError::new(&format!("no boat {index}")))
    }

    fn boat_mut(&mut self, index: usize) -> Result<&mut Boat, JsError> {
        self.env
            .boat_mut(index)
            .ok_or_else(|| JsError::new(&format!("no boat {index}")))
    }
}

//! Sail Sim headless runner
//!
//! Sails one boat through a scenario and logs its telemetry once per
//! simulated second. The browser build is driven from JavaScript instead.
//!
//! ```text
//! RUST_LOG=info sail-sim [scenario.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use glam::DVec2;
    use serde::Deserialize;

    use sail_sim::sim::{Environment, Wind};
    use sail_sim::{BoatConfig, ConfigError, SimulationConfig};

    /// Everything needed for one headless run
    #[derive(Debug, Deserialize)]
    #[serde(default)]
    pub struct Scenario {
        pub simulation: SimulationConfig,
        pub boat: BoatConfig,
        pub wind: Wind,
        /// Initial heading (degrees)
        pub bearing: f64,
        /// Fixed mainsheet setting for the run (degrees)
        pub mainsheet: f64,
        /// Fixed rudder setting for the run (degrees)
        pub rudder: f64,
        pub frames: u32,
        pub frame_ms: f64,
    }

    impl Default for Scenario {
        fn default() -> Self {
            Self {
                simulation: SimulationConfig::default(),
                boat: BoatConfig::dinghy(),
                wind: Wind::new(5.0, 270.0),
                bearing: 0.0,
                mainsheet: 45.0,
                rudder: 0.0,
                frames: 1_200,
                frame_ms: 50.0,
            }
        }
    }

    impl Scenario {
        pub fn load(path: &Path) -> Result<Self, ConfigError> {
            let json = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
            let scenario: Self = serde_json::from_str(&json)?;
            scenario.boat.validate()?;
            if !(scenario.frame_ms > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "frame_ms",
                    value: scenario.frame_ms,
                });
            }
            Ok(scenario)
        }
    }

    pub fn run(scenario: Scenario) -> Result<(), ConfigError> {
        let mut env = Environment::new(scenario.simulation, scenario.wind)?;
        let index = env.add_boat(&scenario.boat, DVec2::ZERO, scenario.bearing)?;
        if let Some(boat) = env.boat_mut(index) {
            boat.set_mainsheet(scenario.mainsheet);
            boat.set_rudder_angle(scenario.rudder);
        }

        let frames_per_second = (1_000.0 / scenario.frame_ms).round().max(1.0) as u32;
        for frame in 1..=scenario.frames {
            env.step(scenario.frame_ms);
            if frame % frames_per_second != 0 {
                continue;
            }
            let Some(boat) = env.boat(index) else {
                break;
            };
            let t = boat.telemetry(&env);
            log::info!(
                "t={:>5.1}s pos=({:>7.1}, {:>7.1}) hdg={:>5.1} sog={:>4.2}kn cog={:>5.1} sail={:>6.1} {:?}{}",
                f64::from(frame) * scenario.frame_ms / 1_000.0,
                t.x,
                t.y,
                t.heading,
                t.knots(),
                t.course_over_ground,
                t.sail_angle,
                t.boom,
                if t.flapping { " flapping" } else { "" }
            );
        }

        if let Some(boat) = env.boat(index) {
            match boat.telemetry(&env).to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Telemetry encoding failed: {}", e),
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sail Sim (native) starting...");

    let scenario = match std::env::args().nth(1) {
        Some(path) => match native::Scenario::load(std::path::Path::new(&path)) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Could not load scenario {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => native::Scenario::default(),
    };
    log::info!(
        "Wind {:.1} m/s from {:.0}, {} frames of {} ms",
        scenario.wind.speed,
        scenario.wind.bearing,
        scenario.frames,
        scenario.frame_ms
    );

    if let Err(e) = native::run(scenario) {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `wasm_start` in the library
}

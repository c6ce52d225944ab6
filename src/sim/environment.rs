//! Shared water area
//!
//! Holds the wind and every boat, turns host frame timestamps into clamped
//! physics steps, and keeps boats inside an optional wrap-around area.

use glam::DVec2;

use super::boat::Boat;
use super::wind::{Wind, WindProvider};
use crate::config::{BoatConfig, SimulationConfig};
use crate::error::ConfigError;

/// Wind, boats and frame clock
#[derive(Debug, Clone)]
pub struct Environment {
    config: SimulationConfig,
    wind: Wind,
    boats: Vec<Boat>,
    /// Width and height of the wrap-around area (m)
    bounds: Option<DVec2>,
    last_timestamp: Option<f64>,
}

impl Environment {
    pub fn new(config: SimulationConfig, wind: Wind) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            wind,
            boats: Vec::new(),
            bounds: None,
            last_timestamp: None,
        })
    }

    /// Launch a boat and return its index
    ///
    /// Each boat gets its own flutter seed derived from the simulation seed.
    pub fn add_boat(
        &mut self,
        config: &BoatConfig,
        position: DVec2,
        bearing: f64,
    ) -> Result<usize, ConfigError> {
        let index = self.boats.len();
        let seed = self.config.seed.wrapping_add(index as u64);
        let boat = Boat::new(config, &self.config, position, bearing)?.with_seed(seed);
        self.boats.push(boat);
        log::info!("Boat {} added ({} total)", index, self.boats.len());
        Ok(index)
    }

    #[inline]
    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    #[inline]
    pub fn boat(&self, index: usize) -> Option<&Boat> {
        self.boats.get(index)
    }

    #[inline]
    pub fn boat_mut(&mut self, index: usize) -> Option<&mut Boat> {
        self.boats.get_mut(index)
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_wind(&mut self, wind: Wind) {
        log::debug!("Wind now {:.1} m/s from {:.0}", wind.speed, wind.bearing);
        self.wind = wind;
    }

    /// Wrap boats onto a `width` × `height` area; `None` for open water
    ///
    /// Non-positive or non-finite sizes are treated as open water.
    pub fn set_bounds(&mut self, bounds: Option<(f64, f64)>) {
        self.bounds = bounds
            .map(|(w, h)| DVec2::new(w, h))
            .filter(|b| b.is_finite() && b.x > 0.0 && b.y > 0.0);
    }

    #[inline]
    pub fn bounds(&self) -> Option<DVec2> {
        self.bounds
    }

    /// Advance every boat by `delta_ms`, clamped to `max_frame_ms`
    ///
    /// A boat whose state turns non-finite is restored to its state before
    /// the step.
    pub fn step(&mut self, delta_ms: f64) {
        if !(delta_ms > 0.0) {
            return;
        }
        let delta_ms = if delta_ms > self.config.max_frame_ms {
            log::warn!(
                "Frame gap of {:.0} ms shortened to {:.0} ms",
                delta_ms,
                self.config.max_frame_ms
            );
            self.config.max_frame_ms
        } else {
            delta_ms
        };

        let wind = self.wind;
        for (index, boat) in self.boats.iter_mut().enumerate() {
            let before = boat.clone();
            boat.update(delta_ms, &wind);
            if !boat.is_finite() {
                log::warn!("Boat {} diverged, discarding step", index);
                *boat = before;
                continue;
            }
            if let Some(bounds) = self.bounds {
                boat.wrap_position(bounds.x, bounds.y);
            }
        }
    }

    /// Step from a host frame timestamp (ms); the first frame only starts the clock
    pub fn frame(&mut self, timestamp_ms: f64) {
        let delta = match self.last_timestamp {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.step(delta);
    }
}

impl WindProvider for Environment {
    fn wind(&self) -> Wind {
        self.wind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::controls::{BoatControls, SheetTrim};

    fn environment(wind: Wind) -> Environment {
        Environment::new(SimulationConfig::default(), wind).expect("default config is valid")
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            air_density: -1.0,
            ..Default::default()
        };
        assert!(Environment::new(config, Wind::CALM).is_err());
    }

    #[test]
    fn test_add_boat_indices() {
        let mut env = environment(Wind::CALM);
        let a = env
            .add_boat(&BoatConfig::dinghy(), DVec2::ZERO, 0.0)
            .expect("valid");
        let b = env
            .add_boat(&BoatConfig::dinghy(), DVec2::new(10.0, 0.0), 90.0)
            .expect("valid");
        assert_eq!((a, b), (0, 1));
        assert_eq!(env.boats().len(), 2);
        assert!(env.boat(2).is_none());

        let bad = BoatConfig {
            sail_area: 0.0,
            ..BoatConfig::dinghy()
        };
        assert!(env.add_boat(&bad, DVec2::ZERO, 0.0).is_err());
        assert_eq!(env.boats().len(), 2);
    }

    #[test]
    fn test_first_frame_starts_clock() {
        let mut env = environment(Wind::new(5.0, 180.0));
        env.add_boat(&BoatConfig::dinghy(), DVec2::ZERO, 0.0)
            .expect("valid");
        env.frame(1_000.0);
        assert_eq!(env.boats()[0].acceleration(), DVec2::ZERO);
        env.frame(1_016.0);
        assert!(env.boats()[0].acceleration().y > 0.0);
    }

    #[test]
    fn test_long_frame_clamped() {
        let wind = Wind::new(5.0, 270.0);
        let mut long = environment(wind);
        let mut short = environment(wind);
        for env in [&mut long, &mut short] {
            env.add_boat(&BoatConfig::dinghy(), DVec2::ZERO, 0.0)
                .expect("valid");
            env.step(50.0);
        }
        long.step(5_000.0);
        short.step(100.0);
        assert_eq!(long.boats()[0].kinematics(), short.boats()[0].kinematics());
    }

    #[test]
    fn test_wrap_bounds() {
        let mut env = environment(Wind::CALM);
        env.add_boat(&BoatConfig::dinghy(), DVec2::new(-1.0, 205.0), 0.0)
            .expect("valid");
        env.set_bounds(Some((100.0, 100.0)));
        env.step(10.0);
        let p = env.boats()[0].position();
        assert!((p - DVec2::new(99.0, 5.0)).length() < 1e-9);

        env.set_bounds(Some((0.0, 50.0)));
        assert!(env.bounds().is_none());
    }

    #[test]
    fn test_wind_change_applies_next_step() {
        let mut env = environment(Wind::CALM);
        env.add_boat(&BoatConfig::dinghy(), DVec2::ZERO, 0.0)
            .expect("valid");
        env.step(20.0);
        assert_eq!(env.boats()[0].acceleration(), DVec2::ZERO);

        env.set_wind(Wind::new(6.0, 270.0));
        assert_eq!(env.wind().speed, 6.0);
        env.step(20.0);
        assert!(env.boats()[0].acceleration().x > 0.0);
    }

    #[test]
    fn test_boats_get_distinct_seeds() {
        let mut env = environment(Wind::new(5.0, 180.0));
        for _ in 0..2 {
            let i = env
                .add_boat(&BoatConfig::dinghy(), DVec2::ZERO, 0.0)
                .expect("valid");
            let boat = env.boat_mut(i).expect("just added");
            for _ in 0..18 {
                boat.adjust_mainsheet(SheetTrim::Out);
            }
        }
        // Dead downwind the sail flaps and flutters from the first step
        for _ in 0..3 {
            env.step(50.0);
        }
        let [a, b] = env.boats() else {
            panic!("two boats expected");
        };
        assert_ne!(a.sail_angle(), b.sail_angle());
    }
}

//! Simulation configuration, loadable from TOML.
//!
//! Every field has a default matching the Apollo scenario, so a file only
//! needs the values it changes:
//!
//! ```toml
//! [sim]
//! time_limit = 300.0
//!
//! [advisory]
//! processing_delay = 4.0
//!
//! [vehicle]
//! ascent_fuel = 2000.0
//!
//! [initial]
//! altitude = 5000.0
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::dynamics::state::VehicleState;
use crate::error::ConfigError;
use crate::vehicle::LunarModule;

// ---------------------------------------------------------------------------
// Burn driver timing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,         // micro-step, s
    pub time_limit: f64, // s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            time_limit: 600.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Ground control advisories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub transmission_delay: f64,     // s
    pub processing_delay: f64,       // s
    pub queue_capacity: usize,
    pub target_touchdown_speed: f64, // ft/s
    pub target_horiz_speed: f64,     // ft/s
    pub tolerance: f64,              // ft/s
    pub vertical_gain: f64,          // lb/s per ft/s
    pub horizontal_gain: f64,        // lb/s per ft/s
    pub projection_dt: f64,          // s
    pub max_projection_steps: usize,
}

impl AdvisoryConfig {
    /// Time between evaluation and delivery of a correction.
    pub fn total_delay(&self) -> f64 {
        self.transmission_delay + self.processing_delay
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            transmission_delay: 2.6,
            processing_delay: 2.0,
            queue_capacity: 100,
            target_touchdown_speed: 5.0,
            target_horiz_speed: 0.0,
            tolerance: 5.0,
            vertical_gain: 0.1,
            horizontal_gain: 0.05,
            projection_dt: 0.1,
            max_projection_steps: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Initial conditions after the AGC failure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub altitude: f64,           // ft
    pub v_down_min: u32,         // ft/s
    pub v_down_max: u32,         // ft/s
    pub horiz_speed_min: u32,    // ft/s
    pub horiz_speed_max: u32,    // ft/s
}

impl InitialConditions {
    pub fn v_down_range(&self) -> RangeInclusive<u32> {
        self.v_down_min..=self.v_down_max
    }

    pub fn horiz_speed_range(&self) -> RangeInclusive<u32> {
        self.horiz_speed_min..=self.horiz_speed_max
    }

    /// Starting state with whole-number speeds drawn from the configured ranges.
    pub fn sample<R: Rng>(&self, rng: &mut R, lem: &LunarModule) -> VehicleState {
        let v_down = rng.gen_range(self.v_down_range()) as f64;
        let horiz_speed = rng.gen_range(self.horiz_speed_range()) as f64;
        self.with_speeds(v_down, horiz_speed, lem)
    }

    /// Starting state with explicit speeds.
    pub fn with_speeds(&self, v_down: f64, horiz_speed: f64, lem: &LunarModule) -> VehicleState {
        VehicleState {
            time: 0.0,
            altitude: self.altitude,
            v_down,
            horiz_pos: 0.0,
            horiz_speed,
            descent_fuel: lem.descent_fuel,
            ascent_fuel: lem.ascent_fuel,
        }
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            altitude: 7500.0,
            v_down_min: 200,
            v_down_max: 700,
            horiz_speed_min: 50,
            horiz_speed_max: 200,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub sim: SimConfig,
    pub advisory: AdvisoryConfig,
    pub vehicle: LunarModule,
    pub initial: InitialConditions,
}

impl LanderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LanderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        };

        if !(self.sim.dt > 0.0) || !(self.advisory.projection_dt > 0.0) {
            return invalid("time steps must be positive");
        }
        if !(self.sim.time_limit > 0.0) {
            return invalid("time_limit must be positive");
        }
        if self.advisory.transmission_delay < 0.0 || self.advisory.processing_delay < 0.0 {
            return invalid("advisory delays cannot be negative");
        }
        let v = &self.vehicle;
        if !(v.descent_dry_mass > 0.0) || !(v.ascent_dry_mass > 0.0) {
            return invalid("dry masses must be positive");
        }
        if v.descent_fuel < 0.0 || v.ascent_fuel < 0.0 {
            return invalid("fuel loads cannot be negative");
        }
        if !(v.max_vertical_burn >= 0.0) || !(v.max_horiz_burn >= 0.0) {
            return invalid("burn limits cannot be negative");
        }
        let init = &self.initial;
        if init.v_down_min > init.v_down_max || init.horiz_speed_min > init.horiz_speed_max {
            return invalid("initial speed ranges are inverted");
        }
        if !(init.altitude > 0.0) {
            return invalid("initial altitude must be positive");
        }
        Ok(())
    }
}

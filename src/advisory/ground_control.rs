use tracing::{debug, warn};

use crate::config::AdvisoryConfig;
use crate::dynamics::state::VehicleState;
use crate::dynamics::thrust::{fuel_used, Accelerations};
use crate::sim::command::BurnCommand;
use crate::sim::integrator::{rk4_step, Axis};
use crate::vehicle::LunarModule;

use super::advisor::Advisor;
use super::correction::Advice;

// ---------------------------------------------------------------------------
// Open-loop touchdown projection
// ---------------------------------------------------------------------------

/// Result of flying the current rates forward until touchdown or a cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub state: VehicleState,
    pub steps: usize,
    pub touched_down: bool,
    /// Mass went non-positive; `state` is the last valid one.
    pub diverged: bool,
}

/// Replay the burn dynamics from `start` with constant rates.
///
/// Stops when projected altitude reaches zero, fuel goes negative, mass is
/// no longer positive, or after `max_steps` steps.
pub fn project(
    start: &VehicleState,
    lem: &LunarModule,
    v_burn: f64,
    h_burn: f64,
    dt: f64,
    max_steps: usize,
) -> Projection {
    let mut state = *start;
    let mut mass = lem.total_mass(state.descent_fuel, state.ascent_fuel);
    let mut steps = 0;
    let mut diverged = false;

    while state.altitude > 0.0 && state.descent_fuel >= 0.0 && mass > 0.0 && steps < max_steps {
        let fuel = state.descent_fuel - fuel_used(v_burn, h_burn, dt, state.descent_fuel);
        mass = lem.total_mass(fuel, state.ascent_fuel);

        let accel = match Accelerations::checked(v_burn, h_burn, mass, lem) {
            Ok(a) => a,
            Err(err) => {
                warn!(%err, step = steps, "projection halted");
                diverged = true;
                break;
            }
        };

        state.descent_fuel = fuel;
        state.set_vertical(rk4_step(Axis::Vertical, &state.vertical(), accel.vertical, dt));
        state.set_horizontal(rk4_step(Axis::Horizontal, &state.horizontal(), accel.horizontal, dt));
        state.time += dt;
        steps += 1;
    }

    Projection {
        state,
        steps,
        touched_down: state.altitude <= 0.0,
        diverged,
    }
}

/// Replace `adjustment` with the delta to the nearest bound if
/// `current + adjustment` would leave `[min, max]`.
///
/// `max - current` is rounded, so the boundary delta is nudged one ulp at a
/// time until `current + delta` is back inside the range.
pub fn clamp_adjustment(current: f64, adjustment: f64, min: f64, max: f64) -> f64 {
    if current + adjustment > max {
        let mut delta = max - current;
        while current + delta > max {
            delta = delta.next_down();
        }
        delta
    } else if current + adjustment < min {
        let mut delta = min - current;
        while current + delta < min {
            delta = delta.next_up();
        }
        delta
    } else {
        adjustment
    }
}

// ---------------------------------------------------------------------------
// Proportional ground-control advisor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GroundControl {
    pub config: AdvisoryConfig,
}

impl GroundControl {
    pub fn new(config: AdvisoryConfig) -> Self {
        Self { config }
    }

    /// Turn a projected touchdown into advice for the rates that produced it.
    pub fn assess(&self, projection: &Projection, lem: &LunarModule, cmd: &BurnCommand) -> Advice {
        let c = &self.config;
        let v_down_error = projection.state.v_down - c.target_touchdown_speed;
        let h_speed_error = projection.state.horiz_speed - c.target_horiz_speed;

        if v_down_error.abs() <= c.tolerance && h_speed_error.abs() <= c.tolerance {
            return Advice::Nominal;
        }

        let v_burn_delta = clamp_adjustment(
            cmd.v_burn,
            v_down_error * c.vertical_gain,
            0.0,
            lem.max_vertical_burn,
        );
        let h_burn_delta = clamp_adjustment(
            cmd.h_burn,
            h_speed_error * c.horizontal_gain,
            -lem.max_horiz_burn,
            lem.max_horiz_burn,
        );
        Advice::Adjust { v_burn_delta, h_burn_delta }
    }
}

impl Default for GroundControl {
    fn default() -> Self {
        Self::new(AdvisoryConfig::default())
    }
}

impl Advisor for GroundControl {
    fn advise(&mut self, state: &VehicleState, lem: &LunarModule, cmd: &BurnCommand) -> Advice {
        let projection = project(
            state,
            lem,
            cmd.v_burn,
            cmd.h_burn,
            self.config.projection_dt,
            self.config.max_projection_steps,
        );
        let advice = self.assess(&projection, lem, cmd);
        debug!(
            steps = projection.steps,
            touched_down = projection.touched_down,
            projected_v_down = projection.state.v_down,
            projected_h_speed = projection.state.horiz_speed,
            ?advice,
            "projected touchdown"
        );
        advice
    }

    fn name(&self) -> &str {
        "GroundControl"
    }
}

use tracing::{debug, trace};

use crate::advisory::{Correction, CorrectionQueue};
use crate::dynamics::state::VehicleState;
use crate::dynamics::thrust::{fuel_used, Accelerations};
use crate::vehicle::LunarModule;

use super::command::BurnCommand;
use super::integrator::{rk4_step, Axis};

// ---------------------------------------------------------------------------
// Burn driver: one pilot command split into fixed micro-steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnTermination {
    /// Every micro-step of the requested duration ran.
    Duration,
    /// Altitude reached zero before the duration elapsed.
    Altitude,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurnReport {
    pub steps: usize,
    pub termination: BurnTermination,
    pub fuel_used: f64,
    /// Corrections that matured during the burn, in delivery order.
    pub delivered: Vec<Correction>,
}

/// Number of whole micro-steps in `duration`; any remainder is dropped.
pub fn step_count(duration: f64, dt: f64) -> usize {
    if duration <= 0.0 {
        return 0;
    }
    (duration / dt).floor() as usize
}

/// Fly `cmd` from `state`, polling `queue` after every micro-step.
///
/// Each micro-step appends the resulting state to `trajectory`. On
/// touchdown the altitude is clamped to exactly zero.
pub fn run_burn(
    state: &mut VehicleState,
    lem: &LunarModule,
    cmd: &BurnCommand,
    dt: f64,
    queue: &mut CorrectionQueue,
    trajectory: &mut Vec<VehicleState>,
) -> BurnReport {
    let planned = step_count(cmd.duration, dt);
    let mut steps = 0;
    let mut total_fuel = 0.0;
    let mut delivered = Vec::new();

    while steps < planned && state.altitude > 0.0 {
        let used = fuel_used(cmd.v_burn, cmd.h_burn, dt, state.descent_fuel);
        state.descent_fuel = (state.descent_fuel - used).max(0.0);
        total_fuel += used;

        // Dry masses are positive, so this mass is too
        let mass = lem.total_mass(state.descent_fuel, state.ascent_fuel);
        let accel = Accelerations::compute(cmd.v_burn, cmd.h_burn, mass, lem);

        state.set_vertical(rk4_step(Axis::Vertical, &state.vertical(), accel.vertical, dt));
        state.set_horizontal(rk4_step(Axis::Horizontal, &state.horizontal(), accel.horizontal, dt));
        state.time += dt;
        steps += 1;

        if state.altitude <= 0.0 {
            state.altitude = 0.0;
        }

        for correction in queue.drain(state.time) {
            trace!(
                eval_time = correction.eval_time,
                delivery_time = correction.delivery_time,
                now = state.time,
                "correction delivered"
            );
            delivered.push(correction);
        }

        trajectory.push(*state);
    }

    let termination = if state.altitude <= 0.0 && steps > 0 {
        BurnTermination::Altitude
    } else {
        BurnTermination::Duration
    };

    debug!(
        steps,
        ?termination,
        fuel_used = total_fuel,
        altitude = state.altitude,
        v_down = state.v_down,
        "burn complete"
    );

    BurnReport {
        steps,
        termination,
        fuel_used: total_fuel,
        delivered,
    }
}

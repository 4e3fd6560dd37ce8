use std::fmt;

use tracing::info;

use crate::dynamics::state::{VehicleState, LUNAR_ORBITAL_SPEED};
use crate::vehicle::LunarModule;

// ---------------------------------------------------------------------------
// Abort to orbit on the ascent stage
// ---------------------------------------------------------------------------

/// Why an abort did not reach orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbortFailure {
    /// Below the minimum abort altitude. The vehicle crashes.
    TooLow { altitude: f64 },
    /// No ascent propellant. The vehicle crashes.
    NoFuel,
    /// Ascent stage cannot reach orbital speed. The descent continues.
    InsufficientDeltaV { delta_v: f64, required: f64 },
}

impl AbortFailure {
    /// Whether the failure ends the flight in a crash.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AbortFailure::InsufficientDeltaV { .. })
    }
}

impl fmt::Display for AbortFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortFailure::TooLow { .. } => {
                write!(f, "Too low to abort safely! Crashing into the surface.")
            }
            AbortFailure::NoFuel => write!(f, "No ascent fuel left! Cannot reach orbit. Crashing."),
            AbortFailure::InsufficientDeltaV { delta_v, .. } => write!(
                f,
                "Abort failed! Insufficient delta-v ({delta_v:.2} ft/s) to reach orbit."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbortResult {
    Orbit { delta_v: f64 },
    Failed(AbortFailure),
}

/// Delta-v still needed to reach orbit, given the current horizontal speed.
pub fn required_delta_v(horiz_speed: f64) -> f64 {
    LUNAR_ORBITAL_SPEED - horiz_speed.abs()
}

/// Try to abort. Fatal failures force the altitude to zero; ascent fuel is
/// never spent by this model.
pub fn attempt_abort(state: &mut VehicleState, lem: &LunarModule) -> AbortResult {
    if state.altitude < lem.min_abort_altitude {
        info!(altitude = state.altitude, "abort failed: too low");
        let altitude = state.altitude;
        state.altitude = 0.0;
        return AbortResult::Failed(AbortFailure::TooLow { altitude });
    }
    if state.ascent_fuel <= 0.0 {
        info!("abort failed: no ascent fuel");
        state.altitude = 0.0;
        return AbortResult::Failed(AbortFailure::NoFuel);
    }

    let delta_v = lem.ascent_delta_v(state.ascent_fuel);
    let required = required_delta_v(state.horiz_speed);
    if delta_v >= required {
        info!(delta_v, required, "abort to orbit");
        AbortResult::Orbit { delta_v }
    } else {
        info!(delta_v, required, "abort failed: insufficient delta-v");
        AbortResult::Failed(AbortFailure::InsufficientDeltaV { delta_v, required })
    }
}

use thiserror::Error;

use crate::dynamics::state::{LUNAR_GRAVITY, STANDARD_GRAVITY};
use crate::vehicle::LunarModule;

// ---------------------------------------------------------------------------
// Thrust model (pound-force / slug units)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DynamicsError {
    #[error("vehicle mass {0:.3} lb is not positive")]
    NonPositiveMass(f64),
}

/// Thrust acceleration magnitude (ft/s^2) for a propellant burn rate.
///
///   mass flow = |burn| / g0            (slugs/s)
///   thrust    = mass flow * vex        (lbf)
///   accel     = thrust / (mass / g0)   (ft/s^2)
pub fn thrust_acceleration(burn_rate: f64, mass: f64, vex: f64) -> f64 {
    let mass_slugs = mass / STANDARD_GRAVITY;
    let mass_flow = burn_rate.abs() / STANDARD_GRAVITY;
    let thrust = mass_flow * vex;
    thrust / mass_slugs
}

/// Net downward acceleration: lunar gravity minus vertical thrust.
pub fn vertical_acceleration(v_burn: f64, mass: f64, lem: &LunarModule) -> f64 {
    LUNAR_GRAVITY - thrust_acceleration(v_burn, mass, lem.vex)
}

/// Signed horizontal acceleration; direction follows the sign of `h_burn`.
pub fn horizontal_acceleration(h_burn: f64, mass: f64, lem: &LunarModule) -> f64 {
    if h_burn == 0.0 {
        return 0.0;
    }
    h_burn.signum() * thrust_acceleration(h_burn, mass, lem.vex)
}

/// Propellant used over `dt`, never more than what remains.
pub fn fuel_used(v_burn: f64, h_burn: f64, dt: f64, remaining: f64) -> f64 {
    ((v_burn + h_burn.abs()) * dt).min(remaining.max(0.0))
}

/// Accelerations on both axes for one micro-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerations {
    pub vertical: f64,   // ft/s^2, positive = speeding up the descent
    pub horizontal: f64, // ft/s^2
}

impl Accelerations {
    pub fn compute(v_burn: f64, h_burn: f64, mass: f64, lem: &LunarModule) -> Self {
        Self {
            vertical: vertical_acceleration(v_burn, mass, lem),
            horizontal: horizontal_acceleration(h_burn, mass, lem),
        }
    }

    /// Same as [`Accelerations::compute`] but refuses a non-positive mass.
    pub fn checked(v_burn: f64, h_burn: f64, mass: f64, lem: &LunarModule) -> Result<Self, DynamicsError> {
        if mass <= 0.0 {
            return Err(DynamicsError::NonPositiveMass(mass));
        }
        Ok(Self::compute(v_burn, h_burn, mass, lem))
    }
}

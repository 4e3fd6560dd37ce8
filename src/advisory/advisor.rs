use crate::dynamics::state::VehicleState;
use crate::sim::command::BurnCommand;
use crate::vehicle::LunarModule;

use super::correction::Advice;

/// Trait for ground-side advisors.
///
/// An advisor looks at the vehicle right after a burn and returns the advice
/// that will be sent up to the pilot once the transmission delay has passed.
pub trait Advisor {
    /// Evaluate the state left by `cmd` and recommend a rate change.
    fn advise(&mut self, state: &VehicleState, lem: &LunarModule, cmd: &BurnCommand) -> Advice;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

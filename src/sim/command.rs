use crate::error::CommandError;
use crate::vehicle::LunarModule;

/// One pilot turn: burn both engines for `duration` seconds.
/// A negative duration requests an abort to orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnCommand {
    pub duration: f64, // s
    pub v_burn: f64,   // lb/s, 0..=max_vertical_burn
    pub h_burn: f64,   // lb/s, -max_horiz_burn..=max_horiz_burn
}

impl BurnCommand {
    pub fn new(duration: f64, v_burn: f64, h_burn: f64) -> Self {
        Self { duration, v_burn, h_burn }
    }

    /// The `-1` abort sentinel.
    pub fn abort() -> Self {
        Self::new(-1.0, 0.0, 0.0)
    }

    pub fn is_abort(&self) -> bool {
        self.duration < 0.0
    }

    /// Check the command against the vehicle's limits. Abort requests
    /// ignore the burn rates.
    pub fn validate(&self, lem: &LunarModule) -> Result<(), CommandError> {
        if !self.duration.is_finite() {
            return Err(CommandError::NonFiniteInput { field: "duration" });
        }
        if self.is_abort() {
            return Ok(());
        }
        if !lem.vertical_burn_in_range(self.v_burn) {
            return Err(CommandError::VerticalBurnOutOfRange {
                value: self.v_burn,
                max: lem.max_vertical_burn,
            });
        }
        if !lem.horiz_burn_in_range(self.h_burn) {
            return Err(CommandError::HorizontalBurnOutOfRange {
                value: self.h_burn,
                max: lem.max_horiz_burn,
            });
        }
        Ok(())
    }
}

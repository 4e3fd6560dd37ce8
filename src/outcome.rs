use std::fmt;

use crate::sim::abort::AbortFailure;

// ---------------------------------------------------------------------------
// Landing classification
// ---------------------------------------------------------------------------

pub const PERFECT_LIMIT: f64 = 5.0; // ft/s, both axes
pub const GOOD_LIMIT: f64 = 15.0; // ft/s, both axes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    Perfect,
    Good,
    Crash,
}

/// Classify a touchdown from the final vertical and horizontal speeds.
pub fn evaluate_landing(v_down: f64, horiz_speed: f64) -> LandingOutcome {
    let h = horiz_speed.abs();
    if v_down <= PERFECT_LIMIT && h <= PERFECT_LIMIT {
        LandingOutcome::Perfect
    } else if v_down <= GOOD_LIMIT && h <= GOOD_LIMIT {
        LandingOutcome::Good
    } else {
        LandingOutcome::Crash
    }
}

impl fmt::Display for LandingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandingOutcome::Perfect => write!(f, "perfect landing"),
            LandingOutcome::Good => write!(f, "good landing"),
            LandingOutcome::Crash => write!(f, "crash landing"),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Landed(LandingOutcome),
    AbortedToOrbit { delta_v: f64 },
    /// A fatal abort failure: the vehicle is lost.
    AbortFailed(AbortFailure),
    /// Time limit reached while still airborne. No landing classification.
    TimeLimit,
}

impl Outcome {
    pub fn is_crash(&self) -> bool {
        matches!(
            self,
            Outcome::Landed(LandingOutcome::Crash) | Outcome::AbortFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_landing() {
        assert_eq!(evaluate_landing(5.0, 3.0), LandingOutcome::Perfect);
        assert_eq!(evaluate_landing(0.0, -5.0), LandingOutcome::Perfect);
    }

    #[test]
    fn good_landing() {
        assert_eq!(evaluate_landing(5.0, 10.0), LandingOutcome::Good);
        assert_eq!(evaluate_landing(15.0, -15.0), LandingOutcome::Good);
    }

    #[test]
    fn crash_landing() {
        assert_eq!(evaluate_landing(20.0, 0.0), LandingOutcome::Crash);
        assert_eq!(evaluate_landing(4.0, 16.0), LandingOutcome::Crash);
    }

    #[test]
    fn crash_detection() {
        assert!(Outcome::Landed(LandingOutcome::Crash).is_crash());
        assert!(Outcome::AbortFailed(AbortFailure::NoFuel).is_crash());
        assert!(!Outcome::TimeLimit.is_crash());
        assert!(!Outcome::AbortedToOrbit { delta_v: 7000.0 }.is_crash());
        assert_eq!(LandingOutcome::Good.to_string(), "good landing");
    }
}

// ---------------------------------------------------------------------------
// Mission Control advisories
// ---------------------------------------------------------------------------

/// What ground control recommends after evaluating a burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advice {
    /// Projected touchdown is within tolerance; keep the current rates.
    Nominal,
    /// Change the burn rates by these deltas (lb/s, signed).
    Adjust { v_burn_delta: f64, h_burn_delta: f64 },
}

/// A timestamped advice waiting for (or past) its delivery time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub eval_time: f64,     // s, when the state was evaluated
    pub delivery_time: f64, // s, eval_time + transmission + processing delay
    pub advice: Advice,
}

impl Correction {
    pub fn new(eval_time: f64, delay: f64, advice: Advice) -> Self {
        Self {
            eval_time,
            delivery_time: eval_time + delay,
            advice,
        }
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.delivery_time
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self.advice, Advice::Nominal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_time_adds_delay() {
        let c = Correction::new(12.0, 4.6, Advice::Nominal);
        assert!((c.delivery_time - 16.6).abs() < 1e-12);
        assert!(!c.is_due(16.5));
        assert!(c.is_due(16.6));
        assert!(c.is_confirmation());
    }

    #[test]
    fn adjustment_is_not_confirmation() {
        let c = Correction::new(
            0.0,
            4.6,
            Advice::Adjust { v_burn_delta: 3.0, h_burn_delta: -1.0 },
        );
        assert!(!c.is_confirmation());
    }
}

use tracing::{debug, info};

use crate::advisory::{Advisor, Correction, CorrectionQueue, GroundControl};
use crate::config::LanderConfig;
use crate::dynamics::state::VehicleState;
use crate::error::CommandError;
use crate::outcome::{evaluate_landing, LandingOutcome, Outcome};
use crate::vehicle::LunarModule;

use super::abort::{attempt_abort, AbortFailure, AbortResult};
use super::burn::run_burn;
use super::command::BurnCommand;

// ---------------------------------------------------------------------------
// Command results
// ---------------------------------------------------------------------------

/// How (and whether) a command ended the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    None,
    Landed(LandingOutcome),
    AbortSucceeded { delta_v: f64 },
    /// Abort did not reach orbit but the descent goes on unchanged.
    AbortFailedContinuing(AbortFailure),
    /// Abort failed fatally; the vehicle crashed.
    AbortFailedCrash(AbortFailure),
    TimeLimit,
}

impl Termination {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Termination::None | Termination::AbortFailedContinuing(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub state: VehicleState,
    /// Corrections delivered during this command, in delivery order.
    pub delivered: Vec<Correction>,
    /// Correction evaluated at the end of this command, if one was queued.
    pub queued: Option<Correction>,
    pub termination: Termination,
}

// ---------------------------------------------------------------------------
// Session: owns the vehicle state for a whole descent
// ---------------------------------------------------------------------------

pub struct Session {
    config: LanderConfig,
    state: VehicleState,
    queue: CorrectionQueue,
    advisor: Box<dyn Advisor>,
    outcome: Option<Outcome>,
    trajectory: Vec<VehicleState>,
}

impl Session {
    /// Session advised by [`GroundControl`] using the configured gains.
    pub fn new(config: LanderConfig, initial: VehicleState) -> Self {
        let advisor = GroundControl::new(config.advisory.clone());
        Self::with_advisor(config, initial, Box::new(advisor))
    }

    pub fn with_advisor(config: LanderConfig, initial: VehicleState, advisor: Box<dyn Advisor>) -> Self {
        let capacity = (config.sim.time_limit / config.sim.dt) as usize + 1;
        let mut trajectory = Vec::with_capacity(capacity.min(100_000));
        trajectory.push(initial);

        Self {
            queue: CorrectionQueue::new(config.advisory.queue_capacity),
            config,
            state: initial,
            advisor,
            outcome: None,
            trajectory,
        }
    }

    /// Resolve one pilot command completely.
    ///
    /// Invalid commands are rejected before anything is touched.
    pub fn submit(&mut self, cmd: BurnCommand) -> Result<StepResult, CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::SessionFinished);
        }
        cmd.validate(&self.config.vehicle)?;

        if cmd.is_abort() {
            return Ok(self.abort());
        }

        let report = run_burn(
            &mut self.state,
            &self.config.vehicle,
            &cmd,
            self.config.sim.dt,
            &mut self.queue,
            &mut self.trajectory,
        );

        if self.state.on_surface() {
            let landing = evaluate_landing(self.state.v_down, self.state.horiz_speed);
            info!(
                time = self.state.time,
                v_down = self.state.v_down,
                horiz_speed = self.state.horiz_speed,
                %landing,
                "touchdown"
            );
            self.outcome = Some(Outcome::Landed(landing));
            return Ok(self.result(report.delivered, None, Termination::Landed(landing)));
        }

        let advice = self.advisor.advise(&self.state, &self.config.vehicle, &cmd);
        let correction = Correction::new(self.state.time, self.config.advisory.total_delay(), advice);
        let queued = self.queue.insert(correction).then_some(correction);
        if queued.is_some() {
            debug!(
                advisor = self.advisor.name(),
                eval_time = correction.eval_time,
                delivery_time = correction.delivery_time,
                ?advice,
                "correction queued"
            );
        }

        let termination = if self.state.time >= self.config.sim.time_limit {
            info!(time = self.state.time, "time limit reached");
            self.outcome = Some(Outcome::TimeLimit);
            Termination::TimeLimit
        } else {
            Termination::None
        };

        Ok(self.result(report.delivered, queued, termination))
    }

    fn abort(&mut self) -> StepResult {
        let termination = match attempt_abort(&mut self.state, &self.config.vehicle) {
            AbortResult::Orbit { delta_v } => {
                self.outcome = Some(Outcome::AbortedToOrbit { delta_v });
                Termination::AbortSucceeded { delta_v }
            }
            AbortResult::Failed(failure) if failure.is_fatal() => {
                self.trajectory.push(self.state);
                self.outcome = Some(Outcome::AbortFailed(failure));
                Termination::AbortFailedCrash(failure)
            }
            AbortResult::Failed(failure) => Termination::AbortFailedContinuing(failure),
        };
        self.result(Vec::new(), None, termination)
    }

    fn result(
        &self,
        delivered: Vec<Correction>,
        queued: Option<Correction>,
        termination: Termination,
    ) -> StepResult {
        StepResult {
            state: self.state,
            delivered,
            queued,
            termination,
        }
    }

    /// Read-only snapshot of the current vehicle state.
    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn pending_corrections(&self) -> impl Iterator<Item = &Correction> {
        self.queue.iter()
    }

    /// Initial state followed by every micro-step flown so far.
    pub fn trajectory(&self) -> &[VehicleState] {
        &self.trajectory
    }

    pub fn vehicle(&self) -> &LunarModule {
        &self.config.vehicle
    }

    pub fn config(&self) -> &LanderConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Advice;
    use crate::vehicle::LunarModuleBuilder;

    fn session(v_down: f64, horiz_speed: f64) -> Session {
        let config = LanderConfig::default();
        let initial = config.initial.with_speeds(v_down, horiz_speed, &config.vehicle);
        Session::new(config, initial)
    }

    /// Advisor that always confirms, for exercising the queue through a session.
    struct AlwaysNominal;

    impl Advisor for AlwaysNominal {
        fn advise(&mut self, _: &VehicleState, _: &LunarModule, _: &BurnCommand) -> Advice {
            Advice::Nominal
        }
    }

    #[test]
    fn invalid_command_leaves_state_untouched() {
        let mut s = session(300.0, 100.0);
        let before = s.state();
        let err = s.submit(BurnCommand::new(10.0, 300.0, 0.0)).unwrap_err();
        assert!(matches!(err, CommandError::VerticalBurnOutOfRange { .. }));
        assert_eq!(s.state(), before);
        assert_eq!(s.pending_corrections().count(), 0);
        assert_eq!(s.trajectory().len(), 1);
    }

    #[test]
    fn burn_advances_clock_and_queues_advice() {
        let mut s = session(300.0, 100.0);
        let r = s.submit(BurnCommand::new(10.0, 200.0, -5.0)).unwrap();
        assert!((r.state.time - 10.0).abs() < 1e-9);
        assert_eq!(r.termination, Termination::None);
        let queued = r.queued.expect("advice should be queued");
        assert!((queued.delivery_time - (queued.eval_time + 4.6)).abs() < 1e-12);
        assert_eq!(s.pending_corrections().count(), 1);
        assert_eq!(s.trajectory().len(), 101);
    }

    #[test]
    fn partial_step_is_not_flown() {
        let mut s = session(300.0, 100.0);
        let r = s.submit(BurnCommand::new(1.05, 100.0, 0.0)).unwrap();
        assert!((r.state.time - 1.0).abs() < 1e-9, "time {}", r.state.time);
        assert_eq!(s.trajectory().len(), 11);
    }

    #[test]
    fn advice_arrives_after_delay() {
        let mut s = session(300.0, 100.0);
        s.submit(BurnCommand::new(2.0, 250.0, -10.0)).unwrap();
        let r = s.submit(BurnCommand::new(4.0, 250.0, -10.0)).unwrap();
        assert!(r.delivered.is_empty(), "4.6 s delay not yet elapsed");
        let r = s.submit(BurnCommand::new(1.0, 250.0, -10.0)).unwrap();
        assert_eq!(r.delivered.len(), 1);
        assert!((r.delivered[0].eval_time - 2.0).abs() < 1e-9);
        assert!(r.delivered[0].delivery_time <= r.state.time);
    }

    #[test]
    fn descent_to_touchdown_is_classified() {
        let mut s = session(300.0, 100.0);
        let r = s.submit(BurnCommand::new(120.0, 0.0, 0.0)).unwrap();
        assert_eq!(r.termination, Termination::Landed(LandingOutcome::Crash));
        assert_eq!(r.state.altitude, 0.0);
        assert!(r.queued.is_none());
        assert_eq!(s.outcome(), Some(Outcome::Landed(LandingOutcome::Crash)));
        assert!(s.is_finished());
        assert_eq!(
            s.submit(BurnCommand::new(1.0, 0.0, 0.0)),
            Err(CommandError::SessionFinished)
        );
    }

    #[test]
    fn gentle_touchdown_is_perfect() {
        let mut config = LanderConfig::default();
        config.initial.altitude = 1.0;
        let initial = config.initial.with_speeds(3.0, 2.0, &config.vehicle);
        let mut s = Session::new(config, initial);
        // Hover-ish burn: thrust ~ gravity so speed stays near 3 ft/s
        let r = s.submit(BurnCommand::new(5.0, 9.0, 0.0)).unwrap();
        assert_eq!(r.termination, Termination::Landed(LandingOutcome::Perfect));
    }

    #[test]
    fn abort_too_low_crashes() {
        let mut config = LanderConfig::default();
        config.initial.altitude = 50.0;
        let initial = config.initial.with_speeds(1.0, 0.0, &config.vehicle);
        let mut s = Session::new(config, initial);
        let r = s.submit(BurnCommand::abort()).unwrap();
        assert_eq!(
            r.termination,
            Termination::AbortFailedCrash(AbortFailure::TooLow { altitude: 50.0 })
        );
        assert_eq!(r.state.altitude, 0.0);
        assert!(s.outcome().unwrap().is_crash());
    }

    #[test]
    fn abort_succeeds_from_altitude() {
        let mut s = session(300.0, 100.0);
        let r = s.submit(BurnCommand::abort()).unwrap();
        assert!(matches!(r.termination, Termination::AbortSucceeded { .. }));
        assert!(matches!(s.outcome(), Some(Outcome::AbortedToOrbit { .. })));
    }

    #[test]
    fn failed_abort_lets_descent_continue() {
        let mut config = LanderConfig::default();
        config.vehicle = LunarModuleBuilder::new().ascent_fuel(500.0).build();
        let initial = config.initial.with_speeds(300.0, 100.0, &config.vehicle);
        let mut s = Session::new(config, initial);
        let before = s.state();
        let r = s.submit(BurnCommand::abort()).unwrap();
        assert!(matches!(r.termination, Termination::AbortFailedContinuing(_)));
        assert!(!r.termination.is_terminal());
        assert_eq!(s.state(), before);
        assert!(s.submit(BurnCommand::new(1.0, 100.0, 0.0)).is_ok());
    }

    #[test]
    fn time_limit_ends_session() {
        let mut config = LanderConfig::default();
        config.sim.time_limit = 5.0;
        let initial = config.initial.with_speeds(0.0, 0.0, &config.vehicle);
        let mut s = Session::new(config, initial);
        // Full burn climbs away from the surface
        let r = s.submit(BurnCommand::new(6.0, 250.0, 0.0)).unwrap();
        assert_eq!(r.termination, Termination::TimeLimit);
        assert_eq!(s.outcome(), Some(Outcome::TimeLimit));
        assert!(r.state.altitude > 0.0);
    }

    #[test]
    fn queue_capacity_enforced_through_session() {
        let mut config = LanderConfig::default();
        config.advisory.queue_capacity = 2;
        let initial = config.initial.with_speeds(0.0, 0.0, &config.vehicle);
        let mut s = Session::with_advisor(config, initial, Box::new(AlwaysNominal));
        assert!(s.submit(BurnCommand::new(0.0, 10.0, 0.0)).unwrap().queued.is_some());
        assert!(s.submit(BurnCommand::new(0.0, 10.0, 0.0)).unwrap().queued.is_some());
        assert!(s.submit(BurnCommand::new(0.0, 10.0, 0.0)).unwrap().queued.is_none());
        assert_eq!(s.pending_corrections().count(), 2);
    }

    #[test]
    fn fuel_never_negative_over_session() {
        let mut s = session(200.0, 50.0);
        for _ in 0..10 {
            if s.is_finished() {
                break;
            }
            s.submit(BurnCommand::new(3.0, 250.0, 10.0)).unwrap();
        }
        assert!(s.trajectory().iter().all(|t| t.descent_fuel >= 0.0));
    }
}

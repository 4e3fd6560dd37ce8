pub mod abort;
pub mod burn;
pub mod command;
pub mod integrator;
pub mod session;

pub use command::BurnCommand;
pub use integrator::{rk4_step, Axis};
pub use session::{Session, StepResult, Termination};

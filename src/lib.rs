pub mod advisory;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod outcome;
pub mod sim;
pub mod vehicle;

pub use config::LanderConfig;
pub use error::{CommandError, ConfigError};
pub use outcome::{LandingOutcome, Outcome};
pub use sim::{BurnCommand, Session, StepResult, Termination};

pub mod types {
    pub use crate::advisory::{Advice, Correction};
    pub use crate::dynamics::state::{
        VehicleState, LUNAR_GRAVITY, LUNAR_ORBITAL_SPEED, STANDARD_GRAVITY,
    };
    pub use crate::vehicle::LunarModule;
}

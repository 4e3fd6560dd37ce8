pub mod state;
pub mod thrust;

pub use state::VehicleState;
pub use thrust::{Accelerations, DynamicsError};

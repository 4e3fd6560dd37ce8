pub mod advisor;
pub mod correction;
pub mod ground_control;
pub mod queue;

pub use advisor::Advisor;
pub use correction::{Advice, Correction};
pub use ground_control::{project, GroundControl, Projection};
pub use queue::CorrectionQueue;

pub mod chamber;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod extrapolate;
pub mod jets;
pub mod shapes;
pub mod simulation;

pub use error::TowerError;
pub use simulation::{Simulation, SimulationConfig};

pub const CHAMBER_WIDTH: usize = 7;

pub mod body;
pub mod c_api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod simulation;
pub mod vector;

pub use body::{Body, BodyKind, G};
pub use catalog::{Catalog, Preset};
pub use config::SimulationConfig;
pub use error::SimulationError;
pub use simulation::{BodyView, Simulation};
pub use vector::{Polar, Vector};

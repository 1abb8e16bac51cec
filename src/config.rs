//! Runtime parameters for a simulation run.
//!
//! Scenarios are usually read from YAML; every field falls back to its
//! default when omitted:
//!
//! ```yaml
//! dt: 3600.0                  # seconds per sub-step
//! trail_length: 100           # trail points kept per body
//! calculations_per_trail: 24  # sub-steps between trail points
//! calculations_per_frame: 24  # sub-steps per driver frame
//! bodies: [sun, mercury, venus, earth, moon, mars]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Parameters of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sub-step length in seconds.
    pub dt: f64,
    /// Maximum number of points kept in each body's trail.
    pub trail_length: usize,
    /// Number of sub-steps between two recorded trail points.
    pub calculations_per_trail: usize,
    /// Number of sub-steps executed per [`crate::Simulation::step`].
    pub calculations_per_frame: usize,
    /// Catalog identifiers of the bodies to instantiate.
    pub bodies: Vec<String>,
}

impl SimulationConfig {
    /// Default constants.
    pub const DEFAULT_DT: f64 = 3600.0;
    pub const DEFAULT_TRAIL_LENGTH: usize = 100;
    pub const DEFAULT_CALCULATIONS_PER_TRAIL: usize = 24;
    pub const DEFAULT_CALCULATIONS_PER_FRAME: usize = 24;
    pub const DEFAULT_BODIES: [&'static str; 12] = [
        "sun", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
        "moon", "phobos", "deimos",
    ];

    /// Checks the parameters that would make the integrator unsound.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimulationError::InvalidTimestep(self.dt));
        }
        if self.calculations_per_trail == 0 {
            return Err(SimulationError::ZeroTrailSteps);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: Self::DEFAULT_DT,
            trail_length: Self::DEFAULT_TRAIL_LENGTH,
            calculations_per_trail: Self::DEFAULT_CALCULATIONS_PER_TRAIL,
            calculations_per_frame: Self::DEFAULT_CALCULATIONS_PER_FRAME,
            bodies: Self::DEFAULT_BODIES.iter().map(|id| id.to_string()).collect(),
        }
    }
}

//! Error types for the simulation core.
//!
//! Configuration omissions (unknown body identifiers, empty rosters) are not
//! errors; only numerically unsound states are reported here.

use std::fmt;

/// Errors raised while building or advancing a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A body was configured with zero, negative or non-finite mass.
    NonPositiveMass { name: String, mass: f64 },
    /// The trail down-sampling factor was zero.
    ZeroTrailSteps,
    /// The timestep was zero, negative or non-finite.
    InvalidTimestep(f64),
    /// Two bodies occupy the same position, so the force between them has no direction.
    CoincidentBodies { first: String, second: String },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NonPositiveMass { name, mass } => {
                write!(f, "Body `{}` has non-positive mass {}", name, mass)
            }
            SimulationError::ZeroTrailSteps => {
                write!(f, "Trail steps must be at least 1")
            }
            SimulationError::InvalidTimestep(dt) => {
                write!(f, "Timestep must be a positive finite number of seconds, got {}", dt)
            }
            SimulationError::CoincidentBodies { first, second } => write!(
                f,
                "Bodies `{}` and `{}` occupy the same position; gravitational force is undefined",
                first, second
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offenders() {
        let err = SimulationError::CoincidentBodies {
            first: "Earth".into(),
            second: "The Moon (Earth)".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Earth"));
        assert!(msg.contains("The Moon (Earth)"));

        let err = SimulationError::NonPositiveMass { name: "Ghost".into(), mass: 0.0 };
        assert!(err.to_string().contains("Ghost"));
    }
}

//! Named body presets.
//!
//! A [`Catalog`] is a plain table mapping identifiers (`"sun"`, `"earth"`,
//! `"phobos"`, ...) to canonical physical parameters. The built-in table is
//! [`Catalog::solar_system`]; any other table can be deserialized from YAML:
//!
//! ```yaml
//! presets:
//!   - id: sun
//!     name: The Sun
//!     kind: star
//!     position: [0.0, 0.0]
//!     velocity: [0.0, 0.0]
//!     mass: 1.989e30
//!     radius: 6.96e8
//!     color: yellow
//! ```

use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyKind};
use crate::error::SimulationError;
use crate::vector::Vector;

/// Canonical parameters for one named body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Identifier used in rosters.
    pub id: String,
    /// Display name given to the instantiated body.
    pub name: String,
    pub kind: BodyKind,
    /// Initial position (m).
    pub position: [f64; 2],
    /// Initial velocity (m/s).
    pub velocity: [f64; 2],
    /// Mass (kg).
    pub mass: f64,
    /// Physical radius (m). Scaled by [`BodyKind::display_scale`] on instantiation.
    pub radius: f64,
    pub color: String,
}

impl Preset {
    /// Builds a fresh body from this preset.
    pub fn instantiate(&self, trail_length: usize, trail_steps: usize) -> Result<Body, SimulationError> {
        let [x, y] = self.position;
        let [vx, vy] = self.velocity;
        Body::new(
            self.name.clone(),
            self.kind,
            Vector::new(x, y),
            Vector::new(vx, vy),
            self.mass,
            self.radius * self.kind.display_scale(),
        )?
        .with_color(self.color.clone())
        .with_trail(trail_length, trail_steps)
    }
}

/// Immutable table of presets, looked up by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub presets: Vec<Preset>,
}

struct Row {
    id: &'static str,
    name: &'static str,
    kind: BodyKind,
    position: [f64; 2],
    velocity: [f64; 2],
    mass: f64,
    radius: f64,
    color: &'static str,
}

const SOLAR_SYSTEM: [Row; 12] = [
    Row {
        id: "sun",
        name: "The Sun",
        kind: BodyKind::Star,
        position: [0.0, 0.0],
        velocity: [0.0, 0.0],
        mass: 1.989e30,
        radius: 6.96e8,
        color: "yellow",
    },
    Row {
        id: "mercury",
        name: "Mercury",
        kind: BodyKind::Planet,
        position: [-6.9817e10, 0.0],
        velocity: [0.0, 3.886e4],
        mass: 0.33011e24,
        radius: 2.439e6,
        color: "gray",
    },
    Row {
        id: "venus",
        name: "Venus",
        kind: BodyKind::Planet,
        position: [-1.08e11, 0.0],
        velocity: [0.0, 3.479e4],
        mass: 4.8675e24,
        radius: 6.051e6,
        color: "orange",
    },
    Row {
        id: "earth",
        name: "Earth",
        kind: BodyKind::Planet,
        position: [-1.52e11, 0.0],
        velocity: [0.0, 2.929e4],
        mass: 5.972e24,
        radius: 6.37e6,
        color: "blue",
    },
    Row {
        id: "mars",
        name: "Mars",
        kind: BodyKind::Planet,
        position: [-2.49e11, 0.0],
        velocity: [0.0, 2.197e4],
        mass: 0.64171e24,
        radius: 3.396e6,
        color: "red",
    },
    Row {
        id: "jupiter",
        name: "Jupiter",
        kind: BodyKind::Planet,
        position: [-8.16618e11, 0.0],
        velocity: [0.0, 1.244e4],
        mass: 1898.19e24,
        radius: 71.492e6,
        color: "coral",
    },
    Row {
        id: "saturn",
        name: "Saturn",
        kind: BodyKind::Planet,
        position: [-15.14504e11, 0.0],
        velocity: [0.0, 0.909e4],
        mass: 568.34e24,
        radius: 60.268e6,
        color: "navajowhite",
    },
    Row {
        id: "uranus",
        name: "Uranus",
        kind: BodyKind::Planet,
        position: [-30.036254e11, 0.0],
        velocity: [0.0, 0.649e4],
        mass: 86.813e24,
        radius: 25.559e6,
        color: "azure",
    },
    Row {
        id: "neptune",
        name: "Neptune",
        kind: BodyKind::Planet,
        position: [-45.45671e11, 0.0],
        velocity: [0.0, 0.537e4],
        mass: 102.413e24,
        radius: 24.764e6,
        color: "darkblue",
    },
    Row {
        id: "moon",
        name: "The Moon (Earth)",
        kind: BodyKind::Moon,
        position: [-1.52e11, 4.05e8],
        velocity: [0.970e3, 2.929e4],
        mass: 0.07346e24,
        radius: 1.738e6,
        color: "white",
    },
    Row {
        id: "phobos",
        name: "Phobos(Mars)",
        kind: BodyKind::Moon,
        position: [-2.49e11, 9.378e6],
        velocity: [2.138e3, 2.197e4],
        mass: 10.5e15,
        radius: 11.2667e3,
        color: "white",
    },
    Row {
        id: "deimos",
        name: "Deimos(Mars)",
        kind: BodyKind::Moon,
        position: [-2.49e11, 23.459e6],
        velocity: [1.3513e3, 2.197e4],
        mass: 2.4e15,
        radius: 6.2e3,
        color: "white",
    },
];

impl Catalog {
    /// The built-in table: the Sun, the eight planets, the Moon, Phobos and Deimos.
    pub fn solar_system() -> Self {
        let presets = SOLAR_SYSTEM
            .iter()
            .map(|row| Preset {
                id: row.id.to_string(),
                name: row.name.to_string(),
                kind: row.kind,
                position: row.position,
                velocity: row.velocity,
                mass: row.mass,
                radius: row.radius,
                color: row.color.to_string(),
            })
            .collect();
        Self { presets }
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Identifiers in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

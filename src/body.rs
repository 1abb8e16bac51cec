use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::vector::Vector;

/// Gravitational constant in m³ kg⁻¹ s⁻².
pub const G: f64 = 6.67e-11;

/// Broad category of a body. Physically irrelevant; it drives render
/// grouping and how much the physical radius is inflated for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    /// Factor applied to a physical radius to get a visible disc.
    pub fn display_scale(self) -> f64 {
        match self {
            BodyKind::Star => 50.0,
            BodyKind::Planet => 1000.0,
            BodyKind::Moon => 100.0,
        }
    }
}

/// Represents a celestial body in the simulation.
#[derive(Clone, Debug)]
pub struct Body {
    /// Display name. Not used for identity or physics.
    pub name: String,
    pub kind: BodyKind,
    /// Opaque colour tag handed to the renderer untouched.
    pub color: String,
    /// Position vector (m).
    pub position: Vector,
    /// Velocity vector (m/s).
    pub velocity: Vector,
    /// Display radius. Gravity treats bodies as point masses.
    pub radius: f64,
    mass: f64,
    /// Force accumulated during the current sub-step only.
    force: Vector,
    /// Past positions, most recent first.
    trail: VecDeque<Vector>,
    trail_length: usize,
    trail_steps: usize,
    trail_counter: usize,
}

impl Body {
    /// Creates a new Body with the given properties.
    /// Initial force is zero, the trail is empty and records every step.
    pub fn new(
        name: impl Into<String>,
        kind: BodyKind,
        position: Vector,
        velocity: Vector,
        mass: f64,
        radius: f64,
    ) -> Result<Self, SimulationError> {
        let name = name.into();
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::NonPositiveMass { name, mass });
        }

        Ok(Self {
            name,
            kind,
            color: String::from("white"),
            position,
            velocity,
            radius,
            mass,
            force: Vector::zero(),
            trail: VecDeque::with_capacity(SimulationConfig::DEFAULT_TRAIL_LENGTH + 1),
            trail_length: SimulationConfig::DEFAULT_TRAIL_LENGTH,
            trail_steps: 1,
            trail_counter: 0,
        })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Keeps at most `length` trail points, recording one every `steps` updates.
    pub fn with_trail(mut self, length: usize, steps: usize) -> Result<Self, SimulationError> {
        if steps == 0 {
            return Err(SimulationError::ZeroTrailSteps);
        }
        self.trail_length = length;
        self.trail_steps = steps;
        self.trail.truncate(length);
        Ok(self)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Force accumulated so far in the current sub-step.
    pub fn force(&self) -> Vector {
        self.force
    }

    /// Recorded positions, most recent first.
    pub fn trail(&self) -> &VecDeque<Vector> {
        &self.trail
    }

    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    pub fn trail_steps(&self) -> usize {
        self.trail_steps
    }

    /// Adds the gravitational pull of `other` to this body's force accumulator.
    ///
    /// Only this body is affected; the reciprocal force needs a separate call
    /// on `other`. Fails without touching the accumulator when both bodies sit
    /// on the same point.
    pub fn apply_force_from_body(&mut self, other: &Body) -> Result<(), SimulationError> {
        let offset = other.position - self.position;
        let distance_sq = offset.mag_sq();
        if distance_sq.is_nan() || distance_sq <= 0.0 {
            return Err(SimulationError::CoincidentBodies {
                first: self.name.clone(),
                second: other.name.clone(),
            });
        }

        let magnitude = G * (self.mass * other.mass) / distance_sq;
        self.force += offset * (magnitude / distance_sq.sqrt());
        Ok(())
    }

    /// Advances the body by `dt` seconds with explicit Euler.
    ///
    /// The pre-move position is recorded in the trail when the down-sampling
    /// counter is at zero. Position moves with the old velocity, then velocity
    /// takes the accumulated force, then the accumulator is cleared.
    pub fn update_position(&mut self, dt: f64) {
        if self.trail_counter == 0 {
            self.trail.push_front(self.position);
            if self.trail.len() > self.trail_length {
                self.trail.pop_back();
            }
        }
        self.trail_counter = (self.trail_counter + 1) % self.trail_steps;

        self.position += self.velocity * dt;
        self.velocity += self.force * (dt / self.mass);
        self.force = Vector::zero();
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vector::zero();
    }

    /// Position relative to `reference`, or the absolute position when there is none.
    pub fn relative_position(&self, reference: Option<&Body>) -> Vector {
        match reference {
            Some(reference) => self.position - reference.position,
            None => self.position,
        }
    }

    /// Trail points relative to the reference's trail at the same index.
    ///
    /// With a reference, the result stops at the shorter of the two trails.
    /// Without one, the trail is returned as recorded.
    pub fn relative_trail<'a>(
        &'a self,
        reference: Option<&'a Body>,
    ) -> impl Iterator<Item = Vector> + 'a {
        let offsets = reference.map(|reference| &reference.trail);
        self.trail
            .iter()
            .enumerate()
            .map_while(move |(i, point)| match offsets {
                Some(offsets) => offsets.get(i).map(|offset| *point - *offset),
                None => Some(*point),
            })
    }
}

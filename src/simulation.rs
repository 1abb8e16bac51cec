use std::collections::VecDeque;

use crate::{
    body::{Body, BodyKind},
    catalog::Catalog,
    config::SimulationConfig,
    error::SimulationError,
    vector::Vector,
};

/// Render-ready snapshot of one body, relative to the tracked body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyView<'a> {
    pub name: &'a str,
    pub kind: BodyKind,
    pub color: &'a str,
    pub radius: f64,
    /// Display position (position minus the tracked body's position).
    pub position: Vector,
    /// Display-relative trail, most recent first.
    pub trail: Vec<Vector>,
}

/// Manages the direct-summation N-body state and the per-frame stepping.
///
/// The roster is fixed at construction; only body state changes afterwards.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Time step per sub-step, in seconds.
    dt: f64,
    /// Elapsed simulated time, in seconds.
    time: f64,
    /// Number of sub-steps completed.
    sub_steps: u64,
    /// Sub-steps executed by each call to [`Simulation::step`].
    pub calculations_per_frame: usize,
    /// Whether [`Simulation::step`] advances the physics.
    pub running: bool,
    /// Viewport offset applied by the renderer.
    pub translation: Vector,
    bodies: Vec<Body>,
    tracked: Option<usize>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            dt: SimulationConfig::DEFAULT_DT,
            time: 0.0,
            sub_steps: 0,
            calculations_per_frame: SimulationConfig::DEFAULT_CALCULATIONS_PER_FRAME,
            running: true,
            translation: Vector::zero(),
            bodies: Vec::new(),
            tracked: None,
        }
    }
}

impl Simulation {
    /// Builds a simulation from the built-in solar system catalog.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_catalog(config, &Catalog::solar_system())
    }

    /// Instantiates one body per requested identifier found in `catalog`.
    ///
    /// Bodies are grouped star, planets, moons. Within a group the most
    /// recently requested body comes first. Unknown identifiers are skipped.
    pub fn with_catalog(config: &SimulationConfig, catalog: &Catalog) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut stars = VecDeque::new();
        let mut planets = VecDeque::new();
        let mut moons = VecDeque::new();

        for id in &config.bodies {
            let Some(preset) = catalog.get(id) else {
                log::warn!("Unknown body identifier `{}`, skipping", id);
                continue;
            };
            let body = preset.instantiate(config.trail_length, config.calculations_per_trail)?;
            match body.kind {
                BodyKind::Star => stars.push_front(body),
                BodyKind::Planet => planets.push_front(body),
                BodyKind::Moon => moons.push_front(body),
            }
        }

        let bodies: Vec<Body> = stars.into_iter().chain(planets).chain(moons).collect();
        log::debug!(
            "Built simulation with {} bodies (dt = {} s, {} sub-steps per frame)",
            bodies.len(),
            config.dt,
            config.calculations_per_frame
        );

        Self::with_bodies(bodies, config.dt, config.calculations_per_frame)
    }

    /// Initializes a new simulation with the given bodies, in the given order.
    pub fn with_bodies(
        bodies: Vec<Body>,
        dt: f64,
        calculations_per_frame: usize,
    ) -> Result<Self, SimulationError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimulationError::InvalidTimestep(dt));
        }

        Ok(Self {
            dt,
            calculations_per_frame,
            bodies,
            ..Default::default()
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Elapsed simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn sub_steps(&self) -> u64 {
        self.sub_steps
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn bodies_of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |body| body.kind == kind)
    }

    /// Index of the first body whose display name matches, ignoring ASCII case.
    pub fn find_body(&self, name: &str) -> Option<usize> {
        self.bodies
            .iter()
            .position(|body| body.name.eq_ignore_ascii_case(name))
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn tracked(&self) -> Option<usize> {
        self.tracked
    }

    pub fn tracked_body(&self) -> Option<&Body> {
        self.tracked.and_then(|index| self.bodies.get(index))
    }

    /// Tracks the body at `index`, or nothing for `None`.
    /// An out-of-range index leaves tracking unchanged and returns false.
    pub fn set_tracked(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(index) if index >= self.bodies.len() => false,
            _ => {
                self.tracked = index;
                true
            }
        }
    }

    /// Advances the simulation by one driver frame.
    ///
    /// When running, performs `calculations_per_frame` sub-steps. The frame is
    /// all-or-nothing: if two bodies coincide in any sub-step, every body, the
    /// clock and the sub-step count are rolled back to the start of the frame,
    /// the simulation pauses and the error is returned.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        if !self.running {
            return Ok(());
        }

        // A single sub-step fails before integrating, so it needs no checkpoint.
        let checkpoint = (self.calculations_per_frame > 1)
            .then(|| (self.bodies.clone(), self.time, self.sub_steps));

        for _ in 0..self.calculations_per_frame {
            if let Err(err) = self.calculate() {
                if let Some((bodies, time, sub_steps)) = checkpoint {
                    self.bodies = bodies;
                    self.time = time;
                    self.sub_steps = sub_steps;
                }
                log::warn!("{}; pausing at {} sub-steps", err, self.sub_steps);
                self.running = false;
                return Err(err);
            }
        }
        Ok(())
    }

    /// One sub-step: accumulate every force, then integrate every body.
    fn calculate(&mut self) -> Result<(), SimulationError> {
        if let Err(err) = self.attract() {
            self.bodies.iter_mut().for_each(Body::clear_force);
            return Err(err);
        }
        self.iterate();
        self.time += self.dt;
        self.sub_steps += 1;
        Ok(())
    }

    /// Accumulates the force of every body on every other body, over all
    /// ordered pairs.
    fn attract(&mut self) -> Result<(), SimulationError> {
        let len = self.bodies.len();
        for i in 0..len {
            for j in 0..len {
                if i == j {
                    continue;
                }
                let (body, other) = pair_mut(&mut self.bodies, i, j);
                body.apply_force_from_body(other)?;
            }
        }
        Ok(())
    }

    /// Integrates every body with its accumulated force.
    fn iterate(&mut self) {
        let dt = self.dt;
        self.bodies.iter_mut().for_each(|body| body.update_position(dt));
    }

    /// Finds the body whose disc contains `point`, preferring the closest.
    ///
    /// `point` is in view coordinates: the viewport translation is removed
    /// and the tracked body's position added to get back to world space.
    pub fn find_nearest_body(&self, point: Vector) -> Option<&Body> {
        self.nearest_index(point).map(|index| &self.bodies[index])
    }

    /// Hit-tests `point` and tracks the body found. A miss changes nothing.
    pub fn select_nearest_body(&mut self, point: Vector) -> Option<usize> {
        let index = self.nearest_index(point)?;
        self.tracked = Some(index);
        Some(index)
    }

    pub fn nearest_index(&self, point: Vector) -> Option<usize> {
        let mut world = point - self.translation;
        if let Some(tracked) = self.tracked_body() {
            world += tracked.position;
        }

        let mut nearest: Option<(usize, f64)> = None;
        for (index, body) in self.bodies.iter().enumerate() {
            let distance_sq = (body.position - world).mag_sq();
            if distance_sq < body.radius * body.radius
                && nearest.is_none_or(|(_, best)| distance_sq < best)
            {
                nearest = Some((index, distance_sq));
            }
        }
        nearest.map(|(index, _)| index)
    }

    /// Display data for the body at `index`, relative to the tracked body.
    pub fn view(&self, index: usize) -> Option<BodyView<'_>> {
        let body = self.bodies.get(index)?;
        let reference = self.tracked_body();
        Some(BodyView {
            name: &body.name,
            kind: body.kind,
            color: &body.color,
            radius: body.radius,
            position: body.relative_position(reference),
            trail: body.relative_trail(reference).collect(),
        })
    }

    /// Display data for every body, in roster order.
    pub fn views(&self) -> impl Iterator<Item = BodyView<'_>> {
        (0..self.bodies.len()).filter_map(|index| self.view(index))
    }

    /// Sum of `mass · velocity` over all bodies.
    pub fn total_momentum(&self) -> Vector {
        self.bodies
            .iter()
            .fold(Vector::zero(), |sum, body| sum + body.velocity * body.mass())
    }
}

/// Mutable access to `bodies[i]` alongside shared access to `bodies[j]`, `i != j`.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}

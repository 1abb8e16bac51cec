use orrery::{Body, BodyKind, Simulation, SimulationConfig, Vector};

/// Two bodies with zero total momentum, nothing else around.
fn two_body(dt: f64) -> Simulation {
    let (m1, m2) = (5.972e24, 7.346e22);
    let v2 = Vector::new(0.0, 1.022e3);
    let v1 = v2 * (-m2 / m1);

    let earth = Body::new("Earth", BodyKind::Planet, Vector::zero(), v1, m1, 6.37e6).unwrap();
    let moon = Body::new("Moon", BodyKind::Moon, Vector::new(3.844e8, 0.0), v2, m2, 1.738e6).unwrap();
    Simulation::with_bodies(vec![earth, moon], dt, 10).unwrap()
}

#[test]
fn two_body_momentum_drift_is_bounded() {
    let mut sim = two_body(60.0);
    let initial = sim.total_momentum();
    let scale = sim.bodies()[1].mass() * sim.bodies()[1].velocity.mag();

    let frames = 1_000;
    for _ in 0..frames {
        sim.step().unwrap();
    }

    let steps = sim.sub_steps() as f64;
    assert_eq!(steps, 10_000.0);
    let drift = (sim.total_momentum() - initial).mag();
    assert!(
        drift <= 1e-12 * steps * scale,
        "momentum drifted by {drift:e} over {steps} steps"
    );
}

#[test]
fn two_body_orbit_stays_bound() {
    let mut sim = two_body(60.0);
    // about a quarter of a sidereal month
    for _ in 0..1_000 {
        sim.step().unwrap();
    }

    let separation = (sim.bodies()[1].position - sim.bodies()[0].position).mag();
    assert!(separation > 3.0e8 && separation < 4.5e8, "separation {separation:e}");
    assert!(sim.bodies()[1].position.y > 0.0);
}

#[test]
fn earth_circles_the_sun() {
    let mut sim = Simulation::new(&SimulationConfig {
        bodies: vec!["sun".into(), "earth".into()],
        ..Default::default()
    })
    .unwrap();
    let earth = sim.find_body("earth").unwrap();
    let start = sim.bodies()[earth].position;

    // half a year at one day per frame
    for _ in 0..183 {
        sim.step().unwrap();
    }

    let position = sim.bodies()[earth].position;
    assert!(position.x > 0.0, "Earth should be on the far side: {position:?}");
    let radius = position.mag();
    assert!((radius - start.mag()).abs() / start.mag() < 0.1);
}

#[test]
fn trail_respects_bounds_over_long_runs() {
    let config = SimulationConfig {
        trail_length: 8,
        calculations_per_trail: 3,
        calculations_per_frame: 5,
        bodies: vec!["sun".into(), "mars".into(), "phobos".into()],
        ..Default::default()
    };
    let mut sim = Simulation::new(&config).unwrap();

    for frame in 0..20 {
        sim.step().unwrap();
        let steps = (frame + 1) * config.calculations_per_frame;
        let expected = steps.div_ceil(config.calculations_per_trail).min(config.trail_length);
        for body in sim.bodies() {
            assert_eq!(body.trail().len(), expected, "{} after {} steps", body.name, steps);
        }
    }
}

#[test]
fn untracked_views_equal_zero_reference_views() {
    let mut sim = Simulation::new(&SimulationConfig {
        calculations_per_trail: 2,
        bodies: vec!["sun".into(), "earth".into(), "moon".into()],
        ..Default::default()
    })
    .unwrap();
    for _ in 0..3 {
        sim.step().unwrap();
    }

    let views: Vec<_> = sim.views().collect();

    let mut zero = Body::new("", BodyKind::Star, Vector::zero(), Vector::zero(), 1.0, 0.0)
        .unwrap()
        .with_trail(views[0].trail.len(), 1)
        .unwrap();
    for _ in 0..views[0].trail.len() {
        zero.update_position(1.0);
    }
    assert!(zero.trail().iter().all(|point| *point == Vector::zero()));

    for (view, body) in views.iter().zip(sim.bodies()) {
        assert_eq!(view.position, body.relative_position(Some(&zero)));
        let against_zero: Vec<_> = body.relative_trail(Some(&zero)).collect();
        assert_eq!(view.trail, against_zero);
    }
}

#[test]
fn tracking_recenters_views() {
    let mut sim = Simulation::new(&SimulationConfig {
        bodies: vec!["sun".into(), "earth".into(), "moon".into()],
        ..Default::default()
    })
    .unwrap();
    for _ in 0..5 {
        sim.step().unwrap();
    }

    let earth = sim.find_body("Earth").unwrap();
    sim.set_tracked(Some(earth));
    let views: Vec<_> = sim.views().collect();

    assert_eq!(views[earth].position, Vector::zero());
    assert!(views[earth].trail.iter().all(|point| *point == Vector::zero()));

    let moon = sim.find_body("The Moon (Earth)").unwrap();
    let distance = views[moon].position.mag();
    assert!(distance > 3.0e8 && distance < 5.0e8, "moon at {distance:e}");
}

use orrery::{Catalog, Simulation, SimulationConfig};

use anyhow::{Context, Result, bail};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Headless driver: runs a scenario for a number of frames and prints the
/// resulting display positions.
#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML (dt, trail and frame parameters, body roster).
    #[arg(short, long, default_value = "scenarios/solar_system.yaml")]
    scenario: PathBuf,

    /// Alternative preset catalog YAML. Defaults to the built-in solar system.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 365)]
    frames: usize,

    /// Display name of the body to center on.
    #[arg(short, long)]
    track: Option<String>,
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config: SimulationConfig = load_yaml(&args.scenario)?;
    let catalog = match &args.catalog {
        Some(path) => load_yaml(path)?,
        None => Catalog::solar_system(),
    };

    let mut sim = Simulation::with_catalog(&config, &catalog)?;
    log::info!(
        "Loaded {} bodies from {}",
        sim.bodies().len(),
        args.scenario.display()
    );

    if let Some(name) = &args.track {
        let Some(index) = sim.find_body(name) else {
            bail!("no body named `{}` in the roster", name);
        };
        sim.set_tracked(Some(index));
        log::info!("Tracking {}", sim.bodies()[index].name);
    }

    let initial_momentum = sim.total_momentum();
    for _ in 0..args.frames {
        sim.step()?;
    }

    let drift = (sim.total_momentum() - initial_momentum).mag();
    log::info!(
        "Simulated {:.2} days in {} sub-steps (momentum drift {:.3e} kg·m/s)",
        sim.time() / 86_400.0,
        sim.sub_steps(),
        drift
    );

    println!(
        "{:<20} {:>16} {:>16} {:>12} {:>12} {:>6}",
        "body", "x (m)", "y (m)", "radius", "color", "trail"
    );
    for view in sim.views() {
        println!(
            "{:<20} {:>16.6e} {:>16.6e} {:>12.4e} {:>12} {:>6}",
            view.name,
            view.position.x,
            view.position.y,
            view.radius,
            view.color,
            view.trail.len()
        );
    }

    Ok(())
}

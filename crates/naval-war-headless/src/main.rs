//! Headless Naval War runner.
//!
//! Builds a world from an optional JSON config, runs it at 60 Hz for a
//! fixed number of ticks and prints a JSON summary on stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```bash
//! # Default world, 10 seconds of game time
//! cargo run -p naval-war-headless
//!
//! # Custom config, both fleets sent ashore, volleys every second
//! cargo run -p naval-war-headless -- --config war.json --assault --volley-every 60
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use naval_war_core::{EntityId, Faction, SimConfig, Simulation, FIXED_DT};

#[derive(Parser)]
#[command(name = "naval-war-headless")]
#[command(about = "Runs a Naval War simulation without graphics")]
#[command(version)]
struct Cli {
    /// JSON config file; defaults apply to every omitted field
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for world generation and all in-game randomness
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of ticks to run
    #[arg(short, long, default_value = "600")]
    ticks: u64,

    /// Send every opening ship to the nearest enemy coast
    #[arg(long)]
    assault: bool,

    /// Every N ticks, every ship fires at the nearest enemy building
    #[arg(long)]
    volley_every: Option<u64>,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct FactionSummary {
    ships: usize,
    buildings: usize,
    armies: usize,
    resources: i64,
    army_pool: f64,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    elapsed_secs: f64,
    blue: FactionSummary,
    red: FactionSummary,
    projectiles_in_flight: usize,
    events: BTreeMap<&'static str, usize>,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn ships_of(sim: &Simulation, faction: Faction) -> Vec<EntityId> {
    sim.arena()
        .ships()
        .filter(|(_, s)| s.faction == faction)
        .map(|(id, _)| id)
        .collect()
}

/// Orders each fleet toward the enemy sector nearest its own centre.
#[allow(clippy::cast_precision_loss)]
fn order_assaults(sim: &mut Simulation) {
    for faction in Faction::ALL {
        let ships = ships_of(sim, faction);
        if ships.is_empty() {
            continue;
        }
        let centre = ships
            .iter()
            .filter_map(|&id| sim.arena().ship(id))
            .map(|s| s.position)
            .sum::<DVec2>()
            / ships.len() as f64;
        match sim.issue_assault_command(&ships, centre) {
            Some(sector) => {
                info!(%faction, ships = ships.len(), target = ?sector.center(), "assault ordered");
            }
            None => info!(%faction, "no enemy sector to assault"),
        }
    }
}

/// Every ship fires at the enemy building closest to it.
fn fire_volley(sim: &mut Simulation) {
    let orders: Vec<_> = sim
        .arena()
        .ships()
        .filter_map(|(id, ship)| {
            sim.arena()
                .buildings()
                .filter(|(_, b)| b.faction != ship.faction)
                .map(|(_, b)| b.position)
                .min_by(|a, b| {
                    a.distance_squared(ship.position)
                        .total_cmp(&b.distance_squared(ship.position))
                })
                .map(|target| (id, target))
        })
        .collect();

    let mut fired = 0;
    for (ship, target) in orders {
        fired += sim
            .issue_fire_command(&[ship], target)
            .iter()
            .filter(|r| r.is_ok())
            .count();
    }
    debug!(fired, tick = sim.tick(), "volley");
}

fn faction_summary(sim: &Simulation, faction: Faction) -> FactionSummary {
    let arena = sim.arena();
    let pools = sim.economy().faction(faction);
    FactionSummary {
        ships: arena.ships().filter(|(_, s)| s.faction == faction).count(),
        buildings: arena.buildings().filter(|(_, b)| b.faction == faction).count(),
        armies: arena.armies().filter(|(_, a)| a.faction == faction).count(),
        resources: pools.resources,
        army_pool: pools.army_pool,
    }
}

fn summarize(sim: &Simulation, seed: u64, events: BTreeMap<&'static str, usize>) -> RunSummary {
    RunSummary {
        seed,
        ticks: sim.tick(),
        elapsed_secs: sim.elapsed(),
        blue: faction_summary(sim, Faction::Blue),
        red: faction_summary(sim, Faction::Red),
        projectiles_in_flight: sim.arena().projectiles().count(),
        events,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;
    let mut sim = Simulation::new(config, cli.seed);
    info!(
        seed = cli.seed,
        ships = sim.arena().ships().count(),
        buildings = sim.arena().buildings().count(),
        sectors = sim.sectors().len(),
        "world ready"
    );

    if cli.assault {
        order_assaults(&mut sim);
    }

    let mut events = BTreeMap::new();
    for tick in 0..cli.ticks {
        if let Some(every) = cli.volley_every.filter(|n| *n > 0) {
            if tick % every == 0 {
                fire_volley(&mut sim);
            }
        }
        sim.step(FIXED_DT);
        for record in sim.drain_events() {
            *events.entry(record.event.kind()).or_insert(0) += 1;
        }
    }
    info!(ticks = sim.tick(), elapsed = sim.elapsed(), "run complete");

    let summary = summarize(&sim, cli.seed, events);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

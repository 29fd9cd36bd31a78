//! Test helper functions for setting up worlds and entities.
//!
//! [`TestWorld`] holds the same pieces a [`Simulation`] lends to its
//! resolvers, with public fields, so unit tests can drive a single resolver
//! or command and inspect the result directly.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::economy::Economy;
use crate::entity::{ArmyComponents, BuildingKind, EntityId, EntityInner};
use crate::event::{EventLog, EventRecord, SimEvent};
use crate::faction::Faction;
use crate::resolver::TickContext;
use crate::simulation::Simulation;
use crate::world_gen;

/// Seed used by every helper that needs one.
pub const TEST_SEED: u64 = 42;

// =============================================================================
// TestWorld
// =============================================================================

/// A blank world with default config and a seeded random source.
#[derive(Debug)]
pub struct TestWorld {
    pub arena: Arena,
    pub economy: Economy,
    pub events: EventLog,
    pub rng: ChaCha8Rng,
    pub config: SimConfig,
}

impl TestWorld {
    pub fn new() -> Self {
        let config = SimConfig::default();
        Self {
            arena: Arena::new(),
            economy: Economy::new(&config.economy),
            events: EventLog::new(),
            rng: ChaCha8Rng::seed_from_u64(TEST_SEED),
            config,
        }
    }

    /// Tick context without production.
    pub fn ctx(&mut self, dt: f64) -> TickContext<'_> {
        self.ctx_with(dt, false)
    }

    pub fn ctx_with(&mut self, dt: f64, production_due: bool) -> TickContext<'_> {
        TickContext {
            arena: &mut self.arena,
            economy: &mut self.economy,
            events: &mut self.events,
            rng: &mut self.rng,
            config: &self.config,
            dt,
            production_due,
        }
    }

    pub fn ship(&mut self, position: DVec2, faction: Faction) -> EntityId {
        world_gen::spawn_ship(&mut self.arena, &self.config, position, faction)
    }

    pub fn building(&mut self, position: DVec2, faction: Faction, kind: BuildingKind) -> EntityId {
        world_gen::spawn_building(&mut self.arena, &self.config, position, faction, kind)
    }

    pub fn army(&mut self, position: DVec2, faction: Faction) -> EntityId {
        self.arena.spawn(EntityInner::Army(ArmyComponents {
            position,
            faction,
            strength: self.config.fleet.army_strength,
        }))
    }
}

// =============================================================================
// Simulation helpers
// =============================================================================

/// A simulation with no ships or buildings and production on every tick.
pub fn empty_sim() -> Simulation {
    let mut config = SimConfig::default();
    config.production.interval_secs = 0.0;
    Simulation::empty(config, TEST_SEED)
}

/// Runs `ticks` fixed-rate steps.
pub fn run(sim: &mut Simulation, ticks: usize, dt: f64) {
    for _ in 0..ticks {
        sim.step(dt);
    }
}

/// Counts drained events matching `pred`.
pub fn count_events(events: &[EventRecord], pred: impl Fn(&SimEvent) -> bool) -> usize {
    events.iter().filter(|r| pred(&r.event)).count()
}

//! Simulation module with the fixed-order tick loop.
//!
//! The `Simulation` struct owns the whole world (arena, economy, coastal
//! sectors, camera, event log and random source) and advances it one frame
//! at a time:
//!
//! 1. **COMBAT**: flash timers decay, projectiles fly and impacts resolve
//! 2. **PRODUCTION**: buildings produce, when the production schedule is due
//! 3. **LANDING**: ships sail toward assault targets and put troops ashore
//! 4. **ARMY**: armies random-walk
//!
//! Player commands (fire, assault, selection, weapon choice) are applied
//! between ticks and recorded in the same event log as tick outcomes.
//!
//! # Determinism
//!
//! - Entities are iterated in ID order (via `BTreeMap`)
//! - All randomness comes from one injected random source, seeded ChaCha8 by
//!   default
//! - The production schedule depends only on the `current_time` passed in
//!
//! # Example
//!
//! ```
//! use naval_war_core::clock::FIXED_DT;
//! use naval_war_core::config::SimConfig;
//! use naval_war_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(SimConfig::default(), 42);
//! assert_eq!(sim.arena().ships().count(), 26);
//!
//! for _ in 0..10 {
//!     sim.step(FIXED_DT);
//! }
//!
//! assert_eq!(sim.tick(), 10);
//! ```

use std::fmt;

use glam::DVec2;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::arena::Arena;
use crate::camera::Camera;
use crate::clock::{ProductionSchedule, TickClock};
use crate::command::{self, AssaultOrder};
use crate::config::SimConfig;
use crate::economy::{Economy, FactionEconomy};
use crate::entity::{BuildingKind, Entity, EntityId};
use crate::error::FireError;
use crate::event::{EventLog, EventRecord, SimEvent};
use crate::faction::{Faction, FactionMask};
use crate::geometry::Rect;
use crate::resolver::{default_pipeline, Resolver, TickContext};
use crate::sector::{generate_coast_sectors, CoastSector};
use crate::selection::{self, Selection};
use crate::weapon::{WeaponId, WeaponSpec};
use crate::world_gen;

// =============================================================================
// HudSnapshot
// =============================================================================

/// Everything the text overlay shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    /// BLUE pools.
    pub blue: FactionEconomy,
    /// RED pools.
    pub red: FactionEconomy,
    /// Weapon equipped by the inspected ship, if one was given and is alive.
    pub active_weapon: Option<&'static WeaponSpec>,
}

// =============================================================================
// Simulation
// =============================================================================

/// The world and its tick loop.
///
/// Construct with [`Simulation::new`] for a generated opening position, or
/// [`Simulation::empty`] for a blank map with only the coastal sectors laid
/// out.
pub struct Simulation {
    config: SimConfig,
    arena: Arena,
    economy: Economy,
    sectors: Vec<CoastSector>,
    camera: Camera,
    events: EventLog,
    resolvers: Vec<Box<dyn Resolver>>,
    rng: Box<dyn RngCore + Send>,
    clock: TickClock,
    production: ProductionSchedule,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.arena.current_tick())
            .field("elapsed", &self.clock.elapsed())
            .field("entities", &self.arena.entity_count())
            .field("sectors", &self.sectors.len())
            .field("economy", &self.economy)
            .field("camera", &self.camera)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates the opening position from `config`, seeding ChaCha8 with
    /// `seed`.
    ///
    /// `config` is used as given. Values that fail
    /// [`SimConfig::validate`] are logged and then tolerated: probabilities
    /// are clamped and inverted zoom bounds settle on `max_zoom`.
    #[must_use]
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates the opening position drawing all randomness from `rng`.
    #[must_use]
    pub fn with_rng<R>(config: SimConfig, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        let mut sim = Self::blank(config, Box::new(rng));
        sim.sectors = world_gen::populate(&mut sim.arena, &sim.config, &mut *sim.rng);
        sim
    }

    /// Creates a map with coastal sectors but no ships or buildings.
    #[must_use]
    pub fn empty(config: SimConfig, seed: u64) -> Self {
        let mut sim = Self::blank(config, Box::new(ChaCha8Rng::seed_from_u64(seed)));
        sim.sectors = generate_coast_sectors(&sim.config.world, &sim.config.generation);
        sim
    }

    fn blank(config: SimConfig, rng: Box<dyn RngCore + Send>) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "simulation built from an invalid config");
        }
        Self {
            arena: Arena::new(),
            economy: Economy::new(&config.economy),
            sectors: Vec::new(),
            camera: Camera::new(&config.camera, config.world.size()),
            events: EventLog::new(),
            resolvers: default_pipeline(),
            rng,
            clock: TickClock::default(),
            production: ProductionSchedule::new(config.production.interval_secs),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Tick loop
    // -------------------------------------------------------------------------

    /// Advances the world by `dt` seconds.
    ///
    /// `current_time` is the caller's game clock in seconds and only decides
    /// whether buildings produce this tick. Resolvers run in pipeline order,
    /// then the arena tick counter advances.
    pub fn advance_tick(&mut self, dt: f64, current_time: f64) {
        let production_due = self.production.poll(current_time);
        let tick = self.arena.current_tick();
        trace!(tick, dt, production_due, "tick start");

        let mut ctx = TickContext {
            arena: &mut self.arena,
            economy: &mut self.economy,
            events: &mut self.events,
            rng: &mut *self.rng,
            config: &self.config,
            dt,
            production_due,
        };
        for resolver in &self.resolvers {
            trace!(tick, resolver = resolver.name(), "resolve");
            resolver.resolve(&mut ctx);
        }

        self.arena.advance_tick();
    }

    /// Advances the internal clock by `dt` and runs one tick at the new time.
    pub fn step(&mut self, dt: f64) {
        let now = self.clock.advance(dt);
        self.advance_tick(dt, now);
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Orders every listed ship to fire its equipped weapon at `target`.
    ///
    /// Ships fire in list order, each paid for by its own faction, so a pool
    /// that covers only some shots fires those and refuses the rest. Each
    /// outcome is also recorded as a `WeaponFired` or `FireRejected` event.
    pub fn issue_fire_command(
        &mut self,
        ships: &[EntityId],
        target: DVec2,
    ) -> Vec<Result<EntityId, FireError>> {
        let tick = self.arena.current_tick();
        ships
            .iter()
            .map(|&ship| {
                let result = command::fire(
                    &mut self.arena,
                    &mut self.economy,
                    &self.config.combat,
                    ship,
                    target,
                );
                let event = match &result {
                    Ok(projectile) => self
                        .arena
                        .get(*projectile)
                        .and_then(Entity::as_projectile)
                        .map(|p| SimEvent::WeaponFired {
                            ship,
                            projectile: *projectile,
                            weapon: p.weapon,
                            faction: p.faction,
                            target,
                        }),
                    Err(error) => Some(SimEvent::FireRejected {
                        ship,
                        error: error.clone(),
                    }),
                };
                if let Some(event) = event {
                    self.events.push(tick, event);
                }
                result
            })
            .collect()
    }

    /// Sends the listed ships to the enemy coastal sector nearest `point`.
    ///
    /// Returns the chosen sector, or `None` when no order was given.
    pub fn issue_assault_command(&mut self, ships: &[EntityId], point: DVec2) -> Option<Rect> {
        let AssaultOrder {
            faction,
            sector,
            ships,
        } = command::order_assault(&mut self.arena, &self.sectors, ships, point)?;
        let tick = self.arena.current_tick();
        self.events.push(
            tick,
            SimEvent::AssaultOrdered {
                faction,
                ships,
                sector,
            },
        );
        Some(sector)
    }

    /// Replaces the selection with whatever the simulation camera shows under
    /// `screen_point`.
    pub fn select_entities_at(
        &mut self,
        screen_point: DVec2,
        radius_px: f64,
        factions: FactionMask,
    ) -> Selection {
        selection::select_entities_at(
            &mut self.arena,
            &self.camera,
            screen_point,
            radius_px,
            factions,
        )
    }

    /// Equips `weapon` on every listed ship; returns how many changed.
    pub fn select_weapon(&mut self, ships: &[EntityId], weapon: WeaponId) -> usize {
        let changed = command::select_weapon(&mut self.arena, ships, weapon);
        debug!(changed, %weapon, "weapon selected");
        changed
    }

    /// Spawns a ship with the configured troops and default weapon.
    pub fn spawn_ship(&mut self, position: DVec2, faction: Faction) -> EntityId {
        world_gen::spawn_ship(&mut self.arena, &self.config, position, faction)
    }

    /// Spawns a full-health building.
    pub fn spawn_building(
        &mut self,
        position: DVec2,
        faction: Faction,
        kind: BuildingKind,
    ) -> EntityId {
        world_gen::spawn_building(&mut self.arena, &self.config, position, faction, kind)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Both economies plus the weapon of `ship`, if given.
    #[must_use]
    pub fn hud(&self, ship: Option<EntityId>) -> HudSnapshot {
        HudSnapshot {
            blue: self.economy.faction(Faction::Blue).clone(),
            red: self.economy.faction(Faction::Red).clone(),
            active_weapon: ship
                .and_then(|id| self.arena.ship(id))
                .map(|s| s.weapon.spec()),
        }
    }

    /// Removes and returns every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.events.drain()
    }

    /// Read-only access to all entities.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to all entities, for scenario setup.
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Faction pools.
    #[must_use]
    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    /// Mutable faction pools, for scenario setup.
    #[must_use]
    pub fn economy_mut(&mut self) -> &mut Economy {
        &mut self.economy
    }

    /// Coastal landing sectors.
    #[must_use]
    pub fn sectors(&self) -> &[CoastSector] {
        &self.sectors
    }

    /// The simulation camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The simulation camera, for pan, zoom and resize.
    #[must_use]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.arena.current_tick()
    }

    /// Game time accumulated by [`Simulation::step`].
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Number of resolvers in the pipeline.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}

// =============================================================================
// Tests
// =============================================================================

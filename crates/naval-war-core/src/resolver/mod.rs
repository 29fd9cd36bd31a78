//! Resolver module: the per-tick update phases.
//!
//! Each resolver owns one phase of [`Simulation::advance_tick`] and mutates
//! the world through a [`TickContext`]. The simulation runs them in a fixed
//! order:
//!
//! 1. [`CombatResolver`]: flash timers, projectile flight and impacts
//! 2. [`ProductionResolver`]: building output, when production is due
//! 3. [`LandingResolver`]: ship movement toward assault targets and landings
//! 4. [`ArmyResolver`]: army random walk
//!
//! # Invariants
//!
//! - Resolvers MUST be deterministic given the same world and random source
//! - Resolvers MUST iterate entities in creation order
//! - Resolvers MUST NOT despawn while iterating; collect IDs first
//!
//! [`Simulation::advance_tick`]: crate::simulation::Simulation::advance_tick

mod army;
mod combat;
mod landing;
mod production;

pub use army::ArmyResolver;
pub use combat::{resolve_impact, CombatResolver};
pub use landing::LandingResolver;
pub use production::ProductionResolver;

use std::fmt;

use rand::{Rng, RngCore};

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::economy::Economy;
use crate::event::{EventLog, SimEvent};

/// Mutable view of the world handed to each resolver for one tick.
pub struct TickContext<'a> {
    /// All entities.
    pub arena: &'a mut Arena,
    /// Faction pools.
    pub economy: &'a mut Economy,
    /// Event sink.
    pub events: &'a mut EventLog,
    /// Random source; the only one the simulation uses.
    pub rng: &'a mut dyn RngCore,
    /// Active configuration.
    pub config: &'a SimConfig,
    /// Seconds elapsed this tick.
    pub dt: f64,
    /// Whether buildings produce this tick.
    pub production_due: bool,
}

impl TickContext<'_> {
    /// Records `event` stamped with the current arena tick.
    pub fn record(&mut self, event: SimEvent) {
        self.events.push(self.arena.current_tick(), event);
    }
}

impl fmt::Debug for TickContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickContext")
            .field("tick", &self.arena.current_tick())
            .field("dt", &self.dt)
            .field("production_due", &self.production_due)
            .finish_non_exhaustive()
    }
}

/// Bernoulli trial with `probability` clamped to `[0, 1]`.
///
/// A NaN probability never succeeds.
pub(crate) fn chance(rng: &mut dyn RngCore, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// One phase of the tick loop.
///
/// # Example
///
/// ```
/// use naval_war_core::resolver::{Resolver, TickContext};
///
/// #[derive(Debug)]
/// struct Noop;
///
/// impl Resolver for Noop {
///     fn name(&self) -> &'static str {
///         "noop"
///     }
///
///     fn resolve(&self, _ctx: &mut TickContext<'_>) {}
/// }
/// ```
pub trait Resolver: fmt::Debug + Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Applies this phase to the world.
    fn resolve(&self, ctx: &mut TickContext<'_>);
}

/// The resolvers in tick order.
#[must_use]
pub fn default_pipeline() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(CombatResolver),
        Box::new(ProductionResolver),
        Box::new(LandingResolver),
        Box::new(ArmyResolver),
    ]
}

//! # Naval War Core
//!
//! Simulation and combat engine for Naval War, a two-faction naval strategy
//! game played on a 40000 x 20000 km ocean map.
//!
//! This crate owns the rules: ships, long-range weapons, projectiles,
//! buildings and their production, coastal assaults, ground armies and the
//! camera transform between world kilometres and viewport pixels. Windowing,
//! input capture and drawing live outside and only talk to the
//! [`Simulation`] API.
//!
//! ## Architecture
//!
//! - **Entities**: ships, buildings, projectiles, armies in one [`Arena`]
//! - **Resolvers**: combat, production, landing, army walk, run per tick in
//!   fixed order
//! - **Commands**: fire, assault, selection, weapon choice between ticks
//! - **Events**: every observable outcome lands in a drainable log
//!
//! ## Usage
//!
//! ```
//! use glam::DVec2;
//! use naval_war_core::{Faction, SimConfig, Simulation, FIXED_DT};
//!
//! let mut sim = Simulation::empty(SimConfig::default(), 7);
//! let ship = sim.spawn_ship(DVec2::new(9_000.0, 9_000.0), Faction::Blue);
//!
//! let results = sim.issue_fire_command(&[ship], DVec2::new(9_100.0, 9_000.0));
//! assert!(results[0].is_ok());
//!
//! sim.step(FIXED_DT);
//! assert_eq!(sim.tick(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod camera;
pub mod clock;
pub mod command;
pub mod config;
pub mod economy;
pub mod entity;
pub mod error;
pub mod event;
pub mod faction;
pub mod geometry;
pub mod resolver;
pub mod sector;
pub mod selection;
pub mod simulation;
pub mod weapon;
pub mod world_gen;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use camera::Camera;
pub use clock::FIXED_DT;
pub use config::SimConfig;
pub use economy::{Economy, FactionEconomy};
pub use entity::{BuildingKind, EntityId, EntityTag};
pub use error::{ConfigError, EconomyError, FireError};
pub use event::{EventRecord, SimEvent};
pub use faction::{Faction, FactionMask};
pub use geometry::Rect;
pub use selection::Selection;
pub use simulation::{HudSnapshot, Simulation};
pub use weapon::{WeaponId, WeaponSpec, WEAPONS};

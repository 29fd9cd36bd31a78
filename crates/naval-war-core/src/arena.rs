//! Arena module for the naval war simulation.
//!
//! The Arena is the container for all entities. It provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn/despawn)
//! - Typed iteration over ships, buildings, projectiles and armies
//! - Simulation tick tracking
//!
//! # Architecture
//!
//! Entities are stored in a `BTreeMap` keyed by [`EntityId`]. IDs are assigned
//! monotonically and never reused, so iteration order is creation order. Every
//! "first in iteration order" rule in the simulation (impact resolution,
//! building hit-tests, sector ties) relies on this.
//!
//! Resolvers never despawn while iterating. They collect IDs first and
//! remove afterwards.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use naval_war_core::arena::Arena;
//! use naval_war_core::entity::{EntityInner, ArmyComponents};
//! use naval_war_core::faction::Faction;
//!
//! let mut arena = Arena::new();
//! let army = arena.spawn(EntityInner::Army(ArmyComponents {
//!     position: DVec2::new(100.0, 200.0),
//!     faction: Faction::Blue,
//!     strength: 400,
//! }));
//!
//! assert_eq!(arena.armies().count(), 1);
//! assert!(arena.get(army).unwrap().is_army());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{
    ArmyComponents, BuildingComponents, Entity, EntityId, EntityInner, EntityTag,
    ProjectileComponents, ShipComponents,
};

// =============================================================================
// Arena
// =============================================================================

/// Container of all simulation entities.
///
/// # Determinism
///
/// The Arena uses `BTreeMap` for entity storage so iterating over entities
/// always produces the same sequence for the same history of spawns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Current simulation tick.
    tick: u64,
}

impl Arena {
    /// Creates a new empty arena at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity and returns its ID.
    ///
    /// The tag is derived from `inner`.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(id, inner));
        id
    }

    /// Removes an entity, returning it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Returns a reference to an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by ID.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns an iterator over entities in creation order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in creation order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Collects the IDs of every entity with `tag`, in creation order.
    #[must_use]
    pub fn ids_with_tag(&self, tag: EntityTag) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.tag() == tag)
            .map(Entity::id)
            .collect()
    }

    /// Iterates over ships in creation order.
    pub fn ships(&self) -> impl Iterator<Item = (EntityId, &ShipComponents)> + '_ {
        self.entities
            .values()
            .filter_map(|e| e.as_ship().map(|c| (e.id(), c)))
    }

    /// Iterates over buildings in creation order.
    pub fn buildings(&self) -> impl Iterator<Item = (EntityId, &BuildingComponents)> + '_ {
        self.entities
            .values()
            .filter_map(|e| e.as_building().map(|c| (e.id(), c)))
    }

    /// Iterates over projectiles in creation order.
    pub fn projectiles(&self) -> impl Iterator<Item = (EntityId, &ProjectileComponents)> + '_ {
        self.entities
            .values()
            .filter_map(|e| e.as_projectile().map(|c| (e.id(), c)))
    }

    /// Iterates over armies in creation order.
    pub fn armies(&self) -> impl Iterator<Item = (EntityId, &ArmyComponents)> + '_ {
        self.entities
            .values()
            .filter_map(|e| e.as_army().map(|c| (e.id(), c)))
    }

    /// Returns the ship components of `id`, if it is a live ship.
    #[must_use]
    pub fn ship(&self, id: EntityId) -> Option<&ShipComponents> {
        self.get(id).and_then(Entity::as_ship)
    }

    /// Returns mutable ship components of `id`, if it is a live ship.
    #[must_use]
    pub fn ship_mut(&mut self, id: EntityId) -> Option<&mut ShipComponents> {
        self.get_mut(id).and_then(Entity::as_ship_mut)
    }

    /// Returns the building components of `id`, if it is a live building.
    #[must_use]
    pub fn building(&self, id: EntityId) -> Option<&BuildingComponents> {
        self.get(id).and_then(Entity::as_building)
    }

    /// Returns mutable building components of `id`, if it is a live building.
    #[must_use]
    pub fn building_mut(&mut self, id: EntityId) -> Option<&mut BuildingComponents> {
        self.get_mut(id).and_then(Entity::as_building_mut)
    }

    /// Returns the number of entities in the arena.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of entities with `tag`.
    #[must_use]
    pub fn count(&self, tag: EntityTag) -> usize {
        self.entities.values().filter(|e| e.tag() == tag).count()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the current simulation tick.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the simulation tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Entity model for the naval war simulation.
//!
//! This module provides the core entity types:
//! - [`EntityId`]: Unique identifier for entities
//! - [`EntityTag`]: Type classification used for filtering and draw order
//! - [`EntityInner`]: Type-safe storage for entity-specific components
//! - [`Entity`]: The complete entity container
//!
//! # Architecture
//!
//! Every entity lives in the [`Arena`](crate::arena::Arena). The tag is
//! derived from the inner variant when the entity is spawned, so the two can
//! never disagree. Component structs are concrete (see [`components`]), which
//! keeps resolvers free of runtime type checks beyond a single `match`.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use naval_war_core::entity::{Entity, EntityId, EntityInner, EntityTag};
//! use naval_war_core::entity::components::ShipComponents;
//! use naval_war_core::faction::Faction;
//! use naval_war_core::weapon::WeaponId;
//!
//! let ship = Entity::new(
//!     EntityId::new(42),
//!     EntityInner::Ship(ShipComponents::new(DVec2::ZERO, Faction::Blue, 800, WeaponId::default())),
//! );
//!
//! assert_eq!(ship.id().as_u64(), 42);
//! assert_eq!(ship.tag(), EntityTag::Ship);
//! ```

pub mod components;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::faction::Faction;

pub use components::{
    ArmyComponents, BuildingComponents, BuildingKind, ProductionKind, ProjectileComponents,
    ShipComponents, StatusFlags,
};

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. IDs are assigned
/// monotonically by the arena and never reused, so ordering by ID is
/// ordering by creation.
///
/// # Example
///
/// ```
/// use naval_war_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Entity type tag.
///
/// Variants are declared in draw order: a presentation layer that sorts by
/// tag paints buildings first and ships last.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// Shore installation that produces for its faction.
    Building,
    /// Ground force put ashore by a ship.
    Army,
    /// Weapon in flight.
    Projectile,
    /// Naval vessel.
    Ship,
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "Building"),
            Self::Army => write!(f, "Army"),
            Self::Projectile => write!(f, "Projectile"),
            Self::Ship => write!(f, "Ship"),
        }
    }
}

/// Type-safe storage for entity-specific components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Ship components.
    Ship(ShipComponents),
    /// Building components.
    Building(BuildingComponents),
    /// Projectile components.
    Projectile(ProjectileComponents),
    /// Army components.
    Army(ArmyComponents),
}

impl EntityInner {
    /// Returns the corresponding `EntityTag` for this inner storage.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Ship(_) => EntityTag::Ship,
            Self::Building(_) => EntityTag::Building,
            Self::Projectile(_) => EntityTag::Projectile,
            Self::Army(_) => EntityTag::Army,
        }
    }

    /// Position in world km.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        match self {
            Self::Ship(c) => c.position,
            Self::Building(c) => c.position,
            Self::Projectile(c) => c.position,
            Self::Army(c) => c.position,
        }
    }

    /// Owning faction. For projectiles this is the faction that fired.
    #[must_use]
    pub const fn faction(&self) -> Faction {
        match self {
            Self::Ship(c) => c.faction,
            Self::Building(c) => c.faction,
            Self::Projectile(c) => c.faction,
            Self::Army(c) => c.faction,
        }
    }

    /// Returns a reference to the ship components, if this is a ship.
    #[must_use]
    pub const fn as_ship(&self) -> Option<&ShipComponents> {
        match self {
            Self::Ship(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the ship components, if this is a ship.
    #[must_use]
    pub fn as_ship_mut(&mut self) -> Option<&mut ShipComponents> {
        match self {
            Self::Ship(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a reference to the building components, if this is a building.
    #[must_use]
    pub const fn as_building(&self) -> Option<&BuildingComponents> {
        match self {
            Self::Building(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the building components, if this is a building.
    #[must_use]
    pub fn as_building_mut(&mut self) -> Option<&mut BuildingComponents> {
        match self {
            Self::Building(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a reference to the projectile components, if this is a projectile.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileComponents> {
        match self {
            Self::Projectile(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the projectile components, if this is a projectile.
    #[must_use]
    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileComponents> {
        match self {
            Self::Projectile(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a reference to the army components, if this is an army.
    #[must_use]
    pub const fn as_army(&self) -> Option<&ArmyComponents> {
        match self {
            Self::Army(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the army components, if this is an army.
    #[must_use]
    pub fn as_army_mut(&mut self) -> Option<&mut ArmyComponents> {
        match self {
            Self::Army(components) => Some(components),
            _ => None,
        }
    }
}

/// A complete entity in the simulation.
///
/// # Invariants
///
/// - The `EntityId` is unique within an arena
/// - The `EntityTag` matches the `EntityInner` variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    inner: EntityInner,
}

impl Entity {
    /// Creates a new entity; the tag is taken from `inner`.
    #[must_use]
    pub const fn new(id: EntityId, inner: EntityInner) -> Self {
        Self {
            id,
            tag: inner.tag(),
            inner,
        }
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's type tag.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Position in world km.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.inner.position()
    }

    /// Owning faction.
    #[must_use]
    pub const fn faction(&self) -> Faction {
        self.inner.faction()
    }

    /// Returns `true` if this entity is a ship.
    #[must_use]
    pub const fn is_ship(&self) -> bool {
        matches!(self.tag, EntityTag::Ship)
    }

    /// Returns `true` if this entity is a building.
    #[must_use]
    pub const fn is_building(&self) -> bool {
        matches!(self.tag, EntityTag::Building)
    }

    /// Returns `true` if this entity is a projectile.
    #[must_use]
    pub const fn is_projectile(&self) -> bool {
        matches!(self.tag, EntityTag::Projectile)
    }

    /// Returns `true` if this entity is an army.
    #[must_use]
    pub const fn is_army(&self) -> bool {
        matches!(self.tag, EntityTag::Army)
    }

    /// Returns the ship components if this is a ship, `None` otherwise.
    #[must_use]
    pub const fn as_ship(&self) -> Option<&ShipComponents> {
        self.inner.as_ship()
    }

    /// Returns mutable ship components if this is a ship, `None` otherwise.
    #[must_use]
    pub fn as_ship_mut(&mut self) -> Option<&mut ShipComponents> {
        self.inner.as_ship_mut()
    }

    /// Returns the building components if this is a building, `None` otherwise.
    #[must_use]
    pub const fn as_building(&self) -> Option<&BuildingComponents> {
        self.inner.as_building()
    }

    /// Returns mutable building components if this is a building, `None` otherwise.
    #[must_use]
    pub fn as_building_mut(&mut self) -> Option<&mut BuildingComponents> {
        self.inner.as_building_mut()
    }

    /// Returns the projectile components if this is a projectile, `None` otherwise.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileComponents> {
        self.inner.as_projectile()
    }

    /// Returns mutable projectile components if this is a projectile, `None` otherwise.
    #[must_use]
    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileComponents> {
        self.inner.as_projectile_mut()
    }

    /// Returns the army components if this is an army, `None` otherwise.
    #[must_use]
    pub const fn as_army(&self) -> Option<&ArmyComponents> {
        self.inner.as_army()
    }

    /// Returns mutable army components if this is an army, `None` otherwise.
    #[must_use]
    pub fn as_army_mut(&mut self) -> Option<&mut ArmyComponents> {
        self.inner.as_army_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::WeaponId;

    fn ship_inner() -> EntityInner {
        EntityInner::Ship(ShipComponents::new(
            DVec2::new(10.0, 20.0),
            Faction::Red,
            600,
            WeaponId::default(),
        ))
    }

    fn army_inner() -> EntityInner {
        EntityInner::Army(ArmyComponents {
            position: DVec2::new(5.0, 5.0),
            faction: Faction::Blue,
            strength: 400,
        })
    }

    mod entity_id_tests {
        use super::*;

        #[test]
        fn ordering() {
            let mut ids = vec![EntityId::new(3), EntityId::new(1), EntityId::new(2)];
            ids.sort();
            assert_eq!(ids, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
        }

        #[test]
        fn debug_and_display_format() {
            let id = EntityId::new(42);
            assert_eq!(format!("{id:?}"), "EntityId(42)");
            assert_eq!(format!("{id}"), "42");
        }

        #[test]
        fn u64_conversions() {
            let id: EntityId = 42u64.into();
            let value: u64 = id.into();
            assert_eq!(value, 42);
        }

        #[test]
        fn serialization_roundtrip() {
            let id = EntityId::new(12345);
            let json = serde_json::to_string(&id).unwrap();
            let deserialized: EntityId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, deserialized);
        }
    }

    mod entity_tag_tests {
        use super::*;

        #[test]
        fn declared_in_draw_order() {
            assert!(EntityTag::Building < EntityTag::Army);
            assert!(EntityTag::Army < EntityTag::Projectile);
            assert!(EntityTag::Projectile < EntityTag::Ship);
        }

        #[test]
        fn display_format() {
            assert_eq!(EntityTag::Ship.to_string(), "Ship");
            assert_eq!(EntityTag::Building.to_string(), "Building");
            assert_eq!(EntityTag::Projectile.to_string(), "Projectile");
            assert_eq!(EntityTag::Army.to_string(), "Army");
        }
    }

    mod entity_inner_tests {
        use super::*;

        #[test]
        fn tag_matches_variant() {
            assert_eq!(ship_inner().tag(), EntityTag::Ship);
            assert_eq!(army_inner().tag(), EntityTag::Army);
        }

        #[test]
        fn shared_accessors() {
            let inner = ship_inner();
            assert_eq!(inner.position(), DVec2::new(10.0, 20.0));
            assert_eq!(inner.faction(), Faction::Red);
        }

        #[test]
        fn as_accessors() {
            let mut ship = ship_inner();
            assert!(ship.as_ship().is_some());
            assert!(ship.as_ship_mut().is_some());
            assert!(ship.as_building().is_none());
            assert!(ship.as_projectile().is_none());
            assert!(ship.as_army().is_none());

            let mut army = army_inner();
            assert!(army.as_army_mut().is_some());
            assert!(army.as_ship().is_none());
        }
    }

    mod entity_tests {
        use super::*;

        #[test]
        fn new_derives_tag_from_inner() {
            let entity = Entity::new(EntityId::new(1), army_inner());
            assert_eq!(entity.tag(), EntityTag::Army);
            assert!(entity.is_army());
            assert!(!entity.is_ship());
        }

        #[test]
        fn delegating_accessors() {
            let mut entity = Entity::new(EntityId::new(7), ship_inner());
            assert_eq!(entity.faction(), Faction::Red);
            entity.as_ship_mut().unwrap().position = DVec2::new(1.0, 2.0);
            assert_eq!(entity.position(), DVec2::new(1.0, 2.0));
            assert!(entity.as_building().is_none());
        }

        #[test]
        fn serialization_roundtrip() {
            let entity = Entity::new(EntityId::new(42), ship_inner());
            let json = serde_json::to_string(&entity).unwrap();
            let deserialized: Entity = serde_json::from_str(&json).unwrap();
            assert_eq!(entity, deserialized);
        }
    }
}

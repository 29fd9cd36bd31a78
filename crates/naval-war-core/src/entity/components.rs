//! Component structs for each entity type.
//!
//! Each struct holds all state of one entity kind. Behaviour that touches
//! only a single entity lives here as methods (`damage`, `advance`); anything
//! that spans entities or the economy lives in the resolvers.

use bitflags::bitflags;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{BuildingSpec, CombatConfig};
use crate::faction::Faction;
use crate::geometry::Rect;
use crate::weapon::WeaponId;

bitflags! {
    /// Per-entity status bits.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        /// Currently selected by the player.
        const SELECTED = 0b0000_0001;
    }
}

// =============================================================================
// Ship
// =============================================================================

/// Components for Ship entities.
///
/// Ships carry troops and a single equipped weapon. They are never
/// destroyed; an assault target makes them sail toward a coastal sector and
/// put their troops ashore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipComponents {
    /// Position in world km.
    pub position: DVec2,
    /// Owning faction.
    pub faction: Faction,
    /// Status bits.
    pub flags: StatusFlags,
    /// Sector the ship is sailing to, if any.
    pub assault_target: Option<Rect>,
    /// Troops aboard.
    pub troops: u32,
    /// Equipped weapon.
    pub weapon: WeaponId,
}

impl ShipComponents {
    /// Creates an idle, unselected ship.
    #[must_use]
    pub fn new(position: DVec2, faction: Faction, troops: u32, weapon: WeaponId) -> Self {
        Self {
            position,
            faction,
            flags: StatusFlags::empty(),
            assault_target: None,
            troops,
            weapon,
        }
    }

    /// Returns `true` if the ship is selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.flags.contains(StatusFlags::SELECTED)
    }
}

// =============================================================================
// Building
// =============================================================================

/// Kind of building.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Resource mine.
    Resource,
    /// Naval shipyard.
    Shipyard,
    /// Weapons factory.
    Factory,
    /// Military base.
    Base,
}

impl BuildingKind {
    /// Every kind, in the order world generation draws from.
    pub const ALL: [Self; 4] = [Self::Resource, Self::Shipyard, Self::Factory, Self::Base];
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Shipyard => write!(f, "shipyard"),
            Self::Factory => write!(f, "factory"),
            Self::Base => write!(f, "base"),
        }
    }
}

/// What a building adds to its faction each production tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionKind {
    /// Adds `rate` to resources.
    Resources,
    /// Launches a ship with probability `rate`.
    Ships,
    /// Adds `rate * 100` to resources.
    Weapons,
    /// Adds `rate` to the army pool.
    Army,
}

/// Components for Building entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingComponents {
    /// Centre of the footprint in world km.
    pub position: DVec2,
    /// Owning faction.
    pub faction: Faction,
    /// Building kind.
    pub kind: BuildingKind,
    /// Production type.
    pub production: ProductionKind,
    /// Production rate; see [`ProductionKind`].
    pub rate: f64,
    /// Current hit points. Always positive while the building exists.
    pub hp: f64,
    /// Hit points when built.
    pub max_hp: f64,
    /// Status bits.
    pub flags: StatusFlags,
    /// Ticks of hit flash remaining.
    pub flash_ticks: u32,
    /// Footprint used for hit-tests and impacts.
    pub footprint: Rect,
}

impl BuildingComponents {
    /// Builds a full-health building of `kind` centred on `position`.
    #[must_use]
    pub fn new(
        position: DVec2,
        faction: Faction,
        kind: BuildingKind,
        spec: &BuildingSpec,
        footprint_size: DVec2,
    ) -> Self {
        Self {
            position,
            faction,
            kind,
            production: spec.production,
            rate: spec.rate,
            hp: spec.max_hp,
            max_hp: spec.max_hp,
            flags: StatusFlags::empty(),
            flash_ticks: 0,
            footprint: Rect::from_center(position, footprint_size),
        }
    }

    /// Returns `true` if `point` lies within the footprint.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        self.footprint.contains(point)
    }

    /// Applies a warhead of `power_kg` and starts the hit flash.
    ///
    /// Returns `true` when hit points dropped to zero or below; the caller
    /// must then remove the building.
    pub fn damage(&mut self, power_kg: f64, combat: &CombatConfig) -> bool {
        self.hp -= power_kg / combat.damage_divisor;
        self.flash_ticks = combat.flash_ticks;
        self.hp <= 0.0
    }

    /// Counts the hit flash down by one tick.
    pub fn decay_flash(&mut self) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }

    /// Returns `true` if the building is selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.flags.contains(StatusFlags::SELECTED)
    }
}

// =============================================================================
// Projectile
// =============================================================================

/// Components for Projectile entities.
///
/// A projectile flies from `origin` toward `target` over `duration` seconds.
/// `progress` is the elapsed fraction of the flight in `[0, 1)`; once it
/// reaches 1 the projectile impacts and is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileComponents {
    /// Launch point.
    pub origin: DVec2,
    /// Aim point.
    pub target: DVec2,
    /// Current position.
    pub position: DVec2,
    /// Weapon fired.
    pub weapon: WeaponId,
    /// Faction that paid for the shot.
    pub faction: Faction,
    /// Elapsed flight fraction.
    pub progress: f64,
    /// Total flight time in seconds.
    pub duration: f64,
}

impl ProjectileComponents {
    /// Creates a projectile at `origin` aimed at `target`.
    #[must_use]
    pub fn launch(
        origin: DVec2,
        target: DVec2,
        weapon: WeaponId,
        faction: Faction,
        combat: &CombatConfig,
    ) -> Self {
        let distance = origin.distance(target);
        Self {
            origin,
            target,
            position: origin,
            weapon,
            faction,
            progress: 0.0,
            duration: (distance / combat.flight_km_per_sec).max(combat.min_flight_secs),
        }
    }

    /// Advances the flight by `dt` seconds.
    ///
    /// Returns `true` when the projectile has arrived; its position is then
    /// left untouched. Otherwise the position eases toward the target, x
    /// along `t^exponent` and y linearly plus a parabolic lob, both measured
    /// from the current position rather than the origin.
    pub fn advance(&mut self, dt: f64, combat: &CombatConfig) -> bool {
        self.progress += dt / self.duration;
        let t = self.progress;
        if t >= 1.0 {
            return true;
        }
        self.position.x += (self.target.x - self.position.x) * t.powf(combat.x_easing_exponent);
        self.position.y += (self.target.y - self.position.y) * t + t * (1.0 - t) * combat.arc_height_km;
        false
    }
}

// =============================================================================
// Army
// =============================================================================

/// Components for Army entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmyComponents {
    /// Position in world km.
    pub position: DVec2,
    /// Owning faction.
    pub faction: Faction,
    /// Fighting strength. Fixed at landing.
    pub strength: u32,
}

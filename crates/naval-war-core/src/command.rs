//! Player commands: fire, assault and weapon selection.
//!
//! Commands are validated against the world and either applied in full or
//! refused with a typed error. They never partially apply: a refused fire
//! order leaves both the economy and the arena untouched.

use glam::DVec2;
use tracing::{debug, trace};

use crate::arena::Arena;
use crate::config::CombatConfig;
use crate::economy::Economy;
use crate::entity::{EntityId, EntityInner, ProjectileComponents, StatusFlags};
use crate::error::FireError;
use crate::faction::Faction;
use crate::geometry::Rect;
use crate::sector::{nearest_enemy_sector, CoastSector};
use crate::weapon::WeaponId;

/// Orders `ship` to fire its equipped weapon at `target`.
///
/// Returns the spawned projectile. The owning faction pays the weapon cost.
///
/// # Errors
///
/// - [`FireError::UnknownShip`] if `ship` is not a live ship
/// - [`FireError::OutOfRange`] if the target is beyond `range * range_tolerance`
/// - [`FireError::Economy`] if the owning faction cannot pay
pub fn fire(
    arena: &mut Arena,
    economy: &mut Economy,
    combat: &CombatConfig,
    ship: EntityId,
    target: DVec2,
) -> Result<EntityId, FireError> {
    let (origin, faction, weapon) = arena
        .ship(ship)
        .map(|s| (s.position, s.faction, s.weapon))
        .ok_or(FireError::UnknownShip(ship))?;

    let spec = weapon.spec();
    let distance = origin.distance(target);
    let max_range = spec.range_km * combat.range_tolerance;
    if distance > max_range {
        trace!(%ship, distance, max_range, "fire refused: out of range");
        return Err(FireError::OutOfRange {
            distance,
            max_range,
        });
    }

    economy.spend(faction, spec.cost)?;
    let projectile = arena.spawn(EntityInner::Projectile(ProjectileComponents::launch(
        origin, target, weapon, faction, combat,
    )));
    debug!(%ship, %projectile, weapon = spec.name, %faction, "weapon fired");
    Ok(projectile)
}

/// An accepted assault order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssaultOrder {
    /// Attacking faction.
    pub faction: Faction,
    /// Target sector.
    pub sector: Rect,
    /// Ships that received the target.
    pub ships: Vec<EntityId>,
}

/// Sends `ships` to the enemy coastal sector nearest `point`.
///
/// The attacker is the faction of the first listed live ship; listed ships
/// of any other faction are ignored. Every ship that receives the target is
/// deselected. Returns `None`, changing nothing, when no listed ship is
/// alive or the attacker has no enemy sector to pick.
pub fn order_assault(
    arena: &mut Arena,
    sectors: &[CoastSector],
    ships: &[EntityId],
    point: DVec2,
) -> Option<AssaultOrder> {
    let attacker = ships.iter().find_map(|&id| arena.ship(id))?.faction;
    let sector = nearest_enemy_sector(sectors, attacker, point)?.rect;

    let mut ordered = Vec::new();
    for &id in ships {
        let Some(ship) = arena.ship_mut(id) else {
            continue;
        };
        if ship.faction != attacker {
            continue;
        }
        ship.assault_target = Some(sector);
        ship.flags.remove(StatusFlags::SELECTED);
        ordered.push(id);
    }
    debug!(faction = %attacker, ships = ordered.len(), "assault ordered");
    Some(AssaultOrder {
        faction: attacker,
        sector,
        ships: ordered,
    })
}

/// Equips `weapon` on every listed ship; returns how many were changed.
pub fn select_weapon(arena: &mut Arena, ships: &[EntityId], weapon: WeaponId) -> usize {
    let mut changed = 0;
    for &id in ships {
        if let Some(ship) = arena.ship_mut(id) {
            ship.weapon = weapon;
            changed += 1;
        }
    }
    changed
}

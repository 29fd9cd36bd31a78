//! Opening world layout.
//!
//! Fills an empty arena with both opening fleets and each faction's
//! buildings, and lays out the coastal sector grid. Fleets are placed on a
//! fixed pattern; building positions and kinds come from the random source,
//! so a seeded source always yields the same world.

use glam::DVec2;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::entity::{BuildingComponents, BuildingKind, EntityId, EntityInner, ShipComponents};
use crate::faction::Faction;
use crate::sector::{generate_coast_sectors, CoastSector};

/// Spawns a ship of `faction` with the configured troops and default weapon.
pub fn spawn_ship(
    arena: &mut Arena,
    config: &SimConfig,
    position: DVec2,
    faction: Faction,
) -> EntityId {
    arena.spawn(EntityInner::Ship(ShipComponents::new(
        position,
        faction,
        config.fleet.troops_for(faction),
        config.fleet.default_weapon,
    )))
}

/// Spawns a full-health building of `kind` centred on `position`.
pub fn spawn_building(
    arena: &mut Arena,
    config: &SimConfig,
    position: DVec2,
    faction: Faction,
    kind: BuildingKind,
) -> EntityId {
    arena.spawn(EntityInner::Building(BuildingComponents::new(
        position,
        faction,
        kind,
        config.production.buildings.get(kind),
        config.combat.building_footprint_km,
    )))
}

/// Populates `arena` with the opening fleets and buildings and returns the
/// coastal sectors.
///
/// Spawn order is every BLUE ship, every RED ship, then BLUE buildings and
/// RED buildings.
#[allow(clippy::cast_precision_loss)]
pub fn populate(arena: &mut Arena, config: &SimConfig, rng: &mut dyn RngCore) -> Vec<CoastSector> {
    let generation = &config.generation;

    for faction in Faction::ALL {
        let layout = generation.fleet(faction);
        for i in 0..layout.count {
            let row = if layout.rows == 0 { 0 } else { i % layout.rows };
            let position = layout.origin
                + DVec2::new(
                    f64::from(i) * layout.spacing.x,
                    f64::from(row) * layout.spacing.y,
                );
            spawn_ship(arena, config, position, faction);
        }
    }

    for faction in Faction::ALL {
        let zone = generation.buildings(faction);
        for _ in 0..zone.count {
            let x = rng.gen_range(zone.x_range.0..=zone.x_range.1);
            let y = rng.gen_range(zone.y_range.0..=zone.y_range.1);
            let kind = BuildingKind::ALL[rng.gen_range(0..BuildingKind::ALL.len())];
            spawn_building(arena, config, DVec2::new(x as f64, y as f64), faction, kind);
        }
    }

    let sectors = generate_coast_sectors(&config.world, generation);
    debug!(
        ships = arena.ships().count(),
        buildings = arena.buildings().count(),
        sectors = sectors.len(),
        "world generated"
    );
    sectors
}

//! Click selection of ships and buildings.
//!
//! Ships are hit-tested in screen space, so the pick radius stays constant
//! in pixels at every zoom level. Buildings are hit-tested in world space
//! against their footprint and only when no ship was picked.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arena::Arena;
use crate::camera::Camera;
use crate::entity::{EntityId, StatusFlags};
use crate::faction::FactionMask;

/// Result of a selection click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing under the cursor.
    #[default]
    Empty,
    /// One or more ships, in creation order.
    Ships(Vec<EntityId>),
    /// A single building.
    Building(EntityId),
}

impl Selection {
    /// Selected ships; empty unless this is a ship selection.
    #[must_use]
    pub fn ships(&self) -> &[EntityId] {
        match self {
            Self::Ships(ids) => ids,
            _ => &[],
        }
    }

    /// Returns `true` if nothing was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Replaces the current selection with whatever lies under `screen_point`.
///
/// Every selection flag is cleared first. Then every ship of an allowed
/// faction drawn strictly within `radius_px` of the cursor is selected. If
/// there is none, the first building of an allowed faction whose footprint
/// contains the cursor's world point is selected instead.
pub fn select_entities_at(
    arena: &mut Arena,
    camera: &Camera,
    screen_point: DVec2,
    radius_px: f64,
    factions: FactionMask,
) -> Selection {
    for entity in arena.entities_sorted_mut() {
        if let Some(ship) = entity.as_ship_mut() {
            ship.flags.remove(StatusFlags::SELECTED);
        } else if let Some(building) = entity.as_building_mut() {
            building.flags.remove(StatusFlags::SELECTED);
        }
    }

    let mut ships = Vec::new();
    for entity in arena.entities_sorted_mut() {
        let id = entity.id();
        let Some(ship) = entity.as_ship_mut() else {
            continue;
        };
        if !factions.allows(ship.faction) {
            continue;
        }
        if camera.world_to_screen(ship.position).distance(screen_point) < radius_px {
            ship.flags.insert(StatusFlags::SELECTED);
            ships.push(id);
        }
    }
    if !ships.is_empty() {
        trace!(count = ships.len(), "ships selected");
        return Selection::Ships(ships);
    }

    let world_point = camera.screen_to_world(screen_point);
    for entity in arena.entities_sorted_mut() {
        let id = entity.id();
        let Some(building) = entity.as_building_mut() else {
            continue;
        };
        if factions.allows(building.faction) && building.contains(world_point) {
            building.flags.insert(StatusFlags::SELECTED);
            trace!(building = %id, "building selected");
            return Selection::Building(id);
        }
    }
    Selection::Empty
}

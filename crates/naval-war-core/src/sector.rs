//! Coastal landing sectors.
//!
//! Sectors are fixed rectangles along the two main coastlines. Each belongs
//! to one faction for the whole game; landings do not change ownership.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, WorldConfig};
use crate::faction::Faction;
use crate::geometry::Rect;

/// A landing zone with a static owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoastSector {
    /// Area of the sector.
    pub rect: Rect,
    /// Owning faction.
    pub owner: Faction,
}

impl CoastSector {
    /// Centre of the sector; ships sail here.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        self.rect.center()
    }
}

/// Lays the sector grid over the world.
///
/// Cell centres start `margin_km` inside the world edge and advance by
/// `step_km` while strictly inside the opposite margin. A cell becomes a
/// sector when, on both axes, it is closer than `proximity_km` to the
/// top-left corner of one of the first `coastal_continents` continents.
#[must_use]
pub fn generate_coast_sectors(
    world: &WorldConfig,
    generation: &GenerationConfig,
) -> Vec<CoastSector> {
    let coast = &generation.coast;
    let anchors: Vec<DVec2> = generation
        .continents
        .iter()
        .take(coast.coastal_continents)
        .map(|continent| continent.min)
        .collect();
    let x_end = world.width_km - coast.margin_km.x;
    let y_end = world.height_km - coast.margin_km.y;
    let step = coast.step_km;
    let axis = |start: f64, end: f64| {
        (0u32..)
            .map(move |i| start + f64::from(i) * step)
            .take_while(move |c| *c < end)
    };

    let mut sectors = Vec::new();
    for cx in axis(coast.margin_km.x, x_end) {
        for cy in axis(coast.margin_km.y, y_end) {
            let near_coast = anchors.iter().any(|anchor| {
                (cx - anchor.x).abs() < coast.proximity_km
                    && (cy - anchor.y).abs() < coast.proximity_km
            });
            if !near_coast {
                continue;
            }
            let owner = if cx > coast.red_east_of_km {
                Faction::Red
            } else {
                Faction::Blue
            };
            sectors.push(CoastSector {
                rect: Rect::from_center(DVec2::new(cx, cy), coast.sector_size_km),
                owner,
            });
        }
    }
    sectors
}

/// Finds the sector not owned by `attacker` whose centre is closest to
/// `point`. Ties go to the earlier sector.
#[must_use]
pub fn nearest_enemy_sector(
    sectors: &[CoastSector],
    attacker: Faction,
    point: DVec2,
) -> Option<&CoastSector> {
    let mut best: Option<(&CoastSector, f64)> = None;
    for sector in sectors.iter().filter(|s| s.owner == attacker.opponent()) {
        let distance = sector.center().distance(point);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((sector, distance));
        }
    }
    best.map(|(sector, _)| sector)
}

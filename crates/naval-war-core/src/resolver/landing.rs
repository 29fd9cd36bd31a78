//! Landing resolver: ships sailing to coastal sectors and putting troops ashore.

use glam::DVec2;
use tracing::debug;

use crate::entity::{ArmyComponents, EntityId, EntityInner};
use crate::event::SimEvent;
use crate::faction::Faction;

use super::{Resolver, TickContext};

/// Resolver for ship movement toward assault targets.
///
/// A ship with an assault target sails toward the sector centre at the
/// configured speed. Once within the arrival distance it lands: if it still
/// carries troops exactly one army is spawned at its position and the troops
/// drop to zero. The target is cleared either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingResolver;

struct Landing {
    ship: EntityId,
    faction: Faction,
    troops: u32,
    position: DVec2,
}

impl Resolver for LandingResolver {
    fn name(&self) -> &'static str {
        "landing"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        let config = ctx.config;
        let fleet = &config.fleet;
        let step = fleet.ship_speed_km_s * ctx.dt;
        let mut landings = Vec::new();

        for entity in ctx.arena.entities_sorted_mut() {
            let id = entity.id();
            let Some(ship) = entity.as_ship_mut() else {
                continue;
            };
            let Some(target) = ship.assault_target else {
                continue;
            };

            let offset = target.center() - ship.position;
            let distance = offset.length();
            if distance > fleet.arrival_epsilon_km {
                // Clamped so a ship never passes the centre.
                ship.position += offset / distance * step.min(distance);
                continue;
            }

            ship.assault_target = None;
            if ship.troops > 0 {
                landings.push(Landing {
                    ship: id,
                    faction: ship.faction,
                    troops: ship.troops,
                    position: ship.position,
                });
                ship.troops = 0;
            }
        }

        let strength = fleet.army_strength;
        for landing in landings {
            let army = ctx.arena.spawn(EntityInner::Army(ArmyComponents {
                position: landing.position,
                faction: landing.faction,
                strength,
            }));
            debug!(ship = %landing.ship, %army, faction = %landing.faction, "troops landed");
            ctx.record(SimEvent::ArmyLanded {
                ship: landing.ship,
                army,
                faction: landing.faction,
                troops: landing.troops,
            });
        }
    }
}

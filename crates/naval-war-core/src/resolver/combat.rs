//! Combat resolver for projectile flight, impacts and building damage.
//!
//! The `CombatResolver` handles, in order:
//! - Hit flash countdown on every building
//! - Projectile flight; arrived projectiles impact and are removed
//!
//! # Impact Rules
//!
//! An impact damages at most one building: the first in creation order
//! whose footprint contains the aim point. Faction is ignored, so friendly
//! fire is possible. A building whose hit points drop to zero is removed
//! immediately, so later impacts in the same tick cannot hit it again.

use glam::DVec2;
use tracing::debug;

use crate::entity::{EntityId, EntityTag};
use crate::event::SimEvent;

use super::{Resolver, TickContext};

/// Resolver for projectiles and building damage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    fn decay_flash(ctx: &mut TickContext<'_>) {
        for entity in ctx.arena.entities_sorted_mut() {
            if let Some(building) = entity.as_building_mut() {
                building.decay_flash();
            }
        }
    }

    fn advance_projectiles(ctx: &mut TickContext<'_>) {
        let config = ctx.config;
        let combat = &config.combat;
        for id in ctx.arena.ids_with_tag(EntityTag::Projectile) {
            let arrived = match ctx.arena.get_mut(id).and_then(|e| e.as_projectile_mut()) {
                Some(projectile) => projectile
                    .advance(ctx.dt, combat)
                    .then(|| (projectile.target, projectile.weapon)),
                None => continue,
            };

            if let Some((point, weapon)) = arrived {
                ctx.arena.despawn(id);
                let building = resolve_impact(ctx, point, weapon.spec().power_kg);
                ctx.record(SimEvent::ProjectileImpact {
                    projectile: id,
                    point,
                    building,
                });
            }
        }
    }
}

impl Resolver for CombatResolver {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        Self::decay_flash(ctx);
        Self::advance_projectiles(ctx);
    }
}

/// Damages the first building whose footprint contains `point`.
///
/// Returns the building hit, if any. A building reduced to zero hit points
/// is despawned before this returns.
pub fn resolve_impact(ctx: &mut TickContext<'_>, point: DVec2, power_kg: f64) -> Option<EntityId> {
    let target = ctx
        .arena
        .buildings()
        .find(|(_, building)| building.contains(point))
        .map(|(id, _)| id)?;

    let config = ctx.config;
    let building = ctx.arena.building_mut(target)?;
    let destroyed = building.damage(power_kg, &config.combat);
    let (kind, faction, hp) = (building.kind, building.faction, building.hp);

    if destroyed {
        ctx.arena.despawn(target);
        debug!(building = %target, %kind, %faction, "building destroyed");
        ctx.record(SimEvent::BuildingDestroyed {
            building: target,
            kind,
            faction,
        });
    } else {
        ctx.record(SimEvent::BuildingDamaged {
            building: target,
            hp,
        });
    }
    Some(target)
}

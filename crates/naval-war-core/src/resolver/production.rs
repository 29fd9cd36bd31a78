//! Production resolver: building output on production ticks.
//!
//! Every building produces once per production tick according to its
//! [`ProductionKind`]. Rates mean different things per kind: shipyards roll
//! against `rate` as a probability, every other kind adds a fixed amount.

use glam::DVec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::entity::{EntityId, EntityInner, ProductionKind, ShipComponents};
use crate::event::SimEvent;
use crate::faction::Faction;

use super::{chance, Resolver, TickContext};

/// Resolver for building production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionResolver;

struct Producer {
    id: EntityId,
    faction: Faction,
    production: ProductionKind,
    rate: f64,
    position: DVec2,
}

impl ProductionResolver {
    #[allow(clippy::cast_possible_truncation)]
    fn produce(ctx: &mut TickContext<'_>, producer: &Producer) {
        match producer.production {
            ProductionKind::Resources => ctx
                .economy
                .faction_mut(producer.faction)
                .earn(producer.rate as i64),
            ProductionKind::Weapons => ctx
                .economy
                .faction_mut(producer.faction)
                .earn((producer.rate * 100.0) as i64),
            ProductionKind::Army => {
                ctx.economy.faction_mut(producer.faction).army_pool += producer.rate;
            }
            ProductionKind::Ships => Self::launch_ship(ctx, producer),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn launch_ship(ctx: &mut TickContext<'_>, shipyard: &Producer) {
        if !chance(ctx.rng, shipyard.rate) {
            return;
        }
        let config = ctx.config;
        let fleet = &config.fleet;
        let jitter = ctx
            .rng
            .gen_range(-fleet.launch_jitter_km..=fleet.launch_jitter_km);
        let position = DVec2::new(
            shipyard.position.x + jitter as f64,
            shipyard.position.y - fleet.launch_offset_km,
        );
        let ship = ctx.arena.spawn(EntityInner::Ship(ShipComponents::new(
            position,
            shipyard.faction,
            fleet.troops_for(shipyard.faction),
            fleet.default_weapon,
        )));
        debug!(shipyard = %shipyard.id, %ship, faction = %shipyard.faction, "ship launched");
        ctx.record(SimEvent::ShipLaunched {
            shipyard: shipyard.id,
            ship,
            faction: shipyard.faction,
        });
    }
}

impl Resolver for ProductionResolver {
    fn name(&self) -> &'static str {
        "production"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        if !ctx.production_due {
            return;
        }
        // Snapshot first: launched ships are spawned into the arena.
        let producers: Vec<Producer> = ctx
            .arena
            .buildings()
            .map(|(id, b)| Producer {
                id,
                faction: b.faction,
                production: b.production,
                rate: b.rate,
                position: b.position,
            })
            .collect();
        trace!(buildings = producers.len(), "production tick");

        for producer in &producers {
            Self::produce(ctx, producer);
        }
    }
}

//! Army resolver: landed armies wander at random.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

use super::{chance, Resolver, TickContext};

/// Resolver for army movement.
///
/// Each tick every army independently rolls against the step probability;
/// on success it moves a fixed distance along a uniformly random heading.
/// The walk is tick-based and ignores `dt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmyResolver;

impl Resolver for ArmyResolver {
    fn name(&self) -> &'static str {
        "army"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        let army_config = &ctx.config.army;
        for entity in ctx.arena.entities_sorted_mut() {
            let Some(army) = entity.as_army_mut() else {
                continue;
            };
            if !chance(ctx.rng, army_config.step_probability) {
                continue;
            }
            let heading = ctx.rng.gen_range(0.0..TAU);
            army.position += DVec2::from_angle(heading) * army_config.step_km;
        }
    }
}

//! Integration tests for the full simulation pipeline.
//!
//! Every scenario goes through the public [`Simulation`] API: commands are
//! issued between ticks, the tick loop runs all resolvers, and outcomes are
//! checked on the arena, the economy and the drained event log.

use glam::DVec2;

use crate::clock::FIXED_DT;
use crate::config::SimConfig;
use crate::entity::{BuildingKind, EntityTag};
use crate::error::{ConfigError, EconomyError, FireError};
use crate::event::SimEvent;
use crate::faction::{Faction, FactionMask};
use crate::selection::Selection;
use crate::simulation::Simulation;
use crate::weapon::WeaponId;

use super::helpers::{count_events, empty_sim, run};

// =============================================================================
// Fire
// =============================================================================

mod fire_tests {
    use super::*;

    #[test]
    fn cost_gates_at_exact_balance() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::ZERO, Faction::Blue);
        let target = DVec2::new(100.0, 0.0);

        sim.economy_mut().faction_mut(Faction::Blue).resources = 799;
        let refused = sim.issue_fire_command(&[ship], target);
        assert_eq!(
            refused[0],
            Err(FireError::Economy(EconomyError::InsufficientFunds {
                faction: Faction::Blue,
                required: 800,
                available: 799,
            }))
        );
        assert_eq!(sim.arena().count(EntityTag::Projectile), 0);

        sim.economy_mut().faction_mut(Faction::Blue).resources = 800;
        assert!(sim.issue_fire_command(&[ship], target)[0].is_ok());
        assert_eq!(sim.economy().faction(Faction::Blue).resources, 0);
        assert_eq!(sim.arena().count(EntityTag::Projectile), 1);

        let events = sim.drain_events();
        assert_eq!(count_events(&events, |e| matches!(e, SimEvent::FireRejected { .. })), 1);
        assert_eq!(count_events(&events, |e| matches!(e, SimEvent::WeaponFired { .. })), 1);
    }

    #[test]
    fn range_gates_with_tolerance() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::new(5_000.0, 5_000.0), Faction::Red);
        let lrasm = WeaponId::new(1).unwrap();
        sim.select_weapon(&[ship], lrasm);
        // 560 km * 1.2 = 672 km.
        let inside = DVec2::new(5_000.0 + 672.0 - 1e-3, 5_000.0);
        let outside = DVec2::new(5_000.0 + 672.0 + 1e-3, 5_000.0);

        assert!(sim.issue_fire_command(&[ship], inside)[0].is_ok());
        let refused = sim.issue_fire_command(&[ship], outside);
        assert!(matches!(refused[0], Err(FireError::OutOfRange { .. })));
        assert_eq!(sim.economy().faction(Faction::Red).resources, 50_000 - 3_000);
    }

    #[test]
    fn fleet_volley_fires_until_pool_runs_dry() {
        let mut sim = empty_sim();
        sim.economy_mut().faction_mut(Faction::Blue).resources = 2_000;
        let ships: Vec<_> = (0..3)
            .map(|i| sim.spawn_ship(DVec2::new(f64::from(i) * 10.0, 0.0), Faction::Blue))
            .collect();

        let results = sim.issue_fire_command(&ships, DVec2::new(50.0, 0.0));

        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(results[2].is_err());
        assert_eq!(sim.economy().faction(Faction::Blue).resources, 400);
    }

    #[test]
    fn unknown_ship_is_reported_per_entry() {
        let mut sim = empty_sim();
        let base = sim.spawn_building(DVec2::ZERO, Faction::Blue, BuildingKind::Base);
        let results = sim.issue_fire_command(&[base], DVec2::ZERO);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], Err(FireError::UnknownShip(base)));
    }
}

// =============================================================================
// Projectiles and damage
// =============================================================================

mod combat_tests {
    use super::*;

    #[test]
    fn projectile_lives_for_its_flight_duration() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::ZERO, Faction::Blue);
        // 100 km is under the minimum flight time, so the flight lasts 1 s.
        let projectile = sim.issue_fire_command(&[ship], DVec2::new(100.0, 0.0))[0]
            .clone()
            .unwrap();

        for _ in 0..3 {
            sim.step(0.25);
            assert!(sim.arena().get(projectile).is_some());
        }
        sim.step(0.25);
        assert!(sim.arena().get(projectile).is_none());

        run(&mut sim, 10, 0.25);
        let events = sim.drain_events();
        let impacts = count_events(&events, |e| matches!(e, SimEvent::ProjectileImpact { .. }));
        assert_eq!(impacts, 1);
    }

    #[test]
    fn projectile_lobs_above_straight_line() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::ZERO, Faction::Blue);
        let tomahawk = WeaponId::new(2).unwrap();
        sim.select_weapon(&[ship], tomahawk);
        let projectile = sim.issue_fire_command(&[ship], DVec2::new(1_000.0, 0.0))[0]
            .clone()
            .unwrap();

        sim.step(0.25);
        let position = sim.arena().get(projectile).unwrap().position();
        assert!(position.x > 0.0 && position.x < 1_000.0);
        assert!(position.y > 0.0);
    }

    #[test]
    fn strategic_strike_levels_a_mine() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::new(10_000.0, 8_000.0), Faction::Blue);
        let target = DVec2::new(20_000.0, 8_000.0);
        let mine = sim.spawn_building(target, Faction::Red, BuildingKind::Resource);
        sim.select_weapon(&[ship], WeaponId::new(6).unwrap());

        assert!(sim.issue_fire_command(&[ship], target)[0].is_ok());
        assert_eq!(sim.economy().faction(Faction::Blue).resources, 10_000);
        // 10000 km at 2000 km/s: five seconds of flight.
        run(&mut sim, 24, 0.25);

        assert!(sim.arena().get(mine).is_none());
        let events = sim.drain_events();
        assert!(events.iter().any(|r| matches!(
            r.event,
            SimEvent::BuildingDestroyed {
                building,
                kind: BuildingKind::Resource,
                faction: Faction::Red,
            } if building == mine
        )));
    }

    #[test]
    fn hit_flash_counts_down_after_impact() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::ZERO, Faction::Blue);
        let target = DVec2::new(100.0, 0.0);
        let yard = sim.spawn_building(target, Faction::Blue, BuildingKind::Shipyard);
        sim.arena_mut().building_mut(yard).unwrap().rate = 0.0;
        sim.issue_fire_command(&[ship], target);

        run(&mut sim, 2, 0.5);
        let hit = sim.arena().building(yard).unwrap();
        assert!((hit.hp - 475.0).abs() < 1e-9);
        assert_eq!(hit.flash_ticks, 20);

        sim.step(0.5);
        assert_eq!(sim.arena().building(yard).unwrap().flash_ticks, 19);
    }
}

// =============================================================================
// Production
// =============================================================================

mod production_tests {
    use super::*;

    #[test]
    fn shipyard_launches_about_its_rate() {
        let mut sim = empty_sim();
        sim.spawn_building(DVec2::new(12_000.0, 9_000.0), Faction::Blue, BuildingKind::Shipyard);

        run(&mut sim, 1_000, FIXED_DT);

        let launched = sim.arena().count(EntityTag::Ship);
        assert!((5..=35).contains(&launched), "launched {launched}");
        let events = sim.drain_events();
        let reported = count_events(&events, |e| matches!(e, SimEvent::ShipLaunched { .. }));
        assert_eq!(reported, launched);
        for (_, ship) in sim.arena().ships() {
            assert_eq!(ship.faction, Faction::Blue);
            assert_eq!(ship.troops, 800);
            assert!((ship.position.y - 8_700.0).abs() < 1e-9);
            assert!((ship.position.x - 12_000.0).abs() <= 200.0);
        }
    }

    #[test]
    fn cadence_follows_interval() {
        let mut sim = Simulation::empty(SimConfig::default(), 5);
        sim.spawn_building(DVec2::ZERO, Faction::Red, BuildingKind::Resource);

        // Ten seconds at 60 Hz is exactly 100 production ticks.
        run(&mut sim, 600, FIXED_DT);

        let earned = sim.economy().faction(Faction::Red).resources - 50_000;
        assert_eq!(earned, 100 * 50);
    }

    #[test]
    fn each_kind_feeds_its_pool() {
        let mut sim = empty_sim();
        sim.spawn_building(DVec2::ZERO, Faction::Blue, BuildingKind::Factory);
        sim.spawn_building(DVec2::ZERO, Faction::Blue, BuildingKind::Base);

        run(&mut sim, 3, FIXED_DT);

        let hud = sim.hud(None);
        let blue = &hud.blue;
        assert_eq!(blue.resources, 50_000 + 3 * 10);
        assert!((blue.army_pool - 30.0).abs() < 1e-9);
    }
}

// =============================================================================
// Assault and landing
// =============================================================================

mod assault_tests {
    use super::*;

    #[test]
    fn landing_converts_troops_into_one_army() {
        let mut sim = empty_sim();
        let ship = sim.spawn_ship(DVec2::new(27_230.0, 8_000.0), Faction::Blue);

        let sector = sim
            .issue_assault_command(&[ship], DVec2::new(27_200.0, 8_000.0))
            .unwrap();
        assert_eq!(sector.center(), DVec2::new(27_200.0, 8_000.0));

        run(&mut sim, 120, FIXED_DT);

        let landed = sim.arena().ship(ship).unwrap();
        assert_eq!(landed.troops, 0);
        assert!(landed.assault_target.is_none());
        let armies: Vec<_> = sim.arena().armies().collect();
        assert_eq!(armies.len(), 1);
        assert_eq!(armies[0].1.strength, 400);
        assert_eq!(armies[0].1.faction, Faction::Blue);

        let events = sim.drain_events();
        assert!(events.iter().any(|r| matches!(
            r.event,
            SimEvent::ArmyLanded { troops: 800, faction: Faction::Blue, .. }
        )));
    }

    #[test]
    fn select_then_assault() {
        let mut sim = Simulation::new(SimConfig::default(), 11);
        let (flagship, position) = sim
            .arena()
            .ships()
            .find(|(_, s)| s.faction == Faction::Blue)
            .map(|(id, s)| (id, s.position))
            .unwrap();

        sim.camera_mut().zoom_at(DVec2::new(700.0, 450.0), 2.0);
        let cursor = sim.camera().world_to_screen(position);
        let selection = sim.select_entities_at(cursor, 5.0, FactionMask::BLUE);
        assert_eq!(selection, Selection::Ships(vec![flagship]));
        assert!(sim.arena().ship(flagship).unwrap().is_selected());

        let ships = selection.ships().to_vec();
        let sector = sim.issue_assault_command(&ships, DVec2::new(28_000.0, 7_000.0));

        let ship = sim.arena().ship(flagship).unwrap();
        assert_eq!(ship.assault_target, sector);
        assert!(!ship.is_selected());
        let owner = sim
            .sectors()
            .iter()
            .find(|s| Some(s.rect) == sector)
            .map(|s| s.owner);
        assert_eq!(owner, Some(Faction::Red));
    }
}

// =============================================================================
// HUD and configuration
// =============================================================================

#[test]
fn hud_reports_pools_and_active_weapon() {
    let mut sim = empty_sim();
    let ship = sim.spawn_ship(DVec2::ZERO, Faction::Red);
    sim.select_weapon(&[ship], WeaponId::new(4).unwrap());
    sim.issue_fire_command(&[ship], DVec2::new(10.0, 0.0));

    let hud = sim.hud(Some(ship));
    assert_eq!(hud.red.resources, 50_000 - 2_500);
    assert_eq!(hud.blue.resources, 50_000);
    assert_eq!(hud.active_weapon.map(|w| w.name), Some("Zircon 3M22"));
    assert!(sim.hud(None).active_weapon.is_none());
}

#[test]
fn json_config_drives_the_world() {
    let json = r#"{
        "economy": { "starting_resources": 1000 },
        "production": { "interval_secs": 0.0 }
    }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    let mut sim = Simulation::empty(config, 3);
    sim.spawn_building(DVec2::ZERO, Faction::Blue, BuildingKind::Resource);

    run(&mut sim, 4, FIXED_DT);

    assert_eq!(sim.economy().faction(Faction::Blue).resources, 1_000 + 4 * 50);
    assert_eq!(sim.economy().faction(Faction::Red).resources, 1_000);
}

#[test]
fn malformed_config_is_rejected() {
    let err = SimConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

//! Typed log of everything observable that happened in the simulation.
//!
//! The simulation appends a [`SimEvent`] for every state change a
//! presentation layer might react to (launches, impacts, landings) and for
//! every command it refused. Callers drain the log with
//! [`EventLog::drain`], typically once per frame, to drive sound, effects or
//! telemetry. Draining is the only way events leave the log.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::entity::{BuildingKind, EntityId};
use crate::error::FireError;
use crate::faction::Faction;
use crate::geometry::Rect;
use crate::weapon::WeaponId;

/// A single observable occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A ship paid for and launched a projectile.
    WeaponFired {
        /// Firing ship.
        ship: EntityId,
        /// Spawned projectile.
        projectile: EntityId,
        /// Weapon used.
        weapon: WeaponId,
        /// Faction charged.
        faction: Faction,
        /// Aim point.
        target: DVec2,
    },
    /// A fire order was refused.
    FireRejected {
        /// Ship that was ordered to fire.
        ship: EntityId,
        /// Why it refused.
        error: FireError,
    },
    /// A projectile reached its aim point and was removed.
    ProjectileImpact {
        /// The projectile.
        projectile: EntityId,
        /// Impact point.
        point: DVec2,
        /// Building hit, if any.
        building: Option<EntityId>,
    },
    /// A building took damage and survived.
    BuildingDamaged {
        /// The building.
        building: EntityId,
        /// Hit points remaining.
        hp: f64,
    },
    /// A building's hit points reached zero and it was removed.
    BuildingDestroyed {
        /// The building.
        building: EntityId,
        /// Its kind.
        kind: BuildingKind,
        /// Its owner.
        faction: Faction,
    },
    /// A shipyard launched a new ship.
    ShipLaunched {
        /// The shipyard.
        shipyard: EntityId,
        /// The new ship.
        ship: EntityId,
        /// Owner of both.
        faction: Faction,
    },
    /// A ship put its troops ashore as a new army.
    ArmyLanded {
        /// The ship.
        ship: EntityId,
        /// The new army.
        army: EntityId,
        /// Owner of both.
        faction: Faction,
        /// Troops that left the ship.
        troops: u32,
    },
    /// Ships were ordered to assault a coastal sector.
    AssaultOrdered {
        /// Attacking faction.
        faction: Faction,
        /// Ships that received the order.
        ships: Vec<EntityId>,
        /// Target sector.
        sector: Rect,
    },
}

impl SimEvent {
    /// Variant name, for grouping in logs and summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WeaponFired { .. } => "weapon_fired",
            Self::FireRejected { .. } => "fire_rejected",
            Self::ProjectileImpact { .. } => "projectile_impact",
            Self::BuildingDamaged { .. } => "building_damaged",
            Self::BuildingDestroyed { .. } => "building_destroyed",
            Self::ShipLaunched { .. } => "ship_launched",
            Self::ArmyLanded { .. } => "army_landed",
            Self::AssaultOrdered { .. } => "assault_ordered",
        }
    }
}

/// An event stamped with when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Arena tick during which the event was recorded.
    pub tick: u64,
    /// Global sequence number; strictly increasing across the whole run.
    pub sequence: u64,
    /// The event.
    pub event: SimEvent,
}

/// Append-only buffer of [`EventRecord`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_sequence: u64,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` stamped with `tick`.
    pub fn push(&mut self, tick: u64, event: SimEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.records.push(EventRecord {
            tick,
            sequence,
            event,
        });
    }

    /// Removes and returns every pending record in recording order.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Pending records, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of pending records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landed(ship: u64) -> SimEvent {
        SimEvent::ArmyLanded {
            ship: EntityId::new(ship),
            army: EntityId::new(ship + 100),
            faction: Faction::Blue,
            troops: 800,
        }
    }

    #[test]
    fn drain_empties_log_in_order() {
        let mut log = EventLog::new();
        log.push(3, landed(1));
        log.push(3, landed(2));
        assert_eq!(log.len(), 2);

        let records = log.drain();
        assert!(log.is_empty());
        assert_eq!(records[0].event, landed(1));
        assert_eq!(records[1].event, landed(2));
        assert_eq!(records[1].tick, 3);
        assert_eq!(records[0].event.kind(), "army_landed");
    }

    #[test]
    fn sequence_survives_drain() {
        let mut log = EventLog::new();
        log.push(0, landed(1));
        let _ = log.drain();
        log.push(1, landed(2));
        assert_eq!(log.pending()[0].sequence, 1);
    }

    #[test]
    fn rejected_fire_serializes_with_error() {
        let event = SimEvent::FireRejected {
            ship: EntityId::new(4),
            error: FireError::OutOfRange {
                distance: 300.0,
                max_range: 222.0,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["FireRejected"]["ship"], 4);
        assert_eq!(json["FireRejected"]["error"]["OutOfRange"]["distance"], 300.0);
    }
}

//! Per-faction resource and army pools.
//!
//! The simulation owns one [`Economy`] and lends it mutably to production
//! and to fire orders. Spending is checked: a request larger than the pool
//! is refused without touching it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EconomyConfig;
use crate::error::EconomyError;
use crate::faction::Faction;

/// One faction's pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionEconomy {
    /// Spendable currency. Never negative.
    pub resources: i64,
    /// Reinforcement counter fed by military bases. Nothing consumes it.
    pub army_pool: f64,
}

impl FactionEconomy {
    /// Deducts `cost` if the pool can cover it.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InsufficientFunds`] when `resources < cost`; the pool
    /// is unchanged.
    pub fn spend(&mut self, faction: Faction, cost: i64) -> Result<(), EconomyError> {
        if self.resources < cost {
            return Err(EconomyError::InsufficientFunds {
                faction,
                required: cost,
                available: self.resources,
            });
        }
        self.resources -= cost;
        trace!(%faction, cost, remaining = self.resources, "resources spent");
        Ok(())
    }

    /// Adds income to the resource pool.
    pub fn earn(&mut self, amount: i64) {
        self.resources = self.resources.saturating_add(amount);
    }
}

/// Pools for both factions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    blue: FactionEconomy,
    red: FactionEconomy,
}

impl Economy {
    /// Creates both pools from the configured opening balance.
    #[must_use]
    pub fn new(config: &EconomyConfig) -> Self {
        let opening = FactionEconomy {
            resources: config.starting_resources,
            army_pool: config.starting_army_pool,
        };
        Self {
            blue: opening.clone(),
            red: opening,
        }
    }

    /// Pools of `faction`.
    #[must_use]
    pub const fn faction(&self, faction: Faction) -> &FactionEconomy {
        match faction {
            Faction::Blue => &self.blue,
            Faction::Red => &self.red,
        }
    }

    /// Mutable pools of `faction`.
    pub fn faction_mut(&mut self, faction: Faction) -> &mut FactionEconomy {
        match faction {
            Faction::Blue => &mut self.blue,
            Faction::Red => &mut self.red,
        }
    }

    /// Charges `cost` to `faction`.
    ///
    /// # Errors
    ///
    /// See [`FactionEconomy::spend`].
    pub fn spend(&mut self, faction: Faction, cost: i64) -> Result<(), EconomyError> {
        self.faction_mut(faction).spend(faction, cost)
    }
}

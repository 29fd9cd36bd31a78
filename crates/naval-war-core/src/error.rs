//! Error types for the simulation core.
//!
//! Nothing in the simulation is fatal. These errors describe commands that
//! were refused (fire orders without range or funds) and configuration that
//! could not be loaded. Refused commands are also recorded in the event log
//! so a presentation layer can surface them without inspecting results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::EntityId;
use crate::faction::Faction;

/// A spend request exceeded a faction's resource pool.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EconomyError {
    /// The faction cannot pay the requested amount.
    #[error("{faction} needs {required} resources but only has {available}")]
    InsufficientFunds {
        /// Faction whose pool was charged.
        faction: Faction,
        /// Amount requested.
        required: i64,
        /// Amount in the pool at the time of the request.
        available: i64,
    },
}

/// Why a ship refused a fire order.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum FireError {
    /// The ship ID does not refer to a live ship.
    #[error("entity {0} is not a ship")]
    UnknownShip(EntityId),

    /// The target lies outside the weapon's range envelope.
    #[error("target is {distance:.1} km away, beyond the {max_range:.1} km envelope")]
    OutOfRange {
        /// Distance from ship to target in km.
        distance: f64,
        /// Weapon range including tolerance, in km.
        max_range: f64,
    },

    /// The owning faction could not pay for the shot.
    #[error(transparent)]
    Economy(#[from] EconomyError),
}

/// A raw weapon index outside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("weapon index {0} is not in the catalog")]
pub struct UnknownWeapon(pub usize);

/// Failure to load or validate a [`SimConfig`](crate::config::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is outside its valid domain.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

//! The two opposing sides and masks for filtering by side.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two opposing sides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Faction {
    /// The western side.
    Blue,
    /// The eastern side.
    Red,
}

impl Faction {
    /// Both factions in a fixed order.
    pub const ALL: [Self; 2] = [Self::Blue, Self::Red];

    /// Returns the opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }

    /// Returns a mask containing only this faction.
    #[must_use]
    pub const fn mask(self) -> FactionMask {
        match self {
            Self::Blue => FactionMask::BLUE,
            Self::Red => FactionMask::RED,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blue => write!(f, "BLUE"),
            Self::Red => write!(f, "RED"),
        }
    }
}

bitflags! {
    /// Set of factions used to filter hit-tests and queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FactionMask: u8 {
        /// Include BLUE entities.
        const BLUE = 0b01;
        /// Include RED entities.
        const RED = 0b10;
    }
}

impl FactionMask {
    /// Returns `true` if `faction` passes this filter.
    #[must_use]
    pub const fn allows(self, faction: Faction) -> bool {
        self.contains(faction.mask())
    }
}

impl From<Faction> for FactionMask {
    fn from(faction: Faction) -> Self {
        faction.mask()
    }
}

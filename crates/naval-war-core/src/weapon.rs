//! Static catalog of long-range weapons.
//!
//! The catalog is a fixed table indexed `0..7`. Ships hold a [`WeaponId`],
//! which can only be built for an index inside the table, so a ship's
//! equipped weapon always resolves.
//!
//! # Example
//!
//! ```
//! use naval_war_core::weapon::WeaponId;
//!
//! let tomahawk = WeaponId::new(2).unwrap();
//! assert_eq!(tomahawk.spec().name, "Tomahawk Blk V");
//! assert!(WeaponId::new(7).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UnknownWeapon;

/// Immutable description of one weapon system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponSpec {
    /// Display name.
    pub name: &'static str,
    /// Nominal range in km.
    pub range_km: f64,
    /// Warhead mass in kg; drives damage.
    pub power_kg: f64,
    /// Circular error probable in metres. Display only.
    pub precision_m: f64,
    /// Resource cost per shot.
    pub cost: i64,
}

const fn weapon(
    name: &'static str,
    range_km: f64,
    power_kg: f64,
    precision_m: f64,
    cost: i64,
) -> WeaponSpec {
    WeaponSpec {
        name,
        range_km,
        power_kg,
        precision_m,
        cost,
    }
}

/// Number of entries in [`WEAPONS`].
pub const WEAPON_COUNT: usize = 7;

/// The weapon table.
pub static WEAPONS: [WeaponSpec; WEAPON_COUNT] = [
    weapon("NSM/JSM", 185.0, 250.0, 15.0, 800),
    weapon("LRASM", 560.0, 450.0, 8.0, 3000),
    weapon("Tomahawk Blk V", 1700.0, 450.0, 5.0, 1800),
    weapon("PrSM / Typhon", 500.0, 200.0, 10.0, 1200),
    weapon("Zircon 3M22", 1000.0, 400.0, 12.0, 2500),
    weapon("Hypersonic CPGS", 3500.0, 800.0, 3.0, 9000),
    weapon("Strategic HGV", 12000.0, 2000.0, 5.0, 40000),
];

/// Validated index into [`WEAPONS`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WeaponId(u8);

impl WeaponId {
    /// Returns the weapon at `index`, or `None` outside the catalog.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < WEAPON_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the raw catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the catalog entry for this weapon.
    #[must_use]
    pub fn spec(self) -> &'static WeaponSpec {
        &WEAPONS[self.0 as usize]
    }

    /// Iterates over every weapon in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..WEAPON_COUNT).filter_map(Self::new)
    }
}

impl fmt::Debug for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeaponId({}: {})", self.0, self.spec().name)
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec().name)
    }
}

impl TryFrom<usize> for WeaponId {
    type Error = UnknownWeapon;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(UnknownWeapon(index))
    }
}

impl From<WeaponId> for usize {
    fn from(id: WeaponId) -> Self {
        id.index()
    }
}

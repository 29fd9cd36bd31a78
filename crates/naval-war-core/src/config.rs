//! Simulation configuration.
//!
//! Every tunable number lives here. The defaults reproduce the stock
//! game's balance; none of them are part of the simulation's contract.
//! A config can be loaded from JSON, where any omitted field keeps its
//! default:
//!
//! ```
//! use naval_war_core::config::SimConfig;
//!
//! let config = SimConfig::from_json_str(r#"{ "economy": { "starting_resources": 1000 } }"#).unwrap();
//! assert_eq!(config.economy.starting_resources, 1000);
//! assert_eq!(config.fleet.army_strength, 400);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::entity::components::{BuildingKind, ProductionKind};
use crate::error::ConfigError;
use crate::faction::Faction;
use crate::geometry::Rect;
use crate::weapon::WeaponId;

// =============================================================================
// Sections
// =============================================================================

/// World extent in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world in km.
    pub width_km: f64,
    /// Height of the world in km.
    pub height_km: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width_km: 40_000.0,
            height_km: 20_000.0,
        }
    }
}

impl WorldConfig {
    /// World size as a vector.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width_km, self.height_km)
    }
}

/// Camera limits and the initial viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Screen pixels per world km at zoom 1.
    pub pixels_per_km: f64,
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Initial viewport size in pixels.
    pub viewport: DVec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pixels_per_km: 0.02,
            min_zoom: 0.05,
            max_zoom: 50.0,
            viewport: DVec2::new(1400.0, 900.0),
        }
    }
}

/// Opening state of both faction pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Resources each faction starts with.
    pub starting_resources: i64,
    /// Army pool each faction starts with.
    pub starting_army_pool: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_resources: 50_000,
            starting_army_pool: 0.0,
        }
    }
}

/// Weapon envelope, projectile flight and damage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Multiplier on nominal weapon range before a shot is refused.
    pub range_tolerance: f64,
    /// Shortest possible flight time in seconds.
    pub min_flight_secs: f64,
    /// Distance covered per second of flight time, in km.
    pub flight_km_per_sec: f64,
    /// Amplitude of the lobbed arc in world units.
    pub arc_height_km: f64,
    /// Exponent of the easing curve applied to the x coordinate.
    pub x_easing_exponent: f64,
    /// Warhead mass is divided by this to get hit points removed.
    pub damage_divisor: f64,
    /// Ticks a building flashes after being hit.
    pub flash_ticks: u32,
    /// Size of a building's footprint in km.
    pub building_footprint_km: DVec2,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            range_tolerance: 1.2,
            min_flight_secs: 1.0,
            flight_km_per_sec: 2000.0,
            arc_height_km: 200.0,
            x_easing_exponent: 1.2,
            damage_divisor: 10.0,
            flash_ticks: 20,
            building_footprint_km: DVec2::new(300.0, 200.0),
        }
    }
}

/// Ship movement, troops and landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Ship speed toward an assault target in km per second.
    pub ship_speed_km_s: f64,
    /// Distance at which a ship counts as arrived.
    pub arrival_epsilon_km: f64,
    /// Troops aboard a newly created BLUE ship.
    pub blue_troops: u32,
    /// Troops aboard a newly created RED ship.
    pub red_troops: u32,
    /// Weapon equipped on newly created ships.
    pub default_weapon: WeaponId,
    /// Strength of an army put ashore, independent of troops carried.
    pub army_strength: u32,
    /// Horizontal jitter (inclusive, km) when a shipyard launches a ship.
    pub launch_jitter_km: i64,
    /// Launched ships appear this far north of their shipyard.
    pub launch_offset_km: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ship_speed_km_s: 0.6 * 60.0,
            arrival_epsilon_km: 5.0,
            blue_troops: 800,
            red_troops: 600,
            default_weapon: WeaponId::default(),
            army_strength: 400,
            launch_jitter_km: 200,
            launch_offset_km: 300.0,
        }
    }
}

impl FleetConfig {
    /// Troops aboard a new ship of `faction`.
    #[must_use]
    pub const fn troops_for(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Blue => self.blue_troops,
            Faction::Red => self.red_troops,
        }
    }
}

/// Random walk of landed armies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmyConfig {
    /// Per-tick probability that an army takes a step.
    pub step_probability: f64,
    /// Length of one step in world units.
    pub step_km: f64,
}

impl Default for ArmyConfig {
    fn default() -> Self {
        Self {
            step_probability: 0.02,
            step_km: 100.0,
        }
    }
}

/// Static stats of one building kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Display name.
    pub name: String,
    /// What the building produces.
    pub production: ProductionKind,
    /// Production rate. A probability per production tick for shipyards,
    /// an amount per production tick for everything else.
    pub rate: f64,
    /// Hit points when built.
    pub max_hp: f64,
}

impl BuildingSpec {
    fn new(name: &str, production: ProductionKind, rate: f64, max_hp: f64) -> Self {
        Self {
            name: name.to_string(),
            production,
            rate,
            max_hp,
        }
    }
}

/// Stats for every building kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingCatalog {
    /// Resource mine.
    pub resource: BuildingSpec,
    /// Naval shipyard.
    pub shipyard: BuildingSpec,
    /// Weapons factory.
    pub factory: BuildingSpec,
    /// Military base.
    pub base: BuildingSpec,
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        Self {
            resource: BuildingSpec::new("Resource Mine", ProductionKind::Resources, 50.0, 200.0),
            shipyard: BuildingSpec::new("Naval Shipyard", ProductionKind::Ships, 0.02, 500.0),
            factory: BuildingSpec::new("Weapons Factory", ProductionKind::Weapons, 0.1, 400.0),
            base: BuildingSpec::new("Military Base", ProductionKind::Army, 10.0, 300.0),
        }
    }
}

impl BuildingCatalog {
    /// Returns the stats for `kind`.
    #[must_use]
    pub const fn get(&self, kind: BuildingKind) -> &BuildingSpec {
        match kind {
            BuildingKind::Resource => &self.resource,
            BuildingKind::Shipyard => &self.shipyard,
            BuildingKind::Factory => &self.factory,
            BuildingKind::Base => &self.base,
        }
    }
}

/// Production cadence and building stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    /// Seconds of game time between production ticks. Zero produces every tick.
    pub interval_secs: f64,
    /// Per-kind building stats.
    pub buildings: BuildingCatalog,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            interval_secs: 0.1,
            buildings: BuildingCatalog::default(),
        }
    }
}

/// A row-wrapped line of ships placed at game start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetLayout {
    /// Number of ships.
    pub count: u32,
    /// Position of ship 0.
    pub origin: DVec2,
    /// Ship `i` is placed at `origin + (i * spacing.x, (i % rows) * spacing.y)`.
    pub spacing: DVec2,
    /// Number of distinct rows before the y offset wraps.
    pub rows: u32,
}

/// Random building placement for one faction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementZone {
    /// Number of buildings.
    pub count: u32,
    /// Inclusive x range of building centres.
    pub x_range: (i64, i64),
    /// Inclusive y range of building centres.
    pub y_range: (i64, i64),
}

/// Grid of coastal landing sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoastConfig {
    /// Distance between grid cell centres.
    pub step_km: f64,
    /// Distance from the world edge to the first cell centre.
    pub margin_km: DVec2,
    /// A cell becomes a sector when within this distance (per axis) of the
    /// top-left corner of a coastal continent.
    pub proximity_km: f64,
    /// Size of each sector rectangle.
    pub sector_size_km: DVec2,
    /// Cells east of this x belong to RED.
    pub red_east_of_km: f64,
    /// How many of the leading continents have a landing coast.
    pub coastal_continents: usize,
}

impl Default for CoastConfig {
    fn default() -> Self {
        Self {
            step_km: 1400.0,
            margin_km: DVec2::new(2000.0, 1000.0),
            proximity_km: 1200.0,
            sector_size_km: DVec2::new(1400.0, 1000.0),
            red_east_of_km: 22_000.0,
            coastal_continents: 2,
        }
    }
}

/// Initial world layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Land masses. The leading ones anchor the coastal sector grid.
    pub continents: Vec<Rect>,
    /// Opening BLUE fleet.
    pub blue_fleet: FleetLayout,
    /// Opening RED fleet.
    pub red_fleet: FleetLayout,
    /// BLUE building placement.
    pub blue_buildings: PlacementZone,
    /// RED building placement.
    pub red_buildings: PlacementZone,
    /// Coastal sector grid.
    pub coast: CoastConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            continents: vec![
                Rect::new(10_000.0, 8_000.0, 8_000.0, 6_000.0),
                Rect::new(28_000.0, 7_000.0, 9_000.0, 7_000.0),
                Rect::new(15_000.0, 3_000.0, 4_000.0, 3_000.0),
                Rect::new(20_000.0, 14_000.0, 6_000.0, 4_000.0),
            ],
            blue_fleet: FleetLayout {
                count: 14,
                origin: DVec2::new(8_000.0, 9_000.0),
                spacing: DVec2::new(500.0, 600.0),
                rows: 4,
            },
            red_fleet: FleetLayout {
                count: 12,
                origin: DVec2::new(32_000.0, 8_000.0),
                spacing: DVec2::new(600.0, 700.0),
                rows: 3,
            },
            blue_buildings: PlacementZone {
                count: 15,
                x_range: (8_000, 16_000),
                y_range: (6_000, 12_000),
            },
            red_buildings: PlacementZone {
                count: 20,
                x_range: (26_000, 36_000),
                y_range: (5_000, 13_000),
            },
            coast: CoastConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Opening fleet layout of `faction`.
    #[must_use]
    pub const fn fleet(&self, faction: Faction) -> &FleetLayout {
        match faction {
            Faction::Blue => &self.blue_fleet,
            Faction::Red => &self.red_fleet,
        }
    }

    /// Building placement zone of `faction`.
    #[must_use]
    pub const fn buildings(&self, faction: Faction) -> &PlacementZone {
        match faction {
            Faction::Blue => &self.blue_buildings,
            Faction::Red => &self.red_buildings,
        }
    }
}

// =============================================================================
// SimConfig
// =============================================================================

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World extent.
    pub world: WorldConfig,
    /// Camera limits.
    pub camera: CameraConfig,
    /// Opening economy.
    pub economy: EconomyConfig,
    /// Weapons and damage.
    pub combat: CombatConfig,
    /// Ships and landings.
    pub fleet: FleetConfig,
    /// Army random walk.
    pub army: ArmyConfig,
    /// Building production.
    pub production: ProductionConfig,
    /// Initial world layout.
    pub generation: GenerationConfig,
}

impl SimConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is inside its valid domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.width_km", self.world.width_km)?;
        positive("world.height_km", self.world.height_km)?;

        positive("camera.pixels_per_km", self.camera.pixels_per_km)?;
        positive("camera.min_zoom", self.camera.min_zoom)?;
        if self.camera.max_zoom < self.camera.min_zoom {
            return Err(ConfigError::invalid(
                "camera.max_zoom",
                format!(
                    "{} is below min_zoom {}",
                    self.camera.max_zoom, self.camera.min_zoom
                ),
            ));
        }
        positive("camera.viewport.x", self.camera.viewport.x)?;
        positive("camera.viewport.y", self.camera.viewport.y)?;

        positive("combat.range_tolerance", self.combat.range_tolerance)?;
        positive("combat.min_flight_secs", self.combat.min_flight_secs)?;
        positive("combat.flight_km_per_sec", self.combat.flight_km_per_sec)?;
        positive("combat.damage_divisor", self.combat.damage_divisor)?;

        positive("fleet.ship_speed_km_s", self.fleet.ship_speed_km_s)?;
        positive("fleet.arrival_epsilon_km", self.fleet.arrival_epsilon_km)?;
        if self.fleet.launch_jitter_km < 0 {
            return Err(ConfigError::invalid(
                "fleet.launch_jitter_km",
                "must not be negative",
            ));
        }

        probability("army.step_probability", self.army.step_probability)?;
        probability(
            "production.buildings.shipyard.rate",
            self.production.buildings.shipyard.rate,
        )?;
        if self.production.interval_secs < 0.0 {
            return Err(ConfigError::invalid(
                "production.interval_secs",
                "must not be negative",
            ));
        }

        positive("generation.coast.step_km", self.generation.coast.step_km)?;
        for (field, zone) in [
            ("generation.blue_buildings", &self.generation.blue_buildings),
            ("generation.red_buildings", &self.generation.red_buildings),
        ] {
            if zone.x_range.0 > zone.x_range.1 || zone.y_range.0 > zone.y_range.1 {
                return Err(ConfigError::invalid(field, "placement range is empty"));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} must be positive"),
        ))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is not a probability"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_stock_balance() {
        let config = SimConfig::default();
        assert_eq!(config.economy.starting_resources, 50_000);
        assert!((config.fleet.ship_speed_km_s - 36.0).abs() < 1e-9);
        assert_eq!(config.fleet.troops_for(Faction::Blue), 800);
        assert_eq!(config.fleet.troops_for(Faction::Red), 600);
        assert_eq!(config.combat.flash_ticks, 20);

        let shipyard = config.production.buildings.get(BuildingKind::Shipyard);
        assert_eq!(shipyard.production, ProductionKind::Ships);
        assert!((shipyard.rate - 0.02).abs() < 1e-12);
        assert!((shipyard.max_hp - 500.0).abs() < 1e-12);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            SimConfig::from_json_str(r#"{ "combat": { "range_tolerance": 1.5 } }"#).unwrap();
        assert!((config.combat.range_tolerance - 1.5).abs() < 1e-12);
        assert!((config.combat.min_flight_secs - 1.0).abs() < 1e-12);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let err = SimConfig::from_json_str(r#"{ "camera": { "min_zoom": 2.0, "max_zoom": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.max_zoom",
                ..
            }
        ));
    }

    #[test]
    fn shipyard_rate_must_be_a_probability() {
        let mut config = SimConfig::default();
        config.production.buildings.shipyard.rate = 1.5;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config value `production.buildings.shipyard.rate`: 1.5 is not a probability"
        );
    }

    #[test]
    fn unknown_default_weapon_fails_to_parse() {
        let err = SimConfig::from_json_str(r#"{ "fleet": { "default_weapon": 11 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = SimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }
}

//! Data-driven game balance
//!
//! Level and weapon catalogs are loaded once at startup and shared read-only
//! with the engine. The built-in tables match the shipped game; a JSON file
//! with the same shape can replace them.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

/// Shopper types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Regular,
    Impatient,
    Karen,
}

/// Per-type enemy stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    /// Pixels per tick, downward
    pub speed: f32,
    /// Square side length in pixels
    pub size: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Regular, EnemyKind::Impatient, EnemyKind::Karen];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Regular => EnemyStats {
                health: 50,
                speed: 1.0,
                size: 50.0,
            },
            EnemyKind::Impatient => EnemyStats {
                health: 40,
                speed: 1.5,
                size: 50.0,
            },
            EnemyKind::Karen => EnemyStats {
                health: 80,
                speed: 0.8,
                size: 60.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Regular => "regular",
            EnemyKind::Impatient => "impatient",
            EnemyKind::Karen => "karen",
        }
    }
}

/// Weapon identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    #[default]
    Scanner,
    Receipt,
    Bag,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Scanner, WeaponKind::Receipt, WeaponKind::Bag];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Scanner => "scanner",
            WeaponKind::Receipt => "receipt",
            WeaponKind::Bag => "bag",
        }
    }
}

impl FromStr for WeaponKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scanner" => Ok(WeaponKind::Scanner),
            "receipt" => Ok(WeaponKind::Receipt),
            "bag" => Ok(WeaponKind::Bag),
            _ => bail!("unknown weapon: {s}"),
        }
    }
}

/// Weapon tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub kind: WeaponKind,
    pub name: String,
    pub damage: i32,
    /// Reach in pixels past the player's facing edge
    pub range: f32,
    /// Ticks between attacks; also the length of the hit window
    pub cooldown: u32,
}

/// Level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub max_enemies: usize,
    /// Ticks between spawn attempts
    pub spawn_interval: u64,
    pub enemy_types: Vec<EnemyKind>,
    /// Presentation key for the backdrop
    pub background: String,
    /// Level progress needed to clear the level
    pub progress_target: u32,
}

/// Immutable level + weapon catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Level 1 is at index 0
    pub levels: Vec<LevelConfig>,
    pub weapons: Vec<WeaponConfig>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig {
                    name: "Store Entrance".into(),
                    max_enemies: 5,
                    spawn_interval: 120,
                    enemy_types: vec![EnemyKind::Regular],
                    background: "entrance".into(),
                    progress_target: 100,
                },
                LevelConfig {
                    name: "Shelf Area".into(),
                    max_enemies: 8,
                    spawn_interval: 90,
                    enemy_types: vec![EnemyKind::Regular, EnemyKind::Impatient],
                    background: "shelves".into(),
                    progress_target: 150,
                },
                LevelConfig {
                    name: "Checkout Counter".into(),
                    max_enemies: 12,
                    spawn_interval: 60,
                    enemy_types: EnemyKind::ALL.to_vec(),
                    background: "checkout".into(),
                    progress_target: 200,
                },
            ],
            weapons: vec![
                WeaponConfig {
                    kind: WeaponKind::Scanner,
                    name: "Price Scanner".into(),
                    damage: 20,
                    range: 100.0,
                    cooldown: 45,
                },
                WeaponConfig {
                    kind: WeaponKind::Receipt,
                    name: "Receipt Roll".into(),
                    damage: 15,
                    range: 150.0,
                    cooldown: 30,
                },
                WeaponConfig {
                    kind: WeaponKind::Bag,
                    name: "Shopping Bag".into(),
                    damage: 30,
                    range: 80.0,
                    cooldown: 60,
                },
            ],
        }
    }
}

impl Catalog {
    /// Look up a level by its 1-based number
    pub fn level(&self, number: u32) -> Option<&LevelConfig> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn has_level(&self, number: u32) -> bool {
        self.level(number).is_some()
    }

    /// Look up a weapon. Validated catalogs always contain every kind.
    pub fn weapon(&self, kind: WeaponKind) -> &WeaponConfig {
        self.weapons
            .iter()
            .find(|w| w.kind == kind)
            .unwrap_or(&FALLBACK_WEAPON)
    }

    /// Parse and validate a JSON catalog
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json).context("parse catalog json")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog: {}", path.display()))?;
        let catalog = Self::from_json_str(&json)
            .with_context(|| format!("load catalog: {}", path.display()))?;
        log::info!(
            "Loaded catalog from {} ({} levels)",
            path.display(),
            catalog.levels.len()
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.levels.is_empty(), "catalog has no levels");
        for (i, level) in self.levels.iter().enumerate() {
            let number = i + 1;
            ensure!(
                !level.enemy_types.is_empty(),
                "level {number} ({}) has no enemy types",
                level.name
            );
            ensure!(
                level.spawn_interval > 0,
                "level {number} ({}) has a zero spawn interval",
                level.name
            );
            ensure!(
                level.progress_target > 0,
                "level {number} ({}) has a zero progress target",
                level.name
            );
        }
        for kind in WeaponKind::ALL {
            let matches = self.weapons.iter().filter(|w| w.kind == kind).count();
            match matches {
                1 => {}
                0 => bail!("weapon {} missing from catalog", kind.as_str()),
                _ => bail!("weapon {} listed {matches} times", kind.as_str()),
            }
        }
        for weapon in &self.weapons {
            let kind = weapon.kind.as_str();
            ensure!(weapon.cooldown > 0, "weapon {kind} has a zero cooldown");
            ensure!(
                weapon.damage > 0,
                "weapon {kind} has non-positive damage {}",
                weapon.damage
            );
            ensure!(
                weapon.range.is_finite() && weapon.range > 0.0,
                "weapon {kind} has invalid range {}",
                weapon.range
            );
        }
        Ok(())
    }
}

/// Only reachable through an unvalidated, hand-built catalog
static FALLBACK_WEAPON: WeaponConfig = WeaponConfig {
    kind: WeaponKind::Scanner,
    name: String::new(),
    damage: 20,
    range: 100.0,
    cooldown: 45,
};

//! Session settings
//!
//! Read once at startup from an optional JSON file; any field left out keeps
//! its default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::PlayArea;
use crate::tuning::{Catalog, WeaponKind};

/// Seed used when none is configured, so runs replay by default
pub const DEFAULT_SEED: u64 = 0x5eed_c0de;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area in pixels
    pub area: PlayArea,
    /// RNG seed for spawns
    pub seed: u64,
    /// Weapon the player starts each level with
    pub weapon: WeaponKind,
    /// Custom level/weapon catalog (built-in tables when absent)
    pub catalog_path: Option<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            area: PlayArea::default(),
            seed: DEFAULT_SEED,
            weapon: WeaponKind::Scanner,
            catalog_path: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json).context("parse settings json")?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.area.validate().context("invalid play area")
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read settings: {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load settings: {}", path.display()))
    }

    /// Read settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {err:#}");
                Self::default()
            }
        }
    }

    /// Catalog named by `catalog_path`, or the built-in tables
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::default()),
        }
    }
}

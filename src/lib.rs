//! Checkout Rush - a wave-based 2D arcade brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemies, hits, win/loss)
//! - `tuning`: Data-driven level and weapon catalogs
//! - `driver`: Fixed-timestep frame driver
//! - `audio`: Feedback sink that turns game events into sound cues
//! - `hud`: Presentation view-model derived from a game snapshot
//! - `settings`: Session configuration

pub mod audio;
pub mod driver;
pub mod hud;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use hud::Hud;
pub use settings::Settings;
pub use sim::Engine;
pub use tuning::Catalog;

use anyhow::{Result, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Pixels per move request
    pub const PLAYER_MOVE_SPEED: f32 = 10.0;
    /// Spawn offset from the bottom edge
    pub const PLAYER_SPAWN_BOTTOM_OFFSET: f32 = 150.0;
    /// Gap kept between the player's feet and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;
    /// Below this the HUD flags health as low
    pub const LOW_HEALTH_THRESHOLD: i32 = 30;

    /// Flat reward per kill, independent of enemy type
    pub const KILL_SCORE: u64 = 10;
    pub const KILL_PROGRESS: u32 = 5;
    /// Health lost per overlapping enemy per tick
    pub const CONTACT_DAMAGE: i32 = 1;
    /// Percentage earned on level clear, multiplied by the level number
    pub const PERCENTAGE_PER_LEVEL: u32 = 5;

    /// Default play area (portrait phone-ish)
    pub const DEFAULT_AREA_WIDTH: f32 = 400.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 800.0;
}

/// Size of the play area in pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_AREA_WIDTH,
            height: consts::DEFAULT_AREA_HEIGHT,
        }
    }
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check the area can hold the player: at least one player wide, and tall
    /// enough that the spawn point sits inside the vertical movement band
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width.is_finite() && self.height.is_finite(),
            "play area {}x{} is not finite",
            self.width,
            self.height
        );
        ensure!(
            self.width >= consts::PLAYER_WIDTH,
            "play area width {} is narrower than the player ({})",
            self.width,
            consts::PLAYER_WIDTH
        );
        // Spawn y = h - offset must not sit above h / 3
        let min_height = consts::PLAYER_SPAWN_BOTTOM_OFFSET * 1.5;
        ensure!(
            self.height >= min_height,
            "play area height {} is below the minimum {min_height}",
            self.height
        );
        Ok(())
    }
}

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

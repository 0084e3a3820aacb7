//! HUD view-model
//!
//! Everything the overlay and the end-of-level screens display, derived
//! from a state snapshot so renderers never do game math.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};
use crate::tuning::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub level_name: String,
    pub score: u64,
    pub health: i32,
    /// Health bar fill in [0, 1]
    pub health_fraction: f32,
    pub low_health: bool,
    /// Level progress bar, whole percent capped at 100
    pub progress_percent: u32,
    pub percentage_earned: u32,
    pub customers_defeated: u64,
    /// Offer "continue" instead of "play again" after a clear
    pub has_next_level: bool,
    pub phase: GamePhase,
}

impl Hud {
    pub fn new(state: &GameState, catalog: &Catalog) -> Self {
        let level_name = catalog
            .level(state.current_level)
            .map(|l| l.name.clone())
            .unwrap_or_default();
        let health = state.player.health;
        let progress_percent = if state.level_progress_target == 0 {
            100
        } else {
            let pct =
                u64::from(state.level_progress) * 100 / u64::from(state.level_progress_target);
            pct.min(100) as u32
        };

        Self {
            level: state.current_level,
            level_name,
            score: state.score,
            health,
            health_fraction: (health as f32 / PLAYER_MAX_HEALTH as f32).clamp(0.0, 1.0),
            low_health: health < LOW_HEALTH_THRESHOLD,
            progress_percent,
            percentage_earned: state.percentage_earned,
            customers_defeated: state.score / KILL_SCORE,
            has_next_level: catalog.has_level(state.current_level + 1),
            phase: state.phase,
        }
    }
}

//! Session-level engine
//!
//! Owns the authoritative `GameState` together with everything a tick needs
//! (catalog, play area, RNG, feedback sink) and exposes the input and
//! session-control surface. Single-threaded: the caller owns the engine and
//! drives it from one place.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::{FeedbackSink, GameEvent, NullSink};
use super::state::{Direction, GameState};
use super::tick::tick;
use crate::PlayArea;
use crate::hud::Hud;
use crate::settings::Settings;
use crate::tuning::{Catalog, LevelConfig, WeaponConfig, WeaponKind};

pub struct Engine<S: FeedbackSink = NullSink> {
    catalog: Arc<Catalog>,
    area: PlayArea,
    weapon: WeaponKind,
    rng: Pcg32,
    state: GameState,
    sink: S,
}

impl<S: FeedbackSink> Engine<S> {
    /// Build an engine from session settings
    pub fn new(catalog: Arc<Catalog>, settings: &Settings, sink: S) -> Self {
        Self::with_seed(catalog, settings.area, settings.weapon, settings.seed, sink)
    }

    /// Build an engine with an explicit area, starting weapon and seed
    pub fn with_seed(
        catalog: Arc<Catalog>,
        area: PlayArea,
        weapon: WeaponKind,
        seed: u64,
        sink: S,
    ) -> Self {
        let catalog = match catalog.validate() {
            Ok(()) => catalog,
            Err(err) => {
                log::warn!("Invalid catalog, using built-in tables: {err:#}");
                Arc::new(Catalog::default())
            }
        };
        let area = match area.validate() {
            Ok(()) => area,
            Err(err) => {
                log::warn!("Unplayable area, using the default: {err:#}");
                PlayArea::default()
            }
        };
        let state = Self::level_defaults(&catalog, 1, area, weapon);
        Self {
            catalog,
            area,
            weapon,
            rng: Pcg32::seed_from_u64(seed),
            state,
            sink,
        }
    }

    fn level_defaults(
        catalog: &Catalog,
        level_number: u32,
        area: PlayArea,
        weapon: WeaponKind,
    ) -> GameState {
        // Validated catalogs always have the level; an unknown one never completes
        let target = catalog
            .level(level_number)
            .map_or(u32::MAX, |level| level.progress_target);
        GameState::with_target(level_number, target, area, weapon)
    }

    /// Replace the state with fresh defaults for `level_number`, carrying the
    /// session's percentage earned and entity ID counter
    fn load_level(&mut self, level_number: u32, percentage_earned: u32) {
        let mut next = Self::level_defaults(&self.catalog, level_number, self.area, self.weapon);
        next.percentage_earned = percentage_earned;
        next.continue_ids_from(&self.state);
        self.state = next;
    }

    // === Session control ===

    /// Back to level 1 with nothing earned
    pub fn reset_game(&mut self) {
        log::info!("Starting new game");
        self.load_level(1, 0);
    }

    /// Replay the current level, keeping the percentage earned
    pub fn restart_level(&mut self) {
        let level = self.state.current_level;
        log::info!("Restarting level {level}");
        self.load_level(level, self.state.percentage_earned);
    }

    /// Move on to the next level, wrapping to level 1 after the last one
    pub fn go_to_next_level(&mut self) {
        let next = self.state.current_level + 1;
        let earned = self.state.percentage_earned;
        if self.catalog.has_level(next) {
            log::info!("Advancing to level {next}");
            self.load_level(next, earned);
        } else {
            log::info!("All levels cleared ({earned}% earned), back to level 1");
            self.load_level(1, earned);
        }
    }

    // === Input ===

    /// Step the player one move in `dir`
    pub fn move_player(&mut self, dir: Direction) {
        self.state.player.step(dir, self.area);
    }

    /// Start an attack window. Ignored while the weapon is cooling down.
    pub fn attack(&mut self) {
        let player = &mut self.state.player;
        if player.cooldown > 0 {
            return;
        }
        let weapon = self.catalog.weapon(player.weapon);
        player.attacking = true;
        player.cooldown = weapon.cooldown;
        player.struck.clear();
        self.sink.signal(GameEvent::AttackStarted);
    }

    /// Swap the player's weapon; later resets keep the choice
    pub fn equip_weapon(&mut self, kind: WeaponKind) {
        self.weapon = kind;
        self.state.player.weapon = kind;
    }

    // === Frame driver ===

    /// Advance the simulation by one tick
    pub fn advance(&mut self) {
        tick(
            &mut self.state,
            &self.catalog,
            self.area,
            &mut self.rng,
            &mut self.sink,
        );
    }

    // === Presentation ===

    /// Read-only snapshot of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tooling and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_level_complete(&self) -> bool {
        self.state.is_level_complete()
    }

    pub fn hud(&self) -> Hud {
        Hud::new(&self.state, &self.catalog)
    }

    pub fn level_config(&self) -> Option<&LevelConfig> {
        self.catalog.level(self.state.current_level)
    }

    pub fn weapon_config(&self) -> &WeaponConfig {
        self.catalog.weapon(self.state.player.weapon)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

//! Game state and core simulation types
//!
//! Everything the presentation layer reads after a tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{EnemyKind, LevelConfig, WeaponKind};
use crate::{PlayArea, Rect};

/// Session phase. The two terminal phases freeze `advance()` until a
/// reset, restart or level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
    LevelComplete,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Which way the player is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Move request from the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// May dip below zero on the tick that ends the game
    pub health: i32,
    pub facing: Facing,
    pub attacking: bool,
    pub weapon: WeaponKind,
    /// Ticks until the next attack is allowed
    pub cooldown: u32,
    /// Enemies already struck during the current attack window
    #[serde(default)]
    pub struck: Vec<u32>,
}

impl Player {
    /// Fresh player standing near the bottom center of the area
    pub fn spawn(area: PlayArea, weapon: WeaponKind) -> Self {
        Self {
            pos: Vec2::new(
                area.width / 2.0 - PLAYER_WIDTH / 2.0,
                area.height - PLAYER_SPAWN_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_MAX_HEALTH,
            facing: Facing::Right,
            attacking: false,
            weapon,
            cooldown: 0,
            struck: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Step one move in `dir`, clamped to the play area.
    ///
    /// Horizontal moves also turn the player; vertical moves keep facing.
    /// Bounds are applied max-then-min so a tiny area never panics.
    pub fn step(&mut self, dir: Direction, area: PlayArea) {
        let speed = PLAYER_MOVE_SPEED;
        match dir {
            Direction::Left => {
                self.pos.x = (self.pos.x - speed).max(0.0);
                self.facing = Facing::Left;
            }
            Direction::Right => {
                self.pos.x = (self.pos.x + speed).min(area.width - self.size.x);
                self.facing = Facing::Right;
            }
            Direction::Up => {
                self.pos.y = (self.pos.y - speed).max(area.height / 3.0);
            }
            Direction::Down => {
                self.pos.y =
                    (self.pos.y + speed).min(area.height - self.size.y - PLAYER_BOTTOM_MARGIN);
            }
        }
    }
}

/// A shopper walking down the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Pixels per tick, downward
    pub speed: f32,
}

impl Enemy {
    /// New enemy at full health with its type's stats
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(stats.size),
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health in [0, 1] for health bars
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Complete game state (the single source of truth)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// 1-based level number
    pub current_level: u32,
    pub level_progress: u32,
    pub level_progress_target: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Carried across level changes within a session
    pub percentage_earned: u32,
    pub phase: GamePhase,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Defaults for the start of `level_number`
    pub fn for_level(
        level_number: u32,
        level: &LevelConfig,
        area: PlayArea,
        weapon: WeaponKind,
    ) -> Self {
        Self::with_target(level_number, level.progress_target, area, weapon)
    }

    /// Defaults for a level with an explicit progress target
    pub fn with_target(
        level_number: u32,
        progress_target: u32,
        area: PlayArea,
        weapon: WeaponKind,
    ) -> Self {
        Self {
            player: Player::spawn(area, weapon),
            enemies: Vec::new(),
            score: 0,
            current_level: level_number,
            level_progress: 0,
            level_progress_target: progress_target,
            time_ticks: 0,
            percentage_earned: 0,
            phase: GamePhase::Playing,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Keep handing out fresh IDs after a reset so they stay unique per session
    pub fn continue_ids_from(&mut self, previous: &GameState) {
        self.next_id = self.next_id.max(previous.next_id);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_level_complete(&self) -> bool {
        self.phase == GamePhase::LevelComplete
    }
}

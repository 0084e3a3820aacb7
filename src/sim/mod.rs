//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `advance()` call is one tick, regardless of wall time
//! - Seeded RNG only
//! - No rendering, input device or audio dependencies; feedback leaves
//!   through an injected `FeedbackSink`

pub mod collision;
pub mod engine;
pub mod events;
pub mod state;
pub mod tick;

pub use collision::{attack_hits, rects_overlap};
pub use engine::Engine;
pub use events::{FeedbackSink, GameEvent, NullSink};
pub use state::{Direction, Enemy, Facing, GamePhase, GameState, Player};
pub use tick::{spawn_enemy, tick};

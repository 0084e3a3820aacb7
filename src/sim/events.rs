//! Discrete feedback signals emitted by the simulation.
//!
//! The engine never waits on a sink; implementations must return promptly
//! and keep their own failures to themselves.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// `attack()` opened a new attack window
    AttackStarted,
    /// An attack damaged an enemy
    EnemyHit,
    /// An enemy dropped to zero health and was removed
    EnemyKilled,
    /// At least one enemy touched the player this tick
    PlayerHit,
    GameOver,
    LevelComplete,
}

/// Receiver for game events (audio, haptics, telemetry, tests)
pub trait FeedbackSink {
    fn signal(&mut self, event: GameEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn signal(&mut self, _event: GameEvent) {}
}

/// Collects events in order
impl FeedbackSink for Vec<GameEvent> {
    fn signal(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Forwards to a channel; a hung-up receiver is ignored
impl FeedbackSink for Sender<GameEvent> {
    fn signal(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}

impl<S: FeedbackSink + ?Sized> FeedbackSink for Box<S> {
    fn signal(&mut self, event: GameEvent) {
        (**self).signal(event);
    }
}

impl<S: FeedbackSink + ?Sized> FeedbackSink for &mut S {
    fn signal(&mut self, event: GameEvent) {
        (**self).signal(event);
    }
}

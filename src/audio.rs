//! Audio feedback
//!
//! Turns simulation events into procedural sound cues - no external files
//! needed. Actual playback is delegated to a `SoundBackend`; whatever the
//! backend does, failures stop here and never reach the simulation.

use anyhow::Result;

use crate::settings::Settings;
use crate::sim::{FeedbackSink, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Weapon swing
    Attack,
    /// Weapon connects with a shopper
    Hit,
    GameOver,
    LevelComplete,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One note of a procedural cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds after the cue starts
    pub delay: f32,
    pub duration: f32,
    pub waveform: Waveform,
}

const fn tone(freq: f32, delay: f32, duration: f32, waveform: Waveform) -> Tone {
    Tone {
        freq,
        delay,
        duration,
        waveform,
    }
}

impl SoundEffect {
    /// Effect for an event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::AttackStarted => Some(SoundEffect::Attack),
            GameEvent::EnemyHit => Some(SoundEffect::Hit),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::LevelComplete => Some(SoundEffect::LevelComplete),
            GameEvent::EnemyKilled | GameEvent::PlayerHit => None,
        }
    }

    /// Mix level before master/sfx volume
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Attack => 0.5,
            SoundEffect::Hit => 0.3,
            SoundEffect::GameOver => 0.7,
            SoundEffect::LevelComplete => 0.6,
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Attack => ATTACK_TONES,
            SoundEffect::Hit => HIT_TONES,
            SoundEffect::GameOver => GAME_OVER_TONES,
            SoundEffect::LevelComplete => LEVEL_COMPLETE_TONES,
        }
    }

    /// Seconds until the last note of the cue ends
    pub fn length(self) -> f32 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f32::max)
    }
}

// === Procedural cues ===

/// Scanner beep
const ATTACK_TONES: &[Tone] = &[tone(1800.0, 0.0, 0.08, Waveform::Square)];

/// Soft thump
const HIT_TONES: &[Tone] = &[
    tone(150.0, 0.0, 0.1, Waveform::Sine),
    tone(90.0, 0.02, 0.1, Waveform::Triangle),
];

/// Sad descending
const GAME_OVER_TONES: &[Tone] = &[
    tone(400.0, 0.0, 0.4, Waveform::Sine),
    tone(350.0, 0.2, 0.4, Waveform::Sine),
    tone(300.0, 0.4, 0.4, Waveform::Sine),
    tone(200.0, 0.6, 0.4, Waveform::Sine),
];

/// Register chime
const LEVEL_COMPLETE_TONES: &[Tone] = &[
    tone(500.0, 0.0, 0.3, Waveform::Triangle),
    tone(600.0, 0.08, 0.3, Waveform::Triangle),
    tone(800.0, 0.16, 0.3, Waveform::Triangle),
    tone(1000.0, 0.24, 0.3, Waveform::Sawtooth),
];

/// Something that can play a cue. Must not block.
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32, tones: &[Tone]) -> Result<()>;
}

/// Backend that only logs what it would play
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32, tones: &[Tone]) -> Result<()> {
        let notes: Vec<String> = tones
            .iter()
            .map(|t| format!("{:.0}Hz {:?} @{:.2}s", t.freq, t.waveform, t.delay))
            .collect();
        log::debug!(
            "sfx {effect:?} vol={volume:.2} len={:.2}s [{}]",
            effect.length(),
            notes.join(", ")
        );
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: Option<B>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    failures: u32,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
        }
    }

    /// Manager with no output device; every cue is dropped
    pub fn disabled() -> Self {
        log::warn!("No audio backend - audio disabled");
        Self {
            backend: None,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
            failures: 0,
        }
    }

    /// Apply volume and mute preferences
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
        self
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Backend failures swallowed so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = &mut self.backend else {
            return;
        };

        if let Err(err) = backend.play(effect, vol, effect.tones()) {
            self.failures += 1;
            log::warn!("Failed to play {effect:?}: {err:#}");
        }
    }
}

impl<B: SoundBackend> FeedbackSink for AudioManager<B> {
    fn signal(&mut self, event: GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayArea;
    use crate::sim::{Enemy, Engine, Facing};
    use crate::tuning::{Catalog, EnemyKind, WeaponKind};
    use anyhow::bail;
    use glam::Vec2;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
        notes: Vec<Tone>,
    }

    impl SoundBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32, tones: &[Tone]) -> Result<()> {
            self.played.push((effect, volume));
            self.notes.extend_from_slice(tones);
            Ok(())
        }
    }

    struct Broken;

    impl SoundBackend for Broken {
        fn play(&mut self, _effect: SoundEffect, _volume: f32, _tones: &[Tone]) -> Result<()> {
            bail!("asset missing")
        }
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.signal(GameEvent::AttackStarted);
        audio.signal(GameEvent::EnemyKilled);
        audio.signal(GameEvent::EnemyHit);
        audio.signal(GameEvent::PlayerHit);
        audio.signal(GameEvent::LevelComplete);

        let played = &audio.backend().unwrap().played;
        assert_eq!(
            played.iter().map(|(e, _)| *e).collect::<Vec<_>>(),
            vec![SoundEffect::Attack, SoundEffect::Hit, SoundEffect::LevelComplete]
        );
        assert_eq!(played[1].1, 0.3);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.signal(GameEvent::GameOver);
        assert!(audio.backend().unwrap().played.is_empty());
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let mut audio = AudioManager::new(Broken);
        audio.signal(GameEvent::AttackStarted);
        audio.signal(GameEvent::EnemyHit);
        assert_eq!(audio.failures(), 2);
    }

    #[test]
    fn test_backend_receives_the_cue() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.play(SoundEffect::GameOver);
        let notes = &audio.backend().unwrap().notes;
        assert_eq!(notes.as_slice(), SoundEffect::GameOver.tones());
        assert_eq!(notes[0].freq, 400.0);
        assert!((SoundEffect::GameOver.length() - 1.0).abs() < 1e-6);
        assert!((SoundEffect::Attack.length() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_failing_backend_never_stalls_the_engine() {
        let mut engine = Engine::with_seed(
            Arc::new(Catalog::default()),
            PlayArea::default(),
            WeaponKind::Scanner,
            5,
            AudioManager::new(Broken),
        );
        let id = {
            let state = engine.state_mut();
            state.player.facing = Facing::Right;
            let pos = state.player.pos + Vec2::new(state.player.size.x + 10.0, 0.0);
            let id = state.next_entity_id();
            let mut enemy = Enemy::new(id, EnemyKind::Regular, pos);
            enemy.speed = 0.0;
            enemy.health = 20;
            state.enemies.push(enemy);
            id
        };

        engine.attack();
        engine.advance();
        let state = engine.state();
        assert!(state.enemies.iter().all(|e| e.id != id));
        assert_eq!(state.score, 10);
        assert_eq!(state.level_progress, 5);
        // Attack and hit cues both failed
        assert_eq!(engine.sink().failures(), 2);

        for _ in 0..200 {
            engine.advance();
        }
        assert_eq!(engine.state().time_ticks, 201);
        assert!(!engine.state().enemies.is_empty());
    }

    #[test]
    fn test_settings_volume_applies() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default()).with_settings(&settings);
        audio.play(SoundEffect::GameOver);
        let (_, vol) = audio.backend().unwrap().played[0];
        assert!((vol - 0.175).abs() < 1e-6);
    }
}

//! Fixed timestep simulation tick
//!
//! Advances the game state by exactly one step. All randomness comes from
//! the injected RNG, so the same seed and call sequence replay identically.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::{attack_hits, rects_overlap};
use super::events::{FeedbackSink, GameEvent};
use super::state::{Enemy, GamePhase, GameState};
use crate::PlayArea;
use crate::consts::*;
use crate::tuning::{Catalog, LevelConfig};

/// Advance the game state by one tick
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    catalog: &Catalog,
    area: PlayArea,
    rng: &mut R,
    sink: &mut dyn FeedbackSink,
) {
    // Frozen until reset/restart/next level
    if state.phase.is_terminal() {
        return;
    }

    let Some(level) = catalog.level(state.current_level) else {
        log::warn!("No level config for level {}", state.current_level);
        return;
    };
    let weapon = catalog.weapon(state.player.weapon);

    state.time_ticks += 1;

    // Attack window lasts exactly as long as the cooldown
    let player = &mut state.player;
    if player.cooldown > 0 {
        player.cooldown -= 1;
    }
    if player.cooldown == 0 && player.attacking {
        player.attacking = false;
        player.struck.clear();
    }

    if state.time_ticks % level.spawn_interval == 0 && state.enemies.len() < level.max_enemies {
        if let Some(enemy) = spawn_enemy(state, level, area, rng) {
            log::debug!(
                "Spawned {} #{} at x={:.1} (tick {})",
                enemy.kind.as_str(),
                enemy.id,
                enemy.pos.x,
                state.time_ticks
            );
            state.enemies.push(enemy);
        }
    }

    // Move enemies, then resolve the swing against where they stood
    let player_rect = state.player.rect();
    let facing = state.player.facing;
    for enemy in &mut state.enemies {
        let hit_box = enemy.rect();
        enemy.pos.y += enemy.speed;

        if state.player.attacking
            && !state.player.struck.contains(&enemy.id)
            && attack_hits(&player_rect, facing, weapon.range, &hit_box)
        {
            enemy.health -= weapon.damage;
            state.player.struck.push(enemy.id);
            sink.signal(GameEvent::EnemyHit);
        }
    }

    // Dead enemies score; live ones past the bottom edge just leave
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(Enemy::is_dead);
    state.enemies = alive
        .into_iter()
        .filter(|e| e.pos.y < area.height)
        .collect();

    for enemy in &dead {
        state.score += KILL_SCORE;
        state.level_progress += KILL_PROGRESS;
        log::debug!("Defeated {} #{}", enemy.kind.as_str(), enemy.id);
        sink.signal(GameEvent::EnemyKilled);
    }

    // Each overlapping enemy chips away independently
    let player_rect = state.player.rect();
    let contacts = state
        .enemies
        .iter()
        .filter(|e| rects_overlap(&player_rect, &e.rect()))
        .count() as i32;
    if contacts > 0 {
        state.player.health -= CONTACT_DAMAGE * contacts;
        sink.signal(GameEvent::PlayerHit);
    }

    if state.player.health <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on level {} (score {}, tick {})",
            state.current_level,
            state.score,
            state.time_ticks
        );
        sink.signal(GameEvent::GameOver);
    } else if state.level_progress >= level.progress_target {
        state.percentage_earned += PERCENTAGE_PER_LEVEL * state.current_level;
        state.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} ({}) complete: score {}, earned {}%",
            state.current_level,
            level.name,
            state.score,
            state.percentage_earned
        );
        sink.signal(GameEvent::LevelComplete);
    }
}

/// Create a new enemy of a random permitted type at a random x along the top edge
pub fn spawn_enemy<R: Rng + ?Sized>(
    state: &mut GameState,
    level: &LevelConfig,
    area: PlayArea,
    rng: &mut R,
) -> Option<Enemy> {
    let kind = *level.enemy_types.choose(rng)?;
    let size = kind.stats().size;
    let max_x = (area.width - size).max(0.0);
    let x = rng.random_range(0.0..=max_x);
    let id = state.next_entity_id();
    Some(Enemy::new(id, kind, Vec2::new(x, 0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::NullSink;
    use crate::sim::state::Facing;
    use crate::tuning::{EnemyKind, WeaponKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Catalog, PlayArea, Pcg32) {
        let catalog = Catalog::default();
        let area = PlayArea::new(400.0, 800.0);
        let state = GameState::for_level(1, catalog.level(1).unwrap(), area, WeaponKind::Scanner);
        (state, catalog, area, Pcg32::seed_from_u64(12345))
    }

    #[test]
    fn test_tick_counts_and_spawns_on_interval() {
        let (mut state, catalog, area, mut rng) = setup();
        let mut events: Vec<GameEvent> = Vec::new();
        for _ in 0..119 {
            tick(&mut state, &catalog, area, &mut rng, &mut events);
        }
        assert_eq!(state.time_ticks, 119);
        assert!(state.enemies.is_empty());

        tick(&mut state, &catalog, area, &mut rng, &mut events);
        assert_eq!(state.enemies.len(), 1);
        let enemy = &state.enemies[0];
        assert_eq!(enemy.kind, EnemyKind::Regular);
        assert_eq!(enemy.health, enemy.max_health);
        // Spawned at the top and moved once
        assert_eq!(enemy.pos.y, 1.0);
        assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= 350.0);
    }

    #[test]
    fn test_spawn_respects_max_enemies() {
        let (mut state, catalog, area, mut rng) = setup();
        for _ in 0..5 {
            let id = state.next_entity_id();
            state
                .enemies
                .push(Enemy::new(id, EnemyKind::Regular, Vec2::new(0.0, 0.0)));
        }
        state.time_ticks = 119;
        tick(&mut state, &catalog, area, &mut rng, &mut NullSink);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_spawn_uses_level_types() {
        let (mut state, catalog, area, mut rng) = setup();
        let level = catalog.level(3).unwrap();
        let mut seen = Vec::new();
        for _ in 0..200 {
            let enemy = spawn_enemy(&mut state, level, area, &mut rng).unwrap();
            let stats = enemy.kind.stats();
            assert_eq!(enemy.speed, stats.speed);
            assert_eq!(enemy.size, Vec2::splat(stats.size));
            assert_eq!(enemy.pos.y, 0.0);
            assert!(enemy.pos.x <= area.width - stats.size);
            if !seen.contains(&enemy.kind) {
                seen.push(enemy.kind);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_enemy_leaving_bottom_is_dropped_without_score() {
        let (mut state, catalog, area, mut rng) = setup();
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, EnemyKind::Regular, Vec2::new(0.0, 799.5)));
        tick(&mut state, &catalog, area, &mut rng, &mut NullSink);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level_progress, 0);
    }

    #[test]
    fn test_contact_damage_per_enemy() {
        let (mut state, catalog, area, mut rng) = setup();
        let pos = state.player.pos;
        for _ in 0..3 {
            let id = state.next_entity_id();
            state.enemies.push(Enemy::new(id, EnemyKind::Regular, pos));
        }
        let mut events: Vec<GameEvent> = Vec::new();
        tick(&mut state, &catalog, area, &mut rng, &mut events);
        assert_eq!(state.player.health, 97);
        assert_eq!(events, vec![GameEvent::PlayerHit]);
    }

    #[test]
    fn test_swing_hits_each_enemy_once() {
        let (mut state, catalog, area, mut rng) = setup();
        state.player.facing = Facing::Right;
        state.player.attacking = true;
        state.player.cooldown = 45;
        let pos = state.player.pos + Vec2::new(70.0, 0.0);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, EnemyKind::Karen, pos));

        let mut events: Vec<GameEvent> = Vec::new();
        for _ in 0..10 {
            tick(&mut state, &catalog, area, &mut rng, &mut events);
        }
        assert_eq!(state.enemies[0].health, 60);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::EnemyHit).count(),
            1
        );
    }

    #[test]
    fn test_swing_resolves_against_pre_move_position() {
        let (mut state, catalog, area, mut rng) = setup();
        state.player.facing = Facing::Right;
        state.player.attacking = true;
        state.player.cooldown = 45;
        // Overlaps the player vertically now, but not after moving down 1px
        let player = state.player.rect();
        let pos = Vec2::new(player.right() + 10.0, player.bottom() - 0.5);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, EnemyKind::Regular, pos));

        let mut events: Vec<GameEvent> = Vec::new();
        tick(&mut state, &catalog, area, &mut rng, &mut events);
        assert_eq!(state.enemies[0].pos.y, player.bottom() + 0.5);
        assert_eq!(state.enemies[0].health, 30);
        assert_eq!(events, vec![GameEvent::EnemyHit]);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_terminal_phase_freezes_tick() {
        let (mut state, catalog, area, mut rng) = setup();
        state.phase = GamePhase::LevelComplete;
        let before = state.clone();
        tick(&mut state, &catalog, area, &mut rng, &mut NullSink);
        assert_eq!(state, before);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed produce identical results
        let (mut state1, catalog, area, _) = setup();
        let mut state2 = state1.clone();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for _ in 0..1000 {
            tick(&mut state1, &catalog, area, &mut rng1, &mut NullSink);
            tick(&mut state2, &catalog, area, &mut rng2, &mut NullSink);
        }

        assert_eq!(state1, state2);
    }
}

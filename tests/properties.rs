use std::sync::Arc;

use proptest::prelude::*;

use checkout_rush::PlayArea;
use checkout_rush::sim::{Direction, Engine, GamePhase, NullSink};
use checkout_rush::tuning::{Catalog, WeaponKind};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

#[derive(Debug, Clone)]
enum Action {
    Move(Direction),
    Attack,
    Advance,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => direction().prop_map(Action::Move),
        1 => Just(Action::Attack),
        4 => Just(Action::Advance),
    ]
}

proptest! {
    #[test]
    fn player_stays_inside_the_play_area(
        width in 100.0f32..2000.0,
        height in 300.0f32..2000.0,
        moves in prop::collection::vec(direction(), 0..300),
    ) {
        let area = PlayArea::new(width, height);
        let mut engine = Engine::with_seed(
            Arc::new(Catalog::default()),
            area,
            WeaponKind::Scanner,
            0,
            NullSink,
        );
        for dir in moves {
            engine.move_player(dir);
            let player = &engine.state().player;
            prop_assert!(player.pos.x >= 0.0);
            prop_assert!(player.pos.x <= width - player.size.x);
            prop_assert!(player.pos.y >= height / 3.0);
            prop_assert!(player.pos.y <= height - player.size.y - 50.0);
        }
    }

    #[test]
    fn walking_left_or_right_converges_to_the_edge(width in 100.0f32..2000.0) {
        let area = PlayArea::new(width, 800.0);
        let mut engine = Engine::with_seed(
            Arc::new(Catalog::default()),
            area,
            WeaponKind::Scanner,
            0,
            NullSink,
        );
        for _ in 0..250 {
            engine.move_player(Direction::Left);
        }
        prop_assert_eq!(engine.state().player.pos.x, 0.0);
        for _ in 0..250 {
            engine.move_player(Direction::Right);
        }
        let player = &engine.state().player;
        prop_assert_eq!(player.pos.x, width - player.size.x);
    }

    #[test]
    fn terminal_transitions_are_exclusive_and_sticky(
        seed in any::<u64>(),
        health in 1i32..=100,
        actions in prop::collection::vec(action(), 0..1500),
    ) {
        let mut engine = Engine::with_seed(
            Arc::new(Catalog::default()),
            PlayArea::default(),
            WeaponKind::Receipt,
            seed,
            NullSink,
        );
        engine.state_mut().player.health = health;

        for action in actions {
            match action {
                Action::Move(dir) => engine.move_player(dir),
                Action::Attack => engine.attack(),
                Action::Advance => {
                    let before = engine.state().clone();
                    engine.advance();
                    let after = engine.state();
                    if before.phase.is_terminal() {
                        prop_assert_eq!(after, &before);
                        continue;
                    }
                    prop_assert_eq!(after.time_ticks, before.time_ticks + 1);
                    prop_assert!(after.enemies.iter().all(|e| e.health > 0));
                    match after.phase {
                        GamePhase::Playing => {
                            prop_assert!(after.player.health > 0);
                            prop_assert!(after.level_progress < after.level_progress_target);
                        }
                        GamePhase::GameOver => prop_assert!(after.player.health <= 0),
                        GamePhase::LevelComplete => {
                            prop_assert!(after.player.health > 0);
                            prop_assert_eq!(
                                after.percentage_earned,
                                before.percentage_earned + 5 * after.current_level
                            );
                        }
                    }
                }
            }
        }
    }
}

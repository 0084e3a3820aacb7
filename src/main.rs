//! Checkout Rush headless runner
//!
//! Drives the engine through the fixed-timestep driver with a scripted
//! player and logs what happens. Usage:
//!
//! ```text
//! checkout-rush [settings.json] [--ticks N] [--weapon scanner|receipt|bag]
//! ```

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};

use checkout_rush::audio::{AudioManager, LogBackend};
use checkout_rush::sim::{Direction, Engine, Facing, FeedbackSink, attack_hits};
use checkout_rush::tuning::WeaponKind;
use checkout_rush::{FrameDriver, Settings};

const DEFAULT_TICKS: u64 = 60 * 60 * 5;

/// Simple bot: walk beside the lowest shopper, face it and swing when it is in reach
fn autopilot<S: FeedbackSink>(engine: &mut Engine<S>) {
    let state = engine.state();
    let player = &state.player;
    let Some(target) = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    else {
        return;
    };

    let area = engine.area();
    let gap = 20.0;
    let left_spot = target.pos.x - player.size.x - gap;
    let (spot, face) = if left_spot >= 0.0 {
        (left_spot, Facing::Right)
    } else {
        (target.pos.x + target.size.x + gap, Facing::Left)
    };
    let spot_y = target.pos.y.max(area.height / 3.0);

    let mut moves = Vec::with_capacity(2);
    if (player.pos.x - spot).abs() > 10.0 {
        let dir = if player.pos.x < spot {
            Direction::Right
        } else {
            Direction::Left
        };
        moves.push(dir);
    } else if player.facing != face {
        let dir = match face {
            Facing::Left => Direction::Left,
            Facing::Right => Direction::Right,
        };
        moves.push(dir);
    }
    if (player.pos.y - spot_y).abs() > 10.0 {
        let dir = if player.pos.y < spot_y {
            Direction::Down
        } else {
            Direction::Up
        };
        moves.push(dir);
    }

    let range = engine.weapon_config().range;
    let in_reach = state
        .enemies
        .iter()
        .any(|e| attack_hits(&player.rect(), player.facing, range, &e.rect()));

    for dir in moves {
        engine.move_player(dir);
    }
    if in_reach {
        engine.attack();
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut settings_path = None;
    let mut ticks = DEFAULT_TICKS;
    let mut weapon: Option<WeaponKind> = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = iter.next().context("--ticks needs a value")?;
                ticks = value
                    .parse()
                    .with_context(|| format!("invalid tick count: {value}"))?;
            }
            "--weapon" => {
                let value = iter.next().context("--weapon needs a value")?;
                weapon = Some(value.parse()?);
            }
            _ => settings_path = Some(arg.clone()),
        }
    }

    let mut settings = match &settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(weapon) = weapon {
        settings.weapon = weapon;
    }
    let catalog = Arc::new(settings.catalog()?);
    let audio = AudioManager::new(LogBackend).with_settings(&settings);
    let mut engine = Engine::new(catalog, &settings, audio);
    let mut driver = FrameDriver::new();

    log::info!(
        "Running {ticks} ticks on a {}x{} area (seed {})",
        settings.area.width,
        settings.area.height,
        settings.seed
    );

    let mut restarts = 0u32;
    let mut clears = 0u32;
    // Alternate 16ms/17ms frames like a real 60Hz display
    let frames = [0.016_f32, 0.017];
    let mut frame = 0usize;
    while driver.ticks() < ticks {
        autopilot(&mut engine);
        driver.update(&mut engine, frames[frame % frames.len()]);
        frame += 1;

        if engine.is_level_complete() {
            clears += 1;
            let hud = engine.hud();
            log::info!(
                "Cleared {} with score {} ({}% earned)",
                hud.level_name,
                hud.score,
                hud.percentage_earned
            );
            engine.go_to_next_level();
        } else if engine.is_game_over() {
            restarts += 1;
            engine.restart_level();
        }
    }

    log::info!("Done: {clears} levels cleared, {restarts} restarts");
    println!("{}", serde_json::to_string_pretty(&engine.hud())?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

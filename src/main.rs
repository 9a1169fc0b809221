use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use platformer_locomotion::engine::game_loop::GameLoop;
use platformer_locomotion::engine::input::Action;
use platformer_locomotion::engine::physics::{body::presets, PhysicsWorld};
use platformer_locomotion::game::characters::{
    AnimationSignals, AnimationSink, CharacterBuilder, CharacterId, CharacterManager,
    CharacterStats,
};

/// Length of the scripted run in frames
const DEMO_FRAMES: u64 = 900;

/// Player slot driving the hero
const HERO_PLAYER: usize = 0;

/// Build a small level: a long floor and a tall wall on the right
fn build_level(physics: &mut PhysicsWorld) {
    let floor = physics.add_rigid_body(presets::terrain_body(0.0, -0.5));
    physics.add_collider(presets::terrain_collider(60.0, 1.0), floor);

    let wall = physics.add_rigid_body(presets::terrain_body(8.5, 6.0));
    physics.add_collider(presets::terrain_collider(1.0, 12.0), wall);
}

/// Scripted inputs and events, keyed by frame number
fn scripted_events(
    frame: u64,
    id: CharacterId,
    manager: &mut CharacterManager,
    physics: &mut PhysicsWorld,
) {
    match frame {
        60 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().press(Action::MoveRight);
            }
        }
        90 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().press(Action::Sprint);
            }
        }
        120 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().release(Action::Sprint);
                hero.input_mut().press(Action::Jump);
            }
        }
        135 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().release(Action::Jump);
                hero.input_mut().press(Action::Jump);
            }
        }
        150 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().release(Action::Jump);
            }
        }
        // Sliding down the wall by now, kick off it
        200 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().press(Action::Jump);
            }
        }
        210 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.input_mut().release(Action::Jump);
                hero.input_mut().release(Action::MoveRight);
            }
        }
        300 => {
            manager.take_damage(id, 25, physics);
        }
        420 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.push(physics, Vec2::new(-4.0, 12.0), 0.4);
            }
        }
        540 => {
            if let Some(hero) = manager.get_by_player_mut(HERO_PLAYER) {
                hero.set_spawn_point(Vec2::new(-3.0, 2.0));
            }
            manager.take_damage(id, 1000, physics);
        }
        _ => {}
    }
}

/// Logs the animation signals of the last frame for every character
#[derive(Default)]
struct SignalLog {
    last: Vec<(CharacterId, AnimationSignals)>,
}

impl AnimationSink for SignalLog {
    fn receive(&mut self, id: CharacterId, signals: AnimationSignals) {
        self.last.push((id, signals));
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting platformer locomotion demo...");

    let mut physics = PhysicsWorld::new();
    build_level(&mut physics);

    let mut manager = CharacterManager::new();
    let hero = CharacterBuilder::new("Hero")
        .player_index(HERO_PLAYER)
        .stats(CharacterStats::standard())
        .fitted_sensor()
        .spawn_point(Vec2::new(0.0, 2.0));
    let id = manager
        .spawn(hero, &mut physics)
        .context("Failed to spawn the hero")?;

    let mut game_loop = GameLoop::new();
    let mut signals = SignalLog::default();

    // Uneven frame pacing so the frame and physics ticks drift apart
    let frame_times = [
        Duration::from_millis(14),
        Duration::from_millis(19),
        Duration::from_millis(16),
    ];

    for frame in 0..DEMO_FRAMES {
        scripted_events(frame, id, &mut manager, &mut physics);

        let steps = game_loop.advance(frame_times[(frame % 3) as usize]);

        signals.last.clear();
        manager.update(&mut physics, game_loop.frame_delta_time(), &mut signals);

        for _ in 0..steps {
            manager.fixed_update(&mut physics, game_loop.fixed_timestep());
            physics.step();
        }

        if frame % 60 == 0 {
            let hero = manager.get(id).context("Hero disappeared")?;
            let position = hero.position(&physics).unwrap_or_default();
            info!(
                "frame {:>4} | {:>5.1} fps | {:<15} | pos ({:>6.2}, {:>5.2}) | hp {:>3} | stamina {:>5.1} | fade {:.2}",
                game_loop.frame_count(),
                game_loop.fps(),
                hero.state().name(),
                position.x,
                position.y,
                hero.health().current(),
                hero.agent().stamina().current(),
                manager.fade_alpha(),
            );
            if let Some((_, last)) = signals.last.first() {
                log::debug!("signals: {:?}", last);
            }
        }
    }

    info!(
        "Demo finished: {} frames, {} physics steps",
        game_loop.frame_count(),
        game_loop.update_count()
    );

    Ok(())
}

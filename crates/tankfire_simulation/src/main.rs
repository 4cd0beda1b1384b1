//! Headless симуляция TANKFIRE
//!
//! Один вражеский танк против неподвижного игрока за стеной.
//! Usage: tankfire_simulation [config.json] [--seed N]

use std::path::PathBuf;
use std::time::Duration;

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use tankfire_simulation::debug_overlay::log_debug_overlays;
use tankfire_simulation::perception::ObstacleShape;
use tankfire_simulation::{
    create_headless_app, log_error, log_info, player_tank_bundle, spawn_enemy_tank, ShellFired,
    StaticObstacles, TankAIConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tankfire_simulation")]
#[command(about = "Headless enemy tank AI simulation", long_about = None)]
struct Args {
    /// JSON файл с TankAIConfig (частичный override defaults)
    config: Option<PathBuf>,

    /// Seed для DeterministicRng
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match TankAIConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => TankAIConfig::default(),
    };
    let seed = args.seed;

    let mut app = create_headless_app(seed);
    log_info(&format!("Starting TANKFIRE headless simulation (seed: {})", seed));

    // Фиксированный шаг кадра: один physics tick на кадр
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));
    app.insert_resource(
        StaticObstacles::new()
            .with(ObstacleShape::rect_centered(Vec2::new(0.0, 6.0), Vec2::new(8.0, 1.0)))
            .with(ObstacleShape::Circle {
                center: Vec2::new(-6.0, -4.0),
                radius: 1.5,
            }),
    );

    app.world_mut().spawn(player_tank_bundle(Vec2::new(0.0, 12.0), 90.0));
    if let Err(err) = spawn_enemy_tank(app.world_mut(), Vec2::ZERO, 0.0, config) {
        log_error(&err.to_string());
        std::process::exit(1);
    }

    let mut cursor = EventCursor::<ShellFired>::default();
    let mut shells = 0usize;

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        let events = app.world().resource::<Events<ShellFired>>();
        shells += cursor.read(events).count();

        if tick % 100 == 0 {
            log_info(&format!("Tick {}: {} shells fired", tick, shells));
            log_debug_overlays(app.world_mut());
        }
    }

    log_info(&format!("Simulation complete! {} shells fired", shells));
}

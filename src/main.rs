//! Headless entry point: plays a few levels with the autopilot.

use tracing_subscriber::EnvFilter;

use labyrinth::config::GameConfig;
use labyrinth::sim::autopilot;
use labyrinth::sim::game::Game;
use labyrinth::sim::words::Offline;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load();
    let (levels, max_ms) = (config.demo.levels, config.demo.max_ms);
    tracing::info!(seed = ?config.seed, language = ?config.language, levels, "starting demo");

    let mut game = Game::new(config, Box::new(Offline));
    let summary = autopilot::run(&mut game, levels, max_ms);

    println!();
    println!("Labyrinth demo");
    println!("  Levels cleared : {}", summary.levels_cleared);
    println!("  Final level    : {}", summary.final_level);
    println!("  Letters        : {}", summary.letters);
    println!("  Deaths         : {}", summary.deaths);
    println!("  Shields used   : {}", summary.shields_used);
    println!("  Hunter kills   : {}", summary.kills);
    println!("  Purchases      : {}", summary.purchases);
    println!("  Game time      : {:.1}s", summary.elapsed_ms as f64 / 1000.0);
    println!("  Final score    : {}", summary.score);
    if let Some(err) = summary.error {
        println!("  Stopped on error: {err}");
        std::process::exit(1);
    }
}

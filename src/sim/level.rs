//! Level setup.
//!
//! ## Steps (entering `Loading`)
//!   1. Drop everything that belongs to the previous attempt
//!      (timers, pending respawn/completion, letters, hunter)
//!   2. Word + hint from the word source (built-in fallback on failure)
//!   3. Maze sized by level
//!   4. `word_len + spare` free cells: the first `word_len` get the letters
//!      in word order, the remainder is the hunter's spawn pool and the cell
//!      farthest from the entry wins
//!   5. `Playing` on success, `Error` otherwise
//!
//! Score, level, language and inventory are never touched here.

use crate::domain::entity::{Enemy, LetterItem};
use crate::domain::maze::{self, ENTRY};
use crate::domain::{rules, sampler};
use crate::error::SetupError;
use super::event::GameEvent;
use super::words::{self, WordSource};
use super::world::{Phase, WorldState};

/// (Re)build the current level. Preserves score, level and inventory.
pub fn init_level(world: &mut WorldState, source: &mut dyn WordSource) -> Vec<GameEvent> {
    world.phase = Phase::Loading;
    world.schedule.reset();
    world.letters.clear();
    world.collected.clear();
    world.player = ENTRY;
    world.enemy = Enemy::new();
    world.error = None;

    let result = build_level(world, source);
    world.restarting = false;

    match result {
        Ok(()) => {
            world.phase = Phase::Playing;
            world.schedule.input.arm(world.config.timing.input_tick_ms);
            world.rearm_enemy_timer();
            tracing::info!(
                level = world.level,
                size = world.maze.width(),
                word_len = world.letters.len(),
                enemy = ?world.enemy.pos,
                "level ready"
            );
            vec![GameEvent::LevelStarted { level: world.level, word_len: world.letters.len() }]
        }
        Err(e) => {
            tracing::error!(level = world.level, "level setup failed: {e}");
            world.phase = Phase::Error;
            world.error = Some(e.to_string());
            vec![GameEvent::SetupFailed { reason: e.to_string() }]
        }
    }
}

fn build_level(world: &mut WorldState, source: &mut dyn WordSource) -> Result<(), SetupError> {
    let level = world.level;
    let length = rules::word_length_for_level(level);
    let entry = words::resolve_word(source, level, world.language, length, &mut world.rng)?;

    let rules_cfg = &world.config.rules;
    let side = rules::maze_side_for_level(level, rules_cfg.base_maze_size, rules_cfg.max_maze_size);
    let spare = rules_cfg.spare_positions;
    let grid = maze::generate(side, side, &mut world.rng);

    let chars: Vec<char> = entry.word.chars().collect();
    let spots = sampler::free_positions(&grid, chars.len() + spare, &mut world.rng);
    if spots.len() < chars.len() {
        return Err(SetupError::TooFewCells { needed: chars.len(), available: spots.len() });
    }

    let (letter_spots, spawn_pool) = spots.split_at(chars.len());
    world.letters = chars.iter().zip(letter_spots).enumerate()
        .map(|(id, (&ch, &pos))| LetterItem::new(id, ch, pos))
        .collect();
    if let Some(spawn) = sampler::furthest(spawn_pool, ENTRY) {
        world.enemy.spawn(spawn);
    }

    world.maze = grid;
    world.target_word = entry.word;
    world.hint = entry.hint;
    Ok(())
}

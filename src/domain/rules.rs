//! Level sizing, hunter cadence and line-of-fire rules.
//!
//! Pure functions, no side effects. These encode "what is legal" and
//! "how big / how fast" without performing anything.
//!
//! ## Pistol Line of Fire
//!   same cell                      → NotAligned
//!   share neither row nor column   → NotAligned
//!   any wall strictly between      → Blocked
//!   otherwise                      → Clear
//!
//! ## Maze Growth
//! side = min(base + 2 * floor((level - 1) / 2), max)
//! → grows by two cells every two levels, capped.

use super::maze::{Maze, Position};

/// Outcome of a line-of-fire check between shooter and target.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineOfFire {
    Clear,
    Blocked,
    NotAligned,
}

/// Maze side length for a level (before odd normalization).
pub fn maze_side_for_level(level: u32, base: usize, max: usize) -> usize {
    let growth = (level.saturating_sub(1) / 2) as usize * 2;
    (base + growth).min(max)
}

/// Word length requested from the word source for a level: 5 to 8 letters.
pub fn word_length_for_level(level: u32) -> usize {
    (5 + (level / 2) as usize).min(8)
}

/// Milliseconds between hunter steps at a given speed multiplier.
pub fn enemy_interval_ms(speed: f64, base_ms: u64, min_ms: u64) -> u64 {
    let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
    let interval = (base_ms as f64 / speed).round() as u64;
    interval.max(min_ms)
}

/// Can a shot travel from `from` to `to` along a row or column?
/// Endpoints are not checked; only the cells strictly between them.
pub fn line_of_fire(maze: &Maze, from: Position, to: Position) -> LineOfFire {
    if from == to { return LineOfFire::NotAligned; }
    if from.x == to.x {
        let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
        let blocked = (lo + 1..hi).any(|y| maze.cell_at(Position::new(from.x, y)).blocks_shot());
        if blocked { LineOfFire::Blocked } else { LineOfFire::Clear }
    } else if from.y == to.y {
        let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
        let blocked = (lo + 1..hi).any(|x| maze.cell_at(Position::new(x, from.y)).blocks_shot());
        if blocked { LineOfFire::Blocked } else { LineOfFire::Clear }
    } else {
        LineOfFire::NotAligned
    }
}

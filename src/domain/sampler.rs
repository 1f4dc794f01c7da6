//! Free-cell sampling for letter and hunter placement.
//!
//! Pure functions over a borrowed maze. The only state they touch is the
//! injected rng.

use rand::seq::SliceRandom;
use rand::Rng;

use super::maze::{Maze, Position, ENTRY};

/// Up to `count` distinct path cells, excluding the entry, in random order.
/// Returns every candidate when fewer than `count` exist.
pub fn free_positions<R: Rng + ?Sized>(maze: &Maze, count: usize, rng: &mut R) -> Vec<Position> {
    let mut spots: Vec<Position> = maze.path_cells().filter(|&p| p != ENTRY).collect();
    spots.shuffle(rng);
    spots.truncate(count);
    spots
}

/// The candidate farthest from `from` by Manhattan distance.
/// Ties keep the earliest candidate.
pub fn furthest(candidates: &[Position], from: Position) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;
    for &spot in candidates {
        let dist = manhattan(spot, from);
        match best {
            Some((_, d)) if dist <= d => {}
            _ => best = Some((spot, dist)),
        }
    }
    best.map(|(spot, _)| spot)
}

pub fn manhattan(a: Position, b: Position) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

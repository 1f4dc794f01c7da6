//! Hunter AI: weighted shortest-path pursuit.
//!
//! Uniform-cost search (Dijkstra) over the 4-connected path graph. Stepping
//! into an ordinary corridor costs `STEP_COST`; stepping onto a cell in the
//! penalized set (uncollected letters) costs `STEP_COST + LETTER_PENALTY`,
//! unless that cell is the target. The hunter therefore walks around letters
//! when the detour is short, tramples them when it isn't, and can always
//! reach a player standing on one.
//!
//! Every queue entry carries the first step taken from `start`; the answer
//! is the first step recorded on the target's entry.
//!
//! Tie-break: among entries of equal cost the most recently pushed one pops
//! first, and neighbours are expanded up, down, left, right.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use super::maze::{Maze, Position};

pub const STEP_COST: u32 = 1;
pub const LETTER_PENALTY: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    cost: u32,
    seq: u64,
    pos: Position,
    first: Option<Position>,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lowest cost wins, then the newest push.
        other.cost.cmp(&self.cost).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The cell the mover should occupy next on its way to `target`.
/// Returns `start` when already there or when no route exists.
pub fn next_step(maze: &Maze, start: Position, target: Position, penalized: &[Position]) -> Position {
    if start == target { return start; }
    if !maze.contains(start) { return start; }

    let penalized: HashSet<Position> = penalized.iter().copied().collect();
    let mut best = vec![vec![u32::MAX; maze.width()]; maze.height()];
    let mut heap = BinaryHeap::with_capacity(64);
    let mut seq = 0u64;

    best[start.y][start.x] = 0;
    heap.push(Entry { cost: 0, seq, pos: start, first: None });

    while let Some(Entry { cost, pos, first, .. }) = heap.pop() {
        if pos == target {
            return first.unwrap_or(start);
        }
        if cost > best[pos.y][pos.x] { continue; } // stale

        for next in maze.open_neighbors(pos) {
            let new_cost = cost + step_cost(next, target, &penalized);
            if new_cost < best[next.y][next.x] {
                best[next.y][next.x] = new_cost;
                seq += 1;
                heap.push(Entry {
                    cost: new_cost,
                    seq,
                    pos: next,
                    first: first.or(Some(next)),
                });
            }
        }
    }

    start
}

fn step_cost(into: Position, target: Position, penalized: &HashSet<Position>) -> u32 {
    if into != target && penalized.contains(&into) {
        STEP_COST + LETTER_PENALTY
    } else {
        STEP_COST
    }
}

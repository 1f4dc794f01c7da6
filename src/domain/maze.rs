//! Maze grid and the carving generator.
//!
//! ## Lattice
//!
//! Odd width/height. Cells at odd (x, y) are "rooms"; cells between two rooms
//! are connectors. Carving starts fully walled and opens rooms plus the
//! connector that joins them, so the open cells always form a spanning tree
//! rooted at the entry (1,1): exactly one route between any two path cells.
//!
//! ## Carving order
//!
//! Randomized depth-first backtracking. Each visited room shuffles its four
//! two-step directions once, on entry, and tries them in that order. The
//! walk is iterative (explicit frame stack) so large mazes never hit the
//! call-stack limit, but the rng is consumed in exactly the order a recursive
//! carver would consume it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cell::Cell;

/// Player start and carving origin.
pub const ENTRY: Position = Position { x: 1, y: 1 };

/// Smallest grid that still has an interior room at (1,1).
const MIN_SIDE: usize = 3;

const CARVE_DIRS: [(i32, i32); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];
const STEP_DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Shift by (dx, dy). `None` when either coordinate would go negative;
    /// the upper bound is the maze's business.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Position> {
        let nx = self.x as i64 + dx as i64;
        let ny = self.y as i64 + dy as i64;
        if nx < 0 || ny < 0 { return None; }
        Some(Position { x: nx as usize, y: ny as usize })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Maze {
    /// A grid with every cell walled.
    pub fn walled(width: usize, height: usize) -> Self {
        Maze { cells: vec![vec![Cell::Wall; width]; height], width, height }
    }

    /// Build a maze from a text diagram. `'#'` is a wall, anything else a
    /// path. Rows shorter than the first are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut maze = Maze::walled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate().take(width) {
                if ch != '#' {
                    maze.cells[y][x] = Cell::Path;
                }
            }
        }
        maze
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Cell at `pos`; out of bounds reads as wall.
    #[inline]
    pub fn cell_at(&self, pos: Position) -> Cell {
        if self.contains(pos) {
            self.cells[pos.y][pos.x]
        } else {
            Cell::Wall
        }
    }

    #[inline]
    pub fn is_path(&self, pos: Position) -> bool {
        self.cell_at(pos).is_passable()
    }

    /// Open a cell. Out-of-bounds positions are ignored.
    pub fn carve(&mut self, pos: Position) {
        if self.contains(pos) {
            self.cells[pos.y][pos.x] = Cell::Path;
        }
    }

    /// All path cells in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate()
                .filter(|(_, c)| c.is_passable())
                .map(move |(x, _)| Position { x, y })
        })
    }

    /// Passable 4-neighbours of `pos`, in the order up, down, left, right.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        STEP_DIRS.iter().filter_map(move |&(dx, dy)| {
            pos.offset(dx, dy).filter(|&n| self.is_path(n))
        })
    }
}

// ══════════════════════════════════════════════════════════════
// Generation
// ══════════════════════════════════════════════════════════════

/// Round up to the next odd value, never below `MIN_SIDE`.
pub fn normalize_side(side: usize) -> usize {
    let side = side.max(MIN_SIDE);
    if side % 2 == 0 { side + 1 } else { side }
}

/// One suspended room on the carving stack.
struct Frame {
    room: Position,
    dirs: [(i32, i32); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(room: Position, rng: &mut R) -> Self {
        let mut dirs = CARVE_DIRS;
        dirs.shuffle(rng);
        Frame { room, dirs, next: 0 }
    }
}

/// Generate a perfect maze. Dimensions are normalized to odd values.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Maze {
    let width = normalize_side(width);
    let height = normalize_side(height);
    let mut maze = Maze::walled(width, height);

    maze.carve(ENTRY);
    let mut stack = vec![Frame::enter(ENTRY, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.dirs.len() {
            stack.pop();
            continue;
        }
        let (dx, dy) = frame.dirs[frame.next];
        frame.next += 1;
        let room = frame.room;

        let Some(target) = room.offset(dx, dy) else { continue };
        // Rooms stay strictly inside the outer wall ring.
        if target.x == 0 || target.y == 0 { continue; }
        if target.x >= width - 1 || target.y >= height - 1 { continue; }
        if maze.is_path(target) { continue; }

        let Some(between) = room.offset(dx / 2, dy / 2) else { continue };
        maze.carve(target);
        maze.carve(between);
        stack.push(Frame::enter(target, rng));
    }

    maze
}

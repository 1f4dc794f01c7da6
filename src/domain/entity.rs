//! Entities: letters, the hunter, the player's inventory.
//! State machines are minimal; transitions are driven from `sim::step`.

use super::maze::Position;

/// Movement direction (continuous while held, or one-shot intent).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    pub const ALL: [MoveDir; 4] = [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (0, -1),
            MoveDir::Down => (0, 1),
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
        }
    }

    /// Direction that turns `from` into the adjacent `to`.
    pub fn between(from: Position, to: Position) -> Option<MoveDir> {
        MoveDir::ALL.into_iter().find(|d| {
            let (dx, dy) = d.delta();
            from.offset(dx, dy) == Some(to)
        })
    }
}

/// Consumables sold in the shop.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ItemKind {
    Shield, // absorbs one hit
    Sword,  // kills the hunter on contact
    Pistol, // kills the hunter along a clear row/column
    Drill,  // opens one wall cell
}

/// Item counters. Survive level restarts; only a full game restart clears them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Inventory {
    pub shields: u32,
    pub swords: u32,
    pub pistols: u32,
    pub drills: u32,
}

impl Inventory {
    pub fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Shield => self.shields,
            ItemKind::Sword => self.swords,
            ItemKind::Pistol => self.pistols,
            ItemKind::Drill => self.drills,
        }
    }

    fn slot(&mut self, kind: ItemKind) -> &mut u32 {
        match kind {
            ItemKind::Shield => &mut self.shields,
            ItemKind::Sword => &mut self.swords,
            ItemKind::Pistol => &mut self.pistols,
            ItemKind::Drill => &mut self.drills,
        }
    }

    pub fn add(&mut self, kind: ItemKind) {
        *self.slot(kind) += 1;
    }

    /// Use one item. Returns false (and changes nothing) when none are left.
    pub fn consume(&mut self, kind: ItemKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 { return false; }
        *slot -= 1;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetterItem {
    pub id: usize,
    pub ch: char,
    pub pos: Position,
    pub collected: bool,
}

impl LetterItem {
    pub fn new(id: usize, ch: char, pos: Position) -> Self {
        LetterItem { id, ch, pos, collected: false }
    }
}

/// The hunter. Only exists on the board while `active`.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Option<Position>,
    pub active: bool,
    /// Multiplies move frequency. Starts at 1.0, grows with every kill.
    pub speed: f64,
}

impl Enemy {
    pub fn new() -> Self {
        Enemy { pos: None, active: false, speed: 1.0 }
    }

    pub fn spawn(&mut self, pos: Position) {
        self.pos = Some(pos);
        self.active = true;
    }

    /// Take the hunter off the board and make its next life faster.
    pub fn kill(&mut self, speed_increment: f64) {
        self.active = false;
        self.speed += speed_increment;
    }

    /// Active and standing on `pos`.
    pub fn is_at(&self, pos: Position) -> bool {
        self.active && self.pos == Some(pos)
    }

    /// Position while active.
    pub fn position(&self) -> Option<Position> {
        if self.active { self.pos } else { None }
    }
}

impl Default for Enemy {
    fn default() -> Self {
        Enemy::new()
    }
}

//! Cell types and their properties.
//! Properties are queried via methods, not stored as flags,
//! so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall, // Solid, drillable
    Path, // Walkable corridor
}

impl Cell {
    /// Can an entity occupy this cell?
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Path)
    }

    /// Can a drill turn this cell into a corridor?
    pub fn is_drillable(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Does this cell stop a pistol shot?
    pub fn blocks_shot(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Wall
    }
}

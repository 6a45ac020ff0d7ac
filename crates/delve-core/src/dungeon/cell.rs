//! Grid cell classification

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Classification of one grid unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Cell {
    /// Solid, unreachable space
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
}

impl Cell {
    /// Check if this can be walked on
    pub const fn is_walkable(&self) -> bool {
        matches!(self, Cell::Floor)
    }

    /// Get the display character for this cell
    pub const fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Floor => '.',
        }
    }
}

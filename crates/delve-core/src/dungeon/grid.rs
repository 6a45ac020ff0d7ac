//! Square cell grid with bounds-checked access and world-space transforms

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Cell;

/// Grid access errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {z}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, z: i32, size: usize },
}

/// A point on the world-space ground plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub z: f32,
}

impl WorldPoint {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Offsets of the Moore neighborhood
const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// `size` x `size` cell grid stored as one contiguous buffer
///
/// Cell `(x, z)` lives at index `x * size + z`. The dimensions are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cell_world_size: f32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell `Empty`
    pub fn new(size: usize, cell_world_size: f32) -> Self {
        Self {
            size,
            cell_world_size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_world_size(&self) -> f32 {
        self.cell_world_size
    }

    /// Check if `(x, z)` lies inside `[0, size)` on both axes
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.size && (z as usize) < self.size
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if !self.in_bounds(x, z) {
            return None;
        }
        Some(x as usize * self.size + z as usize)
    }

    /// Read a cell, `None` when out of bounds
    pub fn get(&self, x: i32, z: i32) -> Option<Cell> {
        self.index(x, z).map(|idx| self.cells[idx])
    }

    /// Write a cell
    pub fn set(&mut self, x: i32, z: i32, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, z).ok_or(GridError::OutOfBounds {
            x,
            z,
            size: self.size,
        })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Write a cell, skipping out-of-bounds coordinates
    pub(crate) fn put(&mut self, x: i32, z: i32, cell: Cell) {
        if let Some(idx) = self.index(x, z) {
            self.cells[idx] = cell;
        }
    }

    /// Set a cell to Floor, skipping out-of-bounds coordinates
    pub(crate) fn carve_floor(&mut self, x: i32, z: i32) {
        self.put(x, z, Cell::Floor);
    }

    /// Set a cell to Wall unless it is already Floor, skipping out-of-bounds
    /// coordinates
    pub(crate) fn carve_wall(&mut self, x: i32, z: i32) {
        if let Some(idx) = self.index(x, z)
            && self.cells[idx] != Cell::Floor
        {
            self.cells[idx] = Cell::Wall;
        }
    }

    /// Convert a grid coordinate to world space: `(coord - size/2) * cell_world_size`
    pub fn cell_to_world(&self, x: i32, z: i32) -> WorldPoint {
        let half = self.size as f32 / 2.0;
        WorldPoint::new(
            (x as f32 - half) * self.cell_world_size,
            (z as f32 - half) * self.cell_world_size,
        )
    }

    /// Convert a world-space position to the nearest grid coordinate
    ///
    /// Returns `None` if the position falls outside the grid.
    pub fn world_to_cell(&self, world_x: f32, world_z: f32) -> Option<(i32, i32)> {
        if !world_x.is_finite() || !world_z.is_finite() {
            return None;
        }
        let half = self.size as f32 / 2.0;
        let x = (world_x / self.cell_world_size + half).round() as i32;
        let z = (world_z / self.cell_world_size + half).round() as i32;
        self.in_bounds(x, z).then_some((x, z))
    }

    /// Check if the grid cell under a world-space position is Floor
    pub fn is_position_walkable(&self, world_x: f32, world_z: f32) -> bool {
        self.world_to_cell(world_x, world_z)
            .and_then(|(x, z)| self.get(x, z))
            .is_some_and(|cell| cell.is_walkable())
    }

    /// In-bounds Moore neighbors of `(x, z)`
    pub fn neighbors8(&self, x: i32, z: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        MOORE
            .iter()
            .map(move |(dx, dz)| (x + dx, z + dz))
            .filter(move |&(nx, nz)| self.in_bounds(nx, nz))
    }

    /// Iterate over every cell as `(x, z, cell)`
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            ((idx / self.size) as i32, (idx % self.size) as i32, cell)
        })
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}

/// Rows are z, columns are x
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in 0..self.size as i32 {
            let row: String = (0..self.size as i32)
                .map(|x| self.get(x, z).unwrap_or_default().symbol())
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

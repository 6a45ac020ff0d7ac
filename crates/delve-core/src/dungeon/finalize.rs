//! Layout finalization: wall inference and spawn/exit selection

use crate::error::GenerationError;

use super::corridor::ConnectedLayout;
use super::grid::WorldPoint;
use super::room::Room;
use super::{Cell, Grid};

/// Output of finalization
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedLayout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub player_spawn: WorldPoint,
    pub exit: WorldPoint,
}

/// Turn every Empty Moore neighbor of a Floor cell into Wall
///
/// Must run once, after all carving.
pub fn infer_walls(grid: &mut Grid) {
    let mut enclose = Vec::new();
    for (x, z, cell) in grid.iter() {
        if cell != Cell::Floor {
            continue;
        }
        for (nx, nz) in grid.neighbors8(x, z) {
            if grid.get(nx, nz) == Some(Cell::Empty) {
                enclose.push((nx, nz));
            }
        }
    }

    for (x, z) in enclose {
        grid.put(x, z, Cell::Wall);
    }
}

/// Closes the grid and picks the spawn and exit points
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutFinalizer;

impl LayoutFinalizer {
    /// Spawn is the first room's center, exit the last room's center
    pub fn finalize(&self, connected: ConnectedLayout) -> Result<FinalizedLayout, GenerationError> {
        let ConnectedLayout {
            mut grid, rooms, ..
        } = connected;

        infer_walls(&mut grid);

        let (first, last) = match (rooms.first(), rooms.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(GenerationError::NoRooms),
        };
        let player_spawn = grid.cell_to_world(first.center_x, first.center_z);
        let exit = grid.cell_to_world(last.center_x, last.center_z);

        Ok(FinalizedLayout {
            grid,
            rooms,
            player_spawn,
            exit,
        })
    }
}

//! Enemy spawn placement
//!
//! Every room between the spawn room and the exit room gets one to three
//! enemies depending on its area, each at an independent random cell at least
//! [`ENEMY_WALL_MARGIN`] cells from the room edge.

use log::debug;
use thiserror::Error;

use crate::rng::DungeonRng;

use super::Grid;
use super::grid::WorldPoint;
use super::room::Room;

/// Cells kept free between an enemy and the room edge
pub const ENEMY_WALL_MARGIN: i32 = 2;

/// Room area per enemy
const AREA_PER_ENEMY: i32 = 15;

const MIN_ENEMIES_PER_ROOM: i32 = 1;
const MAX_ENEMIES_PER_ROOM: i32 = 3;

/// Element placement errors, recovered by skipping the room
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementError {
    #[error("room {room_id} ({width}x{height}) is too small for enemy placement")]
    DegenerateRoom {
        room_id: usize,
        width: i32,
        height: i32,
    },
}

/// Enemies for a room: `clamp(area / 15, 1, 3)`
pub fn enemy_count(room: &Room) -> usize {
    (room.area() / AREA_PER_ENEMY).clamp(MIN_ENEMIES_PER_ROOM, MAX_ENEMIES_PER_ROOM) as usize
}

/// Rooms that can hold enemies: all but the first and the last
pub fn interior_rooms(rooms: &[Room]) -> &[Room] {
    if rooms.len() <= 2 {
        return &[];
    }
    &rooms[1..rooms.len() - 1]
}

/// Places enemy spawn points in interior rooms
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementPlacer;

impl ElementPlacer {
    /// Sample the enemies of one room as grid cells
    ///
    /// Offsets are drawn from `[2, side - 2)` on each axis.
    pub fn sample_room(
        &self,
        room: &Room,
        rng: &mut DungeonRng,
    ) -> Result<Vec<(i32, i32)>, ElementError> {
        let max_x = room.width - ENEMY_WALL_MARGIN;
        let max_z = room.height - ENEMY_WALL_MARGIN;
        if max_x <= ENEMY_WALL_MARGIN || max_z <= ENEMY_WALL_MARGIN {
            return Err(ElementError::DegenerateRoom {
                room_id: room.id,
                width: room.width,
                height: room.height,
            });
        }

        Ok((0..enemy_count(room))
            .map(|_| {
                let offset_x = rng.range(ENEMY_WALL_MARGIN, max_x);
                let offset_z = rng.range(ENEMY_WALL_MARGIN, max_z);
                (room.x + offset_x, room.z + offset_z)
            })
            .collect())
    }

    /// Enemy spawn points for every interior room, in world space
    ///
    /// Rooms too small to sample are skipped.
    pub fn place(&self, grid: &Grid, rooms: &[Room], rng: &mut DungeonRng) -> Vec<WorldPoint> {
        let mut points = Vec::new();
        for room in interior_rooms(rooms) {
            match self.sample_room(room, rng) {
                Ok(cells) => {
                    points.extend(cells.into_iter().map(|(x, z)| grid.cell_to_world(x, z)));
                }
                Err(err) => debug!("skipping enemies: {}", err),
            }
        }
        points
    }
}

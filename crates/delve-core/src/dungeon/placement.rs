//! Room placement
//!
//! Rejection sampling of rectangular rooms around the grid center. Each
//! attempt draws a size and an origin; a candidate that leaves the grid or
//! comes within [`ROOM_BUFFER`] cells of a placed room is dropped.

use log::{debug, warn};

use crate::config::{DungeonConfig, PlacementBias};
use crate::error::GenerationError;
use crate::rng::DungeonRng;

use super::room::{ROOM_BUFFER, Room};
use super::{Cell, Grid};

/// Fraction of the half-grid covered by the first progressive attempt
const MIN_SPREAD: f64 = 0.25;

/// Output of room placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRooms {
    pub grid: Grid,
    /// Rooms in placement order
    pub rooms: Vec<Room>,
}

/// Places non-overlapping rooms into a grid
#[derive(Debug, Clone)]
pub struct RoomPlacer {
    size_min: i32,
    size_max: i32,
    dungeon_size: i32,
    target: usize,
    min_required: usize,
    max_attempts: u32,
    bias: PlacementBias,
}

impl RoomPlacer {
    pub fn from_config(config: &DungeonConfig) -> Self {
        Self {
            size_min: config.room_size_min as i32,
            size_max: config.room_size_max as i32,
            dungeon_size: config.dungeon_size as i32,
            target: config.placement_target() as usize,
            min_required: config.min_required_rooms as usize,
            max_attempts: config.max_attempts,
            bias: config.placement_bias,
        }
    }

    /// Half-extent of the origin sampling window for an attempt
    fn spread_window(&self, attempt: u32) -> f64 {
        let half = self.dungeon_size as f64 / 2.0;
        match self.bias {
            PlacementBias::Uniform => half,
            PlacementBias::Progressive => {
                let progress = (attempt as f64 / self.target.max(1) as f64).min(1.0);
                half * (MIN_SPREAD + (1.0 - MIN_SPREAD) * progress)
            }
        }
    }

    /// Draw one candidate room and keep it if it fits
    ///
    /// The returned room is numbered `placed.len()`.
    pub fn attempt(&self, rng: &mut DungeonRng, placed: &[Room], attempt: u32) -> Option<Room> {
        let width = rng.range(self.size_min, self.size_max);
        let height = rng.range(self.size_min, self.size_max);

        let window = self.spread_window(attempt);
        let center = self.dungeon_size as f64 / 2.0;
        let cx = center + (rng.uniform() * 2.0 - 1.0) * window;
        let cz = center + (rng.uniform() * 2.0 - 1.0) * window;
        let x = (cx - width as f64 / 2.0).floor() as i32;
        let z = (cz - height as f64 / 2.0).floor() as i32;

        let room = Room::new(placed.len(), x, z, width, height);
        if !room.fits_in(self.dungeon_size) {
            return None;
        }
        if placed.iter().any(|other| room.overlaps(other, ROOM_BUFFER)) {
            return None;
        }
        Some(room)
    }

    /// Place rooms until the target count or the attempt budget is reached
    ///
    /// Fails with [`GenerationError::InsufficientRooms`] when fewer than the
    /// required minimum could be placed.
    pub fn place(
        &self,
        mut grid: Grid,
        rng: &mut DungeonRng,
    ) -> Result<PlacedRooms, GenerationError> {
        let mut rooms: Vec<Room> = Vec::new();
        let mut attempts = 0;

        while rooms.len() < self.target && attempts < self.max_attempts {
            let candidate = self.attempt(rng, &rooms, attempts);
            attempts += 1;

            if let Some(room) = candidate {
                debug!(
                    "room {} placed at ({}, {}) size {}x{} after {} attempts",
                    room.id, room.x, room.z, room.width, room.height, attempts
                );
                carve_room(&mut grid, &room);
                rooms.push(room);
            }
        }

        if rooms.len() < self.min_required {
            warn!(
                "placed {} of {} required rooms in {} attempts",
                rooms.len(),
                self.min_required,
                attempts
            );
            return Err(GenerationError::InsufficientRooms {
                placed: rooms.len(),
                required: self.min_required,
                attempts,
            });
        }

        debug!("placed {} rooms in {} attempts", rooms.len(), attempts);
        Ok(PlacedRooms { grid, rooms })
    }
}

/// Mark a room's cells: border Wall, interior and corners Floor
pub fn carve_room(grid: &mut Grid, room: &Room) {
    for x in room.x..room.x + room.width {
        for z in room.z..room.z + room.height {
            let cell = if room.is_border(x, z) && !room.is_corner(x, z) {
                Cell::Wall
            } else {
                Cell::Floor
            };
            grid.put(x, z, cell);
        }
    }
}

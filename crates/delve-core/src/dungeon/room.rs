//! Rectangular rooms

use serde::{Deserialize, Serialize};

/// Minimum number of cells between two rooms
pub const ROOM_BUFFER: i32 = 2;

/// Rectangle of the grid claimed by a room, border walls included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    /// Placement index
    pub id: usize,
    /// X coordinate of the room origin (left edge)
    pub x: i32,
    /// Z coordinate of the room origin (top edge)
    pub z: i32,
    pub width: i32,
    pub height: i32,
    pub center_x: i32,
    pub center_z: i32,
}

impl Room {
    /// Create a room; the center is derived from the rectangle
    pub fn new(id: usize, x: i32, z: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            z,
            width,
            height,
            center_x: x + width / 2,
            center_z: z + height / 2,
        }
    }

    /// Get center cell of room
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_z)
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Check if this room intersects `other` expanded by `buffer` cells on
    /// every side
    pub fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        let ox1 = other.x - buffer;
        let oz1 = other.z - buffer;
        let ox2 = other.x + other.width + buffer;
        let oz2 = other.z + other.height + buffer;

        !(self.x + self.width <= ox1
            || self.x >= ox2
            || self.z + self.height <= oz1
            || self.z >= oz2)
    }

    /// Check if the whole rectangle lies within `[0, size)` on both axes
    pub fn fits_in(&self, size: i32) -> bool {
        self.x >= 0 && self.z >= 0 && self.x + self.width <= size && self.z + self.height <= size
    }

    /// Check if point is inside the room rectangle
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.x && x < self.x + self.width && z >= self.z && z < self.z + self.height
    }

    /// Check if point is inside the room, excluding the border ring
    pub fn interior_contains(&self, x: i32, z: i32) -> bool {
        x > self.x && x < self.x + self.width - 1 && z > self.z && z < self.z + self.height - 1
    }

    /// Check if `(x, z)` is one of the four corner cells
    pub fn is_corner(&self, x: i32, z: i32) -> bool {
        let right = self.x + self.width - 1;
        let bottom = self.z + self.height - 1;
        (x == self.x || x == right) && (z == self.z || z == bottom)
    }

    /// Check if `(x, z)` is on the border ring
    pub fn is_border(&self, x: i32, z: i32) -> bool {
        self.contains(x, z) && !self.interior_contains(x, z)
    }

    /// Squared distance from the room center to a point
    pub fn center_distance_sq(&self, x: f64, z: f64) -> f64 {
        let dx = self.center_x as f64 - x;
        let dz = self.center_z as f64 - z;
        dx * dx + dz * dz
    }
}

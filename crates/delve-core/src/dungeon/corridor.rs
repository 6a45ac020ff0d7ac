//! Corridor generation
//!
//! Rooms are ordered by distance from the grid center and joined in that
//! order (the primary chain), then a few random extra corridors add loops.
//! Every corridor is an L of two straight, walled segments.

use std::ops::RangeInclusive;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::rng::DungeonRng;

use super::Grid;
use super::placement::PlacedRooms;
use super::room::Room;

/// Upper bound on extra corridors per layout
pub const MAX_EXTRA_CORRIDORS: usize = 3;

/// Which leg of the L is carved first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along x at the first room's z, then along z at the second room's x
    XFirst,
    /// Along z at the first room's x, then along x at the second room's z
    ZFirst,
}

/// Why a corridor exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Consecutive rooms in center-distance order
    Chain,
    /// Random loop
    Extra,
}

/// A carved corridor between two rooms, by room id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorridorEdge {
    pub from: usize,
    pub to: usize,
    pub orientation: Orientation,
    pub kind: EdgeKind,
}

/// Output of corridor carving
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedLayout {
    pub grid: Grid,
    /// Rooms sorted by distance of their center from the grid center
    pub rooms: Vec<Room>,
    pub corridors: Vec<CorridorEdge>,
}

/// Number of extra corridors added for `room_count` rooms
pub fn extra_corridor_count(room_count: usize) -> usize {
    if room_count > 3 {
        MAX_EXTRA_CORRIDORS.min(room_count / 2)
    } else {
        0
    }
}

/// Sort rooms by ascending distance of their center from the grid center
///
/// The sort is stable: equidistant rooms keep their relative order.
pub fn sort_by_center_distance(rooms: &mut [Room], grid_size: usize) {
    let center = grid_size as f64 / 2.0;
    rooms.sort_by(|a, b| {
        a.center_distance_sq(center, center)
            .total_cmp(&b.center_distance_sq(center, center))
    });
}

/// Carves corridors between placed rooms
#[derive(Debug, Clone)]
pub struct CorridorConnector {
    corridor_width: i32,
}

impl CorridorConnector {
    pub fn new(corridor_width: u32) -> Self {
        Self {
            corridor_width: i32::try_from(corridor_width.max(1)).unwrap_or(i32::MAX),
        }
    }

    pub fn from_config(config: &DungeonConfig) -> Self {
        Self::new(config.corridor_width)
    }

    /// Offsets of the floor band around a corridor axis
    fn band(&self) -> (i32, i32) {
        (-(self.corridor_width - 1) / 2, self.corridor_width / 2)
    }

    /// Join every room, reordering them by distance from the grid center
    pub fn connect(&self, placed: PlacedRooms, rng: &mut DungeonRng) -> ConnectedLayout {
        let PlacedRooms {
            mut grid,
            mut rooms,
        } = placed;

        sort_by_center_distance(&mut rooms, grid.size());

        let mut corridors = Vec::with_capacity(rooms.len() + MAX_EXTRA_CORRIDORS);

        for pair in rooms.windows(2) {
            let orientation = self.join(&mut grid, &pair[0], &pair[1], rng);
            corridors.push(CorridorEdge {
                from: pair[0].id,
                to: pair[1].id,
                orientation,
                kind: EdgeKind::Chain,
            });
        }

        let extras = extra_corridor_count(rooms.len());
        for _ in 0..extras {
            let n = rooms.len() as u32;
            let a = rng.below(n) as usize;
            let mut b = rng.below(n - 1) as usize;
            if b >= a {
                b += 1;
            }
            let orientation = self.join(&mut grid, &rooms[a], &rooms[b], rng);
            corridors.push(CorridorEdge {
                from: rooms[a].id,
                to: rooms[b].id,
                orientation,
                kind: EdgeKind::Extra,
            });
        }

        debug!(
            "carved {} chain and {} extra corridors",
            rooms.len().saturating_sub(1),
            extras
        );

        ConnectedLayout {
            grid,
            rooms,
            corridors,
        }
    }

    /// Join two rooms center to center
    fn join(&self, grid: &mut Grid, a: &Room, b: &Room, rng: &mut DungeonRng) -> Orientation {
        let (x1, z1) = a.center();
        let (x2, z2) = b.center();
        self.carve(grid, x1, z1, x2, z2, rng)
    }

    /// Carve an L-shaped corridor from `(x1, z1)` to `(x2, z2)`
    ///
    /// Out-of-bounds cells are skipped.
    pub fn carve(
        &self,
        grid: &mut Grid,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
        rng: &mut DungeonRng,
    ) -> Orientation {
        let orientation = if rng.coin() {
            Orientation::XFirst
        } else {
            Orientation::ZFirst
        };
        self.carve_oriented(grid, x1, z1, x2, z2, orientation);
        orientation
    }

    /// Carve an L-shaped corridor with a fixed orientation
    pub fn carve_oriented(
        &self,
        grid: &mut Grid,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
        orientation: Orientation,
    ) {
        match orientation {
            Orientation::XFirst => {
                self.carve_along_x(grid, x1, x2, z1);
                self.carve_along_z(grid, z1, z2, x2);
            }
            Orientation::ZFirst => {
                self.carve_along_z(grid, z1, z2, x1);
                self.carve_along_x(grid, x1, x2, z2);
            }
        }
    }

    /// Straight segment parallel to the x axis at `z`
    fn carve_along_x(&self, grid: &mut Grid, xa: i32, xb: i32, z: i32) {
        let (lo, hi) = self.band();
        let start = xa.min(xb).saturating_add(lo);
        let end = xa.max(xb).saturating_add(hi);
        let span = clamp_to_grid(grid, start, end);
        let band = clamp_to_grid(grid, z.saturating_add(lo), z.saturating_add(hi));

        for x in span.clone() {
            for bz in band.clone() {
                grid.carve_floor(x, bz);
            }
        }
        for x in span {
            grid.carve_wall(x, z.saturating_add(lo).saturating_sub(1));
            grid.carve_wall(x, z.saturating_add(hi).saturating_add(1));
        }
    }

    /// Straight segment parallel to the z axis at `x`
    fn carve_along_z(&self, grid: &mut Grid, za: i32, zb: i32, x: i32) {
        let (lo, hi) = self.band();
        let start = za.min(zb).saturating_add(lo);
        let end = za.max(zb).saturating_add(hi);
        let span = clamp_to_grid(grid, start, end);
        let band = clamp_to_grid(grid, x.saturating_add(lo), x.saturating_add(hi));

        for z in span.clone() {
            for bx in band.clone() {
                grid.carve_floor(bx, z);
            }
        }
        for z in span {
            grid.carve_wall(x.saturating_add(lo).saturating_sub(1), z);
            grid.carve_wall(x.saturating_add(hi).saturating_add(1), z);
        }
    }
}

/// Intersection of `from..=to` with the grid's coordinate range
fn clamp_to_grid(grid: &Grid, from: i32, to: i32) -> RangeInclusive<i32> {
    let last = i32::try_from(grid.size()).unwrap_or(i32::MAX) - 1;
    from.max(0)..=to.min(last)
}

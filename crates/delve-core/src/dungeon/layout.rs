//! Generated dungeon layout

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;

use super::grid::WorldPoint;
use super::room::Room;
use super::{Cell, Grid};

/// A finished layout, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    /// Seed the layout was generated from
    pub seed: u64,
    pub config: DungeonConfig,
    pub grid: Grid,
    /// Rooms sorted by distance from the grid center; the first holds the
    /// spawn, the last the exit
    pub rooms: Vec<Room>,
    pub player_spawn: WorldPoint,
    pub exit: WorldPoint,
    pub enemy_spawns: Vec<WorldPoint>,
}

/// Cell and element counts for a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    pub rooms: usize,
    pub floor_cells: usize,
    pub wall_cells: usize,
    pub empty_cells: usize,
    pub enemies: usize,
}

impl DungeonLayout {
    /// Check if the grid cell under a world-space position is Floor
    pub fn is_position_walkable(&self, world_x: f32, world_z: f32) -> bool {
        self.grid.is_position_walkable(world_x, world_z)
    }

    pub fn spawn_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    pub fn exit_room(&self) -> Option<&Room> {
        self.rooms.last()
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            rooms: self.rooms.len(),
            floor_cells: self.grid.count(Cell::Floor),
            wall_cells: self.grid.count(Cell::Wall),
            empty_cells: self.grid.count(Cell::Empty),
            enemies: self.enemy_spawns.len(),
        }
    }

    /// Grid cell under a world-space point
    fn cell_of(&self, point: &WorldPoint) -> Option<(i32, i32)> {
        self.grid.world_to_cell(point.x, point.z)
    }
}

impl fmt::Display for LayoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rooms, {} floor, {} wall, {} empty cells, {} enemies",
            self.rooms, self.floor_cells, self.wall_cells, self.empty_cells, self.enemies
        )
    }
}

/// ASCII map: `@` spawn, `>` exit, `e` enemy, rows are z
impl fmt::Display for DungeonLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.grid.size();
        let mut rows: Vec<Vec<char>> = (0..size as i32)
            .map(|z| {
                (0..size as i32)
                    .map(|x| self.grid.get(x, z).unwrap_or_default().symbol())
                    .collect()
            })
            .collect();

        let mut mark = |point: &WorldPoint, symbol: char| {
            if let Some((x, z)) = self.cell_of(point) {
                rows[z as usize][x as usize] = symbol;
            }
        };
        for enemy in &self.enemy_spawns {
            mark(enemy, 'e');
        }
        mark(&self.exit, '>');
        mark(&self.player_spawn, '@');

        for row in rows {
            let line: String = row.into_iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// Holder for the current layout of a session
///
/// A new layout is only generated after the previous one is cleared.
#[derive(Debug, Clone, Default)]
pub struct DungeonSlot {
    current: Option<DungeonLayout>,
}

impl DungeonSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&DungeonLayout> {
        self.current.as_ref()
    }

    /// Drop the current layout
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Clear, then store the layout produced by `generate`
    ///
    /// On error the slot stays empty.
    pub fn regenerate<E>(
        &mut self,
        generate: impl FnOnce() -> Result<DungeonLayout, E>,
    ) -> Result<&DungeonLayout, E> {
        self.clear();
        let layout = generate()?;
        Ok(self.current.insert(layout))
    }
}

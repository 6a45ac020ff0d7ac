//! Dungeon layout system
//!
//! Contains the cell grid, rooms, and the generation stages.

mod cell;
mod corridor;
mod elements;
mod finalize;
mod generation;
mod grid;
mod layout;
mod placement;
mod room;

pub use cell::Cell;
pub use corridor::{
    ConnectedLayout, CorridorConnector, CorridorEdge, EdgeKind, MAX_EXTRA_CORRIDORS, Orientation,
    extra_corridor_count, sort_by_center_distance,
};
pub use elements::{ENEMY_WALL_MARGIN, ElementError, ElementPlacer, enemy_count, interior_rooms};
pub use finalize::{FinalizedLayout, LayoutFinalizer, infer_walls};
pub use generation::DungeonGenerator;
pub use grid::{Grid, GridError, WorldPoint};
pub use layout::{DungeonLayout, DungeonSlot, LayoutStats};
pub use placement::{PlacedRooms, RoomPlacer, carve_room};
pub use room::{ROOM_BUFFER, Room};

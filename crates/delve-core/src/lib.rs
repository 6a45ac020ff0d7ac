//! delve-core: seeded procedural dungeon layouts
//!
//! Produces a square grid of empty/wall/floor cells, a list of
//! non-overlapping rooms joined by L-shaped corridors, and the spawn, exit
//! and enemy points derived from them. Generation is a pure, synchronous
//! function of the configuration and the seed.
//!
//! ```
//! use delve_core::{DungeonConfig, DungeonGenerator};
//!
//! let layout = DungeonGenerator::new(DungeonConfig::default())
//!     .generate_seeded(7)
//!     .unwrap();
//! assert!(layout.is_position_walkable(layout.player_spawn.x, layout.player_spawn.z));
//! ```

pub mod config;
pub mod dungeon;

mod error;
mod rng;

pub use config::{ConfigError, Difficulty, DifficultyPreset, DungeonConfig, PlacementBias};
pub use dungeon::{DungeonGenerator, DungeonLayout, DungeonSlot};
pub use error::GenerationError;
pub use rng::DungeonRng;

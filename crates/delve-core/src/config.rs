//! Generator configuration
//!
//! Tunable parameters, difficulty presets and JSON config-file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Smallest room side that still leaves an interior inside the border walls
pub const MIN_ROOM_SIDE: u32 = 3;

/// Largest accepted grid side
pub const MAX_DUNGEON_SIZE: u32 = 4096;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// How candidate room origins are spread around the grid center
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlacementBias {
    /// The sampling window starts small around the center and widens with the
    /// attempt counter until it covers the whole grid
    #[default]
    Progressive,
    /// Every attempt samples from the whole grid
    Uniform,
}

/// Difficulty preset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Epic,
}

/// Values a difficulty preset stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub max_rooms: u32,
    pub room_size_max: u32,
    /// Suggested enemy count for consumers; the generator does not read it
    pub enemy_count_hint: u32,
}

impl Difficulty {
    pub fn preset(self) -> DifficultyPreset {
        let (max_rooms, room_size_max, enemy_count_hint) = match self {
            Difficulty::Easy => (5, 10, 1),
            Difficulty::Medium => (8, 12, 2),
            Difficulty::Hard => (12, 14, 3),
            Difficulty::Epic => (16, 16, 4),
        };
        DifficultyPreset {
            max_rooms,
            room_size_max,
            enemy_count_hint,
        }
    }
}

/// Dungeon generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    /// Smallest room side (inclusive)
    pub room_size_min: u32,
    /// Largest room side (exclusive)
    pub room_size_max: u32,
    pub corridor_width: u32,
    /// Room count at which placement stops early
    pub max_rooms: u32,
    /// Side of the square grid, in cells
    pub dungeon_size: u32,
    /// World units per grid cell
    pub cell_world_size: f32,
    /// Wall height in world units, for renderers
    pub wall_height: f32,
    /// Fewer rooms than this fails the generation
    pub min_required_rooms: u32,
    /// Candidate budget for room placement
    pub max_attempts: u32,
    pub placement_bias: PlacementBias,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            room_size_min: 5,
            room_size_max: 12,
            corridor_width: 2,
            max_rooms: 8,
            dungeon_size: 50,
            cell_world_size: 2.0,
            wall_height: 3.0,
            min_required_rooms: 3,
            max_attempts: 100,
            placement_bias: PlacementBias::Progressive,
        }
    }
}

impl DungeonConfig {
    /// Load a JSON config file; absent fields keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse a JSON config string; absent fields keep their defaults
    pub fn parse_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply a difficulty preset's room count and maximum room size
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        let preset = difficulty.preset();
        self.max_rooms = preset.max_rooms;
        self.room_size_max = preset.room_size_max;
        self
    }

    /// Room count at which placement stops
    pub fn placement_target(&self) -> u32 {
        self.max_rooms.max(self.min_required_rooms)
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dungeon_size == 0 {
            return Err(ConfigError::invalid("dungeon_size", "must be at least 1"));
        }
        if self.dungeon_size > MAX_DUNGEON_SIZE {
            return Err(ConfigError::invalid(
                "dungeon_size",
                format!("must be at most {}", MAX_DUNGEON_SIZE),
            ));
        }
        if self.room_size_min < MIN_ROOM_SIDE {
            return Err(ConfigError::invalid(
                "room_size_min",
                format!("must be at least {}", MIN_ROOM_SIDE),
            ));
        }
        if self.room_size_max <= self.room_size_min {
            return Err(ConfigError::invalid(
                "room_size_max",
                format!(
                    "must be greater than room_size_min ({}), got {}",
                    self.room_size_min, self.room_size_max
                ),
            ));
        }
        if self.room_size_min > self.dungeon_size {
            return Err(ConfigError::invalid(
                "room_size_min",
                format!(
                    "rooms of side {} cannot fit in a {}x{} grid",
                    self.room_size_min, self.dungeon_size, self.dungeon_size
                ),
            ));
        }
        // Sides are drawn from [min, max), so max may exceed the grid by one
        if self.room_size_max > self.dungeon_size + 1 {
            return Err(ConfigError::invalid(
                "room_size_max",
                format!(
                    "must be at most {} for a {}x{} grid, got {}",
                    self.dungeon_size + 1,
                    self.dungeon_size,
                    self.dungeon_size,
                    self.room_size_max
                ),
            ));
        }
        if self.corridor_width == 0 {
            return Err(ConfigError::invalid("corridor_width", "must be at least 1"));
        }
        if self.corridor_width > self.dungeon_size {
            return Err(ConfigError::invalid(
                "corridor_width",
                format!(
                    "must be at most the grid size ({}), got {}",
                    self.dungeon_size, self.corridor_width
                ),
            ));
        }
        if self.min_required_rooms == 0 {
            return Err(ConfigError::invalid("min_required_rooms", "must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("max_attempts", "must be at least 1"));
        }
        if !(self.cell_world_size.is_finite() && self.cell_world_size > 0.0) {
            return Err(ConfigError::invalid(
                "cell_world_size",
                "must be a positive finite number",
            ));
        }
        if !(self.wall_height.is_finite() && self.wall_height >= 0.0) {
            return Err(ConfigError::invalid(
                "wall_height",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

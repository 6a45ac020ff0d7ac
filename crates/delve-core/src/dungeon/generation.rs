//! Layout generation pipeline
//!
//! Stages run strictly in order, each taking the previous stage's output by
//! value: room placement, corridor carving, finalization, element placement.

use log::{info, trace};

use crate::config::DungeonConfig;
use crate::error::GenerationError;
use crate::rng::DungeonRng;

use super::Grid;
use super::corridor::CorridorConnector;
use super::elements::ElementPlacer;
use super::finalize::LayoutFinalizer;
use super::layout::DungeonLayout;
use super::placement::RoomPlacer;

/// Generates layouts from a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Generate a layout from a fresh RNG seeded with `seed`
    pub fn generate_seeded(&self, seed: u64) -> Result<DungeonLayout, GenerationError> {
        let mut rng = DungeonRng::new(seed);
        self.generate(&mut rng)
    }

    /// Generate a layout, drawing every random value from `rng`
    ///
    /// The configuration is validated before the first draw.
    pub fn generate(&self, rng: &mut DungeonRng) -> Result<DungeonLayout, GenerationError> {
        self.config.validate()?;

        let grid = Grid::new(self.config.dungeon_size as usize, self.config.cell_world_size);

        let placed = RoomPlacer::from_config(&self.config).place(grid, rng)?;
        let connected = CorridorConnector::from_config(&self.config).connect(placed, rng);
        for edge in &connected.corridors {
            trace!(
                "corridor {} -> {} ({:?}, {:?})",
                edge.from, edge.to, edge.kind, edge.orientation
            );
        }

        let finalized = LayoutFinalizer.finalize(connected)?;
        let enemy_spawns = ElementPlacer.place(&finalized.grid, &finalized.rooms, rng);

        info!(
            "generated dungeon from seed {}: {} rooms, {} enemies",
            rng.seed(),
            finalized.rooms.len(),
            enemy_spawns.len()
        );

        Ok(DungeonLayout {
            seed: rng.seed(),
            config: self.config.clone(),
            grid: finalized.grid,
            rooms: finalized.rooms,
            player_spawn: finalized.player_spawn,
            exit: finalized.exit,
            enemy_spawns,
        })
    }
}

pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod resistance;
pub mod rng;
pub mod terrain;
pub mod territory;
pub mod water;
pub mod worker;
pub mod world;

pub use config::{GrowthSettings, IslandSettings, TerrainSettings, WorldGenerationParams};
pub use error::{GenerationError, Result};
pub use grid::{Cell, Grid, LAND_LABEL, OCEAN_LABEL, RegionId};
pub use territory::Region;
pub use worker::{GenerationWorker, RequestId};
pub use world::{World, generate_world, generate_world_on_terrain, generate_world_with};

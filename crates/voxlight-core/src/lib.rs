//! Shared types, constants and configuration for voxel lightmap baking.
pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod types;

pub use config::LightingConfig;
pub use error::LightingError;
pub use types::{ChunkCoord, ChunkKey, DirectionalLight, WorldCoord};

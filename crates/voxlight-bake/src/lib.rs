//! CPU lightmap baking for voxel chunks: occlusion, shadow rays, lightmap
//! synthesis, registry and material binding.
pub mod applier;
pub mod baker;
pub mod lightmap;
pub mod occlusion;
pub mod registry;
pub mod sampler;
pub mod scheduler;
pub mod shadow;

pub use applier::{LightmapApplier, LightmapMaterial, LightmapMesh, MaterialSlot};
pub use baker::LightmapBaker;
pub use lightmap::Lightmap;
pub use occlusion::OcclusionEstimator;
pub use registry::{LightmapRegistry, SharedLightmapRegistry};
pub use sampler::{SolidityQuery, VoxelSampler};
pub use scheduler::{BakeReport, BakeScheduler};
pub use shadow::ShadowCaster;

//! Single source of truth for shared lighting constants.
//! Runtime-tunable values live in `LightingConfig`; the defaults there
//! are taken from this file.

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: u32 = 16;

/// Total voxels per chunk (16^3). Expected length of a voxel buffer.
pub const VOXELS_PER_CHUNK: u32 = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Material ID 0 = air/empty. Anything else is solid for lighting purposes.
pub const MATERIAL_AIR: u8 = 0;

/// Default lightmap resolution (cells per axis). Equal to CHUNK_SIZE, so
/// one cell maps to exactly one voxel.
pub const DEFAULT_LIGHTMAP_RESOLUTION: u32 = 16;

/// Upper bound accepted by config validation (128^3 * 3 bytes = 6 MiB per chunk).
pub const MAX_LIGHTMAP_RESOLUTION: u32 = 128;

/// Color channels per lightmap texel (R, G, B).
pub const LIGHTMAP_CHANNELS: usize = 3;

/// Number of neighbor samples used for ambient occlusion (6 faces + 12 edges).
pub const AO_SAMPLE_COUNT: u32 = 18;

/// Maximum number of one-voxel steps a shadow ray takes toward the light.
pub const SHADOW_MAX_STEPS: u32 = 32;

/// Light factor applied when a shadow ray hits a solid voxel.
/// Not fully dark: stands in for ambient bounce light.
pub const SOFT_SHADOW_FACTOR: f32 = 0.5;

/// Light factor when a shadow ray escapes without hitting anything.
pub const UNSHADOWED_FACTOR: f32 = 1.0;

/// Default flicker amplitude for newly added dynamic lights.
pub const DEFAULT_FLICKER_AMOUNT: f32 = 0.2;

/// Dynamic lights only cast shadows when their intensity exceeds this.
pub const SHADOW_CASTING_MIN_INTENSITY: f32 = 1.0;

/// Maximum number of point lights exported to the GPU per frame.
pub const MAX_DYNAMIC_LIGHTS: u32 = 64;

/// Default world-space position of the global directional light.
pub const DEFAULT_SUN_POSITION: [f32; 3] = [128.0, 256.0, 96.0];

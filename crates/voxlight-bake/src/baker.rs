//! Static lightmap synthesis for one chunk at a time.
//!
//! Per cell: ambient occlusion from the 18-neighbor stencil, one shadow ray
//! toward the directional light, then
//! `channel = clamp(floor(255 * base * shadow * (1 - occlusion)), 0, 255)`.
//! Cost is O(N^3 * (18 + max_steps)); meant for chunk-load time, not per frame.

use std::sync::Arc;

use glam::{DVec3, Vec3};
use voxlight_core::constants::{LIGHTMAP_CHANNELS, VOXELS_PER_CHUNK};
use voxlight_core::math::{chunk_origin, quantize_channel};
use voxlight_core::{ChunkCoord, ChunkKey, DirectionalLight, LightingConfig, LightingError};

use crate::lightmap::Lightmap;
use crate::occlusion::OcclusionEstimator;
use crate::registry::SharedLightmapRegistry;
use crate::sampler::{SolidityQuery, VoxelSampler};
use crate::shadow::ShadowCaster;

/// Bakes chunk lightmaps and owns the registry they are stored in.
///
/// The registry is the single home for baked lightmaps: direct bakes and
/// [`BakeScheduler`](crate::BakeScheduler) runs both write into it, and
/// renderers read it through [`registry`](Self::registry).
pub struct LightmapBaker {
    config: LightingConfig,
    shadow: ShadowCaster,
    registry: SharedLightmapRegistry,
}

impl Default for LightmapBaker {
    fn default() -> Self {
        let config = LightingConfig::default();
        Self {
            shadow: ShadowCaster::from_config(&config),
            config,
            registry: SharedLightmapRegistry::new(),
        }
    }
}

impl LightmapBaker {
    /// Create a baker with a validated config.
    pub fn new(config: LightingConfig) -> Result<Self, LightingError> {
        config.validate()?;
        Ok(Self {
            shadow: ShadowCaster::from_config(&config),
            config,
            registry: SharedLightmapRegistry::new(),
        })
    }

    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Clone the handle to hand the registry to a render thread.
    pub fn registry(&self) -> &SharedLightmapRegistry {
        &self.registry
    }

    /// Bake the chunk named by `key` and register the result, replacing any
    /// previous lightmap for that chunk.
    ///
    /// A malformed key is rejected before any work is done and leaves the
    /// registry untouched.
    pub fn bake_chunk(
        &self,
        key: &str,
        voxels: &[u8],
        light: &DirectionalLight,
    ) -> Result<Arc<Lightmap>, LightingError> {
        let key: ChunkKey = key.parse()?;
        Ok(self.bake_chunk_key(key, voxels, light))
    }

    /// Same as [`bake_chunk`](Self::bake_chunk) with an already-parsed key.
    pub fn bake_chunk_key(
        &self,
        key: ChunkKey,
        voxels: &[u8],
        light: &DirectionalLight,
    ) -> Arc<Lightmap> {
        let lightmap = self.bake(key.coord(), voxels, light);
        log::debug!(
            "baked {}^3 lightmap for chunk {key}",
            lightmap.resolution()
        );
        self.registry.store(key, lightmap)
    }

    /// Compute a chunk's lightmap without touching the registry.
    pub fn bake(&self, coord: ChunkCoord, voxels: &[u8], light: &DirectionalLight) -> Lightmap {
        if voxels.len() != VOXELS_PER_CHUNK as usize {
            log::warn!(
                "voxel buffer for chunk {} has {} entries, expected {}; missing voxels read as empty",
                ChunkKey::from(coord),
                voxels.len(),
                VOXELS_PER_CHUNK
            );
        }
        self.bake_with(coord, &VoxelSampler::new(voxels), light)
    }

    /// Compute a chunk's lightmap against any solidity source, e.g. a view
    /// spanning neighbor chunks.
    ///
    /// Occlusion and shadow rays run in chunk-local space; only the light
    /// direction uses the absolute world position.
    pub fn bake_with<Q: SolidityQuery + ?Sized>(
        &self,
        coord: ChunkCoord,
        voxels: &Q,
        light: &DirectionalLight,
    ) -> Lightmap {
        let n = self.config.lightmap_resolution;
        let scale = self.config.cell_scale();
        let origin = chunk_origin(coord);
        let base = self.config.base_light;

        let mut lightmap = Lightmap::new(n);
        for (y, slab) in lightmap.slabs_mut().enumerate() {
            for (i, texel) in slab.chunks_exact_mut(LIGHTMAP_CHANNELS).enumerate() {
                let z = i / n as usize;
                let x = i % n as usize;
                let local = Vec3::new(x as f32, y as f32, z as f32) * scale;
                let lit = self.cell_light(origin, local, voxels, light);
                for (channel, b) in texel.iter_mut().zip(base) {
                    *channel = quantize_channel(b * lit);
                }
            }
        }
        lightmap
    }

    /// Linear light at a sample point before the base color: shadow * (1 - occlusion).
    fn cell_light<Q: SolidityQuery + ?Sized>(
        &self,
        origin: DVec3,
        local: Vec3,
        voxels: &Q,
        light: &DirectionalLight,
    ) -> f32 {
        let occlusion = OcclusionEstimator::compute(local, voxels);
        let dir = light.direction_from(origin + local.as_dvec3());
        let shadow = self.shadow.compute(local, dir, voxels);
        shadow * (1.0 - occlusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use voxlight_core::math::voxel_index;

    const CHUNK_LEN: usize = VOXELS_PER_CHUNK as usize;

    fn sun() -> DirectionalLight {
        DirectionalLight::new(Vec3::new(8.0, 200.0, 8.0))
    }

    #[test]
    fn test_all_air_is_uniform_white() {
        let baker = LightmapBaker::default();
        let map = baker.bake_chunk("0,0,0", &vec![0u8; CHUNK_LEN], &sun()).unwrap();
        assert_eq!(map.len(), 16 * 16 * 16 * 3);
        assert!(map.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_all_solid_is_uniform_black() {
        let baker = LightmapBaker::default();
        let map = baker.bake_chunk("0,0,0", &vec![1u8; CHUNK_LEN], &sun()).unwrap();
        assert_eq!(map.len(), 16 * 16 * 16 * 3);
        assert!(map.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_malformed_key_rejected_and_registry_untouched() {
        let baker = LightmapBaker::default();
        let err = baker
            .bake_chunk("0,0", &vec![0u8; CHUNK_LEN], &sun())
            .unwrap_err();
        assert!(matches!(err, LightingError::MalformedChunkKey { .. }));
        assert!(baker.registry().is_empty());
    }

    #[test]
    fn test_bake_registers_under_canonical_key() {
        let baker = LightmapBaker::default();
        baker.bake_chunk(" 2, -1, 0", &vec![0u8; CHUNK_LEN], &sun()).unwrap();
        assert!(baker.registry().get(&ChunkKey::new(2, -1, 0)).is_some());
        assert_eq!(baker.registry().len(), 1);
    }

    #[test]
    fn test_rebake_replaces_entry() {
        let baker = LightmapBaker::default();
        baker.bake_chunk("0,0,0", &vec![0u8; CHUNK_LEN], &sun()).unwrap();
        baker.bake_chunk("0,0,0", &vec![1u8; CHUNK_LEN], &sun()).unwrap();
        assert_eq!(baker.registry().len(), 1);
        let stored = baker.registry().get(&ChunkKey::new(0, 0, 0)).unwrap();
        assert!(stored.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_deterministic() {
        let voxels: Vec<u8> = (0..CHUNK_LEN).map(|i| ((i * 7919) % 5 == 0) as u8).collect();
        let baker = LightmapBaker::default();
        let a = baker.bake_chunk("3,0,-2", &voxels, &sun()).unwrap().as_bytes().to_vec();
        let b = baker.bake_chunk("3,0,-2", &voxels, &sun()).unwrap().as_bytes().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_floor_under_roof_is_shadowed() {
        // Solid slab at y=12; the cell at y=2 sees it on the way up.
        let mut voxels = vec![0u8; CHUNK_LEN];
        for z in 0..16 {
            for x in 0..16 {
                voxels[voxel_index(IVec3::new(x, 12, z))] = 1;
            }
        }
        let baker = LightmapBaker::default();
        let map = baker.bake(IVec3::ZERO, &voxels, &DirectionalLight::new(Vec3::new(8.0, 500.0, 8.0)));
        // Unoccluded but shadowed: floor(255 * 0.5) = 127.
        assert_eq!(map.texel(8, 2, 8), Some([127; 3]));
        // Directly below the slab: 5 of 18 neighbors solid (face + 4 edges).
        let expected = quantize_channel(0.5 * (1.0 - 5.0 / 18.0));
        assert_eq!(map.texel(8, 11, 8), Some([expected; 3]));
    }

    #[test]
    fn test_lower_resolution_scales_cells() {
        let config = LightingConfig {
            lightmap_resolution: 4,
            ..LightingConfig::default()
        };
        let baker = LightmapBaker::new(config).unwrap();
        let map = baker.bake(IVec3::new(-1, 0, 0), &vec![0u8; CHUNK_LEN], &sun());
        assert_eq!(map.resolution(), 4);
        assert_eq!(map.len(), 4 * 4 * 4 * 3);
        assert!(map.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_base_light_tints_channels() {
        let config = LightingConfig {
            base_light: [1.0, 0.5, 0.0],
            ..LightingConfig::default()
        };
        let baker = LightmapBaker::new(config).unwrap();
        let map = baker.bake(IVec3::ZERO, &vec![0u8; CHUNK_LEN], &sun());
        assert_eq!(map.texel(5, 5, 5), Some([255, 127, 0]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LightingConfig {
            lightmap_resolution: 0,
            ..LightingConfig::default()
        };
        assert!(LightmapBaker::new(config).is_err());
    }

    #[test]
    fn test_short_buffer_still_bakes_full_lightmap() {
        let baker = LightmapBaker::default();
        let map = baker.bake(IVec3::ZERO, &[1u8; 100], &sun());
        assert_eq!(map.len(), 16 * 16 * 16 * 3);
    }

    fn single_voxel_chunk(at: IVec3) -> Vec<u8> {
        let mut voxels = vec![0u8; CHUNK_LEN];
        voxels[voxel_index(at)] = 1;
        voxels
    }

    #[test]
    fn test_extreme_chunk_keys_bake() {
        let baker = LightmapBaker::default();
        let air = vec![0u8; CHUNK_LEN];
        for key in ["134217728,0,0", "2147483647,-2147483648,2147483647", "-2147483648,0,0"] {
            let map = baker.bake_chunk(key, &air, &DirectionalLight::default()).unwrap();
            assert!(map.as_bytes().iter().all(|&b| b == 255), "{key}");
        }
        assert_eq!(baker.registry().len(), 3);
    }

    #[test]
    fn test_translated_chunk_bakes_identically() {
        let voxels = single_voxel_chunk(IVec3::new(5, 5, 5));
        let baker = LightmapBaker::default();
        let near = baker.bake(
            IVec3::ZERO,
            &voxels,
            &DirectionalLight::new(Vec3::new(8.0, 300.0, 8.0)),
        );
        // 2_000_000 * 16 = 32_000_000, past f32's 2^24 integer range.
        let far = baker.bake(
            IVec3::new(2_000_000, 0, 0),
            &voxels,
            &DirectionalLight::new(Vec3::new(32_000_008.0, 300.0, 8.0)),
        );
        assert_eq!(near.texel(4, 5, 5), Some([240; 3]));
        assert_eq!(near, far);

        // 134217728 * 16 = 2^31, past i32.
        let overhead = baker.bake(
            IVec3::ZERO,
            &voxels,
            &DirectionalLight::new(Vec3::new(0.0, 300.0, 8.0)),
        );
        let edge = baker.bake(
            IVec3::new(134_217_728, 0, 0),
            &voxels,
            &DirectionalLight::new(Vec3::new(2_147_483_648.0, 300.0, 8.0)),
        );
        assert_eq!(overhead, edge);
    }
}

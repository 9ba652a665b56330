//! Fixed-step shadow rays toward the directional light.
//!
//! Two outcomes only: the first solid voxel along the ray yields the soft
//! shadow factor, otherwise the sample is fully lit. No accumulation and no
//! penumbra gradient.

use glam::Vec3;
use voxlight_core::constants::{SHADOW_MAX_STEPS, SOFT_SHADOW_FACTOR, UNSHADOWED_FACTOR};
use voxlight_core::LightingConfig;

use crate::sampler::SolidityQuery;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCaster {
    /// One-voxel steps taken before the ray gives up.
    pub max_steps: u32,
    /// Returned on a hit.
    pub soft_factor: f32,
}

impl Default for ShadowCaster {
    fn default() -> Self {
        Self {
            max_steps: SHADOW_MAX_STEPS,
            soft_factor: SOFT_SHADOW_FACTOR,
        }
    }
}

impl ShadowCaster {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            max_steps: config.shadow_max_steps,
            soft_factor: config.soft_shadow_factor,
        }
    }

    /// March from chunk-local `origin` along `light_dir` (unit, point-to-light).
    ///
    /// Steps 1..=max_steps are tested; the origin cell never shadows itself.
    /// A zero direction means the light sits on the sample, which is lit.
    pub fn compute<Q: SolidityQuery + ?Sized>(&self, origin: Vec3, light_dir: Vec3, voxels: &Q) -> f32 {
        if light_dir == Vec3::ZERO {
            return UNSHADOWED_FACTOR;
        }
        let hit = (1..=self.max_steps).any(|step| voxels.is_solid(origin + light_dir * step as f32));
        if hit {
            self.soft_factor
        } else {
            UNSHADOWED_FACTOR
        }
    }
}

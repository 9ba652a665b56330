//! Ambient occlusion from an 18-neighbor solidity stencil.
//! A cheap proxy for hemispherical occlusion: symmetric, order-independent.

use glam::Vec3;
use voxlight_core::direction::OCCLUSION_DIRECTIONS;

use crate::sampler::SolidityQuery;

/// Fraction of the stencil neighbors that are solid, in [0, 1].
pub struct OcclusionEstimator;

impl OcclusionEstimator {
    /// `local` is relative to the chunk's minimum corner.
    pub fn compute<Q: SolidityQuery + ?Sized>(local: Vec3, voxels: &Q) -> f32 {
        let solid = OCCLUSION_DIRECTIONS
            .iter()
            .filter(|dir| voxels.is_solid(local + dir.offset().as_vec3()))
            .count();
        solid as f32 / OCCLUSION_DIRECTIONS.len() as f32
    }
}

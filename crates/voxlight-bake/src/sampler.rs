//! Bounds-safe solidity lookups into a single chunk's voxel buffer.
//!
//! Queries are in chunk-local voxel units. Coordinates outside [0, 16) are
//! folded back with floor-modulo, so a query that leaves the chunk wraps
//! around to the opposite side of the same buffer. Neighbor chunks are never
//! consulted.

use glam::{IVec3, Vec3};
use voxlight_core::constants::MATERIAL_AIR;
use voxlight_core::math::{floor_to_voxel, voxel_index, world_to_local};

/// Anything the occlusion and shadow passes can ask "is this position solid?".
///
/// Positions are relative to the minimum corner of the chunk being baked, so
/// they stay small no matter where the chunk sits in the world. `VoxelSampler`
/// answers from one chunk; a multi-chunk view can implement this to let
/// samples see across chunk seams (e.g. x = -1 is the west neighbor).
pub trait SolidityQuery {
    fn is_solid_voxel(&self, local: IVec3) -> bool;

    /// Solidity of the voxel containing a continuous chunk-local position.
    fn is_solid(&self, local: Vec3) -> bool {
        self.is_solid_voxel(floor_to_voxel(local))
    }
}

/// Read-only view of a chunk-local voxel buffer (`y*size^2 + z*size + x`).
#[derive(Debug, Clone, Copy)]
pub struct VoxelSampler<'a> {
    voxels: &'a [u8],
}

impl<'a> VoxelSampler<'a> {
    pub fn new(voxels: &'a [u8]) -> Self {
        Self { voxels }
    }
}

impl SolidityQuery for VoxelSampler<'_> {
    fn is_solid_voxel(&self, local: IVec3) -> bool {
        // Short buffers read as empty past their end.
        self.voxels
            .get(voxel_index(world_to_local(local)))
            .is_some_and(|&id| id != MATERIAL_AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxlight_core::constants::VOXELS_PER_CHUNK;

    fn buffer_with(solid: &[IVec3]) -> Vec<u8> {
        let mut voxels = vec![0u8; VOXELS_PER_CHUNK as usize];
        for &p in solid {
            voxels[voxel_index(p)] = 1;
        }
        voxels
    }

    #[test]
    fn test_empty_and_solid() {
        let voxels = buffer_with(&[IVec3::new(3, 4, 5)]);
        let sampler = VoxelSampler::new(&voxels);
        assert!(sampler.is_solid_voxel(IVec3::new(3, 4, 5)));
        assert!(!sampler.is_solid_voxel(IVec3::new(4, 4, 5)));
    }

    #[test]
    fn test_any_nonzero_material_is_solid() {
        let mut voxels = vec![0u8; VOXELS_PER_CHUNK as usize];
        voxels[0] = 255;
        voxels[1] = 7;
        let sampler = VoxelSampler::new(&voxels);
        assert!(sampler.is_solid_voxel(IVec3::new(0, 0, 0)));
        assert!(sampler.is_solid_voxel(IVec3::new(1, 0, 0)));
    }

    #[test]
    fn test_out_of_chunk_coordinates_fold() {
        let voxels = buffer_with(&[IVec3::new(15, 0, 2)]);
        let sampler = VoxelSampler::new(&voxels);
        // Wraps to the same cell from either side.
        assert!(sampler.is_solid_voxel(IVec3::new(-1, 0, 2)));
        assert!(sampler.is_solid_voxel(IVec3::new(47, 16, -14)));
    }

    #[test]
    fn test_continuous_positions_floor() {
        let voxels = buffer_with(&[IVec3::new(15, 15, 15)]);
        let sampler = VoxelSampler::new(&voxels);
        assert!(sampler.is_solid(Vec3::new(-0.25, -0.75, -0.01)));
        assert!(!sampler.is_solid(Vec3::new(0.25, -0.75, -0.01)));
    }

    #[test]
    fn test_short_buffer_reads_empty() {
        let voxels = vec![1u8; 10];
        let sampler = VoxelSampler::new(&voxels);
        assert!(sampler.is_solid_voxel(IVec3::new(9, 0, 0)));
        assert!(!sampler.is_solid_voxel(IVec3::new(10, 0, 0)));
        assert!(!sampler.is_solid_voxel(IVec3::new(0, 15, 15)));

        let empty: [u8; 0] = [];
        assert!(!VoxelSampler::new(&empty).is_solid_voxel(IVec3::ZERO));
    }
}

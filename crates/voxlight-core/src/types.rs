use std::fmt;
use std::str::FromStr;

use glam::{DVec3, IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::LightingError;

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE voxels).
pub type ChunkCoord = IVec3;

/// World coordinate in voxel-space.
pub type WorldCoord = IVec3;

/// Canonical identifier of a chunk, serialized as `"x,y,z"`.
///
/// Registry lookups go through this type so that `"1,2,3"` and `" 1, 2,3"`
/// name the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkKey(pub ChunkCoord);

impl ChunkKey {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    pub fn coord(self) -> ChunkCoord {
        self.0
    }
}

impl From<ChunkCoord> for ChunkKey {
    fn from(coord: ChunkCoord) -> Self {
        Self(coord)
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0.x, self.0.y, self.0.z)
    }
}

impl FromStr for ChunkKey {
    type Err = LightingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| LightingError::MalformedChunkKey {
            key: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(malformed(format!(
                "expected 3 comma-separated integers, found {} component(s)",
                parts.len()
            )));
        }

        let mut axes = [0i32; 3];
        for (axis, part) in axes.iter_mut().zip(&parts) {
            let trimmed = part.trim();
            *axis = trimmed
                .parse::<i32>()
                .map_err(|e| malformed(format!("component '{trimmed}': {e}")))?;
        }

        Ok(Self(IVec3::from_array(axes)))
    }
}

/// The single global directional light used when baking.
///
/// Only the position matters: the bake computes a per-sample direction
/// from the sample point toward it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: [f32; 3],
}

impl DirectionalLight {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Unit vector from a world-space `point` toward the light, or zero if
    /// the light sits exactly on the point.
    ///
    /// The subtraction runs in `f64` so far-away chunks still resolve
    /// sub-voxel differences.
    pub fn direction_from(&self, point: DVec3) -> Vec3 {
        (self.position().as_dvec3() - point)
            .normalize_or_zero()
            .as_vec3()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: crate::constants::DEFAULT_SUN_POSITION,
        }
    }
}

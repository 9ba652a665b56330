use crate::constants::{CHUNK_SIZE, LIGHTMAP_CHANNELS};
use crate::types::{ChunkCoord, WorldCoord};
use glam::{DVec3, IVec3, Vec3};

/// Fold a voxel coordinate to its local offset within a chunk.
/// Floor-modulo, so negative coordinates land in [0, CHUNK_SIZE).
pub fn world_to_local(world: WorldCoord) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        world.x.rem_euclid(cs),
        world.y.rem_euclid(cs),
        world.z.rem_euclid(cs),
    )
}

/// Convert a chunk coordinate and local offset back to world-space.
pub fn chunk_local_to_world(chunk: ChunkCoord, local: IVec3) -> WorldCoord {
    chunk * CHUNK_SIZE as i32 + local
}

/// World-space position of a chunk's minimum corner.
///
/// Computed in `f64`: exact for every `i32` chunk coordinate, where
/// `chunk * CHUNK_SIZE` would overflow `i32` past 2^27.
pub fn chunk_origin(chunk: ChunkCoord) -> DVec3 {
    chunk.as_dvec3() * CHUNK_SIZE as f64
}

/// Voxel containing a continuous world position.
pub fn floor_to_voxel(world: Vec3) -> WorldCoord {
    world.floor().as_ivec3()
}

/// Linear index into a voxel buffer: `y*size^2 + z*size + x`.
/// Caller guarantees `local` is within [0, CHUNK_SIZE).
pub fn voxel_index(local: IVec3) -> usize {
    let cs = CHUNK_SIZE as usize;
    local.y as usize * cs * cs + local.z as usize * cs + local.x as usize
}

/// Byte offset of a lightmap cell's R channel: `(y*N^2 + z*N + x) * 3`.
pub fn lightmap_index(x: u32, y: u32, z: u32, resolution: u32) -> usize {
    let n = resolution as usize;
    (y as usize * n * n + z as usize * n + x as usize) * LIGHTMAP_CHANNELS
}

/// Quantize a linear light value to a byte: `clamp(floor(255 * v), 0, 255)`.
/// NaN maps to 0.
pub fn quantize_channel(value: f32) -> u8 {
    let scaled = (255.0 * value).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

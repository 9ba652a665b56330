use glam::IVec3;
use voxlight_core::constants::{CHUNK_SIZE, VOXELS_PER_CHUNK};
use voxlight_core::math::{chunk_local_to_world, voxel_index};
use voxlight_core::ChunkCoord;

/// Voxel content of a benchmark scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFill {
    Air,
    Solid,
    /// Rolling heightfield, stone below the surface.
    Terrain,
    /// Scattered single-voxel debris, ~1 in 7 solid.
    Debris,
}

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub fill: SceneFill,
    /// Chunks baked per iteration (laid out along +X).
    pub chunk_count: u32,
    /// Bake through the parallel scheduler instead of one chunk at a time.
    pub parallel: bool,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "air",
            fill: SceneFill::Air,
            chunk_count: 1,
            parallel: false,
        },
        SceneConfig {
            name: "solid",
            fill: SceneFill::Solid,
            chunk_count: 1,
            parallel: false,
        },
        SceneConfig {
            name: "terrain",
            fill: SceneFill::Terrain,
            chunk_count: 1,
            parallel: false,
        },
        SceneConfig {
            name: "debris",
            fill: SceneFill::Debris,
            chunk_count: 1,
            parallel: false,
        },
        SceneConfig {
            name: "terrain-batch-16",
            fill: SceneFill::Terrain,
            chunk_count: 16,
            parallel: true,
        },
    ]
}

/// Coordinates of the chunks a scene bakes.
pub fn scene_chunks(config: &SceneConfig) -> Vec<ChunkCoord> {
    (0..config.chunk_count as i32)
        .map(|i| IVec3::new(i, 0, 0))
        .collect()
}

/// Generate a deterministic voxel buffer for one chunk of a scene.
pub fn generate_bench_chunk(fill: SceneFill, coord: ChunkCoord) -> Vec<u8> {
    let mut data = vec![0u8; VOXELS_PER_CHUNK as usize];
    let cs = CHUNK_SIZE as i32;

    for ly in 0..cs {
        for lz in 0..cs {
            for lx in 0..cs {
                let local = IVec3::new(lx, ly, lz);
                let world = chunk_local_to_world(coord, local);
                let material = match fill {
                    SceneFill::Air => 0,
                    SceneFill::Solid => 1,
                    SceneFill::Terrain => {
                        if world.y <= terrain_height(world.x, world.z) {
                            1
                        } else {
                            0
                        }
                    }
                    SceneFill::Debris => {
                        let hash = (world.x.wrapping_mul(31337) ^ world.y.wrapping_mul(7919) ^ world.z.wrapping_mul(104729))
                            .rem_euclid(7);
                        u8::from(hash == 0) * 2
                    }
                };
                data[voxel_index(local)] = material;
            }
        }
    }

    data
}

/// Cheap integer heightfield in [4, 12].
fn terrain_height(x: i32, z: i32) -> i32 {
    let wave = ((x as f32 * 0.35).sin() + (z as f32 * 0.27).cos()) * 2.0;
    8 + wave.round() as i32
}

/// Number of non-air voxels in a buffer.
pub fn solid_count(voxels: &[u8]) -> u32 {
    voxels.iter().filter(|&&v| v != 0).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_buffers_have_chunk_length() {
        for scene in standard_scenes() {
            for coord in scene_chunks(&scene) {
                let voxels = generate_bench_chunk(scene.fill, coord);
                assert_eq!(voxels.len(), VOXELS_PER_CHUNK as usize, "{}", scene.name);
            }
        }
    }

    #[test]
    fn test_fill_extremes() {
        assert_eq!(solid_count(&generate_bench_chunk(SceneFill::Air, IVec3::ZERO)), 0);
        assert_eq!(
            solid_count(&generate_bench_chunk(SceneFill::Solid, IVec3::ZERO)),
            VOXELS_PER_CHUNK
        );
    }

    #[test]
    fn test_terrain_is_partial_and_deterministic() {
        let a = generate_bench_chunk(SceneFill::Terrain, IVec3::new(2, 0, 1));
        let b = generate_bench_chunk(SceneFill::Terrain, IVec3::new(2, 0, 1));
        assert_eq!(a, b);
        let solid = solid_count(&a);
        assert!(solid > 0 && solid < VOXELS_PER_CHUNK);
    }
}

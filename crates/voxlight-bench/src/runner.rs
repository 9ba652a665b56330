use std::sync::Arc;
use std::time::Instant;

use voxlight_bake::{BakeScheduler, LightmapBaker};
use voxlight_core::{ChunkKey, DirectionalLight, LightingConfig, LightingError};
use voxlight_lights::DynamicLightManager;

use crate::scenes::{generate_bench_chunk, scene_chunks, solid_count, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub solid_voxels: u32,
    pub chunk_count: u32,
    pub iterations: u32,
    pub timings: TimingSeries,
}

/// Bakes benchmark scenes on the CPU.
pub struct BenchmarkRunner {
    baker: LightmapBaker,
    light: DirectionalLight,
    iterations: u32,
}

impl BenchmarkRunner {
    pub fn new(config: LightingConfig, iterations: u32) -> Result<Self, LightingError> {
        let light = config.sun;
        Ok(Self {
            baker: LightmapBaker::new(config)?,
            light,
            iterations,
        })
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({} chunk(s), {} iterations)...",
            config.name,
            config.chunk_count,
            self.iterations
        );

        let chunks: Vec<(ChunkKey, Arc<[u8]>)> = scene_chunks(config)
            .into_iter()
            .map(|coord| (ChunkKey::from(coord), generate_bench_chunk(config.fill, coord).into()))
            .collect();
        let solid_voxels = chunks.iter().map(|(_, v)| solid_count(v)).sum();

        let mut scheduler = BakeScheduler::new();
        let mut times = Vec::with_capacity(self.iterations as usize);

        for _ in 0..self.iterations {
            let start = Instant::now();
            if config.parallel {
                for (key, voxels) in &chunks {
                    scheduler.request_key(*key, Arc::clone(voxels));
                }
                scheduler.run(&self.baker, &self.light);
            } else {
                for (key, voxels) in &chunks {
                    self.baker.bake_chunk_key(*key, voxels, &self.light);
                }
            }
            times.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        BenchmarkResult {
            scene_name: config.name.to_string(),
            solid_voxels,
            chunk_count: config.chunk_count,
            iterations: self.iterations,
            timings: compute_timings(&times),
        }
    }

    /// Time `DynamicLightManager::update` over `light_count` flickering lights.
    pub fn run_flicker(&self, light_count: u32) -> BenchmarkResult {
        log::info!("Running flicker update with {light_count} lights...");
        let mut manager = DynamicLightManager::seeded(42);
        for i in 0..light_count {
            let p = glam::Vec3::new(i as f32, 8.0, (i % 16) as f32);
            manager.add_light(p, glam::Vec3::ONE, 1.5, 6.0);
        }

        let mut times = Vec::with_capacity(self.iterations as usize);
        for _ in 0..self.iterations {
            let start = Instant::now();
            manager.update(1.0 / 60.0);
            times.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        BenchmarkResult {
            scene_name: format!("flicker-{light_count}"),
            solid_voxels: 0,
            chunk_count: 0,
            iterations: self.iterations,
            timings: compute_timings(&times),
        }
    }
}

fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

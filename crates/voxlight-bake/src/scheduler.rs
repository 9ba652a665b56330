//! Background baking: coalesce requests per chunk, bake distinct chunks in
//! parallel, write into the baker's registry.
//!
//! Each `run` bakes every pending key exactly once, so no two bakes of the
//! same key are ever in flight from one scheduler. Several schedulers feeding
//! the same baker must not receive the same key.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use voxlight_core::{ChunkKey, DirectionalLight, LightingError};

use crate::baker::LightmapBaker;

/// Outcome of one [`BakeScheduler::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BakeReport {
    /// Keys baked this run, in request order.
    pub baked: Vec<ChunkKey>,
    /// Requests folded into a later request for the same key.
    pub coalesced: usize,
}

/// Pending bake requests, at most one per chunk key.
#[derive(Debug, Default)]
pub struct BakeScheduler {
    order: Vec<ChunkKey>,
    pending: HashMap<ChunkKey, Arc<[u8]>>,
    coalesced: usize,
}

impl BakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a bake. A second request for a key that is still pending
    /// replaces the first one's voxels; the key keeps its queue position.
    pub fn request(&mut self, key: &str, voxels: impl Into<Arc<[u8]>>) -> Result<(), LightingError> {
        let key: ChunkKey = key.parse()?;
        self.request_key(key, voxels);
        Ok(())
    }

    pub fn request_key(&mut self, key: ChunkKey, voxels: impl Into<Arc<[u8]>>) {
        if self.pending.insert(key, voxels.into()).is_some() {
            self.coalesced += 1;
            log::debug!("coalesced duplicate bake request for chunk {key}");
        } else {
            self.order.push(key);
        }
    }

    pub fn pending_len(&self) -> usize {
        self.order.len()
    }

    pub fn is_pending(&self, key: &ChunkKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Drop a pending request, e.g. because the chunk unloaded first.
    pub fn cancel(&mut self, key: &ChunkKey) -> bool {
        if self.pending.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    /// Bake everything pending on the current rayon pool and store the
    /// results in `baker.registry()`.
    pub fn run(&mut self, baker: &LightmapBaker, light: &DirectionalLight) -> BakeReport {
        let jobs: Vec<(ChunkKey, Arc<[u8]>)> = self
            .order
            .drain(..)
            .filter_map(|key| self.pending.remove(&key).map(|voxels| (key, voxels)))
            .collect();
        let coalesced = std::mem::take(&mut self.coalesced);

        if jobs.is_empty() {
            return BakeReport {
                baked: Vec::new(),
                coalesced,
            };
        }

        log::info!(
            "baking {} chunk lightmap(s) ({} duplicate request(s) coalesced)",
            jobs.len(),
            coalesced
        );

        jobs.par_iter().for_each(|(key, voxels)| {
            baker.bake_chunk_key(*key, voxels, light);
        });

        BakeReport {
            baked: jobs.into_iter().map(|(key, _)| key).collect(),
            coalesced,
        }
    }

    /// [`run`](Self::run) on a dedicated pool.
    pub fn run_in(
        &mut self,
        pool: &rayon::ThreadPool,
        baker: &LightmapBaker,
        light: &DirectionalLight,
    ) -> BakeReport {
        pool.install(|| self.run(baker, light))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::{LightmapApplier, LightmapMesh, MaterialSlot};
    use glam::Vec3;
    use voxlight_core::constants::VOXELS_PER_CHUNK;

    const CHUNK_LEN: usize = VOXELS_PER_CHUNK as usize;

    fn light() -> DirectionalLight {
        DirectionalLight::new(Vec3::new(0.0, 300.0, 0.0))
    }

    #[test]
    fn test_duplicate_requests_coalesce_latest_wins() {
        let mut scheduler = BakeScheduler::new();
        scheduler.request("0,0,0", vec![0u8; CHUNK_LEN]).unwrap();
        scheduler.request("1,0,0", vec![0u8; CHUNK_LEN]).unwrap();
        scheduler.request("0, 0, 0", vec![1u8; CHUNK_LEN]).unwrap();
        assert_eq!(scheduler.pending_len(), 2);

        let baker = LightmapBaker::default();
        let registry = baker.registry();
        let report = scheduler.run(&baker, &light());
        assert_eq!(report.baked, vec![ChunkKey::new(0, 0, 0), ChunkKey::new(1, 0, 0)]);
        assert_eq!(report.coalesced, 1);
        assert_eq!(scheduler.pending_len(), 0);

        let origin = registry.get(&ChunkKey::new(0, 0, 0)).unwrap();
        assert!(origin.as_bytes().iter().all(|&b| b == 0));
        let neighbor = registry.get(&ChunkKey::new(1, 0, 0)).unwrap();
        assert!(neighbor.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let baker = LightmapBaker::default();
        let mut scheduler = BakeScheduler::new();
        let mut buffers = Vec::new();
        for i in 0..6u8 {
            let voxels: Vec<u8> = (0..CHUNK_LEN)
                .map(|j| ((j + i as usize * 13) % (i as usize + 3) == 0) as u8)
                .collect();
            scheduler.request_key(ChunkKey::new(i as i32, 0, -1), voxels.clone());
            buffers.push(voxels);
        }
        scheduler.run(&baker, &light());

        for (i, voxels) in buffers.iter().enumerate() {
            let key = ChunkKey::new(i as i32, 0, -1);
            let expected = baker.bake(key.coord(), voxels, &light());
            assert_eq!(*baker.registry().get(&key).unwrap(), expected);
        }
    }

    #[test]
    fn test_malformed_request_rejected() {
        let mut scheduler = BakeScheduler::new();
        assert!(scheduler.request("x,y,z", vec![0u8; CHUNK_LEN]).is_err());
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = BakeScheduler::new();
        scheduler.request_key(ChunkKey::new(0, 0, 0), vec![0u8; CHUNK_LEN]);
        assert!(scheduler.cancel(&ChunkKey::new(0, 0, 0)));
        assert!(!scheduler.cancel(&ChunkKey::new(0, 0, 0)));
        let baker = LightmapBaker::default();
        let report = scheduler.run(&baker, &light());
        assert!(report.baked.is_empty());
        assert!(baker.registry().is_empty());
    }

    #[test]
    fn test_run_in_dedicated_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let mut scheduler = BakeScheduler::new();
        scheduler.request_key(ChunkKey::new(0, 1, 0), vec![0u8; CHUNK_LEN]);
        let baker = LightmapBaker::default();
        let report = scheduler.run_in(&pool, &baker, &light());
        assert_eq!(report.baked.len(), 1);
        assert_eq!(baker.registry().len(), 1);
    }

    struct ChunkMesh(Vec<MaterialSlot>);

    impl LightmapMesh for ChunkMesh {
        type Material = MaterialSlot;

        fn materials_mut(&mut self) -> &mut [MaterialSlot] {
            &mut self.0
        }
    }

    #[test]
    fn test_scheduled_and_direct_bakes_share_one_registry() {
        let baker = LightmapBaker::default();
        baker.bake_chunk("2,0,2", &vec![0u8; CHUNK_LEN], &light()).unwrap();

        let mut scheduler = BakeScheduler::new();
        scheduler.request("2,0,2", vec![1u8; CHUNK_LEN]).unwrap();
        scheduler.run(&baker, &light());

        let registry = baker.registry().clone();
        assert_eq!(registry.len(), 1);

        let mut mesh = ChunkMesh(vec![MaterialSlot::default(); 2]);
        assert!(LightmapApplier::apply(&registry.read(), &mut mesh, "2, 0, 2"));
        for material in &mesh.0 {
            let bound = material.lightmap.as_ref().unwrap();
            assert!(bound.as_bytes().iter().all(|&b| b == 0));
            assert!(material.needs_update);
        }
    }
}

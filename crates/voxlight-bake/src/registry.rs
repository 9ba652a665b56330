use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use voxlight_core::ChunkKey;

use crate::lightmap::Lightmap;

/// One lightmap per chunk key.
///
/// Entries are shared with materials through `Arc`. A re-bake reuses the
/// existing allocation when nothing else holds it; otherwise the entry gets a
/// fresh `Arc` and materials keep their old snapshot until the lightmap is
/// applied again.
#[derive(Debug, Default)]
pub struct LightmapRegistry {
    maps: HashMap<ChunkKey, Arc<Lightmap>>,
}

impl LightmapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the lightmap for `key`. Returns the stored handle.
    pub fn store(&mut self, key: ChunkKey, lightmap: Lightmap) -> Arc<Lightmap> {
        match self.maps.get_mut(&key) {
            Some(existing) => {
                match Arc::get_mut(existing) {
                    Some(unshared) => *unshared = lightmap,
                    None => *existing = Arc::new(lightmap),
                }
                Arc::clone(existing)
            }
            None => {
                let shared = Arc::new(lightmap);
                self.maps.insert(key, Arc::clone(&shared));
                shared
            }
        }
    }

    pub fn get(&self, key: &ChunkKey) -> Option<Arc<Lightmap>> {
        self.maps.get(key).cloned()
    }

    pub fn contains(&self, key: &ChunkKey) -> bool {
        self.maps.contains_key(key)
    }

    /// Drop a chunk's lightmap, e.g. when the chunk unloads.
    pub fn remove(&mut self, key: &ChunkKey) -> Option<Arc<Lightmap>> {
        self.maps.remove(key)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Registry behind a reader-writer lock, for baking chunks on worker threads.
///
/// Cloning shares the same underlying registry.
#[derive(Debug, Clone, Default)]
pub struct SharedLightmapRegistry {
    inner: Arc<RwLock<LightmapRegistry>>,
}

impl SharedLightmapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic mid-store cannot leave a half-written entry visible, so a
    // poisoned lock is still safe to use.
    pub fn read(&self) -> RwLockReadGuard<'_, LightmapRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, LightmapRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self, key: ChunkKey, lightmap: Lightmap) -> Arc<Lightmap> {
        self.write().store(key, lightmap)
    }

    pub fn get(&self, key: &ChunkKey) -> Option<Arc<Lightmap>> {
        self.read().get(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

//! Binds baked lightmaps to chunk render materials.

use std::sync::Arc;

use voxlight_core::ChunkKey;

use crate::lightmap::Lightmap;
use crate::registry::LightmapRegistry;

/// A render material that can sample a chunk lightmap.
pub trait LightmapMaterial {
    fn set_lightmap(&mut self, lightmap: Arc<Lightmap>);

    /// Flag the material so the renderer re-uploads its lightmap texture.
    fn mark_needs_update(&mut self);
}

/// A chunk mesh exposing its materials in draw order. A mesh with a single
/// material returns a one-element slice (`std::slice::from_mut`).
pub trait LightmapMesh {
    type Material: LightmapMaterial;

    fn materials_mut(&mut self) -> &mut [Self::Material];
}

/// Minimal material record for renderers that only need the lightmap binding.
#[derive(Debug, Clone, Default)]
pub struct MaterialSlot {
    pub lightmap: Option<Arc<Lightmap>>,
    pub needs_update: bool,
}

impl LightmapMaterial for MaterialSlot {
    fn set_lightmap(&mut self, lightmap: Arc<Lightmap>) {
        self.lightmap = Some(lightmap);
    }

    fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }
}

pub struct LightmapApplier;

impl LightmapApplier {
    /// Bind the lightmap registered for `key` to every material of `mesh`.
    ///
    /// Returns whether anything was bound. A missing lightmap or a malformed
    /// key leaves the mesh untouched and logs a warning, since it usually
    /// means a bake was never requested.
    pub fn apply<M: LightmapMesh + ?Sized>(
        registry: &LightmapRegistry,
        mesh: &mut M,
        key: &str,
    ) -> bool {
        match key.parse::<ChunkKey>() {
            Ok(key) => Self::apply_key(registry, mesh, key),
            Err(e) => {
                log::warn!("not applying lightmap: {e}");
                false
            }
        }
    }

    pub fn apply_key<M: LightmapMesh + ?Sized>(
        registry: &LightmapRegistry,
        mesh: &mut M,
        key: ChunkKey,
    ) -> bool {
        let Some(lightmap) = registry.get(&key) else {
            log::warn!("no lightmap baked for chunk {key}; mesh left unlit");
            return false;
        };

        let materials = mesh.materials_mut();
        if materials.is_empty() {
            log::debug!("mesh for chunk {key} has no materials");
            return false;
        }
        for material in materials.iter_mut() {
            material.set_lightmap(Arc::clone(&lightmap));
            material.mark_needs_update();
        }
        true
    }
}

use voxlight_core::constants::LIGHTMAP_CHANNELS;
use voxlight_core::math::lightmap_index;

/// Dense RGB8 light volume for one chunk.
///
/// Layout: `(y*N^2 + z*N + x) * 3`, channels R, G, B. Uploaded as a 3D
/// texture by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightmap {
    resolution: u32,
    data: Vec<u8>,
}

impl Lightmap {
    /// All-black lightmap of `resolution^3` texels.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            data: vec![0; Self::byte_len(resolution)],
        }
    }

    /// Expected byte length for a given resolution: `N^3 * 3`.
    pub fn byte_len(resolution: u32) -> usize {
        let n = resolution as usize;
        n * n * n * LIGHTMAP_CHANNELS
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn contains_cell(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.resolution && y < self.resolution && z < self.resolution
    }

    /// RGB of one cell, or `None` if any coordinate is outside `[0, N)`.
    pub fn texel(&self, x: u32, y: u32, z: u32) -> Option<[u8; 3]> {
        if !self.contains_cell(x, y, z) {
            return None;
        }
        let i = lightmap_index(x, y, z, self.resolution);
        let rgb = self.data.get(i..i + LIGHTMAP_CHANNELS)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    /// Overwrite one cell.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside `[0, N)`.
    pub fn set_texel(&mut self, x: u32, y: u32, z: u32, rgb: [u8; 3]) {
        assert!(
            self.contains_cell(x, y, z),
            "texel ({x}, {y}, {z}) outside {}^3 lightmap",
            self.resolution
        );
        let i = lightmap_index(x, y, z, self.resolution);
        self.data[i..i + LIGHTMAP_CHANNELS].copy_from_slice(&rgb);
    }

    /// Mutable Y-slabs of `N^2` texels each, in ascending Y order.
    pub(crate) fn slabs_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let n = self.resolution.max(1) as usize;
        self.data.chunks_exact_mut(n * n * LIGHTMAP_CHANNELS)
    }
}

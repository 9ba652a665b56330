use serde::{Deserialize, Serialize};

use crate::constants::{
    CHUNK_SIZE, DEFAULT_FLICKER_AMOUNT, DEFAULT_LIGHTMAP_RESOLUTION, MAX_LIGHTMAP_RESOLUTION,
    SHADOW_MAX_STEPS, SOFT_SHADOW_FACTOR,
};
use crate::error::LightingError;
use crate::types::DirectionalLight;

/// Tunables for baking and dynamic lights, loadable from RON.
///
/// Every field has a default, so a partial file such as
/// `(lightmap_resolution: 8)` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Lightmap cells per axis. One cell covers CHUNK_SIZE / resolution voxels.
    pub lightmap_resolution: u32,
    /// Maximum one-voxel steps per shadow ray.
    pub shadow_max_steps: u32,
    /// Light factor for a shadowed sample, in [0, 1].
    pub soft_shadow_factor: f32,
    /// Base light color multiplied into every texel, each channel in [0, 1].
    pub base_light: [f32; 3],
    /// Global directional light used when the caller does not supply one.
    pub sun: DirectionalLight,
    /// Flicker amplitude assigned to newly added dynamic lights, in [0, 1].
    pub default_flicker_amount: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            lightmap_resolution: DEFAULT_LIGHTMAP_RESOLUTION,
            shadow_max_steps: SHADOW_MAX_STEPS,
            soft_shadow_factor: SOFT_SHADOW_FACTOR,
            base_light: [1.0, 1.0, 1.0],
            sun: DirectionalLight::default(),
            default_flicker_amount: DEFAULT_FLICKER_AMOUNT,
        }
    }
}

impl LightingConfig {
    /// Parse a config from a RON string and validate it.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, LightingError> {
        let options = ron::Options::default();
        let config: LightingConfig = options
            .from_str(ron_str)
            .map_err(|e| LightingError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, LightingError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| LightingError::ConfigParse(e.to_string()))
    }

    /// Reject values that would produce a malformed or meaningless bake.
    pub fn validate(&self) -> Result<(), LightingError> {
        if self.lightmap_resolution == 0 || self.lightmap_resolution > MAX_LIGHTMAP_RESOLUTION {
            return Err(LightingError::InvalidConfig(format!(
                "lightmap_resolution {} outside 1..={MAX_LIGHTMAP_RESOLUTION}",
                self.lightmap_resolution
            )));
        }
        if self.shadow_max_steps == 0 {
            return Err(LightingError::InvalidConfig(
                "shadow_max_steps must be at least 1".into(),
            ));
        }
        if !unit_range(self.soft_shadow_factor) {
            return Err(LightingError::InvalidConfig(format!(
                "soft_shadow_factor {} outside [0, 1]",
                self.soft_shadow_factor
            )));
        }
        if let Some(c) = self.base_light.iter().find(|c| !unit_range(**c)) {
            return Err(LightingError::InvalidConfig(format!(
                "base_light channel {c} outside [0, 1]"
            )));
        }
        if !self.sun.position.iter().all(|p| p.is_finite()) {
            return Err(LightingError::InvalidConfig(
                "sun position must be finite".into(),
            ));
        }
        if !unit_range(self.default_flicker_amount) {
            return Err(LightingError::InvalidConfig(format!(
                "default_flicker_amount {} outside [0, 1]",
                self.default_flicker_amount
            )));
        }
        Ok(())
    }

    /// World-space size of one lightmap cell along each axis.
    pub fn cell_scale(&self) -> f32 {
        CHUNK_SIZE as f32 / self.lightmap_resolution as f32
    }
}

fn unit_range(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

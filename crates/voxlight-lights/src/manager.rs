use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxlight_core::constants::{DEFAULT_FLICKER_AMOUNT, MAX_DYNAMIC_LIGHTS};
use voxlight_core::LightingConfig;

use crate::arena::{Arena, Handle};
use crate::light::{DynamicLight, GpuPointLight};

/// Handle returned by [`DynamicLightManager::add_light`]. Stops resolving
/// once the light is removed.
pub type LightHandle = Handle;

/// Tracks point lights and re-rolls their flicker once per frame tick.
///
/// The random source is a type parameter so tests and replays can seed it.
/// Draws are independent per tick (no smoothing), which reads as jitter
/// rather than pulsing.
pub struct DynamicLightManager<R: Rng = StdRng> {
    lights: Arena<DynamicLight>,
    rng: R,
    default_flicker: f32,
}

impl Default for DynamicLightManager<StdRng> {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl DynamicLightManager<StdRng> {
    /// Deterministic manager: same seed, same flicker sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DynamicLightManager<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            lights: Arena::new(),
            rng,
            default_flicker: DEFAULT_FLICKER_AMOUNT,
        }
    }

    /// Take the default flicker amount for new lights from `config`.
    pub fn with_config(mut self, config: &LightingConfig) -> Self {
        self.default_flicker = config.default_flicker_amount.clamp(0.0, 1.0);
        self
    }

    pub fn add_light(&mut self, position: Vec3, color: Vec3, intensity: f32, radius: f32) -> LightHandle {
        let light = DynamicLight::new(position, color, intensity, radius, self.default_flicker);
        let handle = self.lights.insert(light);
        log::trace!(
            "added dynamic light {handle:?} at {position} (intensity {intensity}, shadows {})",
            intensity > voxlight_core::constants::SHADOW_CASTING_MIN_INTENSITY
        );
        handle
    }

    /// Stop tracking a light. Stale handles return None.
    pub fn remove_light(&mut self, handle: LightHandle) -> Option<DynamicLight> {
        let removed = self.lights.remove(handle);
        if removed.is_none() {
            log::debug!("remove_light on stale handle {handle:?}");
        }
        removed
    }

    pub fn get(&self, handle: LightHandle) -> Option<&DynamicLight> {
        self.lights.get(handle)
    }

    pub fn get_mut(&mut self, handle: LightHandle) -> Option<&mut DynamicLight> {
        self.lights.get_mut(handle)
    }

    pub fn contains(&self, handle: LightHandle) -> bool {
        self.lights.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightHandle, &DynamicLight)> {
        self.lights.iter()
    }

    /// Advance one frame tick. Flicker is per tick, so `_delta_time` does not
    /// scale it.
    pub fn update(&mut self, _delta_time: f32) {
        for light in self.lights.values_mut() {
            if light.flicker_amount() > 0.0 {
                let draw = self.rng.gen_range(-1.0f32..=1.0);
                light.flicker(draw);
            } else {
                light.flicker(0.0);
            }
        }
    }

    /// Current lights packed for GPU upload, capped at MAX_DYNAMIC_LIGHTS.
    pub fn gpu_lights(&self) -> Vec<GpuPointLight> {
        if self.lights.len() > MAX_DYNAMIC_LIGHTS as usize {
            log::warn!(
                "{} dynamic lights tracked, only the first {MAX_DYNAMIC_LIGHTS} are uploaded",
                self.lights.len()
            );
        }
        self.lights
            .iter()
            .take(MAX_DYNAMIC_LIGHTS as usize)
            .map(|(_, light)| light.to_gpu())
            .collect()
    }
}

use glam::Vec3;
use voxlight_core::constants::SHADOW_CASTING_MIN_INTENSITY;

/// GPU point light data (32 bytes, matches WGSL PointLight).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// A point light whose intensity is animated every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicLight {
    pub position: Vec3,
    pub color: Vec3,
    pub radius: f32,
    intensity: f32,
    original_intensity: f32,
    flicker_amount: f32,
    casts_shadows: bool,
}

impl DynamicLight {
    /// Dim lights (intensity <= 1.0) never cast shadows.
    pub fn new(position: Vec3, color: Vec3, intensity: f32, radius: f32, flicker_amount: f32) -> Self {
        Self {
            position,
            color,
            radius,
            intensity,
            original_intensity: intensity,
            flicker_amount: flicker_amount.clamp(0.0, 1.0),
            casts_shadows: intensity > SHADOW_CASTING_MIN_INTENSITY,
        }
    }

    /// Intensity after the latest tick.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn original_intensity(&self) -> f32 {
        self.original_intensity
    }

    pub fn flicker_amount(&self) -> f32 {
        self.flicker_amount
    }

    /// Clamped to [0, 1]. Zero stops flicker from the next tick on.
    pub fn set_flicker_amount(&mut self, amount: f32) {
        self.flicker_amount = amount.clamp(0.0, 1.0);
    }

    pub fn casts_shadows(&self) -> bool {
        self.casts_shadows
    }

    /// Apply one flicker sample `draw` in [-1, 1]. Without flicker the light
    /// settles at its original intensity.
    pub(crate) fn flicker(&mut self, draw: f32) {
        self.intensity = if self.flicker_amount > 0.0 {
            self.original_intensity * (1.0 + self.flicker_amount * draw)
        } else {
            self.original_intensity
        };
    }

    pub fn to_gpu(&self) -> GpuPointLight {
        GpuPointLight {
            position: self.position.to_array(),
            radius: self.radius,
            color: self.color.to_array(),
            intensity: self.intensity,
        }
    }
}

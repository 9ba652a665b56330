//! Dynamic point lights: generational storage, per-tick flicker, GPU export.
pub mod arena;
pub mod light;
pub mod manager;

pub use light::{DynamicLight, GpuPointLight};
pub use manager::{DynamicLightManager, LightHandle};

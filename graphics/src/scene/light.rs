//! Light registry and key light resolution.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use nimbus_core::math::Vec3;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::types::BufferDescriptor;

use super::next_stage_index;

/// Light schema as laid out in the key light uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightSchema {
    /// Normalized direction the light travels (xyz).
    pub direction: [f32; 4],
    /// Color (rgb) and intensity (a).
    pub color_intensity: [f32; 4],
}

/// A directional light with its schema buffer.
pub struct Light {
    direction: Vec3,
    color: Vec3,
    intensity: f32,
    schema_buffer: Arc<Buffer>,
}

impl Light {
    /// Create a directional (sun) light.
    ///
    /// A zero direction is rejected.
    pub fn directional(
        device: &Arc<GraphicsDevice>,
        direction: Vec3,
        color: Vec3,
        intensity: f32,
    ) -> Result<Self, GraphicsError> {
        let direction = direction.try_normalize(f32::EPSILON).ok_or_else(|| {
            GraphicsError::InvalidParameter("light direction cannot be zero".to_string())
        })?;
        let schema = LightSchema {
            direction: [direction.x, direction.y, direction.z, 0.0],
            color_intensity: [color.x, color.y, color.z, intensity],
        };
        let schema_buffer = device.create_buffer_init(
            &BufferDescriptor::uniform(std::mem::size_of::<LightSchema>() as u64)
                .with_label("light_schema"),
            bytemuck::bytes_of(&schema),
        )?;
        Ok(Self {
            direction,
            color,
            intensity,
            schema_buffer,
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Uniform buffer bound to the key light slot.
    pub fn schema_buffer(&self) -> &Arc<Buffer> {
        &self.schema_buffer
    }
}

impl std::fmt::Debug for Light {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Light")
            .field("direction", &self.direction)
            .field("color", &self.color)
            .field("intensity", &self.intensity)
            .finish()
    }
}

/// Stable handle to a light registered in a [`LightStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(u32);

impl LightId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Registry of lights with an optional default (fallback) light.
#[derive(Debug, Default)]
pub struct LightStage {
    lights: Vec<Option<Arc<Light>>>,
    default_light: Option<LightId>,
}

impl LightStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a light.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] once the stage has run out of ids.
    pub fn add_light(&mut self, light: Light) -> Result<LightId, GraphicsError> {
        let id = LightId(next_stage_index(self.lights.len(), "light")?);
        self.lights.push(Some(Arc::new(light)));
        Ok(id)
    }

    pub fn get_light(&self, id: LightId) -> Option<Arc<Light>> {
        self.lights.get(id.0 as usize)?.clone()
    }

    pub fn remove_light(&mut self, id: LightId) -> Option<Arc<Light>> {
        if self.default_light == Some(id) {
            self.default_light = None;
        }
        self.lights.get_mut(id.0 as usize)?.take()
    }

    /// Light used when a frame selects no sun light.
    pub fn set_default_light(&mut self, id: Option<LightId>) {
        self.default_light = id;
    }

    pub fn default_light(&self) -> Option<LightId> {
        self.default_light
    }

    /// Key light for a frame: its first sun light, or the default light when
    /// the frame has none.
    ///
    /// The first sun light is authoritative. If it no longer resolves, there is
    /// no key light rather than a fallback to the default.
    pub fn get_current_key_light(&self, frame: &LightFrame) -> Option<Arc<Light>> {
        let id = frame.sun_lights.first().copied().or(self.default_light)?;
        self.get_light(id)
    }
}

/// Lights selected for the current frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightFrame {
    sun_lights: Vec<LightId>,
}

impl LightFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sun_light(&mut self, id: LightId) {
        self.sun_lights.push(id);
    }

    pub fn sun_lights(&self) -> &[LightId] {
        &self.sun_lights
    }

    pub fn clear(&mut self) {
        self.sun_lights.clear();
    }
}

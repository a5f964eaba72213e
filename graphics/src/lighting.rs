//! Lighting model toggles.

use std::sync::Arc;

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::types::BufferDescriptor;

bitflags! {
    /// Per-frame lighting features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LightingModelFlags: u32 {
        const UNLIT = 1 << 0;
        const EMISSIVE = 1 << 1;
        const LIGHTMAP = 1 << 2;
        const BACKGROUND = 1 << 3;
        const HAZE = 1 << 4;
        const AMBIENT_LIGHT = 1 << 5;
        const DIRECTIONAL_LIGHT = 1 << 6;
        const POINT_LIGHT = 1 << 7;
        const SPOT_LIGHT = 1 << 8;
        const SHADOW = 1 << 9;
    }
}

impl Default for LightingModelFlags {
    fn default() -> Self {
        Self::all()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct LightingModelParams {
    flags: [u32; 4],
}

/// Lighting model toggles plus the uniform buffer mirroring them.
///
/// Every setter re-uploads the buffer so bound batches see the new state.
#[derive(Debug)]
pub struct LightingModel {
    flags: LightingModelFlags,
    parameters: Arc<Buffer>,
}

impl LightingModel {
    /// Create a lighting model with every feature enabled.
    pub fn new(device: &Arc<GraphicsDevice>) -> Result<Self, GraphicsError> {
        Self::with_flags(device, LightingModelFlags::default())
    }

    pub fn with_flags(
        device: &Arc<GraphicsDevice>,
        flags: LightingModelFlags,
    ) -> Result<Self, GraphicsError> {
        let parameters = device.create_buffer_init(
            &BufferDescriptor::uniform(std::mem::size_of::<LightingModelParams>() as u64)
                .with_label("lighting_model"),
            bytemuck::bytes_of(&Self::params(flags)),
        )?;
        Ok(Self { flags, parameters })
    }

    pub fn flags(&self) -> LightingModelFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: LightingModelFlags) -> Result<(), GraphicsError> {
        self.flags = flags;
        self.parameters
            .write(0, bytemuck::bytes_of(&Self::params(flags)))
    }

    pub fn is_haze_enabled(&self) -> bool {
        self.flags.contains(LightingModelFlags::HAZE)
    }

    pub fn set_haze(&mut self, enabled: bool) -> Result<(), GraphicsError> {
        let mut flags = self.flags;
        flags.set(LightingModelFlags::HAZE, enabled);
        self.set_flags(flags)
    }

    /// Uniform buffer bound to the light model slot.
    pub fn parameters_buffer(&self) -> &Arc<Buffer> {
        &self.parameters
    }

    fn params(flags: LightingModelFlags) -> LightingModelParams {
        LightingModelParams {
            flags: [flags.bits(), 0, 0, 0],
        }
    }
}

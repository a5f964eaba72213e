//! Haze registry and per-frame haze selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytemuck::{Pod, Zeroable};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::types::{BufferDescriptor, BufferUsage};

use super::next_stage_index;

// ============================================================================
// HazeParams
// ============================================================================

/// Physical haze parameters as laid out in the haze uniform buffer.
///
/// The compositing stage treats this block as opaque bytes; only the haze
/// programs interpret it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct HazeParams {
    /// Haze color (rgb) and maximum opacity (a).
    pub color: [f32; 4],
    /// Glare color (rgb) and glare angle in degrees (a).
    pub glare_color: [f32; 4],
    /// Range, height, base altitude, key light blend.
    pub range_height: [f32; 4],
    /// Mode flags consumed by the shaders.
    pub flags: [u32; 4],
}

impl Default for HazeParams {
    fn default() -> Self {
        Self {
            color: [0.5, 0.6, 0.7, 1.0],
            glare_color: [1.0, 0.9, 0.7, 20.0],
            range_height: [1000.0, 200.0, 0.0, 0.0],
            flags: [0; 4],
        }
    }
}

impl HazeParams {
    /// Set the haze color and opacity.
    pub fn with_color(mut self, rgb: [f32; 3], alpha: f32) -> Self {
        self.color = [rgb[0], rgb[1], rgb[2], alpha];
        self
    }

    /// Set the distance at which haze reaches full opacity.
    pub fn with_range(mut self, range: f32) -> Self {
        self.range_height[0] = range;
        self
    }

    /// Set the altitude falloff height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.range_height[1] = height;
        self
    }
}

// ============================================================================
// HazeConfig
// ============================================================================

/// A registered haze: activation flag plus its parameter buffer.
pub struct HazeConfig {
    active: AtomicBool,
    params_buffer: Arc<Buffer>,
}

impl HazeConfig {
    /// Allocate the parameter buffer and upload `params`.
    pub fn new(
        device: &Arc<GraphicsDevice>,
        params: &HazeParams,
        active: bool,
    ) -> Result<Self, GraphicsError> {
        let params_buffer = device.create_buffer_init(
            &BufferDescriptor::new(
                std::mem::size_of::<HazeParams>() as u64,
                BufferUsage::UNIFORM | BufferUsage::COPY_DST,
            )
            .with_label("haze_params"),
            bytemuck::bytes_of(params),
        )?;
        Ok(Self {
            active: AtomicBool::new(active),
            params_buffer,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Re-upload the parameter block.
    pub fn set_params(&self, params: &HazeParams) -> Result<(), GraphicsError> {
        self.params_buffer.write(0, bytemuck::bytes_of(params))
    }

    /// Read back the current parameter block.
    pub fn params(&self) -> HazeParams {
        bytemuck::pod_read_unaligned(&self.params_buffer.contents())
    }

    /// Uniform buffer bound to the haze parameter slot.
    pub fn params_buffer(&self) -> &Arc<Buffer> {
        &self.params_buffer
    }
}

impl std::fmt::Debug for HazeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HazeConfig")
            .field("active", &self.is_active())
            .field("params_buffer", &self.params_buffer.label())
            .finish()
    }
}

// ============================================================================
// HazeStage
// ============================================================================

/// Stable handle to a haze registered in a [`HazeStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HazeId(u32);

impl HazeId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Registry of hazes. Ids are never reused after removal.
#[derive(Debug, Default)]
pub struct HazeStage {
    elements: Vec<Option<Arc<HazeConfig>>>,
}

impl HazeStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new haze.
    pub fn add_haze(
        &mut self,
        device: &Arc<GraphicsDevice>,
        params: &HazeParams,
        active: bool,
    ) -> Result<HazeId, GraphicsError> {
        let id = HazeId(next_stage_index(self.elements.len(), "haze")?);
        let config = HazeConfig::new(device, params, active)?;
        self.elements.push(Some(Arc::new(config)));
        Ok(id)
    }

    /// Resolve an id. Removed or unknown ids resolve to `None`.
    pub fn get_element(&self, id: HazeId) -> Option<Arc<HazeConfig>> {
        self.elements.get(id.0 as usize)?.clone()
    }

    /// Remove a haze, returning it if it was registered.
    pub fn remove_haze(&mut self, id: HazeId) -> Option<Arc<HazeConfig>> {
        self.elements.get_mut(id.0 as usize)?.take()
    }

    /// Number of registered hazes.
    pub fn len(&self) -> usize {
        self.elements.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// HazeFrame
// ============================================================================

/// Hazes selected for the current frame, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazeFrame {
    hazes: Vec<HazeId>,
}

impl HazeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: HazeId) {
        self.hazes.push(id);
    }

    pub fn clear(&mut self) {
        self.hazes.clear();
    }

    /// The selected haze, if any. Later entries are ignored by the renderer.
    pub fn first(&self) -> Option<HazeId> {
        self.hazes.first().copied()
    }

    pub fn hazes(&self) -> &[HazeId] {
        &self.hazes
    }

    pub fn is_empty(&self) -> bool {
        self.hazes.is_empty()
    }
}

impl From<HazeId> for HazeFrame {
    fn from(id: HazeId) -> Self {
        Self { hazes: vec![id] }
    }
}

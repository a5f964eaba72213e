//! Deferred command recording.
//!
//! Stages never talk to the GPU directly. They append [`Command`]s to a
//! [`Batch`] opened through [`RenderContext::do_in_batch`]; the frame
//! scheduler later takes the closed batches and executes them in order.

mod command;
mod context;

pub use command::Command;
pub use context::RenderContext;

use std::sync::Arc;

use nimbus_core::math::Mat4;
use nimbus_core::primitive::PrimitiveTopology;

use crate::framebuffer::Framebuffer;
use crate::pipeline::GraphicsPipeline;
use crate::resources::{Buffer, Texture};
use crate::slots::{TextureSlot, UniformSlot};
use crate::types::Viewport;

/// A named, ordered, append-only list of render commands.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    name: String,
    commands: Vec<Command>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Get the batch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a raw command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    // === Recording ===

    pub fn enable_stereo(&mut self, enabled: bool) {
        self.push(Command::EnableStereo(enabled));
    }

    pub fn set_framebuffer(&mut self, framebuffer: &Arc<Framebuffer>) {
        self.push(Command::SetFramebuffer(Arc::clone(framebuffer)));
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.push(Command::SetViewport(viewport));
    }

    pub fn set_projection_transform(&mut self, projection: Mat4) {
        self.push(Command::SetProjectionTransform(projection));
    }

    pub fn reset_view_transform(&mut self) {
        self.push(Command::ResetViewTransform);
    }

    pub fn set_model_transform(&mut self, model: Mat4) {
        self.push(Command::SetModelTransform(model));
    }

    pub fn set_uniform_buffer(&mut self, slot: UniformSlot, buffer: &Arc<Buffer>) {
        self.push(Command::SetUniformBuffer {
            slot,
            buffer: Arc::clone(buffer),
        });
    }

    pub fn set_resource_texture(&mut self, slot: TextureSlot, texture: &Arc<Texture>) {
        self.push(Command::SetResourceTexture {
            slot,
            texture: Arc::clone(texture),
        });
    }

    pub fn set_pipeline(&mut self, pipeline: &Arc<GraphicsPipeline>) {
        self.push(Command::SetPipeline(Arc::clone(pipeline)));
    }

    /// Record a draw of `vertex_count` vertices starting at `first_vertex`.
    pub fn draw(&mut self, topology: PrimitiveTopology, vertex_count: u32, first_vertex: u32) {
        self.push(Command::Draw {
            topology,
            vertex_count,
            first_vertex,
        });
    }

    // === Inspection ===

    /// All recorded commands in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of draw commands.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Draw { .. }))
            .count()
    }

    /// Pipelines made current, in recording order.
    pub fn pipelines(&self) -> Vec<&Arc<GraphicsPipeline>> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetPipeline(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Uniform slots bound, in recording order.
    pub fn uniform_buffer_slots(&self) -> Vec<UniformSlot> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetUniformBuffer { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect()
    }

    /// Texture slots bound, in recording order.
    pub fn texture_slots(&self) -> Vec<TextureSlot> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetResourceTexture { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect()
    }

    /// Number of buffer and texture bindings.
    pub fn binding_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_binding()).count()
    }
}

//! Recorded render commands.

use std::sync::Arc;

use nimbus_core::math::Mat4;
use nimbus_core::primitive::PrimitiveTopology;

use crate::framebuffer::Framebuffer;
use crate::pipeline::GraphicsPipeline;
use crate::resources::{Buffer, Texture};
use crate::slots::{TextureSlot, UniformSlot};
use crate::types::Viewport;

/// A single deferred render command.
///
/// Commands hold strong references to every object they use, so a recorded
/// batch stays valid until the scheduler has executed it.
#[derive(Debug, Clone)]
pub enum Command {
    /// Enable or disable stereo (per-eye) rendering.
    EnableStereo(bool),
    /// Bind the output framebuffer.
    SetFramebuffer(Arc<Framebuffer>),
    /// Set the viewport rectangle.
    SetViewport(Viewport),
    /// Set the projection transform.
    SetProjectionTransform(Mat4),
    /// Reset the view transform to the camera-less identity.
    ResetViewTransform,
    /// Set the model transform.
    SetModelTransform(Mat4),
    /// Bind a uniform buffer to a slot.
    SetUniformBuffer {
        slot: UniformSlot,
        buffer: Arc<Buffer>,
    },
    /// Bind a texture to a slot.
    SetResourceTexture {
        slot: TextureSlot,
        texture: Arc<Texture>,
    },
    /// Make a pipeline current for subsequent draws.
    SetPipeline(Arc<GraphicsPipeline>),
    /// Draw non-indexed primitives without a vertex buffer.
    Draw {
        topology: PrimitiveTopology,
        vertex_count: u32,
        first_vertex: u32,
    },
}

impl Command {
    /// Short name of the command kind, for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::EnableStereo(_) => "EnableStereo",
            Command::SetFramebuffer(_) => "SetFramebuffer",
            Command::SetViewport(_) => "SetViewport",
            Command::SetProjectionTransform(_) => "SetProjectionTransform",
            Command::ResetViewTransform => "ResetViewTransform",
            Command::SetModelTransform(_) => "SetModelTransform",
            Command::SetUniformBuffer { .. } => "SetUniformBuffer",
            Command::SetResourceTexture { .. } => "SetResourceTexture",
            Command::SetPipeline(_) => "SetPipeline",
            Command::Draw { .. } => "Draw",
        }
    }

    /// Returns true for buffer and texture bindings.
    pub fn is_binding(&self) -> bool {
        matches!(
            self,
            Command::SetUniformBuffer { .. } | Command::SetResourceTexture { .. }
        )
    }
}

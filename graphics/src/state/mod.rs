//! Fixed-function pipeline state.
//!
//! A [`PipelineState`] is the part of a graphics pipeline that is not the
//! shader program: blending, stencil testing, primitive assembly. It is plain
//! data and is frozen into a [`GraphicsPipeline`](crate::pipeline::GraphicsPipeline)
//! at creation time.

mod blend;
mod stencil;

pub use blend::{BlendComponent, BlendFactor, BlendOperation, BlendState};
pub use stencil::{
    CompareFunction, STENCIL_BACKGROUND, STENCIL_MASK, STENCIL_SHAPE, StencilOperation,
    StencilTest, StencilTestMode,
};

use nimbus_core::primitive::PrimitiveTopology;

use crate::types::TextureFormat;

/// Fixed-function state for a graphics pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineState {
    /// Blend state. If `None`, blending is disabled.
    pub blend: Option<BlendState>,
    /// Stencil test. If `None`, the stencil test is disabled.
    pub stencil: Option<StencilTest>,
    /// Format of the depth/stencil attachment the stencil test reads.
    pub stencil_format: Option<TextureFormat>,
    /// Primitive topology.
    pub topology: PrimitiveTopology,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            blend: None,
            stencil: None,
            stencil_format: None,
            topology: PrimitiveTopology::TriangleList,
            label: None,
        }
    }
}

impl PipelineState {
    /// Create a new state with blending and stencil testing disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blend state.
    pub fn with_blend(mut self, blend: BlendState) -> Self {
        self.blend = Some(blend);
        self
    }

    /// Enable a stencil test against an attachment of the given format.
    pub fn with_stencil_test(mut self, test: impl Into<StencilTest>, format: TextureFormat) -> Self {
        self.stencil = Some(test.into());
        self.stencil_format = Some(format);
        self
    }

    /// Set the primitive topology.
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

//! Graphics pipelines.
//!
//! A [`GraphicsPipeline`] pairs a [`ShaderProgram`] with a frozen
//! [`PipelineState`]. Pipelines are expensive to build, immutable once built,
//! and shared through `Arc`; two users hold the same pipeline exactly when
//! their `Arc`s are pointer-equal.

use std::sync::Arc;

use crate::shader::ShaderProgram;
use crate::state::PipelineState;

/// An immutable shader program + fixed-function state pairing.
pub struct GraphicsPipeline {
    program: Arc<ShaderProgram>,
    state: PipelineState,
}

impl GraphicsPipeline {
    /// Create a new pipeline (called by GraphicsDevice).
    pub(crate) fn new(program: Arc<ShaderProgram>, state: PipelineState) -> Self {
        Self { program, state }
    }

    /// Get the shader program.
    pub fn program(&self) -> &Arc<ShaderProgram> {
        &self.program
    }

    /// Get the fixed-function state.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Get the pipeline label, if set.
    pub fn label(&self) -> Option<&str> {
        self.state.label.as_deref()
    }
}

impl std::fmt::Debug for GraphicsPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsPipeline")
            .field("label", &self.state.label)
            .field("program", &self.program.name())
            .field("stencil", &self.state.stencil)
            .finish()
    }
}

// Pipelines are shared read-only across frames and render contexts.
static_assertions::assert_impl_all!(GraphicsPipeline: Send, Sync);

//! # Nimbus Graphics
//!
//! Deferred renderer building blocks and the haze compositing stage.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GraphicsDevice`] - Validating device that creates buffers, textures, programs and pipelines
//! - [`Batch`] / [`RenderContext`] - Deferred command recording per frame
//! - [`scene`] - Haze and light registries with per-frame selections
//! - [`haze`] - The haze compositing stage ([`DrawHaze`])
//!
//! GPU objects here are CPU-side descriptions. A backend executes the batches
//! that [`RenderContext::take_batches`] hands over.
//!
//! ## Example
//!
//! ```ignore
//! use nimbus_graphics::{DrawHaze, DrawHazeConfig, GraphicsDevice, ShaderLibrary};
//!
//! let device = GraphicsDevice::new("main", ShaderLibrary::standard());
//! let stage = DrawHaze::new(DrawHazeConfig::default());
//! stage.run(&mut ctx, &inputs)?;
//! let batches = ctx.take_batches();
//! ```

pub mod batch;
pub mod device;
pub mod error;
pub mod framebuffer;
pub mod haze;
pub mod lighting;
pub mod pipeline;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod slots;
pub mod state;
pub mod transform;
pub mod types;

// Re-export main types for convenience
pub use batch::{Batch, Command, RenderContext};
pub use device::{DeviceCapabilities, GraphicsDevice};
pub use error::GraphicsError;
pub use framebuffer::{Framebuffer, LinearDepthFramebuffer, eval_subregion_texcoord_transform};
pub use haze::{
    DrawHaze, DrawHazeConfig, DrawHazeInputs, HazePipelineCache, HazePipelineKind, HazePipelines,
    PassPlan, select_passes,
};
pub use lighting::{LightingModel, LightingModelFlags};
pub use pipeline::GraphicsPipeline;
pub use resources::{Buffer, Texture};
pub use scene::{
    HazeConfig, HazeFrame, HazeId, HazeParams, HazeStage, Light, LightFrame, LightId, LightStage,
    Scene,
};
pub use shader::{ShaderLibrary, ShaderProgram};
pub use slots::{TextureSlot, UniformSlot};
pub use state::{BlendState, PipelineState, StencilTest, StencilTestMode};
pub use transform::DeferredFrameTransform;
pub use types::{
    BufferDescriptor, BufferUsage, Extent3d, TextureDescriptor, TextureFormat, TextureUsage,
    Viewport,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
///
/// This should be called before using any graphics functionality.
pub fn init() {
    nimbus_core::init();
    log::info!("Nimbus Graphics v{} initialized", VERSION);
}

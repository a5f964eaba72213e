//! Haze compositing.
//!
//! [`DrawHaze`] blends the frame's haze over the lit scene image. It is split
//! into the pieces it drives:
//!
//! - [`HazePipelineCache`] - builds the three haze pipelines once and keeps them
//! - [`select_passes`] - unified pass or shape/background pass pair
//! - [`bind_haze_resources`] - uniform and texture bindings in fixed order
//!
//! # Geometry
//!
//! Every haze draw is [`FULL_SCREEN_QUAD_VERTICES`] vertices as a triangle
//! strip with no vertex buffer. The vertex stage of the haze programs derives
//! the quad corner from the vertex index and remaps it through the model
//! transform onto the viewport.

mod bindings;
mod draw;
mod passes;
mod pipelines;

pub use bindings::{HazeBindings, bind_haze_resources};
pub use draw::{DrawHaze, DrawHazeConfig, DrawHazeInputs};
pub use passes::{PassPlan, select_passes};
pub use pipelines::{
    HAZE_STENCIL_FORMAT, HazePipelineCache, HazePipelineKind, HazePipelineRecipe, HazePipelines,
};

/// Vertex count of the implicit full-screen quad.
pub const FULL_SCREEN_QUAD_VERTICES: u32 = 4;

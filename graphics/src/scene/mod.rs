//! Scene-side stages consumed by the renderer.
//!
//! A [`Scene`] owns optional registries ("stages") for render-relevant
//! entities. Each stage hands out stable ids; per-frame selections
//! ([`HazeFrame`], [`LightFrame`]) are lists of those ids resolved upstream.
//! A scene without a given stage simply contributes nothing of that kind.

mod haze;
mod light;

pub use haze::{HazeConfig, HazeFrame, HazeId, HazeParams, HazeStage};
pub use light::{Light, LightFrame, LightId, LightSchema, LightStage};

use crate::error::GraphicsError;

/// Id for the next element of a stage holding `len` slots.
fn next_stage_index(len: usize, kind: &str) -> Result<u32, GraphicsError> {
    u32::try_from(len).map_err(|_| {
        GraphicsError::InvalidParameter(format!("{kind} stage is full ({len} entries)"))
    })
}

/// Render-side view of a scene.
#[derive(Debug, Default)]
pub struct Scene {
    haze_stage: Option<HazeStage>,
    light_stage: Option<LightStage>,
}

impl Scene {
    /// Create a scene with no stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a haze stage.
    pub fn with_haze_stage(mut self, stage: HazeStage) -> Self {
        self.haze_stage = Some(stage);
        self
    }

    /// Attach a light stage.
    pub fn with_light_stage(mut self, stage: LightStage) -> Self {
        self.light_stage = Some(stage);
        self
    }

    pub fn haze_stage(&self) -> Option<&HazeStage> {
        self.haze_stage.as_ref()
    }

    pub fn haze_stage_mut(&mut self) -> Option<&mut HazeStage> {
        self.haze_stage.as_mut()
    }

    pub fn light_stage(&self) -> Option<&LightStage> {
        self.light_stage.as_ref()
    }

    pub fn light_stage_mut(&mut self) -> Option<&mut LightStage> {
        self.light_stage.as_mut()
    }
}

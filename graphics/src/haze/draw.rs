//! The haze compositing stage.

use std::sync::Arc;

use nimbus_core::math::Mat4;
use nimbus_core::primitive::PrimitiveTopology;

use crate::batch::RenderContext;
use crate::error::GraphicsError;
use crate::framebuffer::{Framebuffer, LinearDepthFramebuffer, eval_subregion_texcoord_transform};
use crate::lighting::LightingModel;
use crate::scene::{HazeConfig, HazeFrame, LightFrame, Scene};
use crate::transform::DeferredFrameTransform;

use super::FULL_SCREEN_QUAD_VERTICES;
use super::bindings::{HazeBindings, bind_haze_resources};
use super::passes::{PassPlan, select_passes};
use super::pipelines::{HazePipelineCache, HazePipelines};

/// Construction-time configuration of [`DrawHaze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawHazeConfig {
    /// Draw shape and background pixels in two stencil-separated passes.
    pub separate_background_pass: bool,
    /// Name of the recorded batch.
    pub label: String,
}

impl Default for DrawHazeConfig {
    fn default() -> Self {
        Self {
            separate_background_pass: false,
            label: "DrawHaze::run".to_string(),
        }
    }
}

impl DrawHazeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separate_background_pass(mut self, separate: bool) -> Self {
        self.separate_background_pass = separate;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Per-frame inputs of [`DrawHaze::run`].
#[derive(Debug, Clone, Copy)]
pub struct DrawHazeInputs<'a> {
    pub haze_frame: &'a HazeFrame,
    pub output: &'a Arc<Framebuffer>,
    pub framebuffer: &'a LinearDepthFramebuffer,
    pub transform: &'a DeferredFrameTransform,
    pub lighting_model: &'a LightingModel,
    pub light_frame: &'a LightFrame,
}

/// Composites the frame's haze over the lit scene.
///
/// Frames without an active, enabled haze are skipped without recording
/// anything. Otherwise one batch is recorded that sets up a full-screen quad
/// over the viewport, binds the haze resources and draws once per planned pass.
///
/// # Example
///
/// ```ignore
/// let stage = DrawHaze::new(DrawHazeConfig::new().with_separate_background_pass(true));
/// stage.run(&mut ctx, &inputs)?;
/// ```
#[derive(Debug)]
pub struct DrawHaze {
    config: DrawHazeConfig,
    plan: PassPlan,
    cache: Arc<HazePipelineCache>,
}

impl DrawHaze {
    /// Create a stage with its own pipeline cache.
    pub fn new(config: DrawHazeConfig) -> Self {
        Self::with_cache(config, Arc::new(HazePipelineCache::new()))
    }

    /// Create a stage that shares `cache` with other stages.
    ///
    /// Stages sharing a cache must render on the device that built it; `run`
    /// on another device fails with [`GraphicsError::PipelineCreationFailed`].
    pub fn with_cache(config: DrawHazeConfig, cache: Arc<HazePipelineCache>) -> Self {
        let plan = select_passes(config.separate_background_pass);
        Self {
            config,
            plan,
            cache,
        }
    }

    pub fn config(&self) -> &DrawHazeConfig {
        &self.config
    }

    pub fn plan(&self) -> PassPlan {
        self.plan
    }

    pub fn cache(&self) -> &Arc<HazePipelineCache> {
        &self.cache
    }

    /// Built pipelines, if any frame has composited haze yet.
    pub fn pipelines(&self) -> Option<Arc<HazePipelines>> {
        self.cache.get()
    }

    /// Record the haze batch for this frame.
    ///
    /// # Errors
    ///
    /// Returns the pipeline construction error if the pipelines cannot be built.
    /// Nothing is recorded in that case.
    pub fn run(
        &self,
        ctx: &mut RenderContext,
        inputs: &DrawHazeInputs<'_>,
    ) -> Result<(), GraphicsError> {
        let scene = Arc::clone(ctx.scene());

        let Some(haze) = Self::resolve_haze(&scene, inputs.haze_frame) else {
            return Ok(());
        };
        if !inputs.lighting_model.is_haze_enabled() || !haze.is_active() {
            return Ok(());
        }

        let pipelines = self.cache.ensure_built(ctx.device())?;

        let key_light = scene
            .light_stage()
            .and_then(|stage| stage.get_current_key_light(inputs.light_frame));
        let bindings = HazeBindings {
            haze_params: haze.params_buffer(),
            frame_transform: inputs.transform.frame_transform_buffer(),
            light_model: inputs.lighting_model.parameters_buffer(),
            linear_depth: inputs.framebuffer.linear_depth_texture(),
            key_light: key_light.as_ref().map(|light| light.schema_buffer()),
        };

        let viewport = ctx.viewport();
        let model = eval_subregion_texcoord_transform(inputs.output.size(), viewport);

        ctx.do_in_batch(&self.config.label, |batch| {
            batch.enable_stereo(false);

            batch.set_framebuffer(inputs.output);
            batch.set_viewport(viewport);
            batch.set_projection_transform(Mat4::identity());
            batch.reset_view_transform();
            batch.set_model_transform(model);

            bind_haze_resources(batch, &bindings);

            for &kind in self.plan.kinds() {
                batch.set_pipeline(pipelines.get(kind));
                batch.draw(PrimitiveTopology::TriangleStrip, FULL_SCREEN_QUAD_VERTICES, 0);
            }
        });

        Ok(())
    }

    fn resolve_haze(scene: &Scene, frame: &HazeFrame) -> Option<Arc<HazeConfig>> {
        let id = frame.first()?;
        scene.haze_stage()?.get_element(id)
    }
}

static_assertions::assert_impl_all!(DrawHaze: Send, Sync);

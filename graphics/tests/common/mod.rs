//! Shared fixtures for the haze stage integration tests.

use std::sync::Arc;

use nimbus_core::math::Vec3;
use nimbus_graphics::{
    DeferredFrameTransform, DrawHazeInputs, Framebuffer, GraphicsDevice, HazeFrame, HazeParams,
    HazeStage, Light, LightFrame, LightStage, LightingModel, LinearDepthFramebuffer,
    RenderContext, Scene, ShaderLibrary, TextureFormat, Viewport,
};

pub const FRAMEBUFFER_WIDTH: u32 = 640;
pub const FRAMEBUFFER_HEIGHT: u32 = 480;

/// How the scene's haze is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazeSetup {
    /// Scene has no haze stage at all.
    NoStage,
    /// A haze exists but the frame selects nothing.
    EmptySelection,
    /// The frame selects an active haze.
    Active,
    /// The frame selects an inactive haze.
    Inactive,
    /// The frame selects a haze that was removed from the stage.
    Removed,
}

/// How the key light is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLightSetup {
    /// Scene has no light stage.
    NoStage,
    /// Light stage without sun lights or default light.
    None,
    /// The light frame selects a sun light.
    FrameSun,
    /// No sun in the frame, but the stage has a default light.
    DefaultLight,
}

/// Owned per-frame inputs of the haze stage.
pub struct FrameInputs {
    pub haze_frame: HazeFrame,
    pub output: Arc<Framebuffer>,
    pub depth: LinearDepthFramebuffer,
    pub transform: DeferredFrameTransform,
    pub lighting_model: LightingModel,
    pub light_frame: LightFrame,
}

impl FrameInputs {
    pub fn inputs(&self) -> DrawHazeInputs<'_> {
        DrawHazeInputs {
            haze_frame: &self.haze_frame,
            output: &self.output,
            framebuffer: &self.depth,
            transform: &self.transform,
            lighting_model: &self.lighting_model,
            light_frame: &self.light_frame,
        }
    }
}

/// A device, render context and frame inputs ready for `DrawHaze::run`.
pub struct HazeWorld {
    pub device: Arc<GraphicsDevice>,
    pub ctx: RenderContext,
    pub frame: FrameInputs,
    /// Light the stage is expected to bind, if any.
    pub expected_key_light: Option<Arc<Light>>,
}

/// Builder for [`HazeWorld`].
pub struct HazeWorldBuilder {
    library: ShaderLibrary,
    haze: HazeSetup,
    haze_enabled: bool,
    key_light: KeyLightSetup,
    viewport: Viewport,
}

impl Default for HazeWorldBuilder {
    fn default() -> Self {
        Self {
            library: ShaderLibrary::standard(),
            haze: HazeSetup::Active,
            haze_enabled: true,
            key_light: KeyLightSetup::FrameSun,
            viewport: Viewport::from_dimensions(FRAMEBUFFER_WIDTH, FRAMEBUFFER_HEIGHT),
        }
    }
}

impl HazeWorldBuilder {
    pub fn with_library(mut self, library: ShaderLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn with_haze(mut self, haze: HazeSetup) -> Self {
        self.haze = haze;
        self
    }

    pub fn with_haze_enabled(mut self, enabled: bool) -> Self {
        self.haze_enabled = enabled;
        self
    }

    pub fn with_key_light(mut self, key_light: KeyLightSetup) -> Self {
        self.key_light = key_light;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn build(self) -> HazeWorld {
        let _ = env_logger::builder().is_test(true).try_init();

        let device = GraphicsDevice::new("haze-test", self.library);
        let mut scene = Scene::new();

        let mut haze_frame = HazeFrame::new();
        if self.haze != HazeSetup::NoStage {
            let mut stage = HazeStage::new();
            let active = self.haze != HazeSetup::Inactive;
            let id = stage
                .add_haze(&device, &HazeParams::default(), active)
                .unwrap();
            if self.haze == HazeSetup::Removed {
                stage.remove_haze(id);
            }
            if self.haze != HazeSetup::EmptySelection {
                haze_frame.push(id);
            }
            scene = scene.with_haze_stage(stage);
        }

        let mut light_frame = LightFrame::new();
        let mut expected_key_light = None;
        if self.key_light != KeyLightSetup::NoStage {
            let mut stage = LightStage::new();
            let sun = stage.add_light(
                Light::directional(
                    &device,
                    Vec3::new(0.3, -1.0, 0.2),
                    Vec3::new(1.0, 0.95, 0.9),
                    2.5,
                )
                .unwrap(),
            )
            .unwrap();
            match self.key_light {
                KeyLightSetup::FrameSun => {
                    light_frame.push_sun_light(sun);
                    expected_key_light = stage.get_light(sun);
                }
                KeyLightSetup::DefaultLight => {
                    stage.set_default_light(Some(sun));
                    expected_key_light = stage.get_light(sun);
                }
                KeyLightSetup::None | KeyLightSetup::NoStage => {}
            }
            scene = scene.with_light_stage(stage);
        }

        let output = Arc::new(
            Framebuffer::create(
                &device,
                FRAMEBUFFER_WIDTH,
                FRAMEBUFFER_HEIGHT,
                TextureFormat::Rgba16Float,
                Some(TextureFormat::Depth24PlusStencil8),
            )
            .unwrap(),
        );
        let depth =
            LinearDepthFramebuffer::create(&device, FRAMEBUFFER_WIDTH, FRAMEBUFFER_HEIGHT).unwrap();
        let transform = DeferredFrameTransform::new(&device).unwrap();
        let mut lighting_model = LightingModel::new(&device).unwrap();
        lighting_model.set_haze(self.haze_enabled).unwrap();

        let ctx = RenderContext::new(Arc::clone(&device), Arc::new(scene), self.viewport);

        HazeWorld {
            device,
            ctx,
            frame: FrameInputs {
                haze_frame,
                output,
                depth,
                transform,
                lighting_model,
                light_frame,
            },
            expected_key_light,
        }
    }
}

/// A world with an active haze, haze enabled and a frame sun light.
pub fn haze_world() -> HazeWorld {
    HazeWorldBuilder::default().build()
}

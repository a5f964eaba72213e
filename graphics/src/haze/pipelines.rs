//! Haze pipeline construction and caching.

use std::sync::{Arc, Weak};

use nimbus_core::primitive::PrimitiveTopology;
use parking_lot::Mutex;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::pipeline::GraphicsPipeline;
use crate::shader::{HAZE_BACKGROUND_PROGRAM, HAZE_PROGRAM, ShaderProgram};
use crate::state::{BlendState, PipelineState, StencilTestMode};
use crate::types::TextureFormat;

/// Depth/stencil format of the targets the haze passes test against.
pub const HAZE_STENCIL_FORMAT: TextureFormat = TextureFormat::Depth24PlusStencil8;

/// The three haze pipeline variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazePipelineKind {
    /// Single pass over everything outside the mask.
    Unified,
    /// Shape pass of the separated mode.
    SeparatedForeground,
    /// Background pass of the separated mode.
    SeparatedBackground,
}

/// What a pipeline variant is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazePipelineRecipe {
    pub program: &'static str,
    pub stencil: StencilTestMode,
    pub label: &'static str,
}

impl HazePipelineKind {
    pub const ALL: [Self; 3] = [
        Self::Unified,
        Self::SeparatedForeground,
        Self::SeparatedBackground,
    ];

    /// Program and stencil region for this variant.
    pub const fn recipe(self) -> HazePipelineRecipe {
        match self {
            Self::Unified => HazePipelineRecipe {
                program: HAZE_PROGRAM,
                stencil: StencilTestMode::Mask,
                label: "haze_unified",
            },
            Self::SeparatedForeground => HazePipelineRecipe {
                program: HAZE_PROGRAM,
                stencil: StencilTestMode::Shape,
                label: "haze_separated_foreground",
            },
            Self::SeparatedBackground => HazePipelineRecipe {
                program: HAZE_BACKGROUND_PROGRAM,
                stencil: StencilTestMode::Background,
                label: "haze_separated_background",
            },
        }
    }

    /// Fixed-function state for this variant.
    pub fn state(self) -> PipelineState {
        let recipe = self.recipe();
        PipelineState::new()
            .with_blend(BlendState::alpha_over_accumulate())
            .with_stencil_test(recipe.stencil, HAZE_STENCIL_FORMAT)
            .with_topology(PrimitiveTopology::TriangleStrip)
            .with_label(recipe.label)
    }
}

/// The built haze pipelines. Immutable once built.
#[derive(Debug)]
pub struct HazePipelines {
    unified: Arc<GraphicsPipeline>,
    separated_foreground: Arc<GraphicsPipeline>,
    separated_background: Arc<GraphicsPipeline>,
}

impl HazePipelines {
    /// Build all three variants.
    ///
    /// Each distinct program named by the recipes is created once and shared
    /// by every variant that uses it.
    pub fn build(device: &GraphicsDevice) -> Result<Self, GraphicsError> {
        let mut programs: Vec<Arc<ShaderProgram>> = Vec::new();

        let mut create = |kind: HazePipelineKind| -> Result<Arc<GraphicsPipeline>, GraphicsError> {
            let name = kind.recipe().program;
            let existing = programs.iter().find(|p| p.name() == name).cloned();
            let program = match existing {
                Some(program) => program,
                None => {
                    let program = device.create_shader_program(name)?;
                    programs.push(Arc::clone(&program));
                    program
                }
            };
            device.create_pipeline(&program, kind.state())
        };

        Ok(Self {
            unified: create(HazePipelineKind::Unified)?,
            separated_foreground: create(HazePipelineKind::SeparatedForeground)?,
            separated_background: create(HazePipelineKind::SeparatedBackground)?,
        })
    }

    pub fn get(&self, kind: HazePipelineKind) -> &Arc<GraphicsPipeline> {
        match kind {
            HazePipelineKind::Unified => &self.unified,
            HazePipelineKind::SeparatedForeground => &self.separated_foreground,
            HazePipelineKind::SeparatedBackground => &self.separated_background,
        }
    }

    pub fn unified(&self) -> &Arc<GraphicsPipeline> {
        &self.unified
    }

    pub fn separated_foreground(&self) -> &Arc<GraphicsPipeline> {
        &self.separated_foreground
    }

    pub fn separated_background(&self) -> &Arc<GraphicsPipeline> {
        &self.separated_background
    }
}

#[derive(Debug)]
struct BuiltPipelines {
    device: Weak<GraphicsDevice>,
    pipelines: Arc<HazePipelines>,
}

/// Lazily built, build-once holder of [`HazePipelines`].
///
/// The lock is held for the whole build, so concurrent callers wait for the
/// first build instead of starting their own. A failed build leaves the cache
/// empty.
///
/// A cache belongs to the device that first built it. Asking it for pipelines
/// on any other device is an error.
#[derive(Debug, Default)]
pub struct HazePipelineCache {
    built: Mutex<Option<BuiltPipelines>>,
}

impl HazePipelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pipelines, building them on first use.
    ///
    /// # Errors
    ///
    /// Returns the build error on a failed first build, or
    /// [`GraphicsError::PipelineCreationFailed`] if the cache was built on a
    /// different device.
    pub fn ensure_built(
        &self,
        device: &Arc<GraphicsDevice>,
    ) -> Result<Arc<HazePipelines>, GraphicsError> {
        let mut slot = self.built.lock();
        if let Some(built) = slot.as_ref() {
            if !std::ptr::eq(built.device.as_ptr(), Arc::as_ptr(device)) {
                return Err(GraphicsError::PipelineCreationFailed(format!(
                    "haze pipelines were built on another device, not '{}'",
                    device.name()
                )));
            }
            return Ok(Arc::clone(&built.pipelines));
        }

        let pipelines = Arc::new(HazePipelines::build(device)?);
        log::debug!("Built haze pipelines on device '{}'", device.name());
        *slot = Some(BuiltPipelines {
            device: Arc::downgrade(device),
            pipelines: Arc::clone(&pipelines),
        });
        Ok(pipelines)
    }

    /// The pipelines, if already built.
    pub fn get(&self) -> Option<Arc<HazePipelines>> {
        self.built
            .lock()
            .as_ref()
            .map(|built| Arc::clone(&built.pipelines))
    }

    pub fn is_built(&self) -> bool {
        self.built.lock().is_some()
    }
}

static_assertions::assert_impl_all!(HazePipelineCache: Send, Sync);

//! Integration tests for the haze compositing stage.
//!
//! Each test builds a [`HazeWorld`] (device, scene stages, render context and
//! frame inputs), runs [`DrawHaze`] and inspects the recorded batches.

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::{
    FRAMEBUFFER_HEIGHT, FRAMEBUFFER_WIDTH, HazeSetup, HazeWorld, HazeWorldBuilder, KeyLightSetup,
    haze_world,
};
use nimbus_core::math::Mat4;
use nimbus_core::primitive::PrimitiveTopology;
use nimbus_graphics::{
    Batch, Command, DrawHaze, DrawHazeConfig, GraphicsError, HazePipelineCache, ShaderLibrary,
    StencilTestMode, TextureSlot, UniformSlot, Viewport, eval_subregion_texcoord_transform,
};

fn stage(separate_background_pass: bool) -> DrawHaze {
    DrawHaze::new(DrawHazeConfig::new().with_separate_background_pass(separate_background_pass))
}

fn run_once(stage: &DrawHaze, world: &mut HazeWorld) -> Vec<Batch> {
    stage
        .run(&mut world.ctx, &world.frame.inputs())
        .expect("haze stage failed");
    world.ctx.take_batches()
}

fn single_batch(batches: Vec<Batch>) -> Batch {
    assert_eq!(batches.len(), 1, "expected exactly one batch");
    batches.into_iter().next().unwrap()
}

// ============================================================================
// Skips
// ============================================================================

#[rstest]
#[case::empty_selection(HazeSetup::EmptySelection, true)]
#[case::no_haze_stage(HazeSetup::NoStage, true)]
#[case::removed_haze(HazeSetup::Removed, true)]
#[case::inactive_haze(HazeSetup::Inactive, true)]
#[case::haze_disabled(HazeSetup::Active, false)]
#[case::inactive_and_disabled(HazeSetup::Inactive, false)]
fn test_skipped_frames_record_nothing(
    #[case] haze: HazeSetup,
    #[case] haze_enabled: bool,
    #[values(false, true)] separate_background_pass: bool,
) {
    let mut world = HazeWorldBuilder::default()
        .with_haze(haze)
        .with_haze_enabled(haze_enabled)
        .build();
    let stage = stage(separate_background_pass);

    let batches = run_once(&stage, &mut world);

    assert!(batches.is_empty());
    assert!(stage.pipelines().is_none());
    assert_eq!(world.device.pipeline_count(), 0);
}

#[test]
fn test_skip_does_not_need_shaders() {
    let mut world = HazeWorldBuilder::default()
        .with_library(ShaderLibrary::empty())
        .with_haze(HazeSetup::EmptySelection)
        .build();

    let batches = run_once(&stage(false), &mut world);
    assert!(batches.is_empty());
}

// ============================================================================
// Unified and separated passes
// ============================================================================

#[rstest]
#[case::with_key_light(KeyLightSetup::FrameSun, 5)]
#[case::without_key_light(KeyLightSetup::None, 4)]
fn test_unified_pass(#[case] key_light: KeyLightSetup, #[case] bindings: usize) {
    let mut world = HazeWorldBuilder::default()
        .with_key_light(key_light)
        .build();
    let stage = stage(false);

    let batch = single_batch(run_once(&stage, &mut world));
    let pipelines = stage.pipelines().unwrap();

    assert_eq!(batch.name(), "DrawHaze::run");
    assert_eq!(batch.binding_count(), bindings);
    assert_eq!(batch.pipelines().len(), 1);
    assert!(Arc::ptr_eq(batch.pipelines()[0], pipelines.unified()));
    assert_eq!(batch.draw_count(), 1);
    assert!(matches!(
        batch.commands().last(),
        Some(Command::Draw {
            topology: PrimitiveTopology::TriangleStrip,
            vertex_count: 4,
            first_vertex: 0,
        })
    ));
}

#[rstest]
#[case::with_key_light(KeyLightSetup::FrameSun, 5)]
#[case::without_key_light(KeyLightSetup::None, 4)]
fn test_separated_passes(#[case] key_light: KeyLightSetup, #[case] bindings: usize) {
    let mut world = HazeWorldBuilder::default()
        .with_key_light(key_light)
        .build();
    let stage = stage(true);

    let batch = single_batch(run_once(&stage, &mut world));
    let pipelines = stage.pipelines().unwrap();

    assert_eq!(batch.binding_count(), bindings);
    assert_eq!(batch.draw_count(), 2);

    let used = batch.pipelines();
    assert_eq!(used.len(), 2);
    assert!(Arc::ptr_eq(used[0], pipelines.separated_foreground()));
    assert!(Arc::ptr_eq(used[1], pipelines.separated_background()));
    assert_eq!(
        used[0].state().stencil,
        Some(StencilTestMode::Shape.test())
    );
    assert_eq!(
        used[1].state().stencil,
        Some(StencilTestMode::Background.test())
    );
}

#[test]
fn test_command_order() {
    let mut world = haze_world();
    let batch = single_batch(run_once(&stage(true), &mut world));

    let kinds: Vec<_> = batch.commands().iter().map(Command::kind).collect();
    assert_eq!(
        kinds,
        [
            "EnableStereo",
            "SetFramebuffer",
            "SetViewport",
            "SetProjectionTransform",
            "ResetViewTransform",
            "SetModelTransform",
            "SetUniformBuffer",
            "SetUniformBuffer",
            "SetUniformBuffer",
            "SetResourceTexture",
            "SetUniformBuffer",
            "SetPipeline",
            "Draw",
            "SetPipeline",
            "Draw",
        ]
    );
    assert!(matches!(batch.commands()[0], Command::EnableStereo(false)));
    assert!(matches!(
        &batch.commands()[3],
        Command::SetProjectionTransform(m) if *m == Mat4::identity()
    ));
}

#[test]
fn test_bindings_use_frame_resources() {
    let mut world = haze_world();
    let batch = single_batch(run_once(&stage(false), &mut world));

    assert_eq!(
        batch.uniform_buffer_slots(),
        [
            UniformSlot::HazeParams,
            UniformSlot::DeferredFrameTransform,
            UniformSlot::LightModel,
            UniformSlot::KeyLight,
        ]
    );
    assert_eq!(batch.texture_slots(), [TextureSlot::HazeLinearDepth]);

    let inputs = world.frame.inputs();
    for command in batch.commands() {
        match command {
            Command::SetUniformBuffer {
                slot: UniformSlot::DeferredFrameTransform,
                buffer,
            } => assert!(Arc::ptr_eq(
                buffer,
                inputs.transform.frame_transform_buffer()
            )),
            Command::SetUniformBuffer {
                slot: UniformSlot::LightModel,
                buffer,
            } => assert!(Arc::ptr_eq(
                buffer,
                inputs.lighting_model.parameters_buffer()
            )),
            Command::SetUniformBuffer {
                slot: UniformSlot::KeyLight,
                buffer,
            } => {
                let expected = world.expected_key_light.as_ref().unwrap();
                assert!(Arc::ptr_eq(buffer, expected.schema_buffer()));
            }
            Command::SetResourceTexture { texture, .. } => assert!(Arc::ptr_eq(
                texture,
                inputs.framebuffer.linear_depth_texture()
            )),
            Command::SetFramebuffer(framebuffer) => {
                assert!(Arc::ptr_eq(framebuffer, inputs.output))
            }
            _ => {}
        }
    }
}

// ============================================================================
// Key light
// ============================================================================

#[rstest]
#[case::frame_sun(KeyLightSetup::FrameSun, true)]
#[case::default_light(KeyLightSetup::DefaultLight, true)]
#[case::no_light(KeyLightSetup::None, false)]
#[case::no_light_stage(KeyLightSetup::NoStage, false)]
fn test_key_light_binding(#[case] key_light: KeyLightSetup, #[case] bound: bool) {
    let mut world = HazeWorldBuilder::default()
        .with_key_light(key_light)
        .build();
    assert_eq!(world.expected_key_light.is_some(), bound);

    let batch = single_batch(run_once(&stage(false), &mut world));
    assert_eq!(
        batch.uniform_buffer_slots().contains(&UniformSlot::KeyLight),
        bound
    );
}

// ============================================================================
// Viewport remap
// ============================================================================

#[rstest]
#[case::full(Viewport::from_dimensions(FRAMEBUFFER_WIDTH, FRAMEBUFFER_HEIGHT))]
#[case::left_half(Viewport::new(0, 0, FRAMEBUFFER_WIDTH / 2, FRAMEBUFFER_HEIGHT))]
#[case::right_half(Viewport::new(
    (FRAMEBUFFER_WIDTH / 2) as i32,
    0,
    FRAMEBUFFER_WIDTH / 2,
    FRAMEBUFFER_HEIGHT
))]
fn test_viewport_and_model_transform(#[case] viewport: Viewport) {
    let mut world = HazeWorldBuilder::default().with_viewport(viewport).build();
    let batch = single_batch(run_once(&stage(false), &mut world));

    let expected = eval_subregion_texcoord_transform((FRAMEBUFFER_WIDTH, FRAMEBUFFER_HEIGHT), viewport);
    assert!(batch
        .commands()
        .iter()
        .any(|c| matches!(c, Command::SetViewport(v) if *v == viewport)));
    assert!(batch
        .commands()
        .iter()
        .any(|c| matches!(c, Command::SetModelTransform(m) if *m == expected)));
}

// ============================================================================
// Pipeline cache
// ============================================================================

#[rstest]
#[case::unified(false)]
#[case::separated(true)]
fn test_pipelines_built_once(#[case] separate_background_pass: bool) {
    let mut world = haze_world();
    let stage = stage(separate_background_pass);

    run_once(&stage, &mut world);
    let first = stage.pipelines().unwrap();
    for _ in 0..5 {
        run_once(&stage, &mut world);
    }
    let later = stage.pipelines().unwrap();

    assert!(Arc::ptr_eq(&first, &later));
    assert_eq!(world.device.pipeline_count(), 3);
    assert_eq!(world.device.program_count(), 2);
}

#[test]
fn test_pipelines_survive_skipped_frames() {
    let mut world = haze_world();
    let stage = stage(false);

    let first = single_batch(run_once(&stage, &mut world));
    let selected = world.frame.haze_frame.clone();
    world.frame.haze_frame.clear();
    assert!(run_once(&stage, &mut world).is_empty());

    world.frame.haze_frame = selected;
    let again = single_batch(run_once(&stage, &mut world));
    assert!(Arc::ptr_eq(first.pipelines()[0], again.pipelines()[0]));
    assert_eq!(world.device.pipeline_count(), 3);
}

#[test]
fn test_shared_cache_between_stages() {
    let mut world = haze_world();
    let cache = Arc::new(HazePipelineCache::new());
    let unified = DrawHaze::with_cache(DrawHazeConfig::new(), Arc::clone(&cache));
    let separated = DrawHaze::with_cache(
        DrawHazeConfig::new().with_separate_background_pass(true),
        Arc::clone(&cache),
    );

    run_once(&unified, &mut world);
    run_once(&separated, &mut world);

    assert!(Arc::ptr_eq(
        &unified.pipelines().unwrap(),
        &separated.pipelines().unwrap()
    ));
    assert_eq!(world.device.pipeline_count(), 3);
}

#[test]
fn test_shared_cache_stays_on_its_device() {
    let mut first = haze_world();
    let mut second = haze_world();
    let cache = Arc::new(HazePipelineCache::new());
    let stage = DrawHaze::with_cache(DrawHazeConfig::new(), Arc::clone(&cache));

    run_once(&stage, &mut first);
    let result = stage.run(&mut second.ctx, &second.frame.inputs());

    assert!(matches!(
        result,
        Err(GraphicsError::PipelineCreationFailed(_))
    ));
    assert!(second.ctx.batches().is_empty());
    assert_eq!(second.device.pipeline_count(), 0);
}

#[test]
fn test_pipeline_build_failure_propagates() {
    let mut world = HazeWorldBuilder::default()
        .with_library(ShaderLibrary::empty())
        .build();
    let stage = stage(false);

    let result = stage.run(&mut world.ctx, &world.frame.inputs());

    assert!(matches!(
        result,
        Err(GraphicsError::ShaderCreationFailed { .. })
    ));
    assert!(world.ctx.batches().is_empty());
    assert!(stage.pipelines().is_none());
}

#[test]
fn test_haze_toggles_between_frames() {
    let mut world = haze_world();
    let stage = stage(false);

    assert_eq!(run_once(&stage, &mut world).len(), 1);

    world.frame.lighting_model.set_haze(false).unwrap();
    assert!(run_once(&stage, &mut world).is_empty());

    world.frame.lighting_model.set_haze(true).unwrap();
    let id = world.frame.haze_frame.first().unwrap();
    let haze = world.ctx.scene().haze_stage().unwrap().get_element(id).unwrap();
    haze.set_active(false);
    assert!(run_once(&stage, &mut world).is_empty());

    haze.set_active(true);
    let batch = single_batch(run_once(&stage, &mut world));
    assert_eq!(batch.draw_count(), 1);
}

//! Resource binding for the haze passes.

use std::sync::Arc;

use crate::batch::Batch;
use crate::resources::{Buffer, Texture};
use crate::slots::{TextureSlot, UniformSlot};

/// Resources the haze programs read.
#[derive(Debug, Clone, Copy)]
pub struct HazeBindings<'a> {
    pub haze_params: &'a Arc<Buffer>,
    pub frame_transform: &'a Arc<Buffer>,
    pub light_model: &'a Arc<Buffer>,
    pub linear_depth: &'a Arc<Texture>,
    /// Schema buffer of the key light. Left unbound when `None`.
    pub key_light: Option<&'a Arc<Buffer>>,
}

impl HazeBindings<'_> {
    /// Number of bindings [`bind_haze_resources`] records.
    pub fn count(&self) -> usize {
        4 + usize::from(self.key_light.is_some())
    }
}

/// Record the haze bindings into `batch`.
///
/// Order is fixed: haze params, frame transform, light model, linear depth,
/// then the key light if present.
pub fn bind_haze_resources(batch: &mut Batch, bindings: &HazeBindings<'_>) {
    batch.set_uniform_buffer(UniformSlot::HazeParams, bindings.haze_params);
    batch.set_uniform_buffer(UniformSlot::DeferredFrameTransform, bindings.frame_transform);
    batch.set_uniform_buffer(UniformSlot::LightModel, bindings.light_model);
    batch.set_resource_texture(TextureSlot::HazeLinearDepth, bindings.linear_depth);
    if let Some(key_light) = bindings.key_light {
        batch.set_uniform_buffer(UniformSlot::KeyLight, key_light);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Command;
    use crate::device::GraphicsDevice;
    use crate::shader::ShaderLibrary;
    use crate::types::{BufferDescriptor, TextureDescriptor, TextureFormat, TextureUsage};

    #[test]
    fn test_binding_order() {
        let device = GraphicsDevice::new("bind", ShaderLibrary::empty());
        let buffer = || device.create_buffer(&BufferDescriptor::uniform(16)).unwrap();
        let (params, transform, model, key) = (buffer(), buffer(), buffer(), buffer());
        let depth = device
            .create_texture(&TextureDescriptor::new_2d(
                8,
                8,
                TextureFormat::R32Float,
                TextureUsage::TEXTURE_BINDING,
            ))
            .unwrap();

        let mut bindings = HazeBindings {
            haze_params: &params,
            frame_transform: &transform,
            light_model: &model,
            linear_depth: &depth,
            key_light: Some(&key),
        };
        let mut batch = Batch::new("bind");
        bind_haze_resources(&mut batch, &bindings);

        assert_eq!(batch.binding_count(), bindings.count());
        assert_eq!(
            batch.uniform_buffer_slots(),
            [
                UniformSlot::HazeParams,
                UniformSlot::DeferredFrameTransform,
                UniformSlot::LightModel,
                UniformSlot::KeyLight
            ]
        );
        assert!(matches!(
            batch.commands()[3],
            Command::SetResourceTexture {
                slot: TextureSlot::HazeLinearDepth,
                ..
            }
        ));

        bindings.key_light = None;
        let mut batch = Batch::new("bind");
        bind_haze_resources(&mut batch, &bindings);
        assert_eq!(batch.binding_count(), 4);
        assert!(!batch.uniform_buffer_slots().contains(&UniformSlot::KeyLight));
    }
}

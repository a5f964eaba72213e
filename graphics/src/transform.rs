//! Per-frame camera transform uniforms.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use nimbus_core::math::{Mat4, mat4_to_cols_array, perspective_rh};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::types::BufferDescriptor;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct FrameTransformParams {
    projection: [f32; 16],
    view: [f32; 16],
    inv_projection: [f32; 16],
    inv_view: [f32; 16],
}

/// Camera projection and view for the deferred passes of one frame.
#[derive(Debug)]
pub struct DeferredFrameTransform {
    projection: Mat4,
    view: Mat4,
    buffer: Arc<Buffer>,
}

impl DeferredFrameTransform {
    /// Create a transform with identity projection and view.
    pub fn new(device: &Arc<GraphicsDevice>) -> Result<Self, GraphicsError> {
        let buffer = device.create_buffer(
            &BufferDescriptor::uniform(std::mem::size_of::<FrameTransformParams>() as u64)
                .with_label("deferred_frame_transform"),
        )?;
        let mut transform = Self {
            projection: Mat4::identity(),
            view: Mat4::identity(),
            buffer,
        };
        transform.upload()?;
        Ok(transform)
    }

    /// Set an explicit projection and view.
    pub fn update(&mut self, projection: Mat4, view: Mat4) -> Result<(), GraphicsError> {
        self.projection = projection;
        self.view = view;
        self.upload()
    }

    /// Set a perspective projection from a vertical field of view.
    pub fn update_perspective(
        &mut self,
        yfov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        view: Mat4,
    ) -> Result<(), GraphicsError> {
        self.update(perspective_rh(yfov, aspect, znear, zfar), view)
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Uniform buffer bound to the frame transform slot.
    pub fn frame_transform_buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }

    fn upload(&mut self) -> Result<(), GraphicsError> {
        let inverse = |m: &Mat4, what: &str| {
            m.try_inverse().ok_or_else(|| {
                GraphicsError::InvalidParameter(format!("{what} matrix is not invertible"))
            })
        };
        let params = FrameTransformParams {
            projection: mat4_to_cols_array(&self.projection),
            view: mat4_to_cols_array(&self.view),
            inv_projection: mat4_to_cols_array(&inverse(&self.projection, "projection")?),
            inv_view: mat4_to_cols_array(&inverse(&self.view, "view")?),
        };
        self.buffer.write(0, bytemuck::bytes_of(&params))
    }
}

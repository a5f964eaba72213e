//! Framebuffers and full-screen pass helpers.

use std::sync::Arc;

use nimbus_core::math::{Mat4, Vec3, mat4_from_scale_translation};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Texture;
use crate::types::{TextureDescriptor, TextureFormat, TextureUsage, Viewport};

// ============================================================================
// Framebuffer
// ============================================================================

/// A color render target with an optional depth/stencil attachment.
pub struct Framebuffer {
    color: Arc<Texture>,
    depth_stencil: Option<Arc<Texture>>,
}

impl Framebuffer {
    /// Create a framebuffer around an existing color texture.
    pub fn new(color: Arc<Texture>) -> Self {
        Self {
            color,
            depth_stencil: None,
        }
    }

    /// Attach a depth/stencil texture.
    pub fn with_depth_stencil(mut self, depth_stencil: Arc<Texture>) -> Self {
        self.depth_stencil = Some(depth_stencil);
        self
    }

    /// Create a framebuffer with freshly allocated attachments.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if an attachment format does
    /// not fit its role, or if texture creation fails.
    pub fn create(
        device: &Arc<GraphicsDevice>,
        width: u32,
        height: u32,
        color_format: TextureFormat,
        depth_stencil_format: Option<TextureFormat>,
    ) -> Result<Self, GraphicsError> {
        if color_format.is_depth_stencil() {
            return Err(GraphicsError::InvalidParameter(format!(
                "color attachment cannot use depth format {color_format:?}"
            )));
        }
        if let Some(format) = depth_stencil_format
            && !format.is_depth_stencil()
        {
            return Err(GraphicsError::InvalidParameter(format!(
                "depth/stencil attachment cannot use color format {format:?}"
            )));
        }

        let color = device.create_texture(
            &TextureDescriptor::new_2d(
                width,
                height,
                color_format,
                TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
            )
            .with_label("framebuffer_color"),
        )?;
        let mut framebuffer = Self::new(color);
        if let Some(format) = depth_stencil_format {
            let depth = device.create_texture(
                &TextureDescriptor::new_2d(width, height, format, TextureUsage::RENDER_ATTACHMENT)
                    .with_label("framebuffer_depth_stencil"),
            )?;
            framebuffer = framebuffer.with_depth_stencil(depth);
        }
        Ok(framebuffer)
    }

    /// Get the color attachment.
    pub fn color(&self) -> &Arc<Texture> {
        &self.color
    }

    /// Get the depth/stencil attachment, if any.
    pub fn depth_stencil(&self) -> Option<&Arc<Texture>> {
        self.depth_stencil.as_ref()
    }

    /// Size in pixels as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.color.width(), self.color.height())
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("size", &self.size())
            .field("color", &self.color.label())
            .field(
                "depth_stencil",
                &self.depth_stencil.as_ref().map(|t| t.format()),
            )
            .finish()
    }
}

// ============================================================================
// LinearDepthFramebuffer
// ============================================================================

/// Cached render targets produced by the linear depth pass.
#[derive(Debug)]
pub struct LinearDepthFramebuffer {
    linear_depth: Arc<Texture>,
}

impl LinearDepthFramebuffer {
    /// Wrap an existing linear depth texture.
    pub fn new(linear_depth: Arc<Texture>) -> Self {
        Self { linear_depth }
    }

    /// Allocate a single-channel float linear depth target.
    pub fn create(
        device: &Arc<GraphicsDevice>,
        width: u32,
        height: u32,
    ) -> Result<Self, GraphicsError> {
        let linear_depth = device.create_texture(
            &TextureDescriptor::new_2d(
                width,
                height,
                TextureFormat::R32Float,
                TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
            )
            .with_label("linear_depth"),
        )?;
        Ok(Self::new(linear_depth))
    }

    /// Get the linear depth texture.
    pub fn linear_depth_texture(&self) -> &Arc<Texture> {
        &self.linear_depth
    }
}

// ============================================================================
// Full-screen quad helpers
// ============================================================================

/// Model transform that maps the unit quad onto `viewport` within a
/// framebuffer of `framebuffer_size` pixels, in texture coordinates.
///
/// An empty framebuffer yields the identity.
pub fn eval_subregion_texcoord_transform(framebuffer_size: (u32, u32), viewport: Viewport) -> Mat4 {
    let (fw, fh) = framebuffer_size;
    if fw == 0 || fh == 0 {
        return Mat4::identity();
    }
    let (fw, fh) = (fw as f32, fh as f32);
    mat4_from_scale_translation(
        Vec3::new(viewport.width as f32 / fw, viewport.height as f32 / fh, 1.0),
        Vec3::new(viewport.x as f32 / fw, viewport.y as f32 / fh, 0.0),
    )
}

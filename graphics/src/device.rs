//! Graphics device.
//!
//! The [`GraphicsDevice`] is the main interface for creating GPU objects:
//! buffers, textures, shader programs and pipelines. It validates every
//! request and tracks live objects weakly for debugging and leak checks.
//!
//! Objects are CPU-side descriptions; executing recorded batches is the job of
//! a backend that consumes them.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::GraphicsError;
use crate::pipeline::GraphicsPipeline;
use crate::resources::{Buffer, Texture};
use crate::shader::{ShaderLibrary, ShaderProgram};
use crate::state::PipelineState;
use crate::types::{BufferDescriptor, TextureDescriptor};

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum texture dimension.
    pub max_texture_dimension: u32,
    /// Maximum buffer size.
    pub max_buffer_size: u64,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            max_buffer_size: 1 << 30, // 1 GB
        }
    }
}

/// A graphics device for creating GPU objects.
///
/// # Thread Safety
///
/// `GraphicsDevice` is `Send + Sync` and can be safely shared across threads.
///
/// # Example
///
/// ```ignore
/// let device = GraphicsDevice::new("main", ShaderLibrary::standard());
/// let buffer = device.create_buffer(&BufferDescriptor::uniform(64))?;
/// let program = device.create_shader_program("haze")?;
/// let pipeline = device.create_pipeline(&program, PipelineState::new())?;
/// ```
pub struct GraphicsDevice {
    name: String,
    capabilities: DeviceCapabilities,
    library: ShaderLibrary,
    buffers: RwLock<Vec<Weak<Buffer>>>,
    textures: RwLock<Vec<Weak<Texture>>>,
    programs: RwLock<Vec<Weak<ShaderProgram>>>,
    pipelines: RwLock<Vec<Weak<GraphicsPipeline>>>,
}

impl GraphicsDevice {
    /// Create a new device with default capabilities.
    pub fn new(name: impl Into<String>, library: ShaderLibrary) -> Arc<Self> {
        Self::with_capabilities(name, library, DeviceCapabilities::default())
    }

    /// Create a new device with explicit capabilities.
    pub fn with_capabilities(
        name: impl Into<String>,
        library: ShaderLibrary,
        capabilities: DeviceCapabilities,
    ) -> Arc<Self> {
        let name = name.into();
        log::info!("Creating GraphicsDevice '{}'", name);
        Arc::new(Self {
            name,
            capabilities,
            library,
            buffers: RwLock::new(Vec::new()),
            textures: RwLock::new(Vec::new()),
            programs: RwLock::new(Vec::new()),
            pipelines: RwLock::new(Vec::new()),
        })
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Get the shader library programs are resolved from.
    pub fn shader_library(&self) -> &ShaderLibrary {
        &self.library
    }

    /// Create a zero-initialized GPU buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size is zero or exceeds device limits.
    pub fn create_buffer(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
    ) -> Result<Arc<Buffer>, GraphicsError> {
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }

        let buffer = Arc::new(Buffer::new(Arc::downgrade(self), descriptor.clone()));
        self.buffers.write().push(Arc::downgrade(&buffer));

        log::trace!(
            "GraphicsDevice: created buffer {:?}, size={}",
            descriptor.label,
            descriptor.size
        );

        Ok(buffer)
    }

    /// Create a GPU buffer and fill it with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be created or `data` does not fit.
    pub fn create_buffer_init(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<Arc<Buffer>, GraphicsError> {
        let buffer = self.create_buffer(descriptor)?;
        buffer.write(0, data)?;
        Ok(buffer)
    }

    /// Create a GPU texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the texture dimensions are zero or exceed device limits.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        let max_dim = self.capabilities.max_texture_dimension;
        if descriptor.size.width > max_dim
            || descriptor.size.height > max_dim
            || descriptor.size.depth > max_dim
        {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture dimension exceeds maximum {max_dim}"
            )));
        }

        if descriptor.size.width == 0 || descriptor.size.height == 0 {
            return Err(GraphicsError::InvalidParameter(
                "texture dimensions cannot be zero".to_string(),
            ));
        }

        let texture = Arc::new(Texture::new(Arc::downgrade(self), descriptor.clone()));
        self.textures.write().push(Arc::downgrade(&texture));

        log::trace!(
            "GraphicsDevice: created texture {:?}, size={}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );

        Ok(texture)
    }

    /// Create a shader program from the device's shader library.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::ShaderCreationFailed`] if the program is not in
    /// the library or lacks the required entry points.
    pub fn create_shader_program(&self, name: &str) -> Result<Arc<ShaderProgram>, GraphicsError> {
        let program = Arc::new(ShaderProgram::from_library(&self.library, name)?);
        self.programs.write().push(Arc::downgrade(&program));

        log::trace!("GraphicsDevice: created shader program '{}'", name);

        Ok(program)
    }

    /// Create a graphics pipeline from a program and fixed-function state.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::PipelineCreationFailed`] if the state enables a
    /// stencil test without a stencil-capable attachment format.
    pub fn create_pipeline(
        &self,
        program: &Arc<ShaderProgram>,
        state: PipelineState,
    ) -> Result<Arc<GraphicsPipeline>, GraphicsError> {
        if state.stencil.is_some() && !state.stencil_format.is_some_and(|f| f.has_stencil()) {
            return Err(GraphicsError::PipelineCreationFailed(format!(
                "pipeline {:?} tests stencil but attachment format {:?} has no stencil aspect",
                state.label, state.stencil_format
            )));
        }

        log::trace!(
            "GraphicsDevice: created pipeline {:?} (program '{}')",
            state.label,
            program.name()
        );

        let pipeline = Arc::new(GraphicsPipeline::new(Arc::clone(program), state));
        self.pipelines.write().push(Arc::downgrade(&pipeline));

        Ok(pipeline)
    }

    /// Get the number of live buffers created by this device.
    pub fn buffer_count(&self) -> usize {
        Self::live(&self.buffers)
    }

    /// Get the number of live textures created by this device.
    pub fn texture_count(&self) -> usize {
        Self::live(&self.textures)
    }

    /// Get the number of live shader programs created by this device.
    pub fn program_count(&self) -> usize {
        Self::live(&self.programs)
    }

    /// Get the number of live pipelines created by this device.
    pub fn pipeline_count(&self) -> usize {
        Self::live(&self.pipelines)
    }

    /// Clean up dead weak references to released objects.
    pub fn cleanup_dead_resources(&self) {
        self.buffers.write().retain(|w| w.strong_count() > 0);
        self.textures.write().retain(|w| w.strong_count() > 0);
        self.programs.write().retain(|w| w.strong_count() > 0);
        self.pipelines.write().retain(|w| w.strong_count() > 0);
    }

    fn live<T>(tracked: &RwLock<Vec<Weak<T>>>) -> usize {
        tracked
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// Ensure GraphicsDevice is Send + Sync
static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);

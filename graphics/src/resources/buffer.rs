//! GPU buffer resource.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::types::BufferDescriptor;

/// A GPU buffer resource.
///
/// Buffers are created by [`GraphicsDevice::create_buffer`] and are reference-counted.
/// They hold a weak reference back to their parent device.
///
/// The device keeps a CPU shadow of every buffer's contents. Uniform data
/// written through [`write`](Self::write) is what a backend would upload
/// before executing the batches that bind the buffer.
///
/// # Example
///
/// ```ignore
/// let buffer = device.create_buffer(&BufferDescriptor::uniform(64))?;
/// buffer.write(0, bytemuck::bytes_of(&params))?;
/// ```
pub struct Buffer {
    device: Weak<GraphicsDevice>,
    descriptor: BufferDescriptor,
    contents: RwLock<Vec<u8>>,
}

impl Buffer {
    /// Create a new zero-filled buffer (called by GraphicsDevice).
    pub(crate) fn new(device: Weak<GraphicsDevice>, descriptor: BufferDescriptor) -> Self {
        let contents = RwLock::new(vec![0; descriptor.size as usize]);
        Self {
            device,
            descriptor,
            contents,
        }
    }

    /// Get the parent device, if it still exists.
    pub fn device(&self) -> Option<Arc<GraphicsDevice>> {
        self.device.upgrade()
    }

    /// Get the buffer descriptor.
    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    /// Get the buffer size in bytes.
    pub fn size(&self) -> u64 {
        self.descriptor.size
    }

    /// Get the buffer label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    /// Write `data` into the buffer starting at `offset` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if the write would run past
    /// the end of the buffer.
    pub fn write(&self, offset: u64, data: &[u8]) -> Result<(), GraphicsError> {
        let end = offset
            .checked_add(data.len() as u64)
            .filter(|end| *end <= self.descriptor.size)
            .ok_or_else(|| {
                GraphicsError::InvalidParameter(format!(
                    "write of {} bytes at offset {} exceeds buffer {:?} of size {}",
                    data.len(),
                    offset,
                    self.descriptor.label,
                    self.descriptor.size
                ))
            })?;

        self.contents.write()[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    /// Get a copy of the buffer contents.
    pub fn contents(&self) -> Vec<u8> {
        self.contents.read().clone()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.descriptor.size)
            .field("usage", &self.descriptor.usage)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Buffer is Send + Sync
static_assertions::assert_impl_all!(Buffer: Send, Sync);

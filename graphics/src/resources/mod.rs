//! GPU resource handles.
//!
//! Resources are created by [`GraphicsDevice`](crate::device::GraphicsDevice),
//! reference-counted with `Arc`, and shared read-only between stages.

mod buffer;
mod texture;

pub use buffer::Buffer;
pub use texture::Texture;

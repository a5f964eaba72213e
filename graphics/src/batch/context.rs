//! Per-frame render context.

use std::sync::Arc;

use crate::device::GraphicsDevice;
use crate::scene::Scene;
use crate::types::Viewport;

use super::Batch;

/// Render arguments for one frame of one view.
///
/// Stages record into scoped batches through [`do_in_batch`](Self::do_in_batch).
/// Closed batches accumulate here until the frame scheduler takes them.
pub struct RenderContext {
    device: Arc<GraphicsDevice>,
    scene: Arc<Scene>,
    viewport: Viewport,
    batches: Vec<Batch>,
}

impl RenderContext {
    /// Create a context for rendering `scene` into `viewport`.
    pub fn new(device: Arc<GraphicsDevice>, scene: Arc<Scene>, viewport: Viewport) -> Self {
        Self {
            device,
            scene,
            viewport,
            batches: Vec::new(),
        }
    }

    /// Get the device.
    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    /// Get the scene being rendered.
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// Get the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Set the viewport for subsequent stages.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Open a named batch, let `record` fill it, then close it.
    ///
    /// The closed batch is appended to the submission list even if it is empty.
    pub fn do_in_batch<R>(&mut self, name: &str, record: impl FnOnce(&mut Batch) -> R) -> R {
        let mut batch = Batch::new(name);
        let result = record(&mut batch);
        log::trace!(
            "RenderContext: closed batch '{}' with {} commands",
            batch.name(),
            batch.len()
        );
        self.batches.push(batch);
        result
    }

    /// Closed batches recorded so far this frame.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Hand the closed batches over to the scheduler.
    pub fn take_batches(&mut self) -> Vec<Batch> {
        std::mem::take(&mut self.batches)
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("device", &self.device.name())
            .field("viewport", &self.viewport)
            .field("batches", &self.batches.len())
            .finish()
    }
}

/// Vertex buffer resource
///
/// Holds per-vertex attribute data. Capacity = format stride × vertex count,
/// fixed at construction. Updates leave no vertex buffer bound, unlike index
/// buffer updates which restore the previously active index buffer.

use std::sync::{Arc, Mutex};
use bytemuck::Pod;
use crate::error::Result;
use crate::device::{GraphicsDevice, BufferHandle, BufferTarget, BufferUsage};
use crate::buffer::buffer_core::BufferCore;
use crate::buffer::VertexFormat;

/// GPU vertex buffer
pub struct VertexBuffer {
    core: BufferCore,
    format: Arc<VertexFormat>,
    count: u32,
}

impl VertexBuffer {
    /// Create a vertex buffer holding `count` vertices of `format`
    ///
    /// # Arguments
    ///
    /// * `device` - Device hosting the buffer, must outlive `destroy()`
    /// * `format` - Vertex layout providing the stride
    /// * `usage` - Access pattern hint passed to every upload
    /// * `data` - Initial contents, or `None` to only reserve the capacity
    /// * `count` - Number of vertices
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        format: Arc<VertexFormat>,
        usage: BufferUsage,
        data: Option<&[u8]>,
        count: u32,
    ) -> Result<Self> {
        let byte_capacity = u64::from(format.stride()) * u64::from(count);
        let core = BufferCore::create(
            device,
            BufferTarget::Vertex,
            usage,
            byte_capacity,
            data,
            "galaxy3d::VertexBuffer",
        )?;

        Ok(Self { core, format, count })
    }

    /// Write `data` at byte `offset`, or reserve the whole capacity when `data` is `None`
    pub fn update(&mut self, offset: u64, data: Option<&[u8]>) -> Result<()> {
        self.core.update(offset, data)
    }

    /// Typed variant of `update`
    pub fn update_vertices<T: Pod>(&mut self, offset: u64, vertices: &[T]) -> Result<()> {
        self.core.update(offset, Some(bytemuck::cast_slice(vertices)))
    }

    /// Release the device resource
    pub fn destroy(&mut self) -> Result<()> {
        self.core.destroy()
    }

    // ===== ACCESSORS =====

    /// Number of vertices
    pub fn count(&self) -> u32 { self.count }

    /// Vertex layout
    pub fn format(&self) -> &Arc<VertexFormat> { &self.format }

    pub fn usage(&self) -> BufferUsage { self.core.usage() }

    pub fn byte_capacity(&self) -> u64 { self.core.byte_capacity() }

    pub fn handle(&self) -> Option<BufferHandle> { self.core.handle() }

    pub fn is_destroyed(&self) -> bool { self.core.is_destroyed() }

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> { self.core.device() }
}

#[cfg(test)]
#[path = "vertex_buffer_tests.rs"]
mod tests;

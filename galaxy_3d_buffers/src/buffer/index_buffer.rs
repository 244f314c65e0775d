/// Index buffer resource
///
/// Holds index (element) data. Capacity = element width × index count, fixed
/// at construction. After every update the device's previously active index
/// buffer is bound again, so draw state is never disturbed by an upload.

use std::sync::{Arc, Mutex};
use bytemuck::Pod;
use crate::error::Result;
use crate::device::{GraphicsDevice, BufferHandle, BufferTarget, BufferUsage};
use crate::buffer::buffer_core::BufferCore;

/// Index element format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 8-bit indices (max 255 vertices)
    UInt8,
    /// 16-bit indices (max 65535 vertices)
    UInt16,
    /// 32-bit indices (max ~4 billion vertices)
    UInt32,
}

impl IndexFormat {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexFormat::UInt8 => 1,
            IndexFormat::UInt16 => 2,
            IndexFormat::UInt32 => 4,
        }
    }

    /// Index format whose elements are `size` bytes wide
    pub fn from_size_bytes(size: u32) -> Option<Self> {
        match size {
            1 => Some(IndexFormat::UInt8),
            2 => Some(IndexFormat::UInt16),
            4 => Some(IndexFormat::UInt32),
            _ => None,
        }
    }
}

/// GPU index buffer
pub struct IndexBuffer {
    core: BufferCore,
    format: IndexFormat,
    count: u32,
}

impl IndexBuffer {
    /// Create an index buffer holding `count` indices of `format`
    ///
    /// # Arguments
    ///
    /// * `device` - Device hosting the buffer, must outlive `destroy()`
    /// * `format` - Index element width
    /// * `usage` - Access pattern hint passed to every upload
    /// * `data` - Initial contents, or `None` to only reserve the capacity
    /// * `count` - Number of indices
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` if `data` is larger than the capacity, or any device
    /// error raised by the initial upload. No resource is leaked on error.
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        format: IndexFormat,
        usage: BufferUsage,
        data: Option<&[u8]>,
        count: u32,
    ) -> Result<Self> {
        let byte_capacity = u64::from(format.size_bytes()) * u64::from(count);
        let core = BufferCore::create(
            device,
            BufferTarget::Index,
            usage,
            byte_capacity,
            data,
            "galaxy3d::IndexBuffer",
        )?;

        Ok(Self { core, format, count })
    }

    /// Write `data` at byte `offset`, or reserve the whole capacity when `data` is `None`
    ///
    /// An offset of 0 replaces the whole contents; any other offset only
    /// overwrites `[offset, offset + data.len())`.
    pub fn update(&mut self, offset: u64, data: Option<&[u8]>) -> Result<()> {
        self.core.update(offset, data)
    }

    /// Typed variant of `update`
    pub fn update_indices<T: Pod>(&mut self, offset: u64, indices: &[T]) -> Result<()> {
        self.core.update(offset, Some(bytemuck::cast_slice(indices)))
    }

    /// Release the device resource
    ///
    /// A second call returns `AlreadyDestroyed` and changes nothing.
    pub fn destroy(&mut self) -> Result<()> {
        self.core.destroy()
    }

    // ===== ACCESSORS =====

    /// Number of indices
    pub fn count(&self) -> u32 { self.count }

    /// Index element format
    pub fn format(&self) -> IndexFormat { self.format }

    /// Access pattern hint
    pub fn usage(&self) -> BufferUsage { self.core.usage() }

    /// Total reserved size in bytes
    pub fn byte_capacity(&self) -> u64 { self.core.byte_capacity() }

    /// Device handle, `None` once destroyed
    pub fn handle(&self) -> Option<BufferHandle> { self.core.handle() }

    /// Whether `destroy()` already ran
    pub fn is_destroyed(&self) -> bool { self.core.is_destroyed() }

    /// Device hosting the buffer
    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> { self.core.device() }
}

#[cfg(test)]
#[path = "index_buffer_tests.rs"]
mod tests;

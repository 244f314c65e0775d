/// GraphicsDevice trait - the device operations buffers are allowed to issue

use slotmap::new_key_type;
use crate::error::Result;
use crate::device::BufferStats;

new_key_type! {
    /// Opaque device buffer resource identifier.
    ///
    /// Handed out by `GraphicsDevice::create_buffer_resource` and valid
    /// until passed to `delete_buffer_resource`.
    pub struct BufferHandle;
}

/// Device binding target a buffer is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Element (index) array target
    Index,
    /// Vertex attribute array target
    Vertex,
}

/// Expected access pattern, passed unchanged to every upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times
    #[default]
    Static,
    /// Rewritten often, drawn many times
    Dynamic,
    /// Written once, drawn a few times
    Stream,
}

/// Payload of a full upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferData<'a> {
    /// Allocate this many bytes without specifying their contents
    Reserve(u64),
    /// Replace the whole buffer contents with these bytes
    Bytes(&'a [u8]),
}

impl BufferData<'_> {
    /// Size in bytes of the storage this upload produces
    pub fn size(&self) -> u64 {
        match self {
            BufferData::Reserve(size) => *size,
            BufferData::Bytes(bytes) => bytes.len() as u64,
        }
    }
}

/// Graphics device trait
///
/// Implemented by backends (OpenGL, Vulkan staging, the CPU `SoftwareDevice`...).
/// Every call runs on the thread owning the device context; buffers serialize
/// access through the `Mutex` they share the device with.
pub trait GraphicsDevice: Send + Sync {
    /// Create a new buffer resource with no storage
    fn create_buffer_resource(&mut self) -> BufferHandle;

    /// Release a buffer resource
    fn delete_buffer_resource(&mut self, handle: BufferHandle);

    /// Bind a buffer to a target, or unbind the target with `None`
    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>);

    /// Replace the storage of the buffer bound to `target`
    ///
    /// # Arguments
    ///
    /// * `target` - Target the buffer is currently bound to
    /// * `data` - Reserved size or initial contents
    /// * `usage` - Access pattern hint
    fn upload_full(&mut self, target: BufferTarget, data: BufferData<'_>, usage: BufferUsage) -> Result<()>;

    /// Overwrite `[offset, offset + data.len())` of the buffer bound to `target`
    fn upload_sub_range(
        &mut self,
        target: BufferTarget,
        offset: u64,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<()>;

    /// Rebind the index buffer selected by the current draw state
    fn restore_index_buffer(&mut self);

    /// Byte usage counters
    ///
    /// Must return the same instance for the lifetime of the device; buffers
    /// record their allocations and releases into it.
    fn stats(&self) -> &BufferStats;
}

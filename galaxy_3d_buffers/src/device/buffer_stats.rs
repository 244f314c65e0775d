/// Device-wide byte accounting for live buffers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::device::BufferTarget;

/// Byte usage counters owned by a graphics device
///
/// Each counter equals the sum of the capacities of the live buffers of its
/// kind. Only buffer construction and `destroy` move them: the mutators are
/// crate-private and take `&self`, so a device exposes the counters through
/// `GraphicsDevice::stats` alone and holders of the device cannot reset them.
/// Implementors create one instance with `BufferStats::new()` and keep it for
/// the lifetime of the device.
#[derive(Default)]
pub struct BufferStats {
    index_buffer_bytes: AtomicU64,
    vertex_buffer_bytes: AtomicU64,
}

impl BufferStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Total capacity of live index buffers
    pub fn index_buffer_bytes(&self) -> u64 {
        self.index_buffer_bytes.load(Ordering::Relaxed)
    }

    /// Total capacity of live vertex buffers
    pub fn vertex_buffer_bytes(&self) -> u64 {
        self.vertex_buffer_bytes.load(Ordering::Relaxed)
    }

    /// Total capacity of live buffers attached to `target`
    pub fn bytes(&self, target: BufferTarget) -> u64 {
        self.counter(target).load(Ordering::Relaxed)
    }

    /// Total capacity of all live buffers
    pub fn total_bytes(&self) -> u64 {
        self.index_buffer_bytes() + self.vertex_buffer_bytes()
    }

    pub(crate) fn record_allocation(&self, target: BufferTarget, bytes: u64) {
        self.counter(target).fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_release(&self, target: BufferTarget, bytes: u64) {
        let counter = self.counter(target);
        let previous = counter.load(Ordering::Relaxed);
        debug_assert!(previous >= bytes, "releasing {} bytes from a {} byte counter", bytes, previous);
        counter.store(previous.saturating_sub(bytes), Ordering::Relaxed);
    }

    fn counter(&self, target: BufferTarget) -> &AtomicU64 {
        match target {
            BufferTarget::Index => &self.index_buffer_bytes,
            BufferTarget::Vertex => &self.vertex_buffer_bytes,
        }
    }
}

impl PartialEq for BufferStats {
    fn eq(&self, other: &Self) -> bool {
        self.index_buffer_bytes() == other.index_buffer_bytes()
            && self.vertex_buffer_bytes() == other.vertex_buffer_bytes()
    }
}

impl Eq for BufferStats {}

impl fmt::Debug for BufferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferStats")
            .field("index_buffer_bytes", &self.index_buffer_bytes())
            .field("vertex_buffer_bytes", &self.vertex_buffer_bytes())
            .finish()
    }
}

#[cfg(test)]
#[path = "buffer_stats_tests.rs"]
mod tests;

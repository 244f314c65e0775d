/// Shared buffer lifecycle (create → update* → destroy).
///
/// Both `IndexBuffer` and `VertexBuffer` are thin wrappers around a
/// `BufferCore` configured with their device target and byte capacity.
/// The core owns capacity validation, the bind → upload → rebind sequence,
/// and the device byte counters.

use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::device::{GraphicsDevice, BufferHandle, BufferTarget, BufferUsage, BufferData};
use crate::{gfx_debug, gfx_error, gfx_trace, gfx_warn};

/// Device handle state, no other state is observable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandleState {
    Live(BufferHandle),
    Destroyed,
}

pub(crate) struct BufferCore {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    target: BufferTarget,
    usage: BufferUsage,
    byte_capacity: u64,
    state: HandleState,
    source: &'static str,
}

impl BufferCore {
    /// Create the device resource, upload `data` (or reserve the capacity when
    /// `None`), then account for the capacity.
    ///
    /// If the initial upload fails the resource is released again and the
    /// counters are left untouched.
    pub(crate) fn create(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        target: BufferTarget,
        usage: BufferUsage,
        byte_capacity: u64,
        data: Option<&[u8]>,
        source: &'static str,
    ) -> Result<Self> {
        let handle = lock_device(&device, source)?.create_buffer_resource();

        let mut core = Self {
            device,
            target,
            usage,
            byte_capacity,
            state: HandleState::Live(handle),
            source,
        };

        let accounted = core.update(0, data).and_then(|()| {
            core.with_device(|device| {
                device.stats().record_allocation(target, byte_capacity);
            })
        });

        if let Err(error) = accounted {
            if let Ok(mut device) = core.device.lock() {
                device.delete_buffer_resource(handle);
            }
            core.state = HandleState::Destroyed;
            return Err(error);
        }

        gfx_debug!(source, "Created {:?} buffer {:?} ({} bytes, {:?})",
            target, handle, byte_capacity, usage);
        Ok(core)
    }

    /// Write `data` at `offset`, or reserve the whole capacity when `data` is `None`
    pub(crate) fn update(&mut self, offset: u64, data: Option<&[u8]>) -> Result<()> {
        let handle = match self.state {
            HandleState::Live(handle) => handle,
            HandleState::Destroyed => {
                gfx_error!(self.source, "Failed to update: the buffer is destroyed");
                return Err(Error::AlreadyDestroyed);
            }
        };

        if let Some(bytes) = data {
            let len = bytes.len() as u64;
            let fits = offset
                .checked_add(len)
                .is_some_and(|end| end <= self.byte_capacity);
            if !fits {
                gfx_error!(self.source, "Failed to update: {} bytes at offset {} exceed capacity of {} bytes",
                    len, offset, self.byte_capacity);
                return Err(Error::CapacityExceeded {
                    offset,
                    len,
                    capacity: self.byte_capacity,
                });
            }
        }

        let target = self.target;
        let usage = self.usage;
        let capacity = self.byte_capacity;

        let result = self.with_device(|device| {
            device.bind_buffer(target, Some(handle));
            let uploaded = match data {
                None => device.upload_full(target, BufferData::Reserve(capacity), usage),
                Some(bytes) if offset == 0 => device.upload_full(target, BufferData::Bytes(bytes), usage),
                Some(bytes) => device.upload_sub_range(target, offset, bytes, usage),
            };
            match target {
                // Index uploads give the draw state its index buffer back
                BufferTarget::Index => device.restore_index_buffer(),
                // Vertex uploads leave nothing bound
                BufferTarget::Vertex => device.bind_buffer(BufferTarget::Vertex, None),
            }
            uploaded
        })?;

        match &result {
            Ok(()) => gfx_trace!(self.source, "Updated buffer {:?} at offset {} ({} bytes)",
                handle, offset, data.map_or(capacity, |bytes| bytes.len() as u64)),
            Err(error) => gfx_error!(self.source, "Device upload failed: {}", error),
        }
        result
    }

    /// Release the device resource and give its capacity back to the counters
    pub(crate) fn destroy(&mut self) -> Result<()> {
        let handle = match self.state {
            HandleState::Live(handle) => handle,
            HandleState::Destroyed => {
                gfx_error!(self.source, "Failed to destroy: the buffer is already destroyed");
                return Err(Error::AlreadyDestroyed);
            }
        };

        let target = self.target;
        let capacity = self.byte_capacity;
        self.with_device(|device| {
            device.delete_buffer_resource(handle);
            device.stats().record_release(target, capacity);
        })?;
        self.state = HandleState::Destroyed;

        gfx_debug!(self.source, "Destroyed {:?} buffer {:?} ({} bytes)", target, handle, capacity);
        Ok(())
    }

    // ===== ACCESSORS =====

    pub(crate) fn handle(&self) -> Option<BufferHandle> {
        match self.state {
            HandleState::Live(handle) => Some(handle),
            HandleState::Destroyed => None,
        }
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.state == HandleState::Destroyed
    }

    pub(crate) fn byte_capacity(&self) -> u64 {
        self.byte_capacity
    }

    pub(crate) fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub(crate) fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    /// Run `f` with the device locked for its whole duration
    fn with_device<R>(&self, f: impl FnOnce(&mut dyn GraphicsDevice) -> R) -> Result<R> {
        let mut device = lock_device(&self.device, self.source)?;
        Ok(f(&mut *device))
    }
}

impl Drop for BufferCore {
    fn drop(&mut self) {
        if let HandleState::Live(handle) = self.state {
            gfx_warn!(self.source, "Buffer {:?} dropped without destroy(), {} bytes still accounted",
                handle, self.byte_capacity);
        }
    }
}

fn lock_device<'a>(
    device: &'a Arc<Mutex<dyn GraphicsDevice>>,
    source: &'static str,
) -> Result<std::sync::MutexGuard<'a, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| {
        gfx_error!(source, "Device lock poisoned");
        Error::BackendError("Device lock poisoned".to_string())
    })
}

#[cfg(test)]
#[path = "buffer_core_tests.rs"]
mod tests;

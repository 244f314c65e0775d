/// Software graphics device (CPU memory, no GPU required)
///
/// Implements `GraphicsDevice` on top of plain byte vectors. Used by the test
/// suites and by headless tools that want to exercise buffer code without a
/// graphics context. Binding and upload rules follow OpenGL buffer objects:
/// a full upload resizes storage to the payload, a sub-range upload must fit
/// in the current storage.

use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::device::{
    GraphicsDevice, BufferHandle, BufferTarget, BufferUsage, BufferData, BufferStats,
};
use crate::{gfx_err, gfx_trace};

/// Software device configuration
#[derive(Debug, Clone)]
pub struct SoftwareDeviceConfig {
    /// Name used as log source suffix
    pub label: String,
    /// Byte written into storage allocated by `BufferData::Reserve`
    pub reserve_fill: u8,
    /// Record every device call in `commands()`
    pub record_commands: bool,
}

impl Default for SoftwareDeviceConfig {
    fn default() -> Self {
        Self {
            label: "SoftwareDevice".to_string(),
            reserve_fill: 0,
            record_commands: true,
        }
    }
}

/// A device call, as recorded by `SoftwareDevice`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    CreateBuffer(BufferHandle),
    DeleteBuffer(BufferHandle),
    Bind {
        target: BufferTarget,
        handle: Option<BufferHandle>,
    },
    UploadFull {
        target: BufferTarget,
        handle: BufferHandle,
        size: u64,
        usage: BufferUsage,
    },
    UploadSubRange {
        target: BufferTarget,
        handle: BufferHandle,
        offset: u64,
        len: u64,
        usage: BufferUsage,
    },
    RestoreIndexBuffer(Option<BufferHandle>),
}

/// CPU-memory graphics device
pub struct SoftwareDevice {
    config: SoftwareDeviceConfig,
    source: String,
    buffers: SlotMap<BufferHandle, Vec<u8>>,
    bound_index: Option<BufferHandle>,
    bound_vertex: Option<BufferHandle>,
    /// Index buffer selected by the draw state, rebound by `restore_index_buffer`
    active_index: Option<BufferHandle>,
    commands: Vec<DeviceCommand>,
    stats: BufferStats,
}

impl SoftwareDevice {
    /// Create a device with the given configuration
    pub fn new(config: SoftwareDeviceConfig) -> Self {
        let source = format!("galaxy3d::{}", config.label);
        Self {
            config,
            source,
            buffers: SlotMap::with_key(),
            bound_index: None,
            bound_vertex: None,
            active_index: None,
            commands: Vec::new(),
            stats: BufferStats::new(),
        }
    }

    /// Device configuration
    pub fn config(&self) -> &SoftwareDeviceConfig {
        &self.config
    }

    /// Select the index buffer used for drawing
    ///
    /// Only this selection is rebound after an index upload; plain
    /// `bind_buffer` calls on the index target are overwritten by it.
    pub fn set_active_index_buffer(&mut self, handle: Option<BufferHandle>) {
        self.active_index = handle;
        self.bind_buffer(BufferTarget::Index, handle);
    }

    /// Index buffer selected by the draw state
    pub fn active_index_buffer(&self) -> Option<BufferHandle> {
        self.active_index
    }

    /// Buffer currently bound to `target`
    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferHandle> {
        match target {
            BufferTarget::Index => self.bound_index,
            BufferTarget::Vertex => self.bound_vertex,
        }
    }

    /// Storage of a live buffer
    pub fn contents(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(handle).map(Vec::as_slice)
    }

    /// Number of buffer resources not yet deleted
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Recorded device calls, oldest first
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Forget recorded device calls
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    fn record(&mut self, command: DeviceCommand) {
        if self.config.record_commands {
            self.commands.push(command);
        }
    }

    /// Resolve the live buffer bound to `target`
    fn bound_storage(&mut self, target: BufferTarget) -> Result<(BufferHandle, &mut Vec<u8>)> {
        let handle = match self.bound_buffer(target) {
            Some(handle) => handle,
            None => {
                return Err(gfx_err!(&self.source, Error::InvalidResource(
                    format!("No buffer bound to the {:?} target", target)
                )));
            }
        };
        match self.buffers.get_mut(handle) {
            Some(storage) => Ok((handle, storage)),
            None => Err(gfx_err!(&self.source, Error::InvalidResource(
                format!("Buffer bound to the {:?} target was deleted", target)
            ))),
        }
    }
}

impl Default for SoftwareDevice {
    fn default() -> Self {
        Self::new(SoftwareDeviceConfig::default())
    }
}

impl GraphicsDevice for SoftwareDevice {
    fn create_buffer_resource(&mut self) -> BufferHandle {
        let handle = self.buffers.insert(Vec::new());
        gfx_trace!(&self.source, "Created buffer {:?}", handle);
        self.record(DeviceCommand::CreateBuffer(handle));
        handle
    }

    fn delete_buffer_resource(&mut self, handle: BufferHandle) {
        self.buffers.remove(handle);
        // Deleting a bound buffer unbinds it
        if self.bound_index == Some(handle) {
            self.bound_index = None;
        }
        if self.bound_vertex == Some(handle) {
            self.bound_vertex = None;
        }
        if self.active_index == Some(handle) {
            self.active_index = None;
        }
        gfx_trace!(&self.source, "Deleted buffer {:?}", handle);
        self.record(DeviceCommand::DeleteBuffer(handle));
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>) {
        match target {
            BufferTarget::Index => self.bound_index = handle,
            BufferTarget::Vertex => self.bound_vertex = handle,
        }
        self.record(DeviceCommand::Bind { target, handle });
    }

    fn upload_full(&mut self, target: BufferTarget, data: BufferData<'_>, usage: BufferUsage) -> Result<()> {
        let fill = self.config.reserve_fill;
        let source = self.source.clone();
        let size = data.size();
        let len = usize::try_from(size).map_err(|_| gfx_err!(&source, Error::OutOfMemory))?;

        let (handle, storage) = self.bound_storage(target)?;
        storage.clear();
        // Allocation failure must surface as an error, never abort
        storage.try_reserve_exact(len).map_err(|_| gfx_err!(&source, Error::OutOfMemory))?;
        match data {
            BufferData::Reserve(_) => storage.resize(len, fill),
            BufferData::Bytes(bytes) => storage.extend_from_slice(bytes),
        }

        gfx_trace!(&self.source, "Uploaded {} bytes to buffer {:?} ({:?})", size, handle, usage);
        self.record(DeviceCommand::UploadFull { target, handle, size, usage });
        Ok(())
    }

    fn upload_sub_range(
        &mut self,
        target: BufferTarget,
        offset: u64,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<()> {
        let source = self.source.clone();
        let (handle, storage) = self.bound_storage(target)?;

        let start = usize::try_from(offset).ok();
        let end = start.and_then(|start| start.checked_add(data.len()));
        match (start, end) {
            (Some(start), Some(end)) if end <= storage.len() => {
                storage[start..end].copy_from_slice(data);
            }
            _ => {
                return Err(gfx_err!(&source, Error::BackendError(format!(
                    "Sub-range of {} bytes at offset {} exceeds storage of {} bytes",
                    data.len(), offset, storage.len()
                ))));
            }
        }

        gfx_trace!(&self.source, "Uploaded {} bytes at offset {} to buffer {:?}", data.len(), offset, handle);
        self.record(DeviceCommand::UploadSubRange {
            target,
            handle,
            offset,
            len: data.len() as u64,
            usage,
        });
        Ok(())
    }

    /// Rebinds the buffer selected with `set_active_index_buffer`. A buffer
    /// bound directly through `bind_buffer(BufferTarget::Index, ..)` is not
    /// remembered and does not survive an index upload.
    fn restore_index_buffer(&mut self) {
        self.bound_index = self.active_index;
        self.record(DeviceCommand::RestoreIndexBuffer(self.active_index));
    }

    fn stats(&self) -> &BufferStats {
        &self.stats
    }
}

#[cfg(test)]
#[path = "software_device_tests.rs"]
mod tests;

/*!
# Galaxy 3D Buffers

GPU linear buffer resources for the Galaxy 3D rendering engine.

This crate wraps opaque graphics-device buffer handles into two typed resources,
tracks their byte capacity, and routes every write to device memory through a
narrow update contract. The device itself is abstracted behind the
[`GraphicsDevice`](device::GraphicsDevice) trait so any backend can host the buffers.

## Architecture

- **GraphicsDevice**: Device trait (handle creation, binding, uploads, byte counters)
- **SoftwareDevice**: CPU-memory device for tests and headless tools
- **IndexBuffer**: Index data, capacity = element width × index count
- **VertexBuffer**: Vertex data, capacity = stride × vertex count
- **VertexFormat**: Packed vertex attribute layout providing the stride

Both buffer kinds share a single lifecycle core (create → update* → destroy).
*/

// Internal modules
mod error;
pub mod log;
pub mod device;
pub mod buffer;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and configuration, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, LogConfig, DefaultLogger,
            set_logger, reset_logger, set_log_config, log_config, log, log_detailed,
        };
    }

    // Device sub-module
    pub mod device {
        pub use crate::device::*;
    }

    // Buffer sub-module
    pub mod buffer {
        pub use crate::buffer::*;
    }
}

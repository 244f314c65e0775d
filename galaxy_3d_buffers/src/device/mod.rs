/// Device module - the graphics device contract consumed by buffers

// Module declarations
pub mod graphics_device;
pub mod buffer_stats;
pub mod software_device;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer_stats::*;
pub use software_device::*;

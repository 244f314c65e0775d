/// Buffer module - index and vertex buffer resources

// Shared lifecycle, not part of the public API
mod buffer_core;

pub mod index_buffer;
pub mod vertex_buffer;
pub mod vertex_format;

pub use index_buffer::*;
pub use vertex_buffer::*;
pub use vertex_format::*;

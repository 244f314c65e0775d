//! Error types for Galaxy3D buffers
//!
//! This module defines the error types used by buffer resources and by
//! graphics devices hosting them.

use std::fmt;

/// Result type for Galaxy3D buffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D buffer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer was already destroyed (update or destroy after destroy)
    AlreadyDestroyed,

    /// Update range does not fit in the buffer capacity
    CapacityExceeded {
        /// Requested write offset in bytes
        offset: u64,
        /// Requested write length in bytes
        len: u64,
        /// Fixed buffer capacity in bytes
        capacity: u64,
    },

    /// Backend-specific error (Vulkan, OpenGL, software device, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (handle, format, layout, etc.)
    InvalidResource(String),

    /// Initialization failed (device, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyDestroyed => write!(f, "Buffer already destroyed"),
            Error::CapacityExceeded { offset, len, capacity } => write!(
                f,
                "Capacity exceeded: {} bytes at offset {} do not fit in {} bytes",
                len, offset, capacity
            ),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

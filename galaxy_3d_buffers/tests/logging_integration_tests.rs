//! Integration tests for buffer diagnostics
//!
//! Caller misuse is reported through the crate logger as well as through the
//! returned error. Every test here swaps the global logger, so all of them
//! are serialized.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_buffers::galaxy3d::buffer::{IndexBuffer, IndexFormat, VertexBuffer, VertexFormat};
use galaxy_3d_buffers::galaxy3d::device::{GraphicsDevice, SoftwareDevice, BufferUsage};
use galaxy_3d_buffers::galaxy3d::log::{
    self, Logger, LogEntry, LogSeverity, LogConfig,
};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn create_device() -> Arc<Mutex<dyn GraphicsDevice>> {
    Arc::new(Mutex::new(SoftwareDevice::default()))
}

fn errors(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<LogEntry> {
    entries.lock().unwrap()
        .iter()
        .filter(|e| e.severity == LogSeverity::Error)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_capacity_exceeded_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let mut ib = IndexBuffer::new(create_device(), IndexFormat::UInt16, BufferUsage::Static, None, 2).unwrap();
    assert!(ib.update(2, Some(&[0; 4])).is_err());
    ib.destroy().unwrap();

    log::reset_logger();

    let errors = errors(&entries);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "galaxy3d::IndexBuffer");
    assert!(errors[0].message.contains("exceed"));
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());
}

#[test]
#[serial]
fn test_integration_double_destroy_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let mut vb = VertexBuffer::new(
        create_device(),
        Arc::new(VertexFormat::from_stride(12)),
        BufferUsage::Static,
        None,
        1,
    ).unwrap();
    vb.destroy().unwrap();
    assert!(vb.destroy().is_err());
    assert!(vb.update(0, None).is_err());

    log::reset_logger();

    let errors = errors(&entries);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.source == "galaxy3d::VertexBuffer"));
    assert!(errors[0].message.contains("already destroyed"));
    assert!(errors[1].message.contains("destroyed"));
}

#[test]
#[serial]
fn test_integration_lifecycle_debug_logs() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let mut ib = IndexBuffer::new(create_device(), IndexFormat::UInt8, BufferUsage::Static, None, 4).unwrap();
    ib.destroy().unwrap();

    log::reset_logger();

    let captured = entries.lock().unwrap();
    let debug: Vec<&LogEntry> = captured.iter()
        .filter(|e| e.severity == LogSeverity::Debug && e.source == "galaxy3d::IndexBuffer")
        .collect();
    assert_eq!(debug.len(), 2);
    assert!(debug[0].message.starts_with("Created"));
    assert!(debug[1].message.starts_with("Destroyed"));
}

#[test]
#[serial]
fn test_integration_leaked_buffer_warns() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    {
        let _leaked = IndexBuffer::new(create_device(), IndexFormat::UInt32, BufferUsage::Static, None, 1).unwrap();
    }

    log::reset_logger();

    let captured = entries.lock().unwrap();
    let warnings: Vec<&LogEntry> = captured.iter()
        .filter(|e| e.severity == LogSeverity::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("without destroy()"));
}

#[test]
#[serial]
fn test_integration_min_severity_hides_trace() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);
    log::set_log_config(LogConfig { min_severity: LogSeverity::Info });

    let mut ib = IndexBuffer::new(create_device(), IndexFormat::UInt16, BufferUsage::Static, None, 8).unwrap();
    ib.update(0, Some(&[1; 16])).unwrap();
    ib.destroy().unwrap();

    log::set_log_config(LogConfig::default());
    log::reset_logger();

    assert!(entries.lock().unwrap().is_empty());
}

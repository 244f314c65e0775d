use super::*;
use crate::buffer::{AttributeDesc, AttributeFormat};
use crate::device::{SoftwareDevice, DeviceCommand};
use crate::error::Error;

// ============================================================================
// Helpers
// ============================================================================

fn create_device() -> (Arc<Mutex<SoftwareDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
    let device = Arc::new(Mutex::new(SoftwareDevice::default()));
    let shared: Arc<Mutex<dyn GraphicsDevice>> = device.clone();
    (device, shared)
}

fn position_uv_format() -> Arc<VertexFormat> {
    Arc::new(VertexFormat::new(vec![
        AttributeDesc::new("position", AttributeFormat::R32G32B32_SFLOAT),
        AttributeDesc::new("uv", AttributeFormat::R32G32_SFLOAT),
    ]).unwrap())
}

// ============================================================================
// Capacity tests
// ============================================================================

#[test]
fn test_capacity_is_stride_times_count() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(
        shared,
        Arc::new(VertexFormat::from_stride(32)),
        BufferUsage::Static,
        None,
        4,
    ).unwrap();

    assert_eq!(vb.byte_capacity(), 128);
    assert_eq!(vb.count(), 4);
    assert_eq!(device.lock().unwrap().stats().vertex_buffer_bytes(), 128);
    assert_eq!(device.lock().unwrap().stats().index_buffer_bytes(), 0);

    vb.destroy().unwrap();
    assert_eq!(device.lock().unwrap().stats().vertex_buffer_bytes(), 0);
}

#[test]
fn test_capacity_from_attribute_layout() {
    let (_device, shared) = create_device();
    let format = position_uv_format();
    let mut vb = VertexBuffer::new(shared, format.clone(), BufferUsage::Static, None, 3).unwrap();

    assert_eq!(vb.byte_capacity(), 60);
    assert!(Arc::ptr_eq(vb.format(), &format));
    vb.destroy().unwrap();
}

// ============================================================================
// Update tests
// ============================================================================

#[test]
fn test_full_replace_read_back() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(shared, Arc::new(VertexFormat::from_stride(4)), BufferUsage::Dynamic, None, 2).unwrap();
    let handle = vb.handle().unwrap();

    vb.update(0, Some(&[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();

    assert_eq!(device.lock().unwrap().contents(handle), Some(&[1, 2, 3, 4, 5, 6, 7, 8][..]));
    vb.destroy().unwrap();
}

#[test]
fn test_sub_range_leaves_other_bytes() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(shared, position_uv_format(), BufferUsage::Dynamic, None, 2).unwrap();
    let handle = vb.handle().unwrap();

    let vertices: [[f32; 5]; 2] = [[0.0, 0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0, 1.0]];
    vb.update_vertices(0, &vertices).unwrap();
    vb.update_vertices(20, &[[2.0f32, 2.0, 2.0]]).unwrap();

    let expected: [[f32; 5]; 2] = [[0.0, 0.0, 0.0, 0.0, 0.0], [2.0, 2.0, 2.0, 1.0, 1.0]];
    let expected_bytes: &[u8] = bytemuck::cast_slice(&expected);
    assert_eq!(device.lock().unwrap().contents(handle), Some(expected_bytes));
    vb.destroy().unwrap();
}

#[test]
fn test_update_leaves_no_vertex_buffer_bound() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(shared, Arc::new(VertexFormat::from_stride(12)), BufferUsage::Static, None, 2).unwrap();
    let handle = vb.handle().unwrap();
    device.lock().unwrap().clear_commands();

    vb.update(12, Some(&[0; 12])).unwrap();

    let dev = device.lock().unwrap();
    assert_eq!(dev.bound_buffer(BufferTarget::Vertex), None);
    assert_eq!(dev.commands().first(), Some(&DeviceCommand::Bind { target: BufferTarget::Vertex, handle: Some(handle) }));
    assert_eq!(dev.commands().last(), Some(&DeviceCommand::Bind { target: BufferTarget::Vertex, handle: None }));
    // Index binding untouched by vertex uploads
    assert!(!dev.commands().iter().any(|c| matches!(c, DeviceCommand::RestoreIndexBuffer(_))));
    drop(dev);

    vb.destroy().unwrap();
}

#[test]
fn test_update_rejects_overflowing_range() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(shared, Arc::new(VertexFormat::from_stride(8)), BufferUsage::Static, None, 1).unwrap();
    device.lock().unwrap().clear_commands();

    assert_eq!(
        vb.update(1, Some(&[0; 8])),
        Err(Error::CapacityExceeded { offset: 1, len: 8, capacity: 8 })
    );
    assert!(device.lock().unwrap().commands().is_empty());
    vb.destroy().unwrap();
}

#[test]
fn test_unallocatable_capacity_is_out_of_memory() {
    let (device, shared) = create_device();
    let mut survivor = VertexBuffer::new(shared.clone(), Arc::new(VertexFormat::from_stride(4)), BufferUsage::Static, None, 2).unwrap();

    // u32::MAX × u32::MAX bytes is more than any Vec can hold
    let result = VertexBuffer::new(
        shared,
        Arc::new(VertexFormat::from_stride(u32::MAX)),
        BufferUsage::Static,
        None,
        u32::MAX,
    );

    assert!(matches!(result, Err(Error::OutOfMemory)));
    assert!(!device.is_poisoned());
    let dev = device.lock().unwrap();
    assert_eq!(dev.live_buffer_count(), 1);
    assert_eq!(dev.stats().vertex_buffer_bytes(), 8);
    drop(dev);

    assert!(survivor.update(0, Some(&[7; 8])).is_ok());
    survivor.destroy().unwrap();
    assert_eq!(device.lock().unwrap().live_buffer_count(), 0);
}

// ============================================================================
// Destroy tests
// ============================================================================

#[test]
fn test_update_after_destroy() {
    let (device, shared) = create_device();
    let mut vb = VertexBuffer::new(shared, Arc::new(VertexFormat::from_stride(16)), BufferUsage::Stream, None, 1).unwrap();
    vb.destroy().unwrap();
    device.lock().unwrap().clear_commands();

    assert_eq!(vb.update(0, Some(&[1])), Err(Error::AlreadyDestroyed));
    assert_eq!(vb.update_vertices(0, &[1.0f32]), Err(Error::AlreadyDestroyed));
    assert_eq!(vb.destroy(), Err(Error::AlreadyDestroyed));
    assert!(device.lock().unwrap().commands().is_empty());
    assert_eq!(device.lock().unwrap().stats().vertex_buffer_bytes(), 0);
    assert_eq!(vb.usage(), BufferUsage::Stream);
    assert!(vb.is_destroyed());
    assert!(vb.handle().is_none());
}

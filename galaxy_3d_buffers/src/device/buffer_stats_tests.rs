//! Unit tests for BufferStats

use crate::device::{BufferStats, BufferTarget};

#[test]
fn test_new_stats_are_zero() {
    let stats = BufferStats::new();
    assert_eq!(stats.index_buffer_bytes(), 0);
    assert_eq!(stats.vertex_buffer_bytes(), 0);
    assert_eq!(stats.total_bytes(), 0);
}

#[test]
fn test_allocation_only_moves_its_own_counter() {
    let stats = BufferStats::new();
    stats.record_allocation(BufferTarget::Index, 200);

    assert_eq!(stats.bytes(BufferTarget::Index), 200);
    assert_eq!(stats.bytes(BufferTarget::Vertex), 0);

    stats.record_allocation(BufferTarget::Vertex, 600);
    assert_eq!(stats.vertex_buffer_bytes(), 600);
    assert_eq!(stats.total_bytes(), 800);
}

#[test]
fn test_allocation_release_round_trip() {
    let stats = BufferStats::new();
    for bytes in [12, 48, 96] {
        stats.record_allocation(BufferTarget::Vertex, bytes);
    }
    assert_eq!(stats.vertex_buffer_bytes(), 156);

    for bytes in [96, 12, 48] {
        stats.record_release(BufferTarget::Vertex, bytes);
    }
    assert_eq!(stats, BufferStats::new());
}

#[test]
fn test_counters_move_through_shared_reference() {
    let stats = BufferStats::new();
    let shared: &BufferStats = &stats;

    shared.record_allocation(BufferTarget::Index, 64);
    shared.record_allocation(BufferTarget::Vertex, 32);
    shared.record_release(BufferTarget::Index, 16);

    assert_eq!(stats.index_buffer_bytes(), 48);
    assert_eq!(stats.vertex_buffer_bytes(), 32);
    assert_eq!(format!("{:?}", stats), "BufferStats { index_buffer_bytes: 48, vertex_buffer_bytes: 32 }");
}

//! C ABI for driver code that owns a descriptor ring.
//!
//! The SPSC rule is the caller's to keep: at any moment, at most one context
//! may be inside the producer calls (`enqueue`, `enqueue_bulk`) and at most one
//! inside the consumer calls (`dequeue`, `dequeue_bulk`, `peek`) for a given
//! ring. Nothing here checks it.

use crate::SPSC::Buffer::RingBuffer;
use crate::SPSC::Structs::PacketDescriptor;
use std::ptr;
use tracing::error;

/// Handle to a descriptor ring (opaque pointer)
pub struct DescRing {
    inner: RingBuffer<PacketDescriptor>,
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Create a new descriptor ring.
///
/// # Arguments
/// * `capacity` - Slot count, a non-zero power of two. `capacity - 1` are usable.
///
/// # Returns
/// * Pointer to `DescRing`, or NULL on failure.
#[no_mangle]
pub extern "C" fn desc_ring_new(capacity: u32) -> *mut DescRing {
    match RingBuffer::new(capacity) {
        Ok(inner) => Box::into_raw(Box::new(DescRing { inner })),
        Err(e) => {
            error!(capacity, "FFI Error: failed to create descriptor ring: {e}");
            ptr::null_mut()
        }
    }
}

/// Free a descriptor ring. NULL is ignored.
///
/// # Safety
/// `ring` must come from `desc_ring_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_free(ring: *mut DescRing) {
    if !ring.is_null() {
        drop(Box::from_raw(ring));
    }
}

// -----------------------------------------------------------------------------
// Producer API
// -----------------------------------------------------------------------------

/// Enqueue a copy of `*desc`.
///
/// # Returns
/// * true on success, false if the ring is full or a pointer is NULL.
///
/// # Safety
/// `ring` is NULL or live; `desc` is NULL or valid for reads; the caller is
/// the ring's only producer.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_enqueue(
    ring: *const DescRing,
    desc: *const PacketDescriptor,
) -> bool {
    if ring.is_null() || desc.is_null() {
        return false;
    }
    (*ring).inner.push(*desc)
}

/// Enqueue up to `count` descriptors from `descs`, published together.
///
/// # Returns
/// * The number accepted. The rest were not enqueued.
///
/// # Safety
/// `ring` is NULL or live; `descs` is NULL or valid for `count` reads; the
/// caller is the ring's only producer.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_enqueue_bulk(
    ring: *const DescRing,
    descs: *const PacketDescriptor,
    count: u32,
) -> u32 {
    if ring.is_null() || descs.is_null() {
        return 0;
    }
    let items = std::slice::from_raw_parts(descs, count as usize);
    (*ring).inner.push_bulk(items) as u32
}

// -----------------------------------------------------------------------------
// Consumer API
// -----------------------------------------------------------------------------

/// Dequeue the oldest descriptor into `*out`.
///
/// # Returns
/// * true if a descriptor was written, false if the ring is empty or a
///   pointer is NULL.
///
/// # Safety
/// `ring` is NULL or live; `out` is NULL or valid for writes; the caller is
/// the ring's only consumer.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_dequeue(
    ring: *const DescRing,
    out: *mut PacketDescriptor,
) -> bool {
    if ring.is_null() || out.is_null() {
        return false;
    }
    match (*ring).inner.pop() {
        Some(desc) => {
            out.write(desc);
            true
        }
        None => false,
    }
}

/// Dequeue up to `count` descriptors into `out`.
///
/// # Safety
/// `ring` is NULL or live; `out` is NULL or valid for `count` writes (it may
/// be uninitialised); the caller is the ring's only consumer.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_dequeue_bulk(
    ring: *const DescRing,
    out: *mut PacketDescriptor,
    count: u32,
) -> u32 {
    if ring.is_null() || out.is_null() {
        return 0;
    }
    (*ring).inner.pop_bulk_raw(out, count as usize) as u32
}

/// Pointer to the oldest descriptor, or NULL if the ring is empty.
///
/// The pointer is invalidated by the next dequeue on this ring.
///
/// # Safety
/// `ring` is NULL or live; the caller is the ring's only consumer.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_peek(ring: *const DescRing) -> *const PacketDescriptor {
    if ring.is_null() {
        return ptr::null();
    }
    match (*ring).inner.front() {
        Some(desc) => desc as *const PacketDescriptor,
        None => ptr::null(),
    }
}

// -----------------------------------------------------------------------------
// Queries
// -----------------------------------------------------------------------------

/// Free slots. 0 for NULL.
///
/// # Safety
/// `ring` is NULL or live.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_space(ring: *const DescRing) -> u32 {
    if ring.is_null() {
        return 0;
    }
    (*ring).inner.space() as u32
}

/// # Safety
/// `ring` is NULL or live. NULL reports full.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_is_full(ring: *const DescRing) -> bool {
    ring.is_null() || (*ring).inner.is_full()
}

/// # Safety
/// `ring` is NULL or live. NULL reports empty.
#[no_mangle]
pub unsafe extern "C" fn desc_ring_is_empty(ring: *const DescRing) -> bool {
    ring.is_null() || (*ring).inner.is_empty()
}

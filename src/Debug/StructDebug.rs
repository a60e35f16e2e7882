use std::fmt;
use std::sync::atomic::Ordering;
use crate::SPSC::Buffer::RingBuffer;

/// Debug function for RingBuffer
///
/// Shows the cursors and occupancy. Slot contents are never read: slots
/// outside `tail..head` may be uninitialised.
pub fn debug_ring_buffer<T: Copy>(ring: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    debug_cursors("RingBuffer", ring, f)
}

/// Debug function for Producer
pub fn debug_producer<T: Copy>(ring: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    debug_cursors("Producer", ring, f)
}

/// Debug function for Consumer
pub fn debug_consumer<T: Copy>(ring: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    debug_cursors("Consumer", ring, f)
}

fn debug_cursors<T: Copy>(
    name: &str,
    ring: &RingBuffer<T>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    // Relaxed: a snapshot for humans, not a synchronization point
    let head = ring.indices.head.load(Ordering::Relaxed);
    let tail = ring.indices.tail.load(Ordering::Relaxed);
    f.debug_struct(name)
        .field("capacity", &ring.capacity)
        .field("head", &head)
        .field("tail", &tail)
        .field("len", &(head.wrapping_sub(tail) & ring.mask))
        .finish_non_exhaustive()
}

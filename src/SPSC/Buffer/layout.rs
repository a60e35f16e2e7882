use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicU32;

/// The two cursors of a ring.
///
/// Each cursor has exactly one writer. They are free-running: advanced with
/// wrapping arithmetic and masked only when a slot is addressed, so
/// `head.wrapping_sub(tail)` is the number of occupied slots even after the
/// counters wrap at `u32::MAX`.
#[repr(C)]
pub struct RingIndices {
    /// The "head" cursor. Written only by the producer, published with `Release`.
    /// Padded to prevent false sharing with the consumer's cursor.
    pub head: CachePadded<AtomicU32>,

    /// The "tail" cursor. Written only by the consumer, published with `Release`.
    /// Padded to prevent false sharing with the producer's cursor.
    pub tail: CachePadded<AtomicU32>,
}

impl RingIndices {
    pub fn new(start: u32) -> Self {
        Self {
            head: CachePadded::new(AtomicU32::new(start)),
            tail: CachePadded::new(AtomicU32::new(start)),
        }
    }
}

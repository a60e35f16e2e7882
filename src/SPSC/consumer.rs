// src/SPSC/consumer.rs

use crate::SPSC::Buffer::RingBuffer;
use std::fmt;
use std::sync::Arc;

/// The consuming end of a split [`RingBuffer`].
///
/// There is exactly one per ring and it cannot be cloned; owning it is what
/// makes the caller the single consumer.
pub struct Consumer<T: Copy> {
    ring: Arc<RingBuffer<T>>,
}

impl<T: Copy> Consumer<T> {
    pub(crate) fn new(ring: Arc<RingBuffer<T>>) -> Self {
        Self { ring }
    }

    /// Dequeues the oldest descriptor.
    ///
    /// # Returns
    /// * `Some(item)` if one was available
    /// * `None` if the ring is empty
    pub fn dequeue(&mut self) -> Option<T> {
        // Safety: `&mut self` on the only Consumer.
        unsafe { self.ring.pop() }
    }

    /// Dequeues up to `out.len()` descriptors into the front of `out`, oldest
    /// first, freeing their slots with a single publish.
    pub fn dequeue_bulk(&mut self, out: &mut [T]) -> usize {
        // Safety: `&mut self` on the only Consumer.
        unsafe { self.ring.pop_bulk(out) }
    }

    /// Looks at the oldest descriptor without dequeuing it.
    ///
    /// The returned reference borrows the consumer, so it cannot be held
    /// across the next `dequeue`.
    pub fn peek(&self) -> Option<&T> {
        // Safety: only this Consumer advances `tail`, and doing so needs
        // `&mut self`, which this borrow excludes.
        unsafe { self.ring.front() }
    }

    /// Descriptors ready to dequeue. Can only grow until this consumer
    /// dequeues again.
    pub fn len(&self) -> usize {
        self.ring.consumer_len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.ring.consumer_len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// `false` once the [`Producer`](super::Producer) has been dropped.
    ///
    /// Descriptors it published before going away can still be dequeued.
    pub fn is_producer_alive(&self) -> bool {
        Arc::strong_count(&self.ring) > 1
    }
}

impl<T: Copy> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_consumer(&*self.ring, f)
    }
}

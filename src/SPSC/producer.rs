// In src/SPSC/producer.rs
use crate::SPSC::doorbell::{Doorbell, NoDoorbell};
use crate::SPSC::Buffer::RingBuffer;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The producing end of a split [`RingBuffer`].
///
/// There is exactly one per ring and it cannot be cloned; owning it is what
/// makes the caller the single producer. It may be moved to another thread
/// (or handed to a completion handler).
pub struct Producer<T: Copy, D: Doorbell = NoDoorbell> {
    ring: Arc<RingBuffer<T>>,
    doorbell: D,
}

impl<T: Copy, D: Doorbell> Producer<T, D> {
    pub(crate) fn new(ring: Arc<RingBuffer<T>>, doorbell: D) -> Self {
        Self { ring, doorbell }
    }

    /// Enqueues one descriptor and rings the doorbell.
    ///
    /// # Returns
    /// * `true` if the descriptor was published
    /// * `false` if the ring is full; nothing was written
    pub fn enqueue(&mut self, item: T) -> bool {
        // Safety: `&mut self` on the only Producer.
        if unsafe { self.ring.push(item) } {
            self.doorbell.ring(1);
            true
        } else {
            trace!(capacity = self.ring.capacity, "ring full, enqueue rejected");
            false
        }
    }

    /// Enqueues as many of `items` as fit, publishes them at once and rings
    /// the doorbell once.
    ///
    /// Returns the number accepted. `items[n..]` was not enqueued.
    pub fn enqueue_bulk(&mut self, items: &[T]) -> usize {
        // Safety: `&mut self` on the only Producer.
        let n = unsafe { self.ring.push_bulk(items) };
        if n > 0 {
            self.doorbell.ring(n as u32);
        }
        if n < items.len() {
            trace!(
                offered = items.len(),
                accepted = n,
                "ring full, bulk enqueue truncated"
            );
        }
        n
    }

    /// Free slots. Can only grow until this producer enqueues again.
    pub fn space(&self) -> usize {
        (self.ring.mask - self.ring.producer_len()) as usize
    }

    pub fn is_full(&self) -> bool {
        self.ring.producer_len() == self.ring.mask
    }

    pub fn is_empty(&self) -> bool {
        self.ring.producer_len() == 0
    }

    pub fn len(&self) -> usize {
        self.ring.producer_len() as usize
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// `false` once the [`Consumer`](super::Consumer) has been dropped.
    pub fn is_consumer_alive(&self) -> bool {
        Arc::strong_count(&self.ring) > 1
    }

    /// Returns a reference to the doorbell
    pub fn doorbell(&self) -> &D {
        &self.doorbell
    }
}

impl<T: Copy, D: Doorbell> fmt::Debug for Producer<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_producer(&*self.ring, f)
    }
}

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};
use std::sync::Arc;

use tracing::{debug, warn};

use super::layout::RingIndices;
use super::Buffer::{PowerOfTwo, RingBuffer};
use crate::error::ConfigError;
use crate::SPSC::doorbell::{Doorbell, NoDoorbell};
use crate::SPSC::{Consumer, Producer};

impl<T: Copy> RingBuffer<T> {
    /// Create a ring with `capacity` slots, `capacity - 1` of them usable.
    ///
    /// Fails with [`ConfigError::NotPowerOfTwo`] if `capacity` is zero or not
    /// a power of two.
    pub fn new(capacity: u32) -> Result<Self, ConfigError> {
        match PowerOfTwo::new(capacity) {
            Ok(capacity) => Ok(Self::with_capacity(capacity)),
            Err(err) => {
                warn!(capacity, "rejected ring configuration");
                Err(err)
            }
        }
    }

    /// Create a ring from an already validated capacity.
    pub fn with_capacity(capacity: PowerOfTwo) -> Self {
        Self::with_start_index(capacity, 0)
    }

    /// Both cursors start at `start` instead of 0. Any start value is an empty
    /// ring; this only moves where the 32-bit wrap happens.
    pub(crate) fn with_start_index(capacity: PowerOfTwo, start: u32) -> Self {
        let capacity = capacity.get();
        let slots = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(capacity, usable = capacity - 1, "descriptor ring created");

        Self {
            indices: RingIndices::new(start),
            slots,
            capacity,
            mask: capacity - 1,
        }
    }

    /// Number of slots, including the one that is never filled.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Maximum number of records the ring holds at once: `capacity - 1`.
    #[inline]
    pub fn usable_capacity(&self) -> usize {
        self.mask as usize
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        let tail = self.indices.tail.load(Acquire);
        let head = self.indices.head.load(Acquire);
        (head.wrapping_sub(tail) & self.mask) as usize
    }

    pub fn is_empty(&self) -> bool {
        let tail = self.indices.tail.load(Acquire);
        self.indices.head.load(Acquire) == tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.mask as usize
    }

    /// Free slots: `capacity - len - 1`.
    pub fn space(&self) -> usize {
        self.mask as usize - self.len()
    }

    /// Copy `item` into the ring. Returns `false`, leaving the ring untouched,
    /// if it is full.
    pub fn enqueue(&mut self, item: T) -> bool {
        // Safety: `&mut self` makes this the only producer.
        unsafe { self.push(item) }
    }

    /// Copy as many of `items` as fit, in order, with a single publish.
    ///
    /// Returns how many were taken. The rest of the slice was not enqueued and
    /// should be retried by the caller.
    pub fn enqueue_bulk(&mut self, items: &[T]) -> usize {
        // Safety: `&mut self` makes this the only producer.
        unsafe { self.push_bulk(items) }
    }

    /// Take the oldest record, or `None` if the ring is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        // Safety: `&mut self` makes this the only consumer.
        unsafe { self.pop() }
    }

    /// Take up to `out.len()` records into the front of `out`, oldest first.
    /// Returns how many were written.
    pub fn dequeue_bulk(&mut self, out: &mut [T]) -> usize {
        // Safety: `&mut self` makes this the only consumer.
        unsafe { self.pop_bulk(out) }
    }

    /// Look at the oldest record without taking it.
    ///
    /// The borrow ends before the next [`dequeue`](Self::dequeue).
    pub fn peek(&self) -> Option<&T> {
        // Safety: mutation needs `&mut self` or a split handle, which consumes
        // the ring, so no consumer can advance `tail` while this borrow lives.
        unsafe { self.front() }
    }

    /// Hand the ring to two execution contexts.
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        self.split_with_doorbell(NoDoorbell)
    }

    /// Like [`split`](Self::split), with `doorbell` rung by the producer after
    /// every successful publish.
    pub fn split_with_doorbell<D: Doorbell>(self, doorbell: D) -> (Producer<T, D>, Consumer<T>) {
        let ring = Arc::new(self);
        (Producer::new(Arc::clone(&ring), doorbell), Consumer::new(ring))
    }

    #[inline]
    fn slot(&self, index: u32) -> *mut MaybeUninit<T> {
        self.slots[(index & self.mask) as usize].get()
    }

    /// Records held, as seen by the producer.
    #[inline]
    pub(crate) fn producer_len(&self) -> u32 {
        let head = self.indices.head.load(Relaxed);
        let tail = self.indices.tail.load(Acquire);
        head.wrapping_sub(tail) & self.mask
    }

    /// Records held, as seen by the consumer.
    #[inline]
    pub(crate) fn consumer_len(&self) -> u32 {
        let tail = self.indices.tail.load(Relaxed);
        let head = self.indices.head.load(Acquire);
        head.wrapping_sub(tail) & self.mask
    }

    /// # Safety
    /// The caller must be the only producer of this ring.
    pub(crate) unsafe fn push(&self, item: T) -> bool {
        let head = self.indices.head.load(Relaxed);
        let tail = self.indices.tail.load(Acquire);
        if head.wrapping_sub(tail) & self.mask == self.mask {
            // full
            return false;
        }

        self.slot(head).write(MaybeUninit::new(item));

        // Publish
        self.indices.head.store(head.wrapping_add(1), Release);
        true
    }

    /// # Safety
    /// The caller must be the only producer of this ring.
    pub(crate) unsafe fn push_bulk(&self, items: &[T]) -> usize {
        let head = self.indices.head.load(Relaxed);
        let tail = self.indices.tail.load(Acquire);
        let free = self.mask - (head.wrapping_sub(tail) & self.mask);

        let n = items.len().min(free as usize);
        if n == 0 {
            return 0;
        }

        for (i, item) in items[..n].iter().enumerate() {
            self.slot(head.wrapping_add(i as u32)).write(MaybeUninit::new(*item));
        }

        // One publish for the whole batch
        self.indices.head.store(head.wrapping_add(n as u32), Release);
        n
    }

    /// # Safety
    /// The caller must be the only consumer of this ring.
    pub(crate) unsafe fn pop(&self) -> Option<T> {
        let tail = self.indices.tail.load(Relaxed);
        let head = self.indices.head.load(Acquire);
        if head == tail {
            // empty
            return None;
        }

        // The Acquire load of `head` makes the producer's write visible.
        let item = (*self.slot(tail)).assume_init_read();

        // free slot for the producer
        self.indices.tail.store(tail.wrapping_add(1), Release);
        Some(item)
    }

    /// # Safety
    /// The caller must be the only consumer of this ring.
    pub(crate) unsafe fn pop_bulk(&self, out: &mut [T]) -> usize {
        self.pop_bulk_raw(out.as_mut_ptr(), out.len())
    }

    /// Like `pop_bulk`, writing through a raw pointer. `out` need not be
    /// initialised.
    ///
    /// # Safety
    /// The caller must be the only consumer of this ring, and `out` must be
    /// valid for `len` writes.
    pub(crate) unsafe fn pop_bulk_raw(&self, out: *mut T, len: usize) -> usize {
        let tail = self.indices.tail.load(Relaxed);
        let head = self.indices.head.load(Acquire);
        let available = head.wrapping_sub(tail) & self.mask;

        let n = len.min(available as usize);
        if n == 0 {
            return 0;
        }

        for i in 0..n {
            out.add(i)
                .write((*self.slot(tail.wrapping_add(i as u32))).assume_init_read());
        }

        self.indices.tail.store(tail.wrapping_add(n as u32), Release);
        n
    }

    /// # Safety
    /// The caller must be the only consumer of this ring, and must not advance
    /// `tail` while the returned reference is alive.
    pub(crate) unsafe fn front(&self) -> Option<&T> {
        let tail = self.indices.tail.load(Relaxed);
        let head = self.indices.head.load(Acquire);
        if head == tail {
            return None;
        }
        Some((*self.slot(tail)).assume_init_ref())
    }
}

impl<T: Copy> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_ring_buffer(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_near_wrap(capacity: u32, before_wrap: u32) -> RingBuffer<u64> {
        let capacity = PowerOfTwo::new(capacity).unwrap();
        RingBuffer::with_start_index(capacity, u32::MAX - before_wrap + 1)
    }

    #[test]
    fn fifo_across_u32_wrap() {
        let mut rb = ring_near_wrap(8, 3);

        for round in 0..10u64 {
            for i in 0..5 {
                assert!(rb.enqueue(round * 10 + i));
            }
            assert_eq!(rb.len(), 5);
            assert_eq!(rb.space(), 2);
            for i in 0..5 {
                assert_eq!(rb.dequeue(), Some(round * 10 + i));
            }
            assert!(rb.is_empty());
        }

        let head = rb.indices.head.load(Relaxed);
        assert!(head < 100, "head should have wrapped, got {head}");
    }

    #[test]
    fn full_detection_straddling_wrap() {
        let mut rb = ring_near_wrap(4, 1);

        assert!(rb.enqueue(1));
        assert!(rb.enqueue(2));
        assert!(rb.enqueue(3));
        assert!(rb.is_full());
        assert!(!rb.enqueue(4));
        assert_eq!(rb.space(), 0);

        assert_eq!(rb.dequeue(), Some(1));
        assert_eq!(rb.space(), 1);
    }

    #[test]
    fn bulk_across_wrap() {
        let mut rb = ring_near_wrap(16, 2);
        let items: Vec<u64> = (0..20).collect();

        assert_eq!(rb.enqueue_bulk(&items), 15);
        assert!(rb.is_full());

        let mut out = [0u64; 20];
        assert_eq!(rb.dequeue_bulk(&mut out), 15);
        assert_eq!(&out[..15], &items[..15]);
        assert_eq!(rb.dequeue_bulk(&mut out), 0);
    }

    #[test]
    fn capacity_one_holds_nothing() {
        let mut rb = RingBuffer::<u64>::new(1).unwrap();
        assert_eq!(rb.usable_capacity(), 0);
        assert!(rb.is_empty());
        assert!(rb.is_full());
        assert!(!rb.enqueue(7));
        assert_eq!(rb.enqueue_bulk(&[1, 2]), 0);
        assert_eq!(rb.dequeue(), None);
    }
}

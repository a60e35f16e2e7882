// This is the descriptor ring shared by one producer and one consumer

use super::layout::RingIndices;
use crate::error;
use crate::error::ConfigError;

use snafu::ensure;

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

/// A ring capacity that is known to be a non-zero power of two.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerOfTwo(u32);

impl PowerOfTwo {
    /// Validate `capacity`. Zero and non-powers of two are rejected.
    pub fn new(capacity: u32) -> Result<Self, ConfigError> {
        ensure!(
            capacity.is_power_of_two(),
            error::NotPowerOfTwoSnafu { capacity }
        );
        Ok(Self(capacity))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PowerOfTwo {
    type Error = ConfigError;

    fn try_from(capacity: u32) -> Result<Self, Self::Error> {
        Self::new(capacity)
    }
}

/// A fixed-capacity, lock-free, single-producer single-consumer ring of `T`.
///
/// The ring owns its slot storage and the two cursors, nothing else. Records
/// are copied in and out by value, which is why `T: Copy`.
///
/// ### Concurrency Design:
/// - **Producer (Enqueue)**: writes the slot at `head & mask`, then publishes
///   `head + 1` with a `Release` store. It reads `tail` with `Acquire` to
///   compute free space.
/// - **Consumer (Dequeue)**: reads `head` with `Acquire`, which synchronizes
///   with the producer's publish, copies the slot at `tail & mask`, then
///   publishes `tail + 1` with `Release`.
///
/// One slot is always left empty, so `head == tail` means empty and
/// `head - tail == capacity - 1` means full. There is no shared count.
///
/// Used directly, every mutating operation takes `&mut self`. For two
/// execution contexts, [`RingBuffer::split`] hands out one
/// [`Producer`](crate::SPSC::Producer) and one
/// [`Consumer`](crate::SPSC::Consumer). More than one producer or more than
/// one consumer is not supported.
pub struct RingBuffer<T: Copy> {
    /// Producer and consumer cursors.
    pub(crate) indices: RingIndices,

    /// `capacity` slots. A slot between `tail` (inclusive) and `head`
    /// (exclusive) holds an initialised record not yet consumed.
    pub(crate) slots: Box<[UnsafeCell<MaybeUninit<T>>]>,

    /// The number of slots, a power of two.
    pub(crate) capacity: u32,

    /// A bitmask used to wrap cursors around the slots.
    /// Calculated as `capacity - 1`.
    pub(crate) mask: u32,
}

// Slots are only written by the single producer and read by the single
// consumer, with the cursors ordering the hand-off. `peek` lends out `&T`
// through a shared ring, hence `T: Sync` for `Sync`.
unsafe impl<T: Copy + Send> Send for RingBuffer<T> {}
unsafe impl<T: Copy + Send + Sync> Sync for RingBuffer<T> {}

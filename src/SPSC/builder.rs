use super::doorbell::{Doorbell, NoDoorbell};
use super::{Consumer, Producer};
use crate::error::ConfigError;
use crate::SPSC::Buffer::RingBuffer;

/// Ring size used when none is configured.
pub const DEFAULT_CAPACITY: u32 = 256;

pub struct RingBuilder<D = NoDoorbell> {
    capacity: u32,
    doorbell: D,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            doorbell: NoDoorbell,
        }
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ring for use from a single context.
    pub fn build<T: Copy>(self) -> Result<RingBuffer<T>, ConfigError> {
        RingBuffer::new(self.capacity)
    }
}

impl<D> RingBuilder<D> {
    /// Total slot count. Must be a non-zero power of two; one slot stays empty.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_doorbell<E: Doorbell>(self, doorbell: E) -> RingBuilder<E> {
        RingBuilder {
            capacity: self.capacity,
            doorbell,
        }
    }
}

impl<D: Doorbell> RingBuilder<D> {
    pub fn build_split<T: Copy>(self) -> Result<(Producer<T, D>, Consumer<T>), ConfigError> {
        Ok(RingBuffer::new(self.capacity)?.split_with_doorbell(self.doorbell))
    }
}

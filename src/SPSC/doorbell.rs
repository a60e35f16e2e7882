//! Notification hook rung by a [`Producer`](super::Producer) after it publishes.
//!
//! The ring never blocks and never signals anyone on its own. Whatever tells
//! the other side there is new work (a device register write, an eventfd, a
//! wakeup of a parked thread) plugs in here.

/// Announces new work after a successful enqueue.
pub trait Doorbell {
    /// `published` descriptors were just made visible to the consumer.
    /// Never called with 0.
    fn ring(&self, published: u32);
}

/// Doorbell that does nothing. Used when the consumer polls.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDoorbell;

impl Doorbell for NoDoorbell {
    #[inline]
    fn ring(&self, _published: u32) {}
}

impl<F: Fn(u32)> Doorbell for F {
    #[inline]
    fn ring(&self, published: u32) {
        self(published)
    }
}

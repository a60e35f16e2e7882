use desc_ring::SPSC::Buffer::{PowerOfTwo, RingBuffer};
use desc_ring::SPSC::Structs::{PacketDescriptor, TX_FLAG_ACK_REQUIRED};
use desc_ring::ConfigError;

fn desc(id: u32) -> PacketDescriptor {
    PacketDescriptor {
        data: 0x7f00_0000_0000 + id as u64 * 2048,
        paddr: 0x1234_5000 + id * 2048,
        len: 1500,
        flags: TX_FLAG_ACK_REQUIRED,
        timestamp: id as u64,
    }
}

#[test]
fn simple_enqueue_dequeue() {
    let mut rb = RingBuffer::<PacketDescriptor>::new(16).unwrap();

    assert!(rb.is_empty());
    assert!(rb.enqueue(desc(1)));
    assert!(!rb.is_empty());

    let out = rb.dequeue();
    assert_eq!(out, Some(desc(1)));
    assert!(rb.is_empty());
    assert_eq!(rb.dequeue(), None);
}

#[test]
fn capacity_four_scenario() {
    let mut rb = RingBuffer::<PacketDescriptor>::new(4).unwrap();
    let (a, b, c, d) = (desc(0xA), desc(0xB), desc(0xC), desc(0xD));

    assert!(rb.enqueue(a));
    assert!(rb.enqueue(b));
    assert!(rb.enqueue(c));

    // Only capacity - 1 slots are usable
    assert!(!rb.enqueue(d));
    assert!(rb.is_full());

    assert_eq!(rb.dequeue(), Some(a));
    assert!(rb.enqueue(d));

    assert_eq!(rb.dequeue(), Some(b));
    assert_eq!(rb.dequeue(), Some(c));
    assert_eq!(rb.dequeue(), Some(d));
    assert_eq!(rb.dequeue(), None);
}

#[test]
fn full_buffer() {
    let capacity = 64u32;
    let mut rb = RingBuffer::<u32>::new(capacity).unwrap();

    // Fill buffer
    for i in 0..capacity - 1 {
        assert!(rb.enqueue(i));
    }

    // Next enqueue should fail and change nothing
    assert!(!rb.enqueue(999));
    assert!(rb.is_full());
    assert_eq!(rb.len(), capacity as usize - 1);
    assert_eq!(rb.space(), 0);

    // Dequeue one
    assert_eq!(rb.dequeue(), Some(0));

    // Enqueue should succeed now
    assert!(rb.enqueue(999));
    assert!(rb.is_full());
}

#[test]
fn fifo_order_over_many_laps() {
    let mut rb = RingBuffer::<u64>::new(8).unwrap();
    let mut next_in = 0u64;
    let mut next_out = 0u64;

    for lap in 0..200 {
        let burst = lap % 7 + 1;
        for _ in 0..burst {
            if rb.enqueue(next_in) {
                next_in += 1;
            }
        }
        while let Some(v) = rb.dequeue() {
            assert_eq!(v, next_out);
            next_out += 1;
        }
    }
    assert_eq!(next_in, next_out);
}

#[test]
fn descriptor_fields_survive_round_trip() {
    let mut rb = RingBuffer::<PacketDescriptor>::new(8).unwrap();
    let original = PacketDescriptor {
        data: u64::MAX - 1,
        paddr: 0xDEAD_BEEF,
        len: u16::MAX,
        flags: 0xA5A5,
        timestamp: 1_700_000_000_123_456_789,
    };

    assert!(rb.enqueue(original));
    let out = rb.dequeue().unwrap();
    assert_eq!(out.data, original.data);
    assert_eq!(out.paddr, original.paddr);
    assert_eq!(out.len, original.len);
    assert_eq!(out.flags, original.flags);
    assert_eq!(out.timestamp, original.timestamp);
}

#[test]
fn space_tracks_enqueues_minus_dequeues() {
    let capacity = 32usize;
    let mut rb = RingBuffer::<u32>::new(capacity as u32).unwrap();
    assert_eq!(rb.space(), capacity - 1);

    let (mut k, mut j) = (0usize, 0usize);
    for step in 0..100u32 {
        if step % 3 != 0 && k - j < capacity - 1 {
            assert!(rb.enqueue(step));
            k += 1;
        } else if k > j {
            assert!(rb.dequeue().is_some());
            j += 1;
        }
        assert_eq!(rb.space(), capacity - 1 - (k - j));
        assert_eq!(rb.len(), k - j);
    }
}

#[test]
fn bulk_partial_acceptance() {
    let mut rb = RingBuffer::<u32>::new(8).unwrap();
    assert!(rb.enqueue(100));
    assert!(rb.enqueue(101));

    let items: Vec<u32> = (0..10).collect();
    let space = rb.space();
    assert_eq!(space, 5);

    let n = rb.enqueue_bulk(&items);
    assert_eq!(n, space);
    assert!(rb.is_full());
    // the unaccepted suffix is untouched
    assert_eq!(&items[n..], &[5, 6, 7, 8, 9]);

    let mut drained = Vec::new();
    while let Some(v) = rb.dequeue() {
        drained.push(v);
    }
    assert_eq!(drained, vec![100, 101, 0, 1, 2, 3, 4]);

    // caller retries the remainder
    assert_eq!(rb.enqueue_bulk(&items[n..]), 5);
}

#[test]
fn bulk_on_full_ring_is_a_no_op() {
    let mut rb = RingBuffer::<u32>::new(4).unwrap();
    assert_eq!(rb.enqueue_bulk(&[1, 2, 3]), 3);
    assert_eq!(rb.enqueue_bulk(&[4, 5]), 0);
    assert_eq!(rb.enqueue_bulk(&[]), 0);
    assert_eq!(rb.len(), 3);
    assert_eq!(rb.dequeue(), Some(1));
}

#[test]
fn dequeue_bulk_drains_in_order() {
    let mut rb = RingBuffer::<u32>::new(16).unwrap();
    assert_eq!(rb.enqueue_bulk(&[1, 2, 3, 4, 5]), 5);

    let mut out = [0u32; 3];
    assert_eq!(rb.dequeue_bulk(&mut out), 3);
    assert_eq!(out, [1, 2, 3]);

    let mut out = [0u32; 8];
    assert_eq!(rb.dequeue_bulk(&mut out), 2);
    assert_eq!(&out[..2], &[4, 5]);
    assert_eq!(rb.dequeue_bulk(&mut out), 0);
}

#[test]
fn peek_does_not_consume() {
    let mut rb = RingBuffer::<PacketDescriptor>::new(4).unwrap();
    assert!(rb.peek().is_none());

    assert!(rb.enqueue(desc(1)));
    assert!(rb.enqueue(desc(2)));

    assert_eq!(rb.peek(), Some(&desc(1)));
    assert_eq!(rb.peek(), Some(&desc(1)));
    assert_eq!(rb.len(), 2);

    assert_eq!(rb.dequeue(), Some(desc(1)));
    assert_eq!(rb.peek(), Some(&desc(2)));
}

#[test]
fn config_validation() {
    assert_eq!(
        RingBuffer::<u32>::new(5).unwrap_err(),
        ConfigError::NotPowerOfTwo { capacity: 5 }
    );
    assert!(RingBuffer::<u32>::new(0).is_err());
    assert!(RingBuffer::<u32>::new(12).is_err());

    let rb = RingBuffer::<u32>::new(8).unwrap();
    assert_eq!(rb.space(), 7);
    assert_eq!(rb.capacity(), 8);
    assert_eq!(rb.usable_capacity(), 7);

    assert!(PowerOfTwo::try_from(1024).is_ok());
    assert!(PowerOfTwo::try_from(1000).is_err());
    let rb = RingBuffer::<u32>::with_capacity(PowerOfTwo::new(2).unwrap());
    assert_eq!(rb.space(), 1);
}

#[test]
fn capacity_bounds() {
    // largest u32 power of two
    assert_eq!(PowerOfTwo::new(1 << 31).unwrap().get(), 1 << 31);
    assert_eq!(
        PowerOfTwo::new(u32::MAX).unwrap_err(),
        ConfigError::NotPowerOfTwo { capacity: u32::MAX }
    );
    assert!(PowerOfTwo::new((1 << 31) + 1).is_err());
    assert_eq!(PowerOfTwo::new(1).unwrap().get(), 1);
}

#[test]
fn config_error_converts_to_io_error() {
    let err: std::io::Error = RingBuffer::<u32>::new(3).unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(err.to_string().contains("power of two"));
}

#[test]
fn debug_shows_cursors_only() {
    let mut rb = RingBuffer::<u32>::new(8).unwrap();
    rb.enqueue(1);
    rb.enqueue(2);
    let s = format!("{:?}", rb);
    assert!(s.contains("RingBuffer"));
    assert!(s.contains("head: 2"));
    assert!(s.contains("len: 2"));
}

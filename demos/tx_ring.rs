// In demos/tx_ring.rs
//
// A completion path producing TX descriptors and a worker thread consuming them.
//
//   cargo run --example tx_ring -- [num_descriptors]
use desc_ring::SPSC::RingBuilder;
use desc_ring::SPSC::Structs::{PacketDescriptor, TX_FLAG_ACK_REQUIRED};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const BATCH: usize = 16;

fn main() -> std::io::Result<()> {
    let num_descriptors: u64 = match env::args().nth(1) {
        Some(arg) => arg.parse().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid count: {e}"))
        })?,
        None => 1_000_000,
    };

    // Stands in for a TX doorbell register write
    let doorbell_writes = Arc::new(AtomicU64::new(0));
    let writes = Arc::clone(&doorbell_writes);

    let (mut producer, mut consumer) = RingBuilder::new()
        .with_capacity(256)
        .with_doorbell(move |_published: u32| {
            writes.fetch_add(1, Ordering::Relaxed);
        })
        .build_split::<PacketDescriptor>()?;

    println!("Producer: Sending {} descriptors in batches of {}...", num_descriptors, BATCH);
    let start = Instant::now();

    let p = thread::spawn(move || {
        let mut batch = [PacketDescriptor::default(); BATCH];
        let mut next = 0u64;
        while next < num_descriptors {
            let count = BATCH.min((num_descriptors - next) as usize);
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64;
            for (i, desc) in batch[..count].iter_mut().enumerate() {
                let id = next + i as u64;
                *desc = PacketDescriptor {
                    data: id,
                    paddr: 0x1234_5000u32.wrapping_add((id as u32) << 11),
                    len: 1500,
                    flags: TX_FLAG_ACK_REQUIRED,
                    timestamp: now,
                };
            }

            let mut sent = 0;
            while sent < count {
                let n = producer.enqueue_bulk(&batch[sent..count]);
                if n == 0 {
                    std::hint::spin_loop();
                }
                sent += n;
            }
            next += count as u64;
        }
    });

    let mut received = 0u64;
    let mut bytes = 0u64;
    while received < num_descriptors {
        match consumer.dequeue() {
            Some(desc) => {
                if desc.data != received {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Descriptor out of order: expected {}, got {}", received, desc.data),
                    ));
                }
                bytes += desc.len as u64;
                received += 1;
            }
            None => {
                if !consumer.is_producer_alive() && consumer.is_empty() {
                    break;
                }
                std::hint::spin_loop();
            }
        }
    }

    p.join().map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "producer panicked"))?;

    let elapsed = start.elapsed();
    println!(
        "Consumer: Received {} descriptors ({} bytes described) in {:.2?}",
        received, bytes, elapsed
    );
    println!(
        "Consumer: {:.2} million descriptors/sec, {} doorbell writes",
        received as f64 / elapsed.as_secs_f64() / 1_000_000.0,
        doorbell_writes.load(Ordering::Relaxed)
    );

    Ok(())
}

//! Stress Test - Multi Producer / Multi Consumer SyncQueue
//!
//! Banyak producer push urutan angka, banyak consumer pop sampai menerima
//! sentinel. Yang dicek: tidak ada elemen hilang atau dobel, dan urutan
//! per producer tetap FIFO di setiap consumer.
//!
//! Usage:
//!   cargo test --release --test sync_queue_stress_test -- --nocapture

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use offq::{Queue, SyncQueue};

const PRODUCERS: usize = 4;
const CONSUMERS: usize = 3;
const PER_PRODUCER: u64 = 20_000;

/// Item: (producer id, sequence). `None` = sentinel stop.
type Item = Option<(usize, u64)>;

/// Consumer loop: pop sampai sentinel, wakeup kosong diabaikan
fn consume(q: &SyncQueue<Item>) -> Vec<(usize, u64)> {
    let mut received = Vec::new();
    loop {
        match q.pop_checked() {
            Some(Some(item)) => received.push(item),
            Some(None) => return received,
            None => continue, // wakeup tanpa data
        }
    }
}

#[test]
fn test_mpmc_no_loss_no_duplicate() {
    let q: Arc<SyncQueue<Item>> = Arc::new(SyncQueue::new());
    let start = Instant::now();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let q = Arc::clone(&q);
            thread::spawn(move || consume(&q))
        })
        .collect();

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    q.push(Some((id, seq)));
                }
            })
        })
        .collect();

    for p in producers {
        p.join().unwrap();
    }
    for _ in 0..CONSUMERS {
        q.push(None);
    }

    let mut counts: HashMap<(usize, u64), u32> = HashMap::new();
    for c in consumers {
        let received = c.join().unwrap();

        // FIFO per producer di dalam satu consumer
        let mut last: HashMap<usize, u64> = HashMap::new();
        for &(id, seq) in &received {
            if let Some(&prev) = last.get(&id) {
                assert!(seq > prev, "producer {} out of order: {} after {}", id, seq, prev);
            }
            last.insert(id, seq);
            *counts.entry((id, seq)).or_insert(0) += 1;
        }
    }

    assert_eq!(counts.len(), PRODUCERS * PER_PRODUCER as usize);
    assert!(counts.values().all(|&n| n == 1));
    assert!(q.is_empty());

    println!(
        "✅ {} items through {} producers / {} consumers in {:?}",
        counts.len(),
        PRODUCERS,
        CONSUMERS,
        start.elapsed()
    );
}

#[test]
fn test_single_consumer_sees_exact_push_order() {
    let q: Arc<SyncQueue<Item>> = Arc::new(SyncQueue::with_capacity(16));

    let consumer = {
        let q = Arc::clone(&q);
        thread::spawn(move || consume(&q))
    };

    for seq in 0..PER_PRODUCER {
        q.push(Some((0, seq)));
    }
    q.push(None);

    let received = consumer.join().unwrap();
    let expected: Vec<_> = (0..PER_PRODUCER).map(|seq| (0, seq)).collect();
    assert_eq!(received, expected);
}

#[test]
fn test_batch_drain_through_lock() {
    let q: Arc<SyncQueue<u64>> = Arc::new(SyncQueue::new());

    let producer = {
        let q = Arc::clone(&q);
        thread::spawn(move || {
            for i in 1..=PER_PRODUCER {
                q.push(i);
            }
        })
    };

    let mut drained = Vec::with_capacity(PER_PRODUCER as usize);
    let mut batch = [0u64; 64];
    while drained.len() < PER_PRODUCER as usize {
        let n = q.lock().pop_n(&mut batch);
        drained.extend_from_slice(&batch[..n]);
        if n == 0 {
            thread::yield_now();
        }
    }
    producer.join().unwrap();

    assert!(drained.iter().copied().eq(1..=PER_PRODUCER));
}

#[test]
fn test_queue_handoff_between_threads() {
    // Queue tanpa sinkronisasi tetap Send: pindah ownership antar thread
    let mut q = Queue::with_capacity(4);
    q.push_n(0..100u32);

    let q = thread::spawn(move || {
        q.skip(50);
        q
    })
    .join()
    .unwrap();

    assert_eq!(q.len(), 50);
    assert_eq!(*q.get(0), 50);
}

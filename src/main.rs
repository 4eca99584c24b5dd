//! offq demo - Queue latency & SyncQueue throughput
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!   RUST_LOG=offq=trace cargo run -- --messages 1000   (lihat event growth)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use offq::{Queue, SyncQueue};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Demo configuration
struct DemoConfig {
    producers: usize,
    consumers: usize,
    messages: u64,
    capacity: usize,
    verbose: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            producers: 2,
            consumers: 2,
            messages: 1_000_000,
            capacity: 1024,
            verbose: false,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "offq=debug" } else { "offq=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(true)
                .with_line_number(false),
        )
        .with(filter)
        .init();
}

fn benchmark_queue(config: &DemoConfig) {
    println!("📊 Queue Benchmark (single thread)");
    println!("----------------------------------");

    let iterations = config.messages as usize;
    let mut q: Queue<u64> = Queue::with_capacity(config.capacity);

    // Warm up
    q.push_n(0..1000);
    q.skip(1000);

    let start = Instant::now();
    for i in 0..iterations {
        q.push(i as u64);
    }
    let push_duration = start.elapsed();
    debug!(len = q.len(), cap = q.capacity(), "queue filled");

    let start = Instant::now();
    while q.pop().is_some() {}
    let pop_duration = start.elapsed();

    let push_ns = push_duration.as_nanos() as f64 / iterations as f64;
    let pop_ns = pop_duration.as_nanos() as f64 / iterations as f64;

    println!("  Operations: {}", iterations);
    println!("  Final capacity: {}", q.capacity());
    println!(
        "  Push latency: {:.2} ns/op ({:.3} μs/op)",
        push_ns,
        push_ns / 1000.0
    );
    println!(
        "  Pop latency:  {:.2} ns/op ({:.3} μs/op)",
        pop_ns,
        pop_ns / 1000.0
    );
    println!(
        "  Throughput:   {:.2} M ops/sec\n",
        iterations as f64 / push_duration.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_sync_queue(config: &DemoConfig) {
    println!("📊 SyncQueue Benchmark (MPMC, Mutex + Condvar)");
    println!("----------------------------------------------");

    // None = sentinel stop untuk consumer
    let q: Arc<SyncQueue<Option<u64>>> = Arc::new(SyncQueue::with_capacity(config.capacity));
    let received = Arc::new(AtomicU64::new(0));
    let empty_wakeups = Arc::new(AtomicU64::new(0));
    let per_producer = config.messages / config.producers as u64;

    let start = Instant::now();

    let consumers: Vec<_> = (0..config.consumers)
        .map(|id| {
            let q = Arc::clone(&q);
            let received = Arc::clone(&received);
            let empty_wakeups = Arc::clone(&empty_wakeups);
            thread::Builder::new()
                .name(format!("consumer-{}", id))
                .spawn(move || loop {
                    match q.pop_checked() {
                        Some(Some(_)) => {
                            received.fetch_add(1, Ordering::Relaxed);
                        }
                        Some(None) => break,
                        None => {
                            empty_wakeups.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
        })
        .collect::<Result<_, _>>()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to spawn consumer: {}", e);
            std::process::exit(1);
        });

    let producers: Vec<_> = (0..config.producers)
        .map(|id| {
            let q = Arc::clone(&q);
            thread::Builder::new()
                .name(format!("producer-{}", id))
                .spawn(move || {
                    for i in 0..per_producer {
                        q.push(Some(i));
                    }
                })
        })
        .collect::<Result<_, _>>()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to spawn producer: {}", e);
            std::process::exit(1);
        });

    for p in producers {
        let _ = p.join();
    }
    for _ in 0..config.consumers {
        q.push(None);
    }
    for c in consumers {
        let _ = c.join();
    }

    let duration = start.elapsed();
    let total = received.load(Ordering::Relaxed);
    let wakeups = empty_wakeups.load(Ordering::Relaxed);

    info!(total, empty_wakeups = wakeups, ?duration, "sync queue run complete");

    println!(
        "  Producers: {}  Consumers: {}",
        config.producers, config.consumers
    );
    println!("  Messages received: {}", total);
    println!("  Empty wakeups: {}", wakeups);
    println!(
        "  Throughput: {:.2} M msgs/sec",
        total as f64 / duration.as_secs_f64() / 1_000_000.0
    );
    if total != per_producer * config.producers as u64 {
        println!("  ⚠️  Expected {}", per_producer * config.producers as u64);
    }
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--producers" | "-p" => {
                if i + 1 < args.len() {
                    config.producers = args[i + 1].parse().unwrap_or(2).max(1);
                    i += 1;
                }
            }
            "--consumers" | "-c" => {
                if i + 1 < args.len() {
                    config.consumers = args[i + 1].parse().unwrap_or(2).max(1);
                    i += 1;
                }
            }
            "--messages" | "-m" => {
                if i + 1 < args.len() {
                    config.messages = args[i + 1].parse().unwrap_or(1_000_000);
                    i += 1;
                }
            }
            "--capacity" => {
                if i + 1 < args.len() {
                    config.capacity = args[i + 1].parse().unwrap_or(1024);
                    i += 1;
                }
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("offq demo - Queue & SyncQueue benchmark\n");
                println!("Usage: offq_demo [OPTIONS]\n");
                println!("Options:");
                println!("  -p, --producers <N>   Producer threads (default: 2)");
                println!("  -c, --consumers <N>   Consumer threads (default: 2)");
                println!("  -m, --messages <N>    Total messages (default: 1000000)");
                println!("      --capacity <N>    Initial queue capacity (default: 1024)");
                println!("  -v, --verbose         Verbose output");
                println!("  -h, --help            Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn main() {
    let config = parse_args();
    init_tracing(config.verbose);

    println!("🚀 offq - Queue Demo");
    println!("====================\n");

    benchmark_queue(&config);
    benchmark_sync_queue(&config);

    println!("\n✅ All benchmarks complete!");
}

//! ringrange - latency micro-benchmark
//!
//! Measures the hot paths of the ring buffer without criterion, for a quick
//! read on a target machine.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=debug cargo run --release --features cli -- --iterations 1000000
//! ```

use std::error::Error;
use std::hint::black_box;
use std::time::{Duration, Instant};

use clap::Parser;
use ringrange::RingBuffer;

const CAPACITY: usize = 65536;

/// Latency micro-benchmark for the fixed-capacity ring buffer
#[derive(Debug, Parser)]
#[command(name = "ringrange")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operations per measured phase
    #[arg(short, long, default_value_t = 1_000_000)]
    iterations: usize,

    /// Enqueue/dequeue pairs run before measuring
    #[arg(short, long, default_value_t = 1_000)]
    warmup: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Sample {
    sequence: u64,
    value: f64,
}

impl From<(u64, f64)> for Sample {
    fn from((sequence, value): (u64, f64)) -> Self {
        Self { sequence, value }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.iterations == 0 {
        return Err("--iterations must be greater than zero".into());
    }

    log::info!(
        "ringrange benchmark: capacity={} iterations={} warmup={}",
        CAPACITY,
        args.iterations,
        args.warmup
    );

    println!("ringrange Ring Buffer Benchmark");
    println!("===============================\n");

    let mut rb: RingBuffer<u64, CAPACITY> = RingBuffer::new();
    warm_up(&mut rb, args.warmup);

    let enqueue = bench_enqueue(&mut rb, args.iterations);
    let dequeue = bench_dequeue(&mut rb, args.iterations);
    report("enqueue", enqueue, args.iterations);
    report("dequeue", dequeue, args.iterations);

    let mut samples: RingBuffer<Sample, CAPACITY> = RingBuffer::new();
    let emplace = bench_emplace(&mut samples, args.iterations);
    report("emplace", emplace, args.iterations);

    println!("\nAll benchmarks complete!");
    Ok(())
}

fn warm_up(rb: &mut RingBuffer<u64, CAPACITY>, rounds: usize) {
    for i in 0..rounds {
        rb.enqueue(i as u64);
    }
    while rb.pop() {}
    log::debug!("warm-up done: {} rounds", rounds);
}

fn bench_enqueue(rb: &mut RingBuffer<u64, CAPACITY>, iterations: usize) -> Duration {
    let mut drained = 0usize;
    let start = Instant::now();
    for i in 0..iterations {
        while !rb.enqueue(black_box(i as u64)) {
            rb.pop();
            drained += 1;
        }
    }
    let elapsed = start.elapsed();

    log::debug!("enqueue phase: {} entries drained on full", drained);
    elapsed
}

fn bench_dequeue(rb: &mut RingBuffer<u64, CAPACITY>, iterations: usize) -> Duration {
    let mut elapsed = Duration::ZERO;
    let mut remaining = iterations;

    // Refill in capacity-sized chunks so every timed dequeue hits a live entry
    while remaining > 0 {
        while rb.pop() {}
        let chunk = remaining.min(CAPACITY);
        for i in 0..chunk {
            rb.enqueue(i as u64);
        }

        let start = Instant::now();
        for _ in 0..chunk {
            black_box(rb.dequeue());
        }
        elapsed += start.elapsed();
        remaining -= chunk;
    }

    log::debug!("dequeue phase: {} entries left", rb.n_entries());
    elapsed
}

fn bench_emplace(rb: &mut RingBuffer<Sample, CAPACITY>, iterations: usize) -> Duration {
    let start = Instant::now();
    for i in 0..iterations {
        if !rb.emplace(black_box((i as u64, i as f64 * 0.5))) {
            rb.pop();
            rb.emplace((i as u64, i as f64 * 0.5));
        }
    }
    let elapsed = start.elapsed();

    if let Some(oldest) = rb.peek() {
        log::debug!(
            "emplace phase: oldest sample seq={} value={}",
            oldest.sequence,
            oldest.value
        );
    }
    elapsed
}

fn report(name: &str, elapsed: Duration, iterations: usize) {
    let ns = elapsed.as_nanos() as f64 / iterations as f64;
    println!("  {:<8} latency: {:.2} ns/op ({:.3} μs/op)", name, ns, ns / 1000.0);
    println!(
        "  {:<8} throughput: {:.2} M ops/sec",
        name,
        iterations as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1_000_000.0
    );
}

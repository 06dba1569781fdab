//! computo Benchmark Binary
//!
//! Measures computation and credit proposals at different expedient sizes
//! (10, 100, 1,000 causes).
//! Run with: `cargo run --bin computo-bench --release`

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use computo_core::{compute, Cause, ChainConfig, Regime};
use computo_solver::{propose_credits, CreditRequest, DistributionMode};

// ---------------------------------------------------------------------------
// Synthetic data generation
// ---------------------------------------------------------------------------

const DURATIONS: &[(u32, u32, u32)] = &[
    (0, 0, 45),
    (0, 6, 0),
    (1, 0, 0),
    (2, 3, 10),
    (0, 3, 1),
    (5, 0, 0),
    (0, 11, 30),
    (3, 1, 0),
];

fn generate_causes(n: usize) -> Vec<Cause> {
    (0..n)
        .map(|i| {
            let (y, m, d) = DURATIONS[i % DURATIONS.len()];
            let cause = Cause::new(y, m, d).with_credit((i as u32 * 7) % 40);
            if i % 3 == 0 {
                cause.with_regime(Regime::TwoThirds)
            } else {
                cause.with_regime(Regime::Half)
            }
        })
        .collect()
}

fn bench_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

// ---------------------------------------------------------------------------
// Percentile computation
// ---------------------------------------------------------------------------

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    let idx = if idx == 0 { 0 } else { idx - 1 };
    sorted[idx.min(sorted.len() - 1)]
}

fn format_duration_us(us: f64) -> String {
    if us >= 1_000_000.0 {
        format!("{:.1} s", us / 1_000_000.0)
    } else if us >= 1_000.0 {
        format!("{:.1} ms", us / 1_000.0)
    } else {
        format!("{:.0} us", us)
    }
}

// ---------------------------------------------------------------------------
// Benchmark results
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Latency {
    p50_us: f64,
    p95_us: f64,
    p99_us: f64,
}

impl Latency {
    fn measure(iterations: usize, mut op: impl FnMut()) -> Self {
        let mut samples: Vec<f64> = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let start = Instant::now();
            op();
            samples.push(start.elapsed().as_micros() as f64);
        }
        samples.sort_by(f64::total_cmp);
        Self {
            p50_us: percentile(&samples, 50.0),
            p95_us: percentile(&samples, 95.0),
            p99_us: percentile(&samples, 99.0),
        }
    }
}

const OPERATIONS: [&str; 4] = [
    "Compute",
    "Compute, severe first",
    "Propose budget, severe",
    "Propose target, proportional",
];

/// Latencies for one scale, indexed like [`OPERATIONS`].
struct ScaleResult {
    latencies: [Latency; 4],
}

// ---------------------------------------------------------------------------
// Benchmark runner for a single scale
// ---------------------------------------------------------------------------

fn run_benchmark(n: usize, iterations: usize) -> ScaleResult {
    let start = bench_start();
    let causes = generate_causes(n);
    let config = ChainConfig::default();
    let severe = ChainConfig {
        order_most_severe_first: true,
        ..ChainConfig::default()
    };

    let current = compute(start, &causes, &config);
    let budget = u32::try_from(current.termination_base_days / 10).unwrap_or(0);
    let target = current
        .completion_date
        .map(|d| d - chrono::Duration::days(current.termination_base_days / 5));

    ScaleResult {
        latencies: [
            Latency::measure(iterations, || {
                let _ = compute(start, &causes, &config);
            }),
            Latency::measure(iterations, || {
                let _ = compute(start, &causes, &severe);
            }),
            Latency::measure(iterations, || {
                let _ = propose_credits(
                    start,
                    &causes,
                    &config,
                    CreditRequest::Budget(budget),
                    DistributionMode::MostSevereFirst,
                );
            }),
            Latency::measure(iterations, || {
                if let Some(target) = target {
                    let _ = propose_credits(
                        start,
                        &causes,
                        &config,
                        CreditRequest::TargetDate(target),
                        DistributionMode::Proportional,
                    );
                }
            }),
        ],
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let scales: &[usize] = &[10, 100, 1_000];
    let iterations = 200;

    println!();
    println!("computo Benchmark");
    println!("=================");
    println!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!("Date: {}", Utc::now().format("%Y-%m-%d"));
    println!();

    eprint!("Warming up... ");
    let _ = run_benchmark(10, 20);
    eprintln!("done.");
    println!();

    let mut results: Vec<(usize, ScaleResult)> = Vec::new();
    for &n in scales {
        eprint!("Benchmarking {} causes... ", n);
        let start = Instant::now();
        let result = run_benchmark(n, iterations);
        eprintln!("done in {:.1}s", start.elapsed().as_secs_f64());
        results.push((n, result));
    }

    println!();

    let col0 = 30;
    let colw = 14;

    print!("| {:col0$}", "Operation");
    for &n in scales {
        print!("| {:>colw$}", format!("{} causes", n));
    }
    println!("|");

    print!("|{}", "-".repeat(col0 + 1));
    for _ in scales {
        print!("|{}", "-".repeat(colw + 1));
    }
    println!("|");

    let pcts: [(&str, fn(&Latency) -> f64); 3] = [
        ("p50", |l| l.p50_us),
        ("p95", |l| l.p95_us),
        ("p99", |l| l.p99_us),
    ];
    for (op, label) in OPERATIONS.iter().enumerate() {
        for (pct, value) in pcts {
            print!("| {:col0$}", format!("{label} ({pct})"));
            for (_, r) in &results {
                print!("| {:>colw$}", format_duration_us(value(&r.latencies[op])));
            }
            println!("|");
        }
    }

    println!();
}

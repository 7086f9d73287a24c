use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use ov_core::RuleSet;

use crate::rules;

const WARMUP_OPS: usize = 1_000;

pub fn run_bench(path: &Path, url: &str, iterations: usize) -> Result<(), String> {
    if iterations == 0 {
        return Err("Iterations must be greater than zero".to_string());
    }

    let compile_start = Instant::now();
    let rule_set = rules::load_rule_set(path)?;
    let compile_us = compile_start.elapsed().as_secs_f64() * 1_000_000.0;

    println!("Page Identifier Benchmark");
    println!("==================================================");
    println!("  Rules:       {}", rule_set.len());
    println!("  URL:         {}", url);
    println!(
        "  Identifier:  {}",
        rule_set.resolve(url).unwrap_or_else(|| "-".to_string())
    );
    println!("  Compile:     {:.1} μs", compile_us);

    for _ in 0..WARMUP_OPS {
        black_box(rule_set.resolve(black_box(url)));
    }

    let latencies = measure_resolve_latency(&rule_set, url, iterations);
    let total_us: f64 = latencies.iter().sum();

    println!();
    println!("Results ({} iterations)", iterations);
    println!("--------------------------------------------------");
    println!("  Mean:        {:.3} μs", total_us / latencies.len() as f64);
    println!("  P50:         {:.3} μs", percentile(&latencies, 0.50));
    println!("  P99:         {:.3} μs", percentile(&latencies, 0.99));
    println!("  Max:         {:.3} μs", latencies.last().copied().unwrap_or(0.0));

    Ok(())
}

fn measure_resolve_latency(rule_set: &RuleSet, url: &str, iterations: usize) -> Vec<f64> {
    let mut latencies = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let start = Instant::now();
        black_box(rule_set.resolve(black_box(url)));
        latencies.push(start.elapsed().as_secs_f64() * 1_000_000.0);
    }

    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    latencies
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

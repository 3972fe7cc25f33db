//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_rules -- [depth] [--divide]
//!
//! Examples:
//!   # Default: depth 4 from the starting position
//!   cargo flamegraph --example perft_bench -p chess_rules
//!
//!   # Per-move split at depth 3
//!   cargo run --release --example perft_bench -p chess_rules -- 3 --divide

use chess_rules::{Position, perft, perft::divide};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);
    let split = args.iter().any(|a| a == "--divide");

    let pos = Position::startpos();
    println!("{pos}");
    println!("Depth: {depth}");
    println!();

    if split {
        let start = Instant::now();
        let mut total = 0u64;
        for (mv, nodes) in divide(&pos, depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!();
        println!("Nodes: {total}");
        println!("Time: {:.3?}", start.elapsed());
        return;
    }

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&pos, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(&pos, depth);
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}

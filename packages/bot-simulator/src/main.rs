//! Bot Simulator CLI - plays all-bot cribbage matches through the match
//! coordinator on an in-memory store.
//!
//! Every move goes through the same optimistic commit path a live match
//! uses, so this doubles as a soak test for the coordinator.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::Instant;

use clap::Parser;
use cribbage_backend::domain::SeatKind;
use cribbage_backend::CoordinatorConfig;
use futures::stream::{self, StreamExt};
use metrics::{build_match_metrics, summarize, MatchMetrics};
use output::OutputWriter;
use simulator::Simulator;
use tracing::{info, warn};
use types::BotTier;

#[derive(Parser)]
#[command(name = "bot-simulator")]
#[command(about = "Plays all-bot cribbage matches and records the results")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Bot tier per seat, in seat order (2 to 4 seats)
    #[arg(long, value_delimiter = ',', default_values = ["medium", "hard"])]
    seats: Vec<BotTier>,

    /// Base seed; match `i` uses `seed + i`. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Matches played at the same time
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Bot moves allowed per match before the scheduler gives up
    #[arg(long)]
    max_bot_iterations: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if !(2..=4).contains(&args.seats.len()) {
        return Err(format!("--seats needs 2 to 4 tiers, got {}", args.seats.len()).into());
    }

    let tiers: Vec<&'static str> = args.seats.iter().map(|t| t.name()).collect();
    let seats: Vec<SeatKind> = args.seats.iter().map(|t| t.seat_kind()).collect();
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let mut config = CoordinatorConfig::from_env()?;
    if let Some(cap) = args.max_bot_iterations {
        config.max_bot_iterations = cap;
    }
    // Results are read back from the store, not from coordinator slots.
    config.evict_finished = true;

    info!(matches = args.matches, seats = ?tiers, base_seed, "starting simulation");

    let simulator = Simulator::new(config);
    let mut writer = OutputWriter::new(&args.output_dir)?;

    let start = Instant::now();
    let results: Vec<_> = stream::iter(1..=args.matches)
        .map(|n| {
            let seed = base_seed.wrapping_add(u64::from(n));
            let seats = seats.clone();
            let simulator = &simulator;
            async move { (n, simulator.run_match(i64::from(n), seats, seed).await) }
        })
        .buffer_unordered(args.concurrency.max(1))
        .collect()
        .await;

    let mut completed: Vec<MatchMetrics> = Vec::with_capacity(results.len());
    let mut errors = 0u32;
    for (n, result) in results {
        match result {
            Ok(outcome) => {
                let metrics = build_match_metrics(&outcome, &tiers);
                if let Err(e) = writer.write_match(&metrics) {
                    warn!(match_no = n, error = %e, "failed to write metrics");
                }
                completed.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!(match_no = n, code = e.code().as_str(), error = %e, "match failed");
            }
        }
    }
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let summary = summarize(&completed, &tiers, args.matches, errors, elapsed_ms);
    let (jsonl_path, summary_path) = {
        let (a, b) = writer.output_paths();
        (a.to_path_buf(), b.to_path_buf())
    };
    writer.finish(&summary)?;

    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", summary.completed, summary.matches);
    if summary.errors > 0 {
        println!("Errors: {}", summary.errors);
    }
    println!("Total time: {:.1} ms", summary.elapsed_ms);
    println!("Average rounds: {:.1}", summary.avg_rounds);
    for (seat, tier) in summary.seats.iter().enumerate() {
        let win_rate = f64::from(summary.wins[seat]) / summary.completed.max(1) as f64 * 100.0;
        println!(
            "Seat {seat} ({tier}): avg={:.1}, wins={} ({win_rate:.1}%)",
            summary.avg_score[seat], summary.wins[seat]
        );
    }
    println!("Results: {}", jsonl_path.display());
    println!("Summary: {}", summary_path.display());

    Ok(())
}

//! Health check aggregation example
//!
//! This example demonstrates:
//! - Combining literal flags with asynchronous probes in one voter
//! - Boolean (And, Ratio) and statistical (Average) decisions
//! - Memoization: probes run once, later decisions reuse the results
//!
//! Run with: cargo run --example health_check

use std::time::Duration;

use quorum_runtime::{AndVoter, AverageVoter, Evaluation, RatioVoter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Health Check Aggregation Example ===\n");

    // Readiness: every signal must be up
    let mut readiness = AndVoter::new();
    readiness
        .add_decision_basis(true) // feature flag, already known
        .add_evaluator(|| async {
            // stands in for a database ping
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(Evaluation::single(true))
        })
        .add_evaluator(|| async {
            // stands in for an upstream API probe
            tokio::time::sleep(Duration::from_millis(3)).await;
            Ok(Evaluation::single(true))
        });

    let ready = readiness.decide().await?;
    println!("All probes healthy: {:?}", ready);

    // The probes are memoized now; this decision resolves immediately
    let ready_again = readiness.decide().await?;
    println!("Decided again from memoized basis: {:?}\n", ready_again);

    // Degradation: what share of replicas report in?
    let mut replicas = RatioVoter::new();
    replicas
        .add_decision_basis(true)
        .add_decision_basis(true)
        .add_decision_basis(false)
        .add_evaluator(|| async { Ok(Evaluation::single(true)) });

    println!("Replica availability: {:?}", replicas.decide().await?);

    // Latency: average of sampled probe timings (milliseconds)
    let mut latency = AverageVoter::new();
    latency
        .add_decision_basis(12)
        .add_decision_basis(18)
        .add_evaluator(|| async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok(Evaluation::single(24))
        });

    println!("Average probe latency: {:?} ms", latency.decide().await?);

    Ok(())
}

//! End-to-end scheduler runs against the in-process provider double.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use ipvet_common::config::Config;
use ipvet_common::reputation::Outcome;
use ipvet_core::batch::{BatchScheduler, INVALID_FORMAT_REASON, RunSnapshot};

use crate::support::ScriptedProvider;

fn test_config(batch_size: usize) -> Config {
    Config {
        batch_size,
        batch_delay: Duration::ZERO,
        ..Config::default()
    }
}

/// Runs one query and returns the final state plus every published snapshot.
async fn run_collecting(
    provider: Arc<ScriptedProvider>,
    batch_size: usize,
    input: &str,
) -> (RunSnapshot, Vec<RunSnapshot>) {
    let scheduler = BatchScheduler::new(provider, &test_config(batch_size));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let finished = scheduler.run(input, &tx).await;
    drop(tx);

    let mut snapshots = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        snapshots.push(snapshot);
    }
    (finished, snapshots)
}

fn outcome_ips(snapshot: &RunSnapshot) -> Vec<&str> {
    snapshot.outcomes.iter().map(Outcome::ip).collect()
}

#[tokio::test]
async fn outcome_order_matches_input_despite_latency() {
    // Slowest item first: within-group completion order is reversed
    // relative to input order.
    let provider = ScriptedProvider::ok()
        .with_latency("1.1.1.1", 80)
        .with_latency("2.2.2.2", 60)
        .with_latency("3.3.3.3", 40)
        .with_latency("4.4.4.4", 20);

    let input = "1.1.1.1 2.2.2.2 3.3.3.3 4.4.4.4 5.5.5.5";
    let (finished, _) = run_collecting(Arc::new(provider), 5, input).await;

    assert_eq!(
        outcome_ips(&finished),
        vec!["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4", "5.5.5.5"]
    );
}

#[tokio::test]
async fn twelve_ips_publish_exactly_three_snapshots() {
    let input: String = (1..=12)
        .map(|i| format!("10.0.0.{i}"))
        .collect::<Vec<_>>()
        .join("\n");

    let provider = Arc::new(ScriptedProvider::ok());
    let (finished, snapshots) = run_collecting(Arc::clone(&provider), 5, &input).await;

    assert_eq!(snapshots.len(), 3);
    let completed: Vec<usize> = snapshots.iter().map(|s| s.completed).collect();
    assert_eq!(completed, vec![5, 10, 12]);

    assert!((snapshots[0].progress - 41.666_666).abs() < 0.01);
    assert!((snapshots[1].progress - 83.333_333).abs() < 0.01);
    assert_eq!(snapshots[2].progress, 100.0);

    assert_eq!(finished.total, 12);
    assert_eq!(provider.call_count(), 12);
}

#[tokio::test]
async fn unreachable_provider_still_reaches_done() {
    let input = "8.8.8.8\n9.9.9.9\n1.0.0.1";
    let (finished, _) = run_collecting(Arc::new(ScriptedProvider::unreachable()), 2, input).await;

    assert_eq!(finished.outcomes.len(), finished.total);
    assert_eq!(finished.progress, 100.0);
    assert!(finished.outcomes.iter().all(Outcome::is_failure));
    assert!(!finished.errors.is_empty());
}

#[tokio::test]
async fn progress_never_decreases_across_snapshots() {
    let input = "1.1.1.1\nbad line\n2.2.2.2\n300.0.0.1\n3.3.3.3\n4.4.4.4\n5.5.5.5";
    let (_, snapshots) = run_collecting(Arc::new(ScriptedProvider::ok()), 3, input).await;

    let mut last = 0.0_f64;
    for snapshot in &snapshots {
        assert!(snapshot.progress >= last);
        last = snapshot.progress;
    }
    assert_eq!(last, 100.0);
}

#[tokio::test]
async fn mixed_input_classifies_each_token() {
    let provider = Arc::new(ScriptedProvider::ok());
    let input = "1.2.3.4\nnot an ip\n999.999.999.999";
    let (finished, _) = run_collecting(Arc::clone(&provider), 5, input).await;

    assert_eq!(outcome_ips(&finished), vec!["1.2.3.4", "999.999.999.999"]);
    assert!(matches!(&finished.outcomes[0], Outcome::Success(_)));
    match &finished.outcomes[1] {
        Outcome::Failure { reason, .. } => assert_eq!(reason, INVALID_FORMAT_REASON),
        other => panic!("expected failure, got {other:?}"),
    }

    // The out-of-range token must never have produced a remote call.
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn duplicates_survive_across_group_boundaries() {
    let input = "10.0.0.1\n10.0.0.2\n10.0.0.1\n10.0.0.3";
    let provider = Arc::new(ScriptedProvider::ok());
    let (finished, _) = run_collecting(Arc::clone(&provider), 2, input).await;

    assert_eq!(
        outcome_ips(&finished),
        vec!["10.0.0.1", "10.0.0.2", "10.0.0.1", "10.0.0.3"]
    );
    assert_eq!(provider.call_count(), 4);
}

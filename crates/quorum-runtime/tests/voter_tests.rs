//! Integration tests for the evaluation engine
//!
//! Covers the engine semantics shared by every strategy: concurrent
//! resolution order, memoization, null filtering, fail-fast errors, and
//! sub-voter composition.

mod common;

use common::{calls, delayed, failing, resolved, resolved_null, CountingEvaluator};
use quorum_runtime::{
    AndVoter, Evaluation, OrVoter, RatioVoter, Value, Voter, VoterConfig, VoterError,
};

// ============================================================================
// Ordering and null filtering
// ============================================================================

#[tokio::test]
async fn test_result_order_follows_insertion_not_completion() {
    let mut voter = Voter::new();
    voter
        .add_evaluator(delayed(1, 50))
        .add_evaluator(delayed(2, 1))
        .add_decision_basis(3);

    let values = voter.decide().await.unwrap();
    assert_eq!(
        values,
        vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]
    );
}

#[tokio::test]
async fn test_null_results_are_filtered_by_default() {
    let mut voter = Voter::new();
    voter
        .add_decision_basis(true)
        .add_evaluator(resolved_null())
        .add_decision_basis(false);

    let values = voter.decide().await.unwrap();
    assert_eq!(values, vec![Value::Bool(true), Value::Bool(false)]);

    let values = voter.decide_with(true).await.unwrap();
    assert_eq!(
        values,
        vec![Value::Bool(true), Value::Null, Value::Bool(false)]
    );
}

// ============================================================================
// Memoization
// ============================================================================

#[tokio::test]
async fn test_evaluator_runs_once_across_decisions() {
    let (evaluator, counter) = CountingEvaluator::new(true);
    let mut voter = Voter::new();
    voter.add_decision_basis(true).add_evaluator(evaluator);

    voter.decide().await.unwrap();
    assert_eq!(calls(&counter), 1);
    assert!(!voter.decision_basis()[1].is_evaluator());

    voter.decide().await.unwrap();
    assert_eq!(calls(&counter), 1);
}

#[tokio::test]
async fn test_only_new_evaluators_run_on_later_decisions() {
    let (first, first_counter) = CountingEvaluator::new(true);
    let mut voter = Voter::new();
    voter.add_evaluator(first);
    voter.decide().await.unwrap();

    let (second, second_counter) = CountingEvaluator::new(false);
    voter.add_evaluator(second);
    voter.decide().await.unwrap();

    assert_eq!(calls(&first_counter), 1);
    assert_eq!(calls(&second_counter), 1);
}

#[tokio::test]
async fn test_without_persistence_evaluator_runs_again() {
    let (evaluator, counter) = CountingEvaluator::new(true);
    let config = VoterConfig::new().with_persists_evaluation(false);
    let mut voter = Voter::with_config(config);
    voter.add_evaluator(evaluator);

    voter.decide().await.unwrap();
    voter.decide().await.unwrap();

    assert_eq!(calls(&counter), 2);
    assert!(voter.decision_basis()[0].is_evaluator());
}

#[tokio::test]
async fn test_multi_value_evaluation_keeps_first_by_default() {
    let mut voter = Voter::new();
    voter.add_evaluator(|| async {
        Ok(Evaluation::many(vec![Value::Number(1.0), Value::Number(2.0)]))
    });

    let values = voter.decide().await.unwrap();
    assert_eq!(values, vec![Value::Number(1.0)]);
}

#[tokio::test]
async fn test_multi_value_evaluation_memoizes_as_array() {
    let config = VoterConfig::new().with_only_one_argument(false);
    let mut voter = Voter::with_config(config);
    voter.add_evaluator(|| async {
        Ok(Evaluation::many(vec![Value::Number(1.0), Value::Number(2.0)]))
    });

    let values = voter.decide().await.unwrap();
    assert_eq!(
        values,
        vec![Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])]
    );
    assert!(!voter.decision_basis()[0].is_evaluator());
}

// ============================================================================
// Error propagation
// ============================================================================

#[tokio::test]
async fn test_first_evaluator_error_fails_the_decision() {
    let mut voter = Voter::new();
    voter
        .add_evaluator(resolved(true))
        .add_evaluator(failing("probe down"));

    let err = voter.decide().await.unwrap_err();
    assert!(matches!(err, VoterError::Evaluator(_)));
    assert!(err.to_string().contains("probe down"));

    // Nothing is memoized on the error path
    assert!(voter.decision_basis()[0].is_evaluator());
    assert!(voter.decision_basis()[1].is_evaluator());
}

// ============================================================================
// Sub-voters
// ============================================================================

#[tokio::test]
async fn test_sub_voter_verdict_feeds_parent() {
    let mut sub = OrVoter::new();
    sub.add_decision_basis(false).add_evaluator(resolved(true));

    let mut parent = AndVoter::new();
    parent.add_decision_basis(true).add_sub_voter(sub);

    assert_eq!(parent.decide().await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_sub_voter_without_basis_is_filtered_as_null() {
    let empty = AndVoter::new();

    let mut parent = RatioVoter::new();
    parent.add_decision_basis(true).add_sub_voter(empty);

    // The inconclusive nested verdict resolves to null and is filtered,
    // leaving a single truthy entry.
    assert_eq!(parent.decide().await.unwrap(), Some(1.0));
}

#[tokio::test]
async fn test_sub_voter_error_propagates() {
    let mut sub = AndVoter::new();
    sub.add_evaluator(failing("nested failure"));

    let mut parent = OrVoter::new();
    parent.add_decision_basis(true).add_sub_voter(sub);

    let err = parent.decide().await.unwrap_err();
    assert!(err.to_string().contains("nested failure"));
}

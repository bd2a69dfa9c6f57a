//! Common test utilities for runtime integration tests

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quorum_runtime::{Evaluation, Evaluator, Result, Value, VoterError};

/// Evaluator resolving to `value` after a short delay
pub fn resolved(value: impl Into<Value>) -> impl Evaluator {
    delayed(value, 1)
}

/// Evaluator resolving to `value` after `delay_ms` milliseconds
pub fn delayed(value: impl Into<Value>, delay_ms: u64) -> impl Evaluator {
    let value = value.into();
    move || {
        let value = value.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok(Evaluation::Single(value))
        }
    }
}

/// Evaluator resolving to `Null` after a short delay
pub fn resolved_null() -> impl Evaluator {
    delayed(Value::Null, 1)
}

/// Evaluator failing with `reason` after a short delay
pub fn failing(reason: &str) -> impl Evaluator {
    let reason = reason.to_string();
    move || {
        let reason = reason.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err(VoterError::evaluator(reason))
        }
    }
}

/// Evaluator that counts how often it is invoked
pub struct CountingEvaluator {
    value: Value,
    calls: Arc<AtomicUsize>,
}

impl CountingEvaluator {
    /// Build the evaluator plus a handle onto its invocation counter
    pub fn new(value: impl Into<Value>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let evaluator = Self {
            value: value.into(),
            calls: Arc::clone(&calls),
        };
        (evaluator, calls)
    }
}

#[async_trait]
impl Evaluator for CountingEvaluator {
    async fn evaluate(&self) -> Result<Evaluation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Evaluation::Single(self.value.clone()))
    }
}

/// Read an invocation counter
pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

//! Decision basis building blocks
//!
//! A voter's basis is an ordered sequence of entries: literal values
//! that resolve immediately, and asynchronous evaluators that resolve
//! on demand. This module defines the entry type, the evaluator
//! abstraction, and the shape of an evaluator's completion.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use quorum_core::Value;

use crate::error::Result;

/// Completion of one evaluator invocation
///
/// An evaluator finishes with either a single value or an ordered
/// sequence of values. How a sequence memoizes into its basis slot is
/// governed by [`VoterConfig::only_one_argument`].
///
/// [`VoterConfig::only_one_argument`]: crate::voter::VoterConfig
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Exactly one result value
    Single(Value),
    /// An ordered sequence of result values
    Many(Vec<Value>),
}

impl Evaluation {
    /// Build a single-value evaluation
    pub fn single(value: impl Into<Value>) -> Self {
        Evaluation::Single(value.into())
    }

    /// Build a multi-value evaluation
    pub fn many(values: impl IntoIterator<Item = Value>) -> Self {
        Evaluation::Many(values.into_iter().collect())
    }

    /// Collapse the evaluation into the value stored in the basis slot
    ///
    /// With `only_one_argument` a multi-value completion keeps only its
    /// first element (`Null` when empty); otherwise the whole sequence
    /// becomes one array value.
    pub(crate) fn collapse(self, only_one_argument: bool) -> Value {
        match self {
            Evaluation::Single(value) => value,
            Evaluation::Many(values) => {
                if only_one_argument {
                    values.into_iter().next().unwrap_or(Value::Null)
                } else {
                    Value::Array(values)
                }
            }
        }
    }
}

/// Asynchronous producer of a decision basis value
///
/// Evaluators are invoked as single-shot async calls during `decide`.
/// A failure short-circuits the whole decision (fail-fast).
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Produce the evaluation for this entry
    async fn evaluate(&self) -> Result<Evaluation>;
}

// Plain async closures are evaluators: `|| async { ... }`.
#[async_trait]
impl<F, Fut> Evaluator for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Evaluation>> + Send + 'static,
{
    async fn evaluate(&self) -> Result<Evaluation> {
        (self)().await
    }
}

/// One unit of decision basis
///
/// Position in the basis sequence is the entry's identity: removal and
/// single-entry evaluation address entries by position, and memoization
/// overwrites `Evaluator` slots with `Value` slots in place.
#[derive(Clone)]
pub enum BasisEntry {
    /// A literal value, resolved immediately
    Value(Value),
    /// An asynchronous evaluator, resolved during `decide`
    Evaluator(Arc<dyn Evaluator>),
}

impl BasisEntry {
    /// Check if this slot still holds an unevaluated evaluator
    pub fn is_evaluator(&self) -> bool {
        matches!(self, BasisEntry::Evaluator(_))
    }
}

impl fmt::Debug for BasisEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisEntry::Value(value) => f.debug_tuple("Value").field(value).finish(),
            BasisEntry::Evaluator(_) => f.write_str("Evaluator(..)"),
        }
    }
}

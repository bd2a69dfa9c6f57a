//! Voter: basis store and concurrent evaluation engine
//!
//! A `Voter` owns an ordered decision basis and resolves it on demand:
//! literal entries resolve immediately, evaluator entries run
//! concurrently (fail-fast on the first error), and resolved evaluator
//! slots are memoized back into the basis so later decisions skip the
//! evaluator entirely.

use std::sync::Arc;

use futures::future;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use quorum_core::Value;

use crate::basis::{BasisEntry, Evaluation, Evaluator};
use crate::error::{Result, VoterError};
use crate::strategy::{Strategy, StrategyVoter};

fn default_true() -> bool {
    true
}

/// Configuration flags for a voter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterConfig {
    /// Overwrite an evaluator's basis slot with its resolved value
    ///
    /// With persistence on (the default), the basis sequence is its own
    /// memo table: an evaluator runs at most once per slot, no matter
    /// how many decisions follow.
    #[serde(default = "default_true")]
    pub persists_evaluation: bool,

    /// Memoize only the first value of a multi-value evaluation
    ///
    /// Off, a multi-value evaluation memoizes as a single array value.
    #[serde(default = "default_true")]
    pub only_one_argument: bool,
}

impl VoterConfig {
    /// Create the default configuration (both flags on)
    pub fn new() -> Self {
        Self {
            persists_evaluation: true,
            only_one_argument: true,
        }
    }

    /// Set whether evaluator results overwrite their basis slot
    pub fn with_persists_evaluation(mut self, persists: bool) -> Self {
        self.persists_evaluation = persists;
        self
    }

    /// Set whether only the first value of a multi-value evaluation is kept
    pub fn with_only_one_argument(mut self, only_one: bool) -> Self {
        self.only_one_argument = only_one;
        self
    }
}

impl Default for VoterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-slot outcome of one evaluation pass
enum Resolution {
    /// The slot already held a literal value
    Literal(Value),
    /// The slot held an evaluator that was invoked
    Evaluated(Evaluation),
}

/// Basis store plus evaluation engine
///
/// Used directly, `decide` yields the raw resolved sequence; bound to a
/// strategy through [`StrategyVoter`], the sequence reduces to a single
/// verdict.
#[derive(Debug, Default)]
pub struct Voter {
    basis: Vec<BasisEntry>,
    config: VoterConfig,
}

impl Voter {
    /// Create a voter with the default configuration
    pub fn new() -> Self {
        Self::with_config(VoterConfig::default())
    }

    /// Create a voter with the given configuration
    pub fn with_config(config: VoterConfig) -> Self {
        Self {
            basis: Vec::new(),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> VoterConfig {
        self.config
    }

    /// The current basis sequence
    ///
    /// After a persisted decision, invoked evaluator slots show up here
    /// as `BasisEntry::Value`.
    pub fn decision_basis(&self) -> &[BasisEntry] {
        &self.basis
    }

    /// Number of basis entries
    pub fn len(&self) -> usize {
        self.basis.len()
    }

    /// Check if the basis is empty
    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    /// Append a literal value to the basis
    pub fn add_decision_basis(&mut self, value: impl Into<Value>) -> &mut Self {
        self.basis.push(BasisEntry::Value(value.into()));
        self
    }

    /// Append several literal values to the basis, in iteration order
    pub fn add_decision_values<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.add_decision_basis(value);
        }
        self
    }

    /// Append an asynchronous evaluator to the basis
    pub fn add_evaluator<E>(&mut self, evaluator: E) -> &mut Self
    where
        E: Evaluator + 'static,
    {
        self.basis.push(BasisEntry::Evaluator(Arc::new(evaluator)));
        self
    }

    /// Append a prepared basis entry
    pub fn add_basis_entry(&mut self, entry: BasisEntry) -> &mut Self {
        self.basis.push(entry);
        self
    }

    /// Use another voter's decision as one basis entry of this voter
    ///
    /// The nested verdict converts to a value (`None` becomes `Null`,
    /// which the parent then filters like any other null). Errors from
    /// the nested voter propagate as this entry's evaluator error.
    pub fn add_sub_voter<S>(&mut self, sub: StrategyVoter<S>) -> &mut Self
    where
        S: Strategy + 'static,
    {
        let sub = Arc::new(Mutex::new(sub));
        self.add_evaluator(move || {
            let sub = Arc::clone(&sub);
            async move {
                let mut sub = sub.lock().await;
                let verdict = sub.decide().await?;
                Ok(Evaluation::Single(verdict.map_or(Value::Null, Into::into)))
            }
        })
    }

    /// Remove the whole decision basis
    pub fn clear_basis(&mut self) -> &mut Self {
        self.basis.clear();
        self
    }

    /// Remove exactly the entry at `position`, shifting the rest left
    ///
    /// An out-of-range position leaves the basis untouched.
    pub fn clear_basis_at(&mut self, position: usize) -> &mut Self {
        if position < self.basis.len() {
            self.basis.remove(position);
        } else {
            warn!(
                "clear_basis_at({}) ignored: basis length is {}",
                position,
                self.basis.len()
            );
        }
        self
    }

    /// Resolve the full basis, excluding nulls from the result
    ///
    /// Shorthand for `decide_with(false)`.
    pub async fn decide(&mut self) -> Result<Vec<Value>> {
        self.decide_with(false).await
    }

    /// Resolve the full basis into a value sequence in insertion order
    ///
    /// Evaluator entries run concurrently; the first evaluator error
    /// fails the whole decision and nothing is memoized. On success,
    /// invoked evaluator slots are memoized (when configured) and null
    /// values are excluded unless `obtain_null` is set.
    pub async fn decide_with(&mut self, obtain_null: bool) -> Result<Vec<Value>> {
        debug!("Resolving {} basis entries", self.basis.len());

        let tasks: Vec<_> = self
            .basis
            .iter()
            .cloned()
            .map(|entry| async move {
                match entry {
                    BasisEntry::Value(value) => Ok(Resolution::Literal(value)),
                    BasisEntry::Evaluator(evaluator) => {
                        evaluator.evaluate().await.map(Resolution::Evaluated)
                    }
                }
            })
            .collect();

        let resolutions = future::try_join_all(tasks).await?;

        let mut decided = Vec::with_capacity(resolutions.len());
        for (position, resolution) in resolutions.into_iter().enumerate() {
            let value = match resolution {
                Resolution::Literal(value) => value,
                Resolution::Evaluated(evaluation) => {
                    let value = evaluation.collapse(self.config.only_one_argument);
                    if self.config.persists_evaluation {
                        debug!("Memoizing evaluator result at basis position {}", position);
                        self.basis[position] = BasisEntry::Value(value.clone());
                    }
                    value
                }
            };
            if obtain_null || !value.is_null() {
                decided.push(value);
            }
        }

        Ok(decided)
    }

    /// Resolve (and, if configured, memoize) a single basis entry
    pub async fn evaluate_basis(&mut self, position: usize) -> Result<Value> {
        let len = self.basis.len();
        let entry = self
            .basis
            .get(position)
            .cloned()
            .ok_or(VoterError::PositionOutOfRange { position, len })?;

        match entry {
            BasisEntry::Value(value) => Ok(value),
            BasisEntry::Evaluator(evaluator) => {
                let evaluation = evaluator.evaluate().await?;
                let value = evaluation.collapse(self.config.only_one_argument);
                if self.config.persists_evaluation {
                    self.basis[position] = BasisEntry::Value(value.clone());
                }
                Ok(value)
            }
        }
    }
}

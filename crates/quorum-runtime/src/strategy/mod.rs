//! Decision strategies
//!
//! A strategy reduces the resolved, null-filtered basis sequence to a
//! single verdict. Two families exist: Boolean (And, Or, Xor, Ratio)
//! over host truthiness, and Statistical (Average, Variance, Cv) over
//! numeric readings. Statistical strategies compose: Variance chains
//! Average, and Cv chains both.

use async_trait::async_trait;

use quorum_core::Value;

use crate::basis::{BasisEntry, Evaluator};
use crate::error::Result;
use crate::voter::{Voter, VoterConfig};

pub mod boolean;
pub mod statistics;

pub use boolean::{And, Or, Ratio, Xor};
pub use statistics::{Average, Cv, Variance};

/// Reduction rule applied to a voter's resolved basis
#[async_trait]
pub trait Strategy: Send + Sync {
    /// The verdict this strategy reduces to
    type Verdict: Into<Value> + Send + 'static;

    /// Run the voter's evaluation engine and reduce the result
    ///
    /// `None` means "no basis to decide from" — distinct from any
    /// negative verdict such as `false` or `0.0`.
    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<Self::Verdict>>;
}

/// A voter bound to one decision strategy
///
/// Owns the basis store and evaluation engine (a [`Voter`]) and exposes
/// the same fluent surface, with `decide` specialized to the strategy's
/// verdict type.
pub struct StrategyVoter<S: Strategy> {
    voter: Voter,
    strategy: S,
}

impl<S: Strategy + Default> StrategyVoter<S> {
    /// Create a strategy voter with the default configuration
    pub fn new() -> Self {
        Self::with_config(VoterConfig::default())
    }

    /// Create a strategy voter with the given configuration
    pub fn with_config(config: VoterConfig) -> Self {
        Self {
            voter: Voter::with_config(config),
            strategy: S::default(),
        }
    }
}

impl<S: Strategy + Default> Default for StrategyVoter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Strategy> StrategyVoter<S> {
    /// The underlying voter
    pub fn voter(&self) -> &Voter {
        &self.voter
    }

    /// Mutable access to the underlying voter
    pub fn voter_mut(&mut self) -> &mut Voter {
        &mut self.voter
    }

    /// Append a literal value to the basis
    pub fn add_decision_basis(&mut self, value: impl Into<Value>) -> &mut Self {
        self.voter.add_decision_basis(value);
        self
    }

    /// Append several literal values to the basis, in iteration order
    pub fn add_decision_values<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.voter.add_decision_values(values);
        self
    }

    /// Append an asynchronous evaluator to the basis
    pub fn add_evaluator<E>(&mut self, evaluator: E) -> &mut Self
    where
        E: Evaluator + 'static,
    {
        self.voter.add_evaluator(evaluator);
        self
    }

    /// Append a prepared basis entry
    pub fn add_basis_entry(&mut self, entry: BasisEntry) -> &mut Self {
        self.voter.add_basis_entry(entry);
        self
    }

    /// Use another voter's decision as one basis entry of this voter
    pub fn add_sub_voter<S2>(&mut self, sub: StrategyVoter<S2>) -> &mut Self
    where
        S2: Strategy + 'static,
    {
        self.voter.add_sub_voter(sub);
        self
    }

    /// Remove the whole decision basis
    pub fn clear_basis(&mut self) -> &mut Self {
        self.voter.clear_basis();
        self
    }

    /// Remove exactly the entry at `position`
    pub fn clear_basis_at(&mut self, position: usize) -> &mut Self {
        self.voter.clear_basis_at(position);
        self
    }

    /// Resolve (and, if configured, memoize) a single basis entry
    pub async fn evaluate_basis(&mut self, position: usize) -> Result<Value> {
        self.voter.evaluate_basis(position).await
    }

    /// Resolve the basis and reduce it to this strategy's verdict
    pub async fn decide(&mut self) -> Result<Option<S::Verdict>> {
        self.strategy.evaluate(&mut self.voter).await
    }
}

/// Voter deciding by logical AND
pub type AndVoter = StrategyVoter<And>;
/// Voter deciding by logical OR
pub type OrVoter = StrategyVoter<Or>;
/// Voter deciding by exclusive OR
pub type XorVoter = StrategyVoter<Xor>;
/// Voter deciding by truthy ratio
pub type RatioVoter = StrategyVoter<Ratio>;
/// Voter deciding by arithmetic mean
pub type AverageVoter = StrategyVoter<Average>;
/// Voter deciding by population variance
pub type VarianceVoter = StrategyVoter<Variance>;
/// Voter deciding by coefficient of variation
pub type CvVoter = StrategyVoter<Cv>;

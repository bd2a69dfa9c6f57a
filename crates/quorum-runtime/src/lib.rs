//! Quorum Runtime - Concurrent evaluation engine and decision strategies
//!
//! This crate provides the decision-aggregation runtime:
//! - A basis store of literal values and asynchronous evaluators
//! - A concurrent, fail-fast evaluation engine with memoization
//! - Boolean (And, Or, Xor, Ratio) and statistical (Average, Variance,
//!   Cv) decision strategies

pub mod basis;
pub mod error;
pub mod strategy;
pub mod voter;

// Re-export main types
pub use basis::{BasisEntry, Evaluation, Evaluator};
pub use error::{Result, VoterError};
pub use strategy::{
    And, AndVoter, Average, AverageVoter, Cv, CvVoter, Or, OrVoter, Ratio, RatioVoter, Strategy,
    StrategyVoter, Variance, VarianceVoter, Xor, XorVoter,
};
pub use voter::{Voter, VoterConfig};

// Re-export commonly used types from dependencies
pub use quorum_core::Value;

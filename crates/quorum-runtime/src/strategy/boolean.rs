//! Boolean decision strategies
//!
//! All four reduce by host truthiness (`Value::is_truthy`), so the
//! basis may hold arbitrary value types, not just booleans. An empty
//! (post-filter) sequence is `None` for every strategy: "no basis" is
//! not a negative verdict.

use async_trait::async_trait;

use quorum_core::Value;

use crate::error::Result;
use crate::strategy::Strategy;
use crate::voter::Voter;

/// Logical AND: false if any element is falsy
#[derive(Debug, Clone, Copy, Default)]
pub struct And;

#[async_trait]
impl Strategy for And {
    type Verdict = bool;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<bool>> {
        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().all(Value::is_truthy)))
    }
}

/// Logical OR: true if any element is truthy
#[derive(Debug, Clone, Copy, Default)]
pub struct Or;

#[async_trait]
impl Strategy for Or {
    type Verdict = bool;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<bool>> {
        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().any(Value::is_truthy)))
    }
}

/// Exclusive OR: true iff exactly one element is truthy
#[derive(Debug, Clone, Copy, Default)]
pub struct Xor;

#[async_trait]
impl Strategy for Xor {
    type Verdict = bool;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<bool>> {
        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        let truthy = values.iter().filter(|value| value.is_truthy()).count();
        Ok(Some(truthy == 1))
    }
}

/// Truthy ratio: truthy count over total count, in [0, 1]
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio;

#[async_trait]
impl Strategy for Ratio {
    type Verdict = f64;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<f64>> {
        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        let truthy = values.iter().filter(|value| value.is_truthy()).count();
        Ok(Some(truthy as f64 / values.len() as f64))
    }
}

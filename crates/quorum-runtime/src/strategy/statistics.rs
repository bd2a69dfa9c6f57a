//! Statistical decision strategies
//!
//! Reduce the basis as numbers via `Value::as_number` (no boolean
//! coercion; non-numeric values read as NaN and flow through the
//! arithmetic). Variance and Cv are composed strategies: Variance runs
//! Average's full decide against the same voter before its own pass,
//! and Cv runs Variance and then an independent Average. With
//! persistence on, the extra passes read memoized slots, so each
//! evaluator still runs at most once.

use async_trait::async_trait;

use crate::error::Result;
use crate::strategy::Strategy;
use crate::voter::Voter;

/// Arithmetic mean of the basis
#[derive(Debug, Clone, Copy, Default)]
pub struct Average;

#[async_trait]
impl Strategy for Average {
    type Verdict = f64;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<f64>> {
        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        let sum: f64 = values.iter().map(|value| value.as_number()).sum();
        Ok(Some(sum / values.len() as f64))
    }
}

/// Population variance of the basis
#[derive(Debug, Clone, Copy, Default)]
pub struct Variance;

#[async_trait]
impl Strategy for Variance {
    type Verdict = f64;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<f64>> {
        let average = match Average.evaluate(voter).await? {
            Some(average) => average,
            None => return Ok(None),
        };

        let values = voter.decide().await?;
        if values.is_empty() {
            return Ok(None);
        }
        let sum: f64 = values
            .iter()
            .map(|value| {
                let deviation = value.as_number() - average;
                deviation * deviation
            })
            .sum();
        Ok(Some(sum / values.len() as f64))
    }
}

/// Coefficient of variation: variance over average
///
/// An average of zero is not special-cased; the f64 division artifact
/// (infinity, or NaN when the variance is also zero) is the verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cv;

#[async_trait]
impl Strategy for Cv {
    type Verdict = f64;

    async fn evaluate(&self, voter: &mut Voter) -> Result<Option<f64>> {
        let variance = match Variance.evaluate(voter).await? {
            Some(variance) => variance,
            None => return Ok(None),
        };
        let average = match Average.evaluate(voter).await? {
            Some(average) => average,
            None => return Ok(None),
        };
        Ok(Some(variance / average))
    }
}

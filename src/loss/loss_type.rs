use serde::{Serialize, Deserialize};

use crate::data::Dataset;
use crate::error::Result;
use crate::loss::negative_sampling::DEFAULT_SAMPLES;
use crate::loss::{CostGradient, LossGradient, NegativeSamplingLoss, SoftmaxLoss};
use crate::math::Matrix;

/// Selects which objective the context models optimise.
///
/// - `Softmax`         : full-vocabulary softmax with cross-entropy.
/// - `NegativeSampling`: `samples` sampled negatives per prediction. With
///   `allow_collisions_with_target = false` a negative equal to the target is
///   redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Softmax,
    NegativeSampling {
        #[serde(default = "default_samples")]
        samples: usize,
        #[serde(default = "default_allow_collisions")]
        allow_collisions_with_target: bool,
    },
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_allow_collisions() -> bool {
    true
}

impl LossType {
    /// Negative sampling with `samples` draws and the base collision policy.
    pub fn negative_sampling(samples: usize) -> LossType {
        LossType::NegativeSampling { samples, allow_collisions_with_target: true }
    }

    /// Reports an invalid sample count before any computation runs.
    pub fn validate(&self) -> Result<()> {
        if let LossType::NegativeSampling { samples, allow_collisions_with_target } = *self {
            NegativeSamplingLoss::with_policy(samples, allow_collisions_with_target)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        match self {
            LossType::Softmax => "softmax",
            LossType::NegativeSampling { .. } => "negative sampling",
        }
    }
}

impl CostGradient for LossType {
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output_vectors: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Result<LossGradient> {
        match *self {
            LossType::Softmax => {
                SoftmaxLoss.cost_and_gradient(predicted, target, output_vectors, dataset)
            }
            LossType::NegativeSampling { samples, allow_collisions_with_target } => {
                NegativeSamplingLoss::with_policy(samples, allow_collisions_with_target)?
                    .cost_and_gradient(predicted, target, output_vectors, dataset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::W2vError;

    #[test]
    fn serializes_with_type_tag() {
        let ns = LossType::negative_sampling(10);
        let json = serde_json::to_string(&ns).unwrap();
        assert_eq!(
            json,
            r#"{"type":"negative_sampling","samples":10,"allow_collisions_with_target":true}"#
        );
        let parsed: LossType = serde_json::from_str(r#"{"type":"negative_sampling"}"#).unwrap();
        assert_eq!(parsed, LossType::negative_sampling(DEFAULT_SAMPLES));
        let softmax: LossType = serde_json::from_str(r#"{"type":"softmax"}"#).unwrap();
        assert_eq!(softmax, LossType::Softmax);
    }

    #[test]
    fn validate_rejects_zero_samples() {
        assert!(matches!(
            LossType::negative_sampling(0).validate(),
            Err(W2vError::Configuration(_))
        ));
        assert!(LossType::Softmax.validate().is_ok());
    }
}

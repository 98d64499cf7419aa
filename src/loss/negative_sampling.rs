use log::debug;

use crate::activation::{log_sigmoid, sigmoid};
use crate::data::Dataset;
use crate::error::{Result, W2vError};
use crate::loss::{check_inputs, CostGradient, LossGradient};
use crate::math::vector::{axpy, dot};
use crate::math::Matrix;

/// Number of negatives drawn per prediction unless configured otherwise.
pub const DEFAULT_SAMPLES: usize = 10;

/// Redraws allowed per negative before giving up on finding a non-target index.
const MAX_REDRAWS: usize = 1000;

/// Negative-sampling objective:
///   cost = -ln σ(u_t·v) - Σ_k ln σ(-u_k·v)
/// over `samples` indices drawn from the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeSamplingLoss {
    samples: usize,
    allow_collisions_with_target: bool,
}

impl NegativeSamplingLoss {
    /// Keeps the base policy: a negative may equal the target.
    pub fn new(samples: usize) -> Result<NegativeSamplingLoss> {
        NegativeSamplingLoss::with_policy(samples, true)
    }

    pub fn with_policy(
        samples: usize,
        allow_collisions_with_target: bool,
    ) -> Result<NegativeSamplingLoss> {
        if samples == 0 {
            return Err(W2vError::config("negative sampling needs at least one sample"));
        }
        Ok(NegativeSamplingLoss { samples, allow_collisions_with_target })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn allows_collisions_with_target(&self) -> bool {
        self.allow_collisions_with_target
    }

    /// Draws the negatives. Duplicates are kept; the target is only
    /// rejected when collisions are disallowed.
    fn draw_negatives(
        &self,
        target: usize,
        vocab: usize,
        dataset: &mut dyn Dataset,
    ) -> Result<Vec<usize>> {
        if !self.allow_collisions_with_target && vocab < 2 {
            return Err(W2vError::config(
                "cannot exclude the target from a single-word vocabulary",
            ));
        }

        let mut negatives = Vec::with_capacity(self.samples);
        let mut redraws = 0usize;
        while negatives.len() < self.samples {
            let k = dataset.sample_token_idx();
            if k >= vocab {
                return Err(W2vError::IndexOutOfRange { index: k, len: vocab });
            }
            if k == target && !self.allow_collisions_with_target {
                redraws += 1;
                if redraws > MAX_REDRAWS * self.samples {
                    return Err(W2vError::config(
                        "sampler kept returning the target index",
                    ));
                }
                continue;
            }
            negatives.push(k);
        }
        if redraws > 0 {
            debug!("negative sampling redrew the target {redraws} times");
        }
        Ok(negatives)
    }
}

impl Default for NegativeSamplingLoss {
    fn default() -> Self {
        NegativeSamplingLoss { samples: DEFAULT_SAMPLES, allow_collisions_with_target: true }
    }
}

impl CostGradient for NegativeSamplingLoss {
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output_vectors: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Result<LossGradient> {
        check_inputs(predicted, target, output_vectors)?;
        let negatives = self.draw_negatives(target, output_vectors.rows, dataset)?;

        let mut grad_pred = vec![0.0; predicted.len()];
        let mut grad_out = Matrix::zeros(output_vectors.rows, output_vectors.cols);

        // True context word: pull v towards u_t.
        let u_t = output_vectors.row(target);
        let score = dot(u_t, predicted);
        let mut cost = -log_sigmoid(score);
        let coeff = sigmoid(score) - 1.0;
        axpy(coeff, u_t, &mut grad_pred);
        grad_out.add_row_scaled(target, coeff, predicted);

        // Negatives: push v away from each u_k, counted with multiplicity.
        for &k in &negatives {
            let u_k = output_vectors.row(k);
            let score = dot(u_k, predicted);
            cost -= log_sigmoid(-score);
            let coeff = 1.0 - sigmoid(-score);
            axpy(coeff, u_k, &mut grad_pred);
            grad_out.add_row_scaled(k, coeff, predicted);
        }

        if !cost.is_finite() {
            return Err(W2vError::NumericInstability("negative-sampling cost"));
        }

        Ok(LossGradient { cost, grad_pred, grad_out })
    }
}

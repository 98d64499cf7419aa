pub mod softmax;
pub mod negative_sampling;
pub mod loss_type;

pub use softmax::SoftmaxLoss;
pub use negative_sampling::NegativeSamplingLoss;
pub use loss_type::LossType;

use crate::data::Dataset;
use crate::error::{Result, W2vError};
use crate::math::Matrix;

/// Cost of one (predicted vector, target) pair and its gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct LossGradient {
    pub cost: f64,
    /// ∂cost/∂predicted, length D.
    pub grad_pred: Vec<f64>,
    /// ∂cost/∂output_vectors, shape V×D.
    pub grad_out: Matrix,
}

/// A word2vec objective for a single prediction.
pub trait CostGradient {
    /// `predicted` has length D, `target` indexes a row of `output_vectors`
    /// (V×D). `dataset` supplies negative samples to strategies that need them.
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output_vectors: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Result<LossGradient>;
}

/// Shape and range checks shared by every strategy.
pub(crate) fn check_inputs(
    predicted: &[f64],
    target: usize,
    output_vectors: &Matrix,
) -> Result<()> {
    if predicted.len() != output_vectors.cols {
        return Err(W2vError::Dimension {
            what: "predicted vector",
            got: predicted.len(),
            expected: output_vectors.cols,
        });
    }
    if target >= output_vectors.rows {
        return Err(W2vError::IndexOutOfRange { index: target, len: output_vectors.rows });
    }
    Ok(())
}

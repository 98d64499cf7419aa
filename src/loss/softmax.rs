use crate::activation::softmax;
use crate::data::Dataset;
use crate::error::{Result, W2vError};
use crate::loss::{check_inputs, CostGradient, LossGradient};
use crate::math::Matrix;

/// Full-vocabulary softmax with cross-entropy loss.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxLoss;

impl SoftmaxLoss {
    /// Computes the cost and gradients:
    ///   p         = softmax(U·v)
    ///   cost      = -ln p[t]
    ///   δ         = p - onehot(t)
    ///   grad_pred = δ·U
    ///   grad_out  = δ ⊗ v
    pub fn compute(
        predicted: &[f64],
        target: usize,
        output_vectors: &Matrix,
    ) -> Result<LossGradient> {
        check_inputs(predicted, target, output_vectors)?;

        let logits = output_vectors.mat_vec(predicted);
        let probabilities = softmax(&logits);
        // -ln p[t] through log-sum-exp, so an underflowed p[t] cannot give inf.
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + logits.iter().map(|&z| (z - max).exp()).sum::<f64>().ln();
        let cost = log_norm - logits[target];
        if !cost.is_finite() {
            return Err(W2vError::NumericInstability("softmax cost"));
        }

        // δ is its own buffer; `probabilities` stays untouched.
        let mut delta = probabilities.clone();
        delta[target] -= 1.0;

        Ok(LossGradient {
            cost,
            grad_pred: output_vectors.vec_mat(&delta),
            grad_out: Matrix::outer(&delta, predicted),
        })
    }
}

impl CostGradient for SoftmaxLoss {
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output_vectors: &Matrix,
        _dataset: &mut dyn Dataset,
    ) -> Result<LossGradient> {
        SoftmaxLoss::compute(predicted, target, output_vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_vectors() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]]).unwrap()
    }

    #[test]
    fn cost_matches_hand_calculation() {
        let v = [0.5, -0.5];
        let out = SoftmaxLoss::compute(&v, 1, &output_vectors()).unwrap();
        // logits: [0.5, -0.5, -0.5]
        let z = 0.5f64.exp() + 2.0 * (-0.5f64).exp();
        let expected = -((-0.5f64).exp() / z).ln();
        assert!((out.cost - expected).abs() < 1e-12);
    }

    #[test]
    fn delta_rows_sum_to_zero() {
        let v = [0.3, 0.9];
        let out = SoftmaxLoss::compute(&v, 2, &output_vectors()).unwrap();
        // Each column of grad_out is δ scaled by v[j], and Σδ = 0.
        for s in out.grad_out.sum_rows() {
            assert!(s.abs() < 1e-12);
        }
        assert_eq!(out.grad_out.shape(), (3, 2));
        assert_eq!(out.grad_pred.len(), 2);
    }

    #[test]
    fn rejects_bad_shapes() {
        let u = output_vectors();
        assert!(matches!(
            SoftmaxLoss::compute(&[1.0, 2.0, 3.0], 0, &u),
            Err(W2vError::Dimension { got: 3, expected: 2, .. })
        ));
        assert!(matches!(
            SoftmaxLoss::compute(&[1.0, 2.0], 3, &u),
            Err(W2vError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn infinite_input_is_reported_as_instability() {
        assert!(matches!(
            SoftmaxLoss::compute(&[f64::INFINITY, 0.0], 0, &output_vectors()),
            Err(W2vError::NumericInstability("softmax cost"))
        ));
    }
}

use log::debug;
use rand::Rng;

use crate::data::{Dataset, TokenIndex};
use crate::error::{Result, W2vError};
use crate::math::Matrix;
use crate::train::estimator_config::EstimatorConfig;

/// Minibatch estimate of the word2vec cost and its gradient.
///
/// The parameter matrix stacks the input vectors (first half of the rows) on
/// top of the output vectors (second half). `estimate` returns the batch-mean
/// cost and a gradient of the same shape, which is the signature
/// `GradientChecker::check` consumes.
#[derive(Debug, Clone)]
pub struct SgdEstimator {
    config: EstimatorConfig,
}

impl SgdEstimator {
    pub fn new(config: EstimatorConfig) -> Result<SgdEstimator> {
        config.validate()?;
        Ok(SgdEstimator { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Like `estimate`, with window sizes drawn from `config().rng()`.
    ///
    /// With `seed` set, repeated calls over equally seeded datasets return
    /// identical results.
    pub fn estimate_seeded(
        &self,
        tokens: &TokenIndex,
        word_vectors: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Result<(f64, Matrix)> {
        let mut rng = self.config.rng();
        self.estimate(tokens, word_vectors, dataset, &mut rng)
    }

    /// Draws `batch_size` contexts and averages the model's cost and gradients.
    ///
    /// Each draw picks a window `C1` uniformly from `[1, context_size]` using
    /// `rng`, then asks `dataset` for a context of that window. The config's
    /// `seed` is not consulted here; see `estimate_seeded`. Row-count errors
    /// are raised before anything is sampled.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        tokens: &TokenIndex,
        word_vectors: &Matrix,
        dataset: &mut dyn Dataset,
        rng: &mut R,
    ) -> Result<(f64, Matrix)> {
        let n = word_vectors.rows;
        if n == 0 || n % 2 != 0 {
            return Err(W2vError::config(format!(
                "word vector matrix needs an even, nonzero row count, got {n}"
            )));
        }

        let half = n / 2;
        let (input_vectors, output_vectors) = word_vectors.split_rows(half);
        let EstimatorConfig { model, loss, batch_size, context_size, .. } = &self.config;
        let scale = 1.0 / *batch_size as f64;

        let mut cost = 0.0;
        let mut grad = Matrix::zeros(n, word_vectors.cols);

        for _ in 0..*batch_size {
            let c1 = rng.gen_range(1..=*context_size);
            let context = dataset.get_random_context(c1);
            let step =
                model.run(&context, c1, tokens, &input_vectors, &output_vectors, dataset, loss)?;

            cost += step.cost * scale;
            grad.add_block_scaled(0, scale, &step.grad_in);
            grad.add_block_scaled(half, scale, &step.grad_out);
        }

        debug!(
            "{} / {} estimate over {} contexts: cost={cost:.6}",
            model.name(),
            loss.name(),
            batch_size
        );

        Ok((cost, grad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Context, UniformDataset};
    use crate::loss::LossType;
    use crate::model::ContextModel;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Counts every call so tests can prove nothing was sampled.
    struct Counting {
        calls: usize,
    }

    impl Dataset for Counting {
        fn sample_token_idx(&mut self) -> usize {
            self.calls += 1;
            0
        }

        fn get_random_context(&mut self, _c: usize) -> Context {
            self.calls += 1;
            Context::new("a", ["a"])
        }
    }

    #[test]
    fn odd_row_count_fails_before_sampling() {
        let tokens = TokenIndex::from_words(["a"]).unwrap();
        let estimator = SgdEstimator::new(EstimatorConfig::default()).unwrap();
        let mut ds = Counting { calls: 0 };
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = estimator.estimate(&tokens, &Matrix::zeros(3, 2), &mut ds, &mut rng).unwrap_err();
        assert!(matches!(err, W2vError::Configuration(_)));
        assert_eq!(ds.calls, 0);
    }

    #[test]
    fn empty_matrix_fails_before_sampling() {
        let tokens = TokenIndex::from_words(["a"]).unwrap();
        let estimator = SgdEstimator::new(EstimatorConfig::default()).unwrap();
        let mut ds = Counting { calls: 0 };
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = estimator.estimate(&tokens, &Matrix::zeros(0, 3), &mut ds, &mut rng).unwrap_err();
        assert!(matches!(err, W2vError::Configuration(_)));
        assert_eq!(ds.calls, 0);
    }

    #[test]
    fn gradient_has_the_parameter_shape() {
        let words = ["a", "b", "c", "d", "e"];
        let tokens = TokenIndex::from_words(words).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let vectors = Matrix::random_normal(10, 3, &mut rng);

        for model in [ContextModel::SkipGram, ContextModel::Cbow] {
            let mut config = EstimatorConfig::new(model, LossType::Softmax);
            config.batch_size = 8;
            let estimator = SgdEstimator::new(config).unwrap();
            let mut ds = UniformDataset::new(words, 1).unwrap();
            let (cost, grad) = estimator.estimate(&tokens, &vectors, &mut ds, &mut rng).unwrap();
            assert_eq!(grad.shape(), vectors.shape());
            assert!(cost >= 0.0);
        }
    }

    #[test]
    fn seeded_estimate_uses_the_config_seed() {
        let words = ["a", "b", "c", "d", "e"];
        let tokens = TokenIndex::from_words(words).unwrap();
        let vectors = Matrix::random_normal(10, 3, &mut ChaCha8Rng::seed_from_u64(4));
        let mut config = EstimatorConfig::new(ContextModel::Cbow, LossType::negative_sampling(3));
        config.seed = Some(77);
        config.batch_size = 6;
        let estimator = SgdEstimator::new(config).unwrap();

        let mut ds = UniformDataset::new(words, 2).unwrap();
        let seeded = estimator.estimate_seeded(&tokens, &vectors, &mut ds).unwrap();

        let mut ds = UniformDataset::new(words, 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let manual = estimator.estimate(&tokens, &vectors, &mut ds, &mut rng).unwrap();
        assert_eq!(seeded, manual);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = EstimatorConfig::default();
        config.batch_size = 0;
        assert!(matches!(SgdEstimator::new(config), Err(W2vError::Configuration(_))));
    }
}

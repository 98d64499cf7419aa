pub mod error;
pub mod math;
pub mod activation;
pub mod data;
pub mod loss;
pub mod model;
pub mod train;

// Convenience re-exports
pub use error::{Result, W2vError};
pub use math::matrix::Matrix;
pub use data::{Context, CorpusDataset, Dataset, TokenIndex, UniformDataset};
pub use loss::{CostGradient, LossGradient, LossType, NegativeSamplingLoss, SoftmaxLoss};
pub use model::{cbow, skipgram, ContextModel, ModelGradient};
pub use train::{EstimatorConfig, GradCheckReport, GradientChecker, SgdEstimator};

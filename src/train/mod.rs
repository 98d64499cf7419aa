pub mod estimator;
pub mod estimator_config;
pub mod gradcheck;

pub use estimator::SgdEstimator;
pub use estimator_config::EstimatorConfig;
pub use gradcheck::{GradCheckReport, GradientChecker};

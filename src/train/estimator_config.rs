use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Result, W2vError};
use crate::loss::LossType;
use crate::model::ContextModel;

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_CONTEXT_SIZE: usize = 5;

/// Configuration for an `SgdEstimator`.
///
/// # Fields
/// - `model`       : skip-gram or CBOW
/// - `loss`        : softmax or negative sampling (with its sample count)
/// - `batch_size`  : contexts averaged per estimate
/// - `context_size`: maximum window C; each draw uses a window in [1, C]
/// - `seed`        : seed for the window-size draws made by
///   `SgdEstimator::estimate_seeded`; `None` uses entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub model: ContextModel,
    pub loss: LossType,
    pub batch_size: usize,
    pub context_size: usize,
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            model: ContextModel::default(),
            loss: LossType::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            context_size: DEFAULT_CONTEXT_SIZE,
            seed: None,
        }
    }
}

impl EstimatorConfig {
    pub fn new(model: ContextModel, loss: LossType) -> Self {
        EstimatorConfig { model, loss, ..EstimatorConfig::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(W2vError::config("batch_size must be at least 1"));
        }
        if self.context_size == 0 {
            return Err(W2vError::config("context_size must be at least 1"));
        }
        self.loss.validate()
    }

    /// A window-size RNG seeded from `seed`, or from entropy when unset.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<EstimatorConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: EstimatorConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

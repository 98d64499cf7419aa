use serde::{Serialize, Deserialize};

use crate::data::{Context, Dataset, TokenIndex};
use crate::error::Result;
use crate::loss::CostGradient;
use crate::math::Matrix;
use crate::model::{cbow, skipgram, ModelGradient};

/// Selects the context-prediction model.
///
/// - `SkipGram`: center word predicts each context word.
/// - `Cbow`    : mean of the context predicts the center word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextModel {
    #[default]
    SkipGram,
    Cbow,
}

impl ContextModel {
    pub fn run(
        &self,
        context: &Context,
        context_size: usize,
        tokens: &TokenIndex,
        input_vectors: &Matrix,
        output_vectors: &Matrix,
        dataset: &mut dyn Dataset,
        loss: &dyn CostGradient,
    ) -> Result<ModelGradient> {
        let model = match self {
            ContextModel::SkipGram => skipgram,
            ContextModel::Cbow => cbow,
        };
        model(context, context_size, tokens, input_vectors, output_vectors, dataset, loss)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContextModel::SkipGram => "skip-gram",
            ContextModel::Cbow => "CBOW",
        }
    }
}

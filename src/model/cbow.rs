use log::trace;

use crate::data::{Context, Dataset, TokenIndex};
use crate::error::{Result, W2vError};
use crate::loss::CostGradient;
use crate::math::vector::mean;
use crate::math::Matrix;
use crate::model::{check_halves, row_of, ModelGradient};

/// Continuous bag-of-words: predicts the center word from the mean of the
/// context words' input vectors.
///
/// The strategy runs once. Its `grad_pred` is split equally over the context
/// rows, repeated words receiving one share per occurrence, which is exactly
/// the derivative through the mean.
pub fn cbow(
    context: &Context,
    context_size: usize,
    tokens: &TokenIndex,
    input_vectors: &Matrix,
    output_vectors: &Matrix,
    dataset: &mut dyn Dataset,
    loss: &dyn CostGradient,
) -> Result<ModelGradient> {
    check_halves(input_vectors, output_vectors)?;
    let target = row_of(tokens, &context.center, output_vectors.rows)?;
    let sources = context
        .words
        .iter()
        .map(|w| row_of(tokens, w, input_vectors.rows))
        .collect::<Result<Vec<_>>>()?;

    let predicted = mean(sources.iter().map(|&i| input_vectors.row(i)), input_vectors.cols)
        .ok_or_else(|| W2vError::config("CBOW needs at least one context word"))?;

    trace!(
        "cbow center={} window={} sources={}",
        context.center,
        context_size,
        sources.len()
    );

    let step = loss.cost_and_gradient(&predicted, target, output_vectors, dataset)?;

    let mut out = ModelGradient::zeros(input_vectors, output_vectors);
    out.cost = step.cost;
    let share = 1.0 / sources.len() as f64;
    for &i in &sources {
        out.grad_in.add_row_scaled(i, share, &step.grad_pred);
    }
    out.grad_out = step.grad_out;

    Ok(out)
}

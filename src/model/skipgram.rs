use log::trace;

use crate::data::{Context, Dataset, TokenIndex};
use crate::error::Result;
use crate::loss::CostGradient;
use crate::math::Matrix;
use crate::model::{check_halves, row_of, ModelGradient};

/// Skip-gram: predicts every context word from the center word's input vector.
///
/// `context_size` is the window the context was drawn with; it does not change
/// the computation. Only the center row of `grad_in` is ever nonzero.
pub fn skipgram(
    context: &Context,
    context_size: usize,
    tokens: &TokenIndex,
    input_vectors: &Matrix,
    output_vectors: &Matrix,
    dataset: &mut dyn Dataset,
    loss: &dyn CostGradient,
) -> Result<ModelGradient> {
    check_halves(input_vectors, output_vectors)?;
    let center = row_of(tokens, &context.center, input_vectors.rows)?;
    let targets = context
        .words
        .iter()
        .map(|w| row_of(tokens, w, output_vectors.rows))
        .collect::<Result<Vec<_>>>()?;

    trace!(
        "skipgram center={} window={} targets={}",
        context.center,
        context_size,
        targets.len()
    );

    let predicted = input_vectors.row(center);
    let mut out = ModelGradient::zeros(input_vectors, output_vectors);

    for target in targets {
        let step = loss.cost_and_gradient(predicted, target, output_vectors, dataset)?;
        out.cost += step.cost;
        out.grad_in.add_row_scaled(center, 1.0, &step.grad_pred);
        out.grad_out += &step.grad_out;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UniformDataset;
    use crate::error::W2vError;
    use crate::loss::{LossType, SoftmaxLoss};

    fn setup() -> (TokenIndex, Matrix, Matrix) {
        let tokens = TokenIndex::from_words(["a", "b", "c"]).unwrap();
        let input =
            Matrix::from_rows(vec![vec![0.1, 0.2], vec![0.3, -0.1], vec![-0.2, 0.4]]).unwrap();
        let output =
            Matrix::from_rows(vec![vec![0.5, 0.0], vec![0.0, 0.5], vec![0.2, 0.2]]).unwrap();
        (tokens, input, output)
    }

    #[test]
    fn cost_is_sum_over_context_words() {
        let (tokens, input, output) = setup();
        let mut ds = UniformDataset::new(["a", "b", "c"], 1).unwrap();
        let ctx = Context::new("b", ["a", "c", "a"]);
        let out = skipgram(&ctx, 2, &tokens, &input, &output, &mut ds, &SoftmaxLoss).unwrap();

        let v = input.row(1);
        let expected: f64 = [0, 2, 0]
            .iter()
            .map(|&t| SoftmaxLoss::compute(v, t, &output).unwrap().cost)
            .sum();
        assert!((out.cost - expected).abs() < 1e-12);
        assert_eq!(out.grad_in.nonzero_rows(), vec![1]);
    }

    #[test]
    fn empty_context_costs_nothing() {
        let (tokens, input, output) = setup();
        let mut ds = UniformDataset::new(["a"], 1).unwrap();
        let ctx = Context::new("a", Vec::<String>::new());
        let out = skipgram(&ctx, 1, &tokens, &input, &output, &mut ds, &LossType::Softmax).unwrap();
        assert_eq!(out.cost, 0.0);
        assert!(out.grad_in.nonzero_rows().is_empty());
        assert!(out.grad_out.nonzero_rows().is_empty());
    }

    #[test]
    fn unknown_words_propagate() {
        let (tokens, input, output) = setup();
        let mut ds = UniformDataset::new(["a"], 1).unwrap();

        let ctx = Context::new("q", ["a"]);
        let err = skipgram(&ctx, 1, &tokens, &input, &output, &mut ds, &SoftmaxLoss).unwrap_err();
        assert!(matches!(err, W2vError::UnknownWord(w) if w == "q"));

        let ctx = Context::new("a", ["a", "nope"]);
        let err = skipgram(&ctx, 1, &tokens, &input, &output, &mut ds, &SoftmaxLoss).unwrap_err();
        assert!(matches!(err, W2vError::UnknownWord(w) if w == "nope"));
    }

    #[test]
    fn mismatched_halves_are_rejected() {
        let (tokens, input, _) = setup();
        let output = Matrix::zeros(3, 3);
        let mut ds = UniformDataset::new(["a"], 1).unwrap();
        let ctx = Context::new("a", ["b"]);
        assert!(matches!(
            skipgram(&ctx, 1, &tokens, &input, &output, &mut ds, &SoftmaxLoss),
            Err(W2vError::Dimension { .. })
        ));
    }
}

pub mod skipgram;
pub mod cbow;
pub mod context_model;

pub use skipgram::skipgram;
pub use cbow::cbow;
pub use context_model::ContextModel;

use crate::data::TokenIndex;
use crate::error::{Result, W2vError};
use crate::math::Matrix;

/// Total cost of one context window and the gradients w.r.t. both halves of
/// the word vectors. Both matrices are fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelGradient {
    pub cost: f64,
    /// Same shape as `input_vectors`.
    pub grad_in: Matrix,
    /// Same shape as `output_vectors`.
    pub grad_out: Matrix,
}

impl ModelGradient {
    fn zeros(input_vectors: &Matrix, output_vectors: &Matrix) -> ModelGradient {
        ModelGradient {
            cost: 0.0,
            grad_in: Matrix::zeros(input_vectors.rows, input_vectors.cols),
            grad_out: Matrix::zeros(output_vectors.rows, output_vectors.cols),
        }
    }
}

fn check_halves(input_vectors: &Matrix, output_vectors: &Matrix) -> Result<()> {
    if input_vectors.cols != output_vectors.cols {
        return Err(W2vError::Dimension {
            what: "output vector width",
            got: output_vectors.cols,
            expected: input_vectors.cols,
        });
    }
    Ok(())
}

/// Looks up `word` and checks that its row exists in a matrix with `rows` rows.
fn row_of(tokens: &TokenIndex, word: &str, rows: usize) -> Result<usize> {
    let index = tokens.index_of(word)?;
    if index >= rows {
        return Err(W2vError::IndexOutOfRange { index, len: rows });
    }
    Ok(index)
}

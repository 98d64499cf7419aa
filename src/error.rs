//! Error types for word2vec cost and gradient computation.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Error, Debug)]
pub enum W2vError {
    /// A vector or matrix does not have the shape an operation requires.
    #[error("dimension mismatch for {what}: got {got}, expected {expected}")]
    Dimension {
        /// What was being checked (e.g. "predicted vector").
        what: &'static str,
        /// Observed size.
        got: usize,
        /// Required size.
        expected: usize,
    },

    /// A token index falls outside the vocabulary.
    #[error("token index {index} out of range for vocabulary of size {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of rows / tokens available.
        len: usize,
    },

    /// A word is absent from the token index.
    #[error("word not found in token index: {0}")]
    UnknownWord(String),

    /// An invalid parameter (sample count, batch size, odd row count, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A non-finite value escaped the numeric guards.
    #[error("non-finite value produced by {0}")]
    NumericInstability(&'static str),

    /// Analytic and numeric gradients disagree.
    #[error(
        "gradient check failed for {component} at ({row}, {col}): analytic {analytic:.6e}, \
         numeric {numeric:.6e}, max discrepancy {max_discrepancy:.3e}"
    )]
    GradientMismatch {
        /// Component under test (strategy, model or estimator).
        component: String,
        /// Row of the worst entry.
        row: usize,
        /// Column of the worst entry.
        col: usize,
        /// Analytic gradient at the worst entry.
        analytic: f64,
        /// Finite-difference gradient at the worst entry.
        numeric: f64,
        /// Largest relative discrepancy over all entries.
        max_discrepancy: f64,
    },

    /// I/O error while reading or writing a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, W2vError>;

impl W2vError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        W2vError::Configuration(msg.into())
    }
}

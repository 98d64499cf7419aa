use log::{info, warn};

use crate::error::{Result, W2vError};
use crate::math::Matrix;

pub const DEFAULT_STEP: f64 = 1e-4;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Outcome of a passing gradient check.
#[derive(Debug, Clone, PartialEq)]
pub struct GradCheckReport {
    pub component: String,
    /// Number of scalar entries perturbed.
    pub entries: usize,
    /// Largest relative discrepancy seen.
    pub max_discrepancy: f64,
}

/// Central-difference gradient checker.
///
/// The discrepancy of an entry is `|numeric - analytic| / max(1, |numeric|, |analytic|)`.
#[derive(Debug, Clone, Copy)]
pub struct GradientChecker {
    pub step: f64,
    pub tolerance: f64,
}

impl Default for GradientChecker {
    fn default() -> Self {
        GradientChecker { step: DEFAULT_STEP, tolerance: DEFAULT_TOLERANCE }
    }
}

impl GradientChecker {
    pub fn new(step: f64, tolerance: f64) -> Self {
        GradientChecker { step, tolerance }
    }

    /// Compares the gradient returned by `f` at `x` against finite differences.
    ///
    /// `f` must be deterministic; callers that sample rebuild their seeded
    /// sources inside `f`. Every entry is checked before reporting, so a
    /// failure names the worst entry.
    pub fn check<F>(&self, component: &str, mut f: F, x: &Matrix) -> Result<GradCheckReport>
    where
        F: FnMut(&Matrix) -> Result<(f64, Matrix)>,
    {
        let (_, analytic) = f(x)?;
        if analytic.shape() != x.shape() {
            let (got, expected) = if analytic.rows != x.rows {
                (analytic.rows, x.rows)
            } else {
                (analytic.cols, x.cols)
            };
            return Err(W2vError::Dimension { what: "gradient", got, expected });
        }

        let mut probe = x.clone();
        let mut worst = (0usize, 0usize, 0.0f64, 0.0f64);
        let mut max_discrepancy = 0.0f64;

        for i in 0..x.rows {
            for j in 0..x.cols {
                let original = probe.data[i][j];

                probe.data[i][j] = original + self.step;
                let (plus, _) = f(&probe)?;
                probe.data[i][j] = original - self.step;
                let (minus, _) = f(&probe)?;
                probe.data[i][j] = original;

                let numeric = (plus - minus) / (2.0 * self.step);
                let exact = analytic.data[i][j];
                let scale = 1f64.max(numeric.abs()).max(exact.abs());
                let discrepancy = (numeric - exact).abs() / scale;

                if discrepancy > max_discrepancy || discrepancy.is_nan() {
                    max_discrepancy = discrepancy;
                    worst = (i, j, exact, numeric);
                }
            }
        }

        if max_discrepancy > self.tolerance || max_discrepancy.is_nan() {
            let (row, col, analytic, numeric) = worst;
            warn!(
                "gradient check failed for {component}: \
                 max discrepancy {max_discrepancy:.3e} at ({row}, {col})"
            );
            return Err(W2vError::GradientMismatch {
                component: component.to_string(),
                row,
                col,
                analytic,
                numeric,
                max_discrepancy,
            });
        }

        info!("gradient check passed for {component} (max discrepancy {max_discrepancy:.3e})");
        Ok(GradCheckReport {
            component: component.to_string(),
            entries: x.rows * x.cols,
            max_discrepancy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(x: &Matrix) -> Result<(f64, Matrix)> {
        let cost = x.data.iter().flatten().map(|v| v * v).sum();
        Ok((cost, x.map(|v| 2.0 * v)))
    }

    #[test]
    fn passes_on_a_correct_gradient() {
        let x = Matrix::from_rows(vec![vec![1.0, -2.0], vec![0.5, 3.0]]).unwrap();
        let report = GradientChecker::default().check("quadratic", quadratic, &x).unwrap();
        assert_eq!(report.entries, 4);
        assert!(report.max_discrepancy < 1e-8);
    }

    #[test]
    fn names_component_and_worst_entry_on_failure() {
        let x = Matrix::from_rows(vec![vec![1.0, -2.0], vec![0.5, 3.0]]).unwrap();
        let wrong = |x: &Matrix| -> Result<(f64, Matrix)> {
            let (cost, mut grad) = quadratic(x)?;
            grad.data[1][0] += 0.5;
            Ok((cost, grad))
        };
        match GradientChecker::default().check("broken", wrong, &x) {
            Err(W2vError::GradientMismatch { component, row, col, max_discrepancy, .. }) => {
                assert_eq!(component, "broken");
                assert_eq!((row, col), (1, 0));
                // analytic 1.5 against numeric 1.0
                assert!((max_discrepancy - 0.5 / 1.5).abs() < 1e-6);
            }
            other => panic!("expected GradientMismatch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_misshapen_gradient() {
        let x = Matrix::zeros(2, 2);
        let f = |_: &Matrix| -> Result<(f64, Matrix)> { Ok((0.0, Matrix::zeros(3, 2))) };
        assert!(matches!(
            GradientChecker::default().check("shape", f, &x),
            Err(W2vError::Dimension { got: 3, expected: 2, .. })
        ));
    }
}

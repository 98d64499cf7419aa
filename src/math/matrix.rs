use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::AddAssign;

use crate::error::{Result, W2vError};
use crate::math::vector::{axpy, dot};

/// Dense row-major matrix. Rows are word vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from row vectors. Every row must have the same length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = data.iter().find(|r| r.len() != cols) {
            return Err(W2vError::Dimension {
                what: "matrix row",
                got: bad.len(),
                expected: cols,
            });
        }
        Ok(Matrix { rows: data.len(), cols, data })
    }

    /// Samples every entry from N(0, 1).
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.sample(StandardNormal);
            }
        }
        res
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// `self[i] += alpha * x`
    pub fn add_row_scaled(&mut self, i: usize, alpha: f64, x: &[f64]) {
        axpy(alpha, x, &mut self.data[i]);
    }

    /// `U · v`: one dot product per row.
    pub fn mat_vec(&self, v: &[f64]) -> Vec<f64> {
        self.data.iter().map(|row| dot(row, v)).collect()
    }

    /// `w · U`: weighted sum of rows, length `cols`.
    pub fn vec_mat(&self, w: &[f64]) -> Vec<f64> {
        let mut res = vec![0.0; self.cols];
        for (row, &wi) in self.data.iter().zip(w.iter()) {
            axpy(wi, row, &mut res);
        }
        res
    }

    /// Outer product `a ⊗ b`, shape (a.len(), b.len()).
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter().map(|&ai| b.iter().map(|&bj| ai * bj).collect()).collect(),
        }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Scales every nonzero row to unit L2 norm. Zero rows are left as-is.
    pub fn normalize_rows(&mut self) {
        for row in &mut self.data {
            let norm = dot(row, row).sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|x| *x /= norm);
            }
        }
    }

    /// Returns rows `[0, at)` and `[at, rows)` as two owned matrices.
    pub fn split_rows(&self, at: usize) -> (Matrix, Matrix) {
        let at = at.min(self.rows);
        let top = Matrix { rows: at, cols: self.cols, data: self.data[..at].to_vec() };
        let bottom = Matrix {
            rows: self.rows - at,
            cols: self.cols,
            data: self.data[at..].to_vec(),
        };
        (top, bottom)
    }

    /// Adds `alpha * block` into the rows starting at `row_offset`.
    pub fn add_block_scaled(&mut self, row_offset: usize, alpha: f64, block: &Matrix) {
        if block.cols != self.cols || row_offset + block.rows > self.rows {
            panic!("Matrices are of incorrect sizes")
        }
        for (i, row) in block.data.iter().enumerate() {
            axpy(alpha, row, &mut self.data[row_offset + i]);
        }
    }

    /// Indices of rows that contain at least one nonzero entry.
    pub fn nonzero_rows(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|&x| x != 0.0))
            .map(|(i, _)| i)
            .collect()
    }

    /// Largest absolute elementwise difference. Shapes must match.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if self.rows != other.rows || self.cols != other.cols {
            panic!("Matrices are of incorrect sizes")
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .flat_map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()))
            .fold(0.0, f64::max)
    }

    pub fn sum_rows(&self) -> Vec<f64> {
        let mut res = vec![0.0; self.cols];
        for row in &self.data {
            axpy(1.0, row, &mut res);
        }
        res
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|x| format!("{x:>11.8}")).collect();
            let open = if i == 0 { "[[" } else { " [" };
            let close = if i + 1 == self.rows { "]]" } else { "]" };
            writeln!(f, "{open}{}{close}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }
        self.add_block_scaled(0, 1.0, rhs);
    }
}

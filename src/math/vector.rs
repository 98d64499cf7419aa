/// Inner product of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `y += alpha * x`
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    y.iter_mut().zip(x.iter()).for_each(|(yi, xi)| *yi += alpha * xi);
}

/// Elementwise mean of the given rows. Returns `None` when `rows` is empty.
pub fn mean<'a, I>(rows: I, dim: usize) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut acc = vec![0.0; dim];
    let mut n = 0usize;
    for row in rows {
        axpy(1.0, row, &mut acc);
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let inv = 1.0 / n as f64;
    acc.iter_mut().for_each(|x| *x *= inv);
    Some(acc)
}

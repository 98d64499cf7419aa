/// Numerically stable softmax: the max is subtracted before exponentiating,
/// so `softmax(x) == softmax(x + c)` and large logits never overflow.
pub fn softmax(x: &[f64]) -> Vec<f64> {
    let max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = x.iter().map(|&xi| (xi - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Logistic function. Each branch only exponentiates a non-positive value.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid given an already-computed sigmoid value `s`.
pub fn sigmoid_grad(s: f64) -> f64 {
    s * (1.0 - s)
}

/// `ln(sigmoid(x)) = -softplus(-x)`, finite for every finite `x`.
///
/// Computing `sigmoid(x).ln()` directly returns `-inf` once the sigmoid
/// rounds to 0, which happens for `x` below roughly -745.
pub fn log_sigmoid(x: f64) -> f64 {
    -((-x).max(0.0) + (-x.abs()).exp().ln_1p())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_is_shift_invariant() {
        let p = softmax(&[1.0, 2.0]);
        assert!((p[0] - 0.26894142).abs() < 1e-8);
        assert!((p[1] - 0.73105858).abs() < 1e-8);

        let shifted = softmax(&[1001.0, 1002.0]);
        assert!((shifted[0] - p[0]).abs() < 1e-12);
        assert!((shifted.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        let neg = softmax(&[-1001.0, -1002.0]);
        assert!((neg[0] - 0.73105858).abs() < 1e-8);
    }

    #[test]
    fn sigmoid_reference_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
        assert!((sigmoid(1.0) - 0.73105858).abs() < 1e-8);
        assert!((sigmoid(-1.0) - 0.26894142).abs() < 1e-8);
        assert!((sigmoid_grad(sigmoid(1.0)) - 0.19661193).abs() < 1e-8);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
    }

    #[test]
    fn log_sigmoid_is_finite_when_sigmoid_saturates() {
        assert!((log_sigmoid(1.0) - sigmoid(1.0).ln()).abs() < 1e-12);
        assert!((log_sigmoid(-3.0) - sigmoid(-3.0).ln()).abs() < 1e-12);
        let deep = log_sigmoid(-1000.0);
        assert!(deep.is_finite());
        assert!((deep + 1000.0).abs() < 1e-9);
        assert_eq!(log_sigmoid(1000.0), -0.0);
    }
}

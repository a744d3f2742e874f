/// Deterministic inputs of length `n` in a range where `exp(x²)` stays finite.
pub fn make_input(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.5 + 0.01 * (i % 100) as f64).collect()
}

/// Targets near `exp(x²)` so residuals stay moderate.
pub fn make_target(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| (xi * xi).exp() - 0.25).collect()
}

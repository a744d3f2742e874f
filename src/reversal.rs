//! Reversal-and-scale map `g(v)[i] = v[N-1-i]·(i+1)`.
//!
//! `g` is linear with an anti-diagonal Jacobian whose entries differ, so
//! `Jᵀ·p` and `J·p` disagree in general. That makes it the smallest example
//! where a VJP cannot stand in for a JVP.

use crate::error::{check_len, Result};
use crate::float::Float;
use crate::scalar::Scalar;

/// `g(v)[i] = v[N-1-i]·(i+1)`, generic so AD bindings can differentiate it.
pub fn reversal_scale<T: Scalar>(v: &[T]) -> Vec<T> {
    v.iter()
        .rev()
        .enumerate()
        .map(|(i, &vi)| vi * T::from_f(crate::Float::lit((i + 1) as f64)))
        .collect()
}

/// Dense Jacobian of `g` in `n` dimensions: `J[i][j] = ∂g_i/∂v_j`.
///
/// Nonzero only on the anti-diagonal, where `J[i][N-1-i] = i+1`.
pub fn reversal_jacobian<F: Float>(n: usize) -> Vec<Vec<F>> {
    (0..n)
        .map(|i| {
            let mut row = vec![F::zero(); n];
            row[n - 1 - i] = F::lit((i + 1) as f64);
            row
        })
        .collect()
}

/// `Jᵀ·p`: `out[j] = (N-j)·p[N-1-j]`.
///
/// `v` only fixes the dimension; the Jacobian of a linear map is constant.
pub fn vjp_g<F: Float>(v: &[F], p: &[F]) -> Result<Vec<F>> {
    let n = v.len();
    check_len("p", n, p.len())?;
    Ok((0..n)
        .map(|j| F::lit((n - j) as f64) * p[n - 1 - j])
        .collect())
}

/// `J·p`: `out[i] = (i+1)·p[N-1-i]`.
pub fn jvp_g<F: Float>(v: &[F], p: &[F]) -> Result<Vec<F>> {
    let n = v.len();
    check_len("p", n, p.len())?;
    Ok((0..n)
        .map(|i| F::lit((i + 1) as f64) * p[n - 1 - i])
        .collect())
}

/// Whether a square matrix equals its transpose within `tol`.
pub fn is_symmetric<F: Float>(m: &[Vec<F>], tol: F) -> bool {
    let n = m.len();
    if m.iter().any(|row| row.len() != n) {
        return false;
    }
    (0..n).all(|i| (0..i).all(|j| (m[i][j] - m[j][i]).abs() <= tol))
}

/// Dense matrix-vector product, used to cross-check the closed forms.
pub fn mat_vec<F: Float>(m: &[Vec<F>], p: &[F]) -> Result<Vec<F>> {
    m.iter()
        .map(|row| {
            check_len("p", row.len(), p.len())?;
            Ok(row
                .iter()
                .zip(p)
                .fold(F::zero(), |acc, (&a, &b)| acc + a * b))
        })
        .collect()
}

/// Transpose of a dense matrix with rows of length `cols`.
pub fn transpose<F: Float>(m: &[Vec<F>]) -> Vec<Vec<F>> {
    let cols = m.first().map_or(0, Vec::len);
    (0..cols)
        .map(|j| m.iter().map(|row| row[j]).collect())
        .collect()
}

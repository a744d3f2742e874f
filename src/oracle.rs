//! Closed-form reference values for `L(x) = Σ (exp(x_i²) - y_i)²`.
//!
//! The loss is staged as `f1 = x²`, `h = exp(f1)`, `L = Σ (h - y)²`. Both stage
//! Jacobians are diagonal, so they are applied as elementwise products and
//! never materialized. Every function here is pure and fails only on length
//! mismatch. Overflow in `exp` propagates as `+inf`.

use crate::error::{check_len, Result};
use crate::float::Float;

/// Intermediate values of the forward pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forward<F> {
    /// `x²` elementwise.
    pub f1: Vec<F>,
    /// `exp(f1)` elementwise.
    pub h: Vec<F>,
}

fn map<F: Float>(a: &[F], op: impl Fn(F) -> F + Send + Sync) -> Vec<F> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        a.par_iter().map(|&p| op(p)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        a.iter().map(|&p| op(p)).collect()
    }
}

fn zip_map<F: Float>(a: &[F], b: &[F], op: impl Fn(F, F) -> F + Send + Sync) -> Vec<F> {
    debug_assert_eq!(a.len(), b.len());
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        a.par_iter().zip(b.par_iter()).map(|(&p, &q)| op(p, q)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        a.iter().zip(b).map(|(&p, &q)| op(p, q)).collect()
    }
}

/// `f1 = x²` and `h = exp(f1)`.
pub fn forward<F: Float>(x: &[F]) -> Forward<F> {
    let f1 = map(x, |xi| xi * xi);
    let h = map(&f1, F::exp);
    Forward { f1, h }
}

/// `L = Σ (h_i - y_i)²`.
pub fn loss<F: Float>(h: &[F], y: &[F]) -> Result<F> {
    check_len("y", h.len(), y.len())?;
    Ok(zip_map(h, y, |hi, yi| (hi - yi) * (hi - yi))
        .into_iter()
        .fold(F::zero(), |acc, t| acc + t))
}

/// Loss evaluated straight from `x`.
pub fn loss_at<F: Float>(x: &[F], y: &[F]) -> Result<F> {
    check_len("y", x.len(), y.len())?;
    loss(&forward(x).h, y)
}

/// `∂L/∂h = 2(h - y)`.
pub fn grad_l_wrt_h<F: Float>(h: &[F], y: &[F]) -> Result<Vec<F>> {
    check_len("y", h.len(), y.len())?;
    let two = F::lit(2.0);
    Ok(zip_map(h, y, |hi, yi| two * (hi - yi)))
}

/// `diag(exp(x²))ᵀ · v`.
pub fn vjp_h_wrt_f1<F: Float>(x: &[F], v: &[F]) -> Result<Vec<F>> {
    check_len("v", x.len(), v.len())?;
    Ok(zip_map(x, v, |xi, vi| (xi * xi).exp() * vi))
}

/// `diag(2x)ᵀ · v`.
pub fn vjp_f1_wrt_x<F: Float>(x: &[F], v: &[F]) -> Result<Vec<F>> {
    check_len("v", x.len(), v.len())?;
    let two = F::lit(2.0);
    Ok(zip_map(x, v, |xi, vi| two * xi * vi))
}

/// `diag(exp(x²)) · v`. Equal to [`vjp_h_wrt_f1`] since the Jacobian is diagonal.
pub fn jvp_h_wrt_f1<F: Float>(x: &[F], v: &[F]) -> Result<Vec<F>> {
    check_len("v", x.len(), v.len())?;
    Ok(zip_map(x, v, |xi, vi| vi * (xi * xi).exp()))
}

/// `diag(2x) · v`. Equal to [`vjp_f1_wrt_x`] since the Jacobian is diagonal.
pub fn jvp_f1_wrt_x<F: Float>(x: &[F], v: &[F]) -> Result<Vec<F>> {
    check_len("v", x.len(), v.len())?;
    let two = F::lit(2.0);
    Ok(zip_map(x, v, |xi, vi| vi * two * xi))
}

/// `∂L/∂x` by backpropagating `∂L/∂h` through both stages.
pub fn grad_l_wrt_x<F: Float>(x: &[F], y: &[F]) -> Result<Vec<F>> {
    check_len("y", x.len(), y.len())?;
    let fwd = forward(x);
    let dl_dh = grad_l_wrt_h(&fwd.h, y)?;
    let dl_df1 = vjp_h_wrt_f1(x, &dl_dh)?;
    vjp_f1_wrt_x(x, &dl_df1)
}

/// `∂L/∂x = 4(h - y)·h·x`, the chain rule collapsed by hand.
pub fn grad_l_wrt_x_closed_form<F: Float>(x: &[F], y: &[F]) -> Result<Vec<F>> {
    check_len("y", x.len(), y.len())?;
    let four = F::lit(4.0);
    let h = forward(x).h;
    let hx = zip_map(&h, x, |hi, xi| hi * xi);
    Ok(zip_map(&zip_map(&h, y, |hi, yi| hi - yi), &hx, |r, p| four * r * p))
}

/// Hessian of `L` w.r.t. `h` is `2I`, so `H·v = 2v` for every `x`, `y`.
pub fn hvp_l_wrt_h<F: Float>(v: &[F]) -> Vec<F> {
    let two = F::lit(2.0);
    map(v, |vi| two * vi)
}

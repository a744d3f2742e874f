//! The seam between the oracle and an AD engine.
//!
//! Any engine exposing gradient, VJP, JVP and HVP over `f64` can implement
//! [`AdBinding`] and be validated by the [`Harness`](crate::harness::Harness).
//! [`TapeBinding`] is the in-crate engine built on [`crate::api`].

use crate::api;
use crate::error::Result;
use crate::models::{ScalarModel, VectorModel};

/// Derivative primitives an AD engine must provide to be validated.
pub trait AdBinding {
    /// Name used in reports and logs.
    fn name(&self) -> &str;

    /// `∇f(x)`.
    fn compute_gradient<M: ScalarModel>(&self, f: &M, x: &[f64]) -> Result<Vec<f64>>;

    /// `Jᵀ·w` for `f` at `x`.
    fn compute_vjp<M: VectorModel>(&self, f: &M, x: &[f64], w: &[f64]) -> Result<Vec<f64>>;

    /// `J·v` for `f` at `x`.
    fn compute_jvp<M: VectorModel>(&self, f: &M, x: &[f64], v: &[f64]) -> Result<Vec<f64>>;

    /// `H·v` for scalar `f` at `x`.
    fn compute_hvp<M: ScalarModel>(&self, f: &M, x: &[f64], v: &[f64]) -> Result<Vec<f64>>;
}

/// Reverse tape for gradients and VJPs, dual numbers for JVPs and HVPs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapeBinding;

impl AdBinding for TapeBinding {
    fn name(&self) -> &str {
        "tape"
    }

    fn compute_gradient<M: ScalarModel>(&self, f: &M, x: &[f64]) -> Result<Vec<f64>> {
        f.check_input(x.len())?;
        Ok(api::grad(|v| f.eval(v), x))
    }

    fn compute_vjp<M: VectorModel>(&self, f: &M, x: &[f64], w: &[f64]) -> Result<Vec<f64>> {
        f.check_input(x.len())?;
        let (_, grad) = api::vjp(|v| f.eval(v), x, w)?;
        Ok(grad)
    }

    fn compute_jvp<M: VectorModel>(&self, f: &M, x: &[f64], v: &[f64]) -> Result<Vec<f64>> {
        f.check_input(x.len())?;
        let (_, tangents) = api::jvp(|d| f.eval(d), x, v)?;
        Ok(tangents)
    }

    fn compute_hvp<M: ScalarModel>(&self, f: &M, x: &[f64], v: &[f64]) -> Result<Vec<f64>> {
        f.check_input(x.len())?;
        let (_, hv) = api::hvp(|d| f.eval(d), x, v)?;
        Ok(hv)
    }
}

//! The worked example's stages as AD-generic models.
//!
//! Each model is evaluated by an [`AdBinding`](crate::binding::AdBinding) at
//! whatever scalar type that binding differentiates with.

use crate::error::{check_len, Result};
use crate::reversal::reversal_scale;
use crate::scalar::Scalar;

/// A scalar-valued function `R^n → R`.
pub trait ScalarModel {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Reject inputs the model cannot evaluate.
    fn check_input(&self, _n: usize) -> Result<()> {
        Ok(())
    }

    /// Evaluate at `x` in whatever scalar type the binding differentiates with.
    fn eval<T: Scalar<Float = f64>>(&self, x: &[T]) -> T;
}

/// A vector-valued function `R^n → R^m`.
pub trait VectorModel {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Reject inputs the model cannot evaluate.
    fn check_input(&self, _n: usize) -> Result<()> {
        Ok(())
    }

    /// Evaluate at `x` in whatever scalar type the binding differentiates with.
    fn eval<T: Scalar<Float = f64>>(&self, x: &[T]) -> Vec<T>;
}

/// `f1 = x²` elementwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Square;

impl VectorModel for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn eval<T: Scalar<Float = f64>>(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&xi| xi * xi).collect()
    }
}

/// `h = exp(f1)` elementwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl VectorModel for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn eval<T: Scalar<Float = f64>>(&self, f1: &[T]) -> Vec<T> {
        f1.iter().map(|&v| v.exp()).collect()
    }
}

/// `h = exp(x²)`, both stages fused.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpSquare;

impl VectorModel for ExpSquare {
    fn name(&self) -> &'static str {
        "exp_square"
    }

    fn eval<T: Scalar<Float = f64>>(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&xi| xi.powi(2).exp()).collect()
    }
}

/// `L(h) = Σ (h - y)²` against a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaredError {
    pub y: Vec<f64>,
}

impl ScalarModel for SquaredError {
    fn name(&self) -> &'static str {
        "squared_error"
    }

    fn check_input(&self, n: usize) -> Result<()> {
        check_len("h", self.y.len(), n)
    }

    fn eval<T: Scalar<Float = f64>>(&self, h: &[T]) -> T {
        sum_sq_residual(h, &self.y)
    }
}

/// `L(x) = Σ (exp(x²) - y)²`, the full worked example.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpSquareLoss {
    pub y: Vec<f64>,
}

impl ScalarModel for ExpSquareLoss {
    fn name(&self) -> &'static str {
        "exp_square_loss"
    }

    fn check_input(&self, n: usize) -> Result<()> {
        check_len("x", self.y.len(), n)
    }

    fn eval<T: Scalar<Float = f64>>(&self, x: &[T]) -> T {
        sum_sq_residual(&ExpSquare.eval(x), &self.y)
    }
}

/// `g(v)[i] = v[N-1-i]·(i+1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalScale;

impl VectorModel for ReversalScale {
    fn name(&self) -> &'static str {
        "reversal_scale"
    }

    fn eval<T: Scalar<Float = f64>>(&self, v: &[T]) -> Vec<T> {
        reversal_scale(v)
    }
}

fn sum_sq_residual<T: Scalar<Float = f64>>(h: &[T], y: &[f64]) -> T {
    h.iter().zip(y).fold(T::from_f(0.0), |acc, (&hi, &yi)| {
        let r = hi - T::from_f(yi);
        acc + r * r
    })
}

//! The [`Scalar`] trait for writing AD-generic model code.
//!
//! A model written as `fn f<T: Scalar>(x: &[T]) -> T` evaluates with plain
//! `f64`, with `Dual<f64>` (forward mode), with `Dual<Dual<f64>>` (second
//! order) and with `Reverse<f64>` (reverse mode).

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use crate::dual::Dual;
use crate::float::Float;
use crate::reverse::Reverse;
use crate::tape::TapeThreadLocal;

/// Arithmetic shared by primitive floats and every AD number type.
///
/// Covers ring arithmetic, `exp` and integer powers, which is all the
/// models use.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// The underlying primitive float type.
    type Float: Float;

    /// Lift a plain float to this scalar (constant, zero derivative).
    fn from_f(val: Self::Float) -> Self;

    /// Extract the primal value.
    fn value(&self) -> Self::Float;

    /// Natural exponential.
    fn exp(self) -> Self;

    /// Integer power.
    fn powi(self, n: i32) -> Self;
}

macro_rules! impl_scalar_primitive {
    ($f:ty) => {
        impl Scalar for $f {
            type Float = $f;

            #[inline]
            fn from_f(val: $f) -> Self {
                val
            }

            #[inline]
            fn value(&self) -> $f {
                *self
            }

            #[inline]
            fn exp(self) -> Self {
                <$f>::exp(self)
            }

            #[inline]
            fn powi(self, n: i32) -> Self {
                <$f>::powi(self, n)
            }
        }
    };
}

impl_scalar_primitive!(f32);
impl_scalar_primitive!(f64);

impl<T: Scalar> Scalar for Dual<T> {
    type Float = T::Float;

    #[inline]
    fn from_f(val: T::Float) -> Self {
        Dual::constant(T::from_f(val))
    }

    #[inline]
    fn value(&self) -> T::Float {
        self.re.value()
    }

    #[inline]
    fn exp(self) -> Self {
        Dual::exp(self)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        Dual::powi(self, n)
    }
}

impl<F: Float + TapeThreadLocal> Scalar for Reverse<F> {
    type Float = F;

    #[inline]
    fn from_f(val: F) -> Self {
        Reverse::constant(val)
    }

    #[inline]
    fn value(&self) -> F {
        self.value
    }

    #[inline]
    fn exp(self) -> Self {
        Reverse::exp(self)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        Reverse::powi(self, n)
    }
}

use std::fmt::{self, Display};

use crate::scalar::Scalar;

/// Forward-mode dual number: a value paired with its tangent.
///
/// `Dual { re, eps }` represents `re + eps·ε` where `ε² = 0`. The component
/// type is any [`Scalar`], so `Dual<Dual<f64>>` carries two independent
/// tangent directions and their mixed second derivative in `eps.eps`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dual<T: Scalar> {
    /// Primal value.
    pub re: T,
    /// Tangent value.
    pub eps: T,
}

impl<T: Scalar> Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.re, self.eps)
    }
}

impl<T: Scalar> Dual<T> {
    /// Create a new dual number.
    #[inline]
    pub fn new(re: T, eps: T) -> Self {
        Dual { re, eps }
    }

    /// Create a constant (zero tangent).
    #[inline]
    pub fn constant(re: T) -> Self {
        Dual {
            re,
            eps: T::default(),
        }
    }

    /// Create a variable (unit tangent) for differentiation.
    #[inline]
    pub fn variable(re: T) -> Self {
        let one = T::from_f(num_traits::One::one());
        Dual { re, eps: one }
    }

    /// Given `f(self.re)` and `f'(self.re)`, produce the dual result.
    #[inline]
    fn chain(self, f_val: T, f_deriv: T) -> Self {
        Dual {
            re: f_val,
            eps: self.eps * f_deriv,
        }
    }

    /// `exp`, with tangent scaled by `exp(re)`.
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }

    /// Integer power; `powi(0)` is the constant one.
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Dual::constant(T::from_f(num_traits::One::one()));
        }
        let val = self.re.powi(n);
        let k = T::from_f(crate::Float::lit(f64::from(n)));
        self.chain(val, k * self.re.powi(n - 1))
    }
}

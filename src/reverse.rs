use std::fmt::{self, Display};

use crate::tape::{self, TapeThreadLocal, CONSTANT};
use crate::Float;

/// Reverse-mode AD variable.
///
/// A value and a tape slot. `Copy` because the tape lives in a thread-local,
/// not inside this struct.
#[derive(Clone, Copy, Debug)]
pub struct Reverse<F: Float> {
    pub(crate) value: F,
    pub(crate) index: u32,
}

impl<F: Float> Reverse<F> {
    /// Create a constant (not tracked on tape).
    #[inline]
    pub fn constant(value: F) -> Self {
        Reverse {
            value,
            index: CONSTANT,
        }
    }

    /// Wrap a tape slot. Used by the API layer and by tests driving a tape by hand.
    #[inline]
    pub fn from_tape(value: F, index: u32) -> Self {
        Reverse { value, index }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.index == CONSTANT
    }
}

impl<F: Float + TapeThreadLocal> Reverse<F> {
    #[inline]
    fn unary(self, value: F, multiplier: F) -> Self {
        if self.is_constant() {
            return Reverse::constant(value);
        }
        let index = tape::with_active_tape(|t| t.push_unary(self.index, multiplier));
        Reverse { value, index }
    }

    #[inline]
    pub fn exp(self) -> Self {
        let e = self.value.exp();
        self.unary(e, e)
    }

    #[inline]
    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Reverse::constant(F::one());
        }
        let deriv = F::lit(f64::from(n)) * self.value.powi(n - 1);
        self.unary(self.value.powi(n), deriv)
    }
}

impl<F: Float> Display for Reverse<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<F: Float> Default for Reverse<F> {
    fn default() -> Self {
        Reverse::constant(F::zero())
    }
}

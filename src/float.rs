use std::fmt::{Debug, Display};

use approx::RelativeEq;
use num_traits::{Float as NumFloat, FromPrimitive};

/// Marker trait for base floating-point types (`f32`, `f64`).
///
/// The oracle and the reverse-mode tape are generic over it. Only primitive
/// float types implement this; AD wrapper types do not.
pub trait Float:
    NumFloat
    + FromPrimitive
    + RelativeEq<Epsilon = Self>
    + Copy
    + Send
    + Sync
    + Default
    + Debug
    + Display
    + 'static
{
    /// Convert a literal, falling back to NaN for unrepresentable values.
    #[inline]
    fn lit(v: f64) -> Self {
        Self::from_f64(v).unwrap_or_else(Self::nan)
    }
}

impl Float for f32 {}
impl Float for f64 {}

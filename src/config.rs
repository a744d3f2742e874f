use crate::float::Float;

/// Acceptance band for comparing a binding's output against the oracle.
///
/// An element passes when its absolute error is within `abs` or its error
/// relative to the larger magnitude is within `rel`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance<F> {
    /// Absolute tolerance (default: 1e-4).
    pub abs: F,
    /// Relative tolerance (default: 1e-4).
    pub rel: F,
}

impl<F: Float> Tolerance<F> {
    pub fn new(abs: F, rel: F) -> Self {
        Tolerance { abs, rel }
    }

    /// Whether `actual` is acceptably close to `expected`.
    ///
    /// Matching infinities pass; NaN never does.
    pub fn accepts(&self, expected: F, actual: F) -> bool {
        approx::relative_eq!(expected, actual, epsilon = self.abs, max_relative = self.rel)
    }
}

impl Default for Tolerance<f64> {
    fn default() -> Self {
        Tolerance {
            abs: 1e-4,
            rel: 1e-4,
        }
    }
}

/// Parameters for a [`Harness`](crate::harness::Harness) run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HarnessConfig {
    /// Comparison tolerance (default: 1e-4 absolute or relative).
    pub tolerance: Tolerance<f64>,
    /// HVP direction; `None` uses `[1, 2, ..., N]` (default: `None`).
    pub hvp_direction: Option<Vec<f64>>,
    /// Stop at the first failing check with an error (default: false).
    pub fail_fast: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            tolerance: Tolerance::default(),
            hvp_direction: None,
            fail_fast: false,
        }
    }
}

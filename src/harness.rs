//! Differential testing of an [`AdBinding`] against the closed-form oracle.

use crate::binding::AdBinding;
use crate::config::{HarnessConfig, Tolerance};
use crate::error::{check_len, Error, Result};
use crate::models::{Exp, ExpSquare, ExpSquareLoss, ReversalScale, Square, SquaredError};
use crate::{oracle, reversal};

/// One validation input: a point `x` and a target `y` of equal length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Case {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Case {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_len("y", x.len(), y.len())?;
        Ok(Case { x, y })
    }

    /// The worked example: `x = [1, 2]` with targets near `exp(x²)`.
    pub fn reference() -> Self {
        Case {
            x: vec![1.0, 2.0],
            y: vec![9.48773584, 518.01282467],
        }
    }

    pub fn dim(&self) -> usize {
        self.x.len()
    }
}

/// Result of comparing one binding output with its oracle value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckOutcome {
    pub name: String,
    pub expected: Vec<f64>,
    pub actual: Vec<f64>,
    /// Largest `|actual - expected|`; infinite on length mismatch.
    pub max_abs_err: f64,
    /// Largest error relative to the larger magnitude.
    pub max_rel_err: f64,
    pub passed: bool,
}

impl CheckOutcome {
    pub fn compare(
        name: impl Into<String>,
        expected: Vec<f64>,
        actual: Vec<f64>,
        tol: &Tolerance<f64>,
    ) -> Self {
        let (mut max_abs_err, mut max_rel_err) = (0.0_f64, 0.0_f64);
        let mut passed = expected.len() == actual.len();
        if passed {
            for (&e, &a) in expected.iter().zip(&actual) {
                passed &= tol.accepts(e, a);
                if e == a {
                    continue;
                }
                let abs = (a - e).abs();
                let scale = a.abs().max(e.abs());
                let rel = if scale.is_infinite() {
                    f64::INFINITY
                } else if scale > 0.0 {
                    abs / scale
                } else {
                    abs
                };
                max_abs_err = nan_max(max_abs_err, abs);
                max_rel_err = nan_max(max_rel_err, rel);
            }
        } else {
            max_abs_err = f64::INFINITY;
            max_rel_err = f64::INFINITY;
        }
        CheckOutcome {
            name: name.into(),
            expected,
            actual,
            max_abs_err,
            max_rel_err,
            passed,
        }
    }

    fn to_error(&self) -> Error {
        Error::Mismatch {
            check: self.name.clone(),
            max_abs_err: self.max_abs_err,
            max_rel_err: self.max_rel_err,
        }
    }
}

/// All checks from one [`Harness::validate`] run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub binding: String,
    pub checks: Vec<CheckOutcome>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn get(&self, name: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// `Err(Mismatch)` naming the first failing check, if any.
    pub fn ensure(&self) -> Result<()> {
        match self.failures().next() {
            Some(c) => Err(c.to_error()),
            None => Ok(()),
        }
    }
}

/// Like `f64::max`, but NaN is sticky.
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

struct Run<'a> {
    binding: &'a str,
    config: &'a HarnessConfig,
    checks: Vec<CheckOutcome>,
}

impl Run<'_> {
    fn check(&mut self, name: &str, expected: Vec<f64>, actual: Result<Vec<f64>>) -> Result<()> {
        let actual = actual.map_err(|e| Error::Binding {
            binding: self.binding.to_string(),
            message: format!("{name}: {e}"),
        })?;
        let outcome = CheckOutcome::compare(name, expected, actual, &self.config.tolerance);
        if outcome.passed {
            tracing::debug!(
                binding = self.binding,
                check = name,
                max_abs_err = outcome.max_abs_err,
                max_rel_err = outcome.max_rel_err,
                "check passed"
            );
        } else {
            tracing::warn!(
                binding = self.binding,
                check = name,
                expected = ?outcome.expected,
                actual = ?outcome.actual,
                "check failed"
            );
            if self.config.fail_fast {
                return Err(outcome.to_error());
            }
        }
        self.checks.push(outcome);
        Ok(())
    }
}

/// Runs a binding over the worked example and the reversal map.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Harness { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Compare every binding primitive with its oracle value at `case`.
    ///
    /// Returns the full report; inspect it or call [`Report::ensure`]. With
    /// `fail_fast`, the first failing check is returned as `Err(Mismatch)`.
    pub fn validate<B: AdBinding>(&self, binding: &B, case: &Case) -> Result<Report> {
        let (x, y) = (&case.x[..], &case.y[..]);
        let n = case.dim();
        check_len("y", n, y.len())?;
        let direction = match &self.config.hvp_direction {
            Some(d) => d.clone(),
            None => (1..=n).map(|i| i as f64).collect(),
        };
        check_len("hvp_direction", n, direction.len())?;

        let fwd = oracle::forward(x);
        let dl_dh = oracle::grad_l_wrt_h(&fwd.h, y)?;
        let dl_df1 = oracle::vjp_h_wrt_f1(x, &dl_dh)?;
        let dl_dx = oracle::grad_l_wrt_x(x, y)?;
        let ones = vec![1.0; n];

        tracing::debug!(binding = binding.name(), n, "validating binding");
        let mut run = Run {
            binding: binding.name(),
            config: &self.config,
            checks: Vec::with_capacity(8),
        };

        run.check(
            "chain_rule",
            oracle::grad_l_wrt_x_closed_form(x, y)?,
            Ok(dl_dx.clone()),
        )?;
        run.check(
            "loss_gradient",
            dl_dx.clone(),
            binding.compute_gradient(&ExpSquareLoss { y: y.to_vec() }, x),
        )?;
        run.check(
            "vjp_exp_square",
            dl_dx.clone(),
            binding.compute_vjp(&ExpSquare, x, &dl_dh),
        )?;
        run.check(
            "vjp_exp",
            dl_df1.clone(),
            binding.compute_vjp(&Exp, &fwd.f1, &dl_dh),
        )?;
        run.check("vjp_square", dl_dx, binding.compute_vjp(&Square, x, &dl_df1))?;
        run.check(
            "hvp_squared_error",
            oracle::hvp_l_wrt_h(&direction),
            binding.compute_hvp(&SquaredError { y: y.to_vec() }, &fwd.h, &direction),
        )?;
        run.check(
            "vjp_reversal",
            reversal::vjp_g(x, &ones)?,
            binding.compute_vjp(&ReversalScale, x, &ones),
        )?;
        run.check(
            "jvp_reversal",
            reversal::jvp_g(x, &ones)?,
            binding.compute_jvp(&ReversalScale, x, &ones),
        )?;

        let report = Report {
            binding: binding.name().to_string(),
            checks: run.checks,
        };
        tracing::debug!(
            binding = binding.name(),
            checks = report.checks.len(),
            failed = report.failures().count(),
            "validation finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_fails_check() {
        let c = CheckOutcome::compare("x", vec![1.0], vec![1.0, 2.0], &Tolerance::default());
        assert!(!c.passed);
        assert_eq!(c.max_abs_err, f64::INFINITY);
    }

    #[test]
    fn exact_match_has_zero_error() {
        let inf = f64::INFINITY;
        let c = CheckOutcome::compare("x", vec![1.0, inf], vec![1.0, inf], &Tolerance::default());
        assert!(c.passed);
        assert_eq!(c.max_abs_err, 0.0);
        assert_eq!(c.max_rel_err, 0.0);
    }

    #[test]
    fn infinite_expected_reports_infinite_errors() {
        let c = CheckOutcome::compare("x", vec![f64::INFINITY], vec![1.0], &Tolerance::default());
        assert!(!c.passed);
        assert_eq!(c.max_abs_err, f64::INFINITY);
        assert_eq!(c.max_rel_err, f64::INFINITY);
    }

    #[test]
    fn nan_survives_later_finite_errors() {
        let c = CheckOutcome::compare(
            "x",
            vec![f64::NAN, 1.0],
            vec![1.0, 1.5],
            &Tolerance::default(),
        );
        assert!(!c.passed);
        assert!(c.max_abs_err.is_nan());
        assert!(c.max_rel_err.is_nan());
    }

    #[test]
    fn case_rejects_ragged_input() {
        assert!(Case::new(vec![1.0, 2.0], vec![1.0]).is_err());
    }
}

//! Error types for chainrule.

use thiserror::Error;

/// Result type alias using chainrule's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the oracle, the AD API and the validation harness.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two operands that must share a dimension do not.
    #[error("invalid input: {what} has length {found}, expected {expected}")]
    InvalidInput {
        /// Which operand was rejected.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A binding output disagreed with the oracle beyond tolerance.
    #[error("check '{check}' failed: max abs err {max_abs_err:e}, max rel err {max_rel_err:e}")]
    Mismatch {
        /// Name of the failing check.
        check: String,
        /// Largest absolute error over all elements.
        max_abs_err: f64,
        /// Largest relative error over all elements.
        max_rel_err: f64,
    },

    /// The binding itself failed to produce an output.
    #[error("binding '{binding}' failed: {message}")]
    Binding {
        /// Binding name.
        binding: String,
        /// Reason reported by the binding.
        message: String,
    },
}

/// Fail with [`Error::InvalidInput`] unless `found == expected`.
#[inline]
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::InvalidInput {
            what,
            expected,
            found,
        })
    }
}

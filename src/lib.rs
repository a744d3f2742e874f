//! Closed-form reference values for VJP, JVP and HVP, and a harness that
//! differential-tests AD engines against them.
//!
//! The worked example is `L(x) = Σ (exp(x_i²) - y_i)²`, staged as `f1 = x²`,
//! `h = exp(f1)`. [`oracle`] derives every first and second order quantity
//! by hand. [`reversal`] adds a linear map with an asymmetric Jacobian, where
//! VJP and JVP differ. [`harness::Harness`] compares any [`AdBinding`] with
//! both; [`TapeBinding`] is the bundled forward/reverse-mode engine.
//!
//! ```
//! use chainrule::{Case, Harness, TapeBinding};
//!
//! let report = Harness::default()
//!     .validate(&TapeBinding, &Case::reference())
//!     .unwrap();
//! assert!(report.passed());
//! ```

pub mod api;
pub mod binding;
pub mod config;
pub mod dual;
pub mod error;
pub mod float;
pub mod harness;
pub mod models;
pub mod oracle;
pub mod reversal;
pub mod reverse;
pub mod scalar;
pub mod tape;
mod traits;

pub use api::{grad, hvp, jacobian, jvp, vjp};
pub use binding::{AdBinding, TapeBinding};
pub use config::{HarnessConfig, Tolerance};
pub use dual::Dual;
pub use error::{Error, Result};
pub use float::Float;
pub use harness::{Case, CheckOutcome, Harness, Report};
pub use oracle::Forward;
pub use reverse::Reverse;
pub use scalar::Scalar;

/// Type alias for forward-mode dual numbers over `f64`.
pub type Dual64 = Dual<f64>;
/// Type alias for second-order (forward-over-forward) dual numbers over `f64`.
pub type HyperDual64 = Dual<Dual<f64>>;
/// Type alias for reverse-mode variables over `f64`.
pub type Reverse64 = Reverse<f64>;

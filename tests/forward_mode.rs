use approx::assert_relative_eq;
use chainrule::{Dual, Dual64, HyperDual64, Scalar};

/// Central finite difference: (f(x+h) - f(x-h)) / 2h
fn finite_diff(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-7;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

fn check_elemental(f_dual: impl Fn(Dual64) -> Dual64, f_f64: impl Fn(f64) -> f64, x: f64) {
    let d = f_dual(Dual::variable(x));
    assert_relative_eq!(d.re, f_f64(x), max_relative = 1e-12);
    assert_relative_eq!(d.eps, finite_diff(&f_f64, x), max_relative = 1e-6);
}

#[test]
fn product_rule() {
    // (3 + ε)(4 + ε) = 12 + 7ε
    let c = Dual::new(3.0, 1.0) * Dual::new(4.0, 1.0);
    assert_relative_eq!(c.re, 12.0);
    assert_relative_eq!(c.eps, 7.0);
}

#[test]
fn sub_and_neg() {
    let c = -(Dual::new(3.0, 2.0) - Dual::new(1.0, 5.0));
    assert_relative_eq!(c.re, -2.0);
    assert_relative_eq!(c.eps, 3.0);
}

#[test]
fn exp_elemental() {
    check_elemental(|x| x.exp(), f64::exp, 0.7);
}

#[test]
fn powi_elemental() {
    check_elemental(|x| x.powi(3), |x| x.powi(3), 1.3);
    check_elemental(|x| x.powi(-2), |x| x.powi(-2), 1.3);
}

#[test]
fn exp_of_square_chain_rule() {
    // d/dx exp(x²) = 2x·exp(x²)
    let d = Dual::variable(2.0_f64).powi(2).exp();
    assert_relative_eq!(d.re, 4.0_f64.exp(), max_relative = 1e-15);
    assert_relative_eq!(d.eps, 4.0 * 4.0_f64.exp(), max_relative = 1e-15);
}

#[test]
fn constant_has_zero_tangent() {
    let d = Dual::constant(2.0_f64) * Dual::variable(5.0);
    assert_relative_eq!(d.eps, 2.0);
    assert_eq!(Dual64::from_f(4.0).eps, 0.0);
    assert_eq!(Dual::new(4.0, 9.0).value(), 4.0);
}

// ── Forward-over-forward ──

#[test]
fn second_derivative_cubic() {
    // f(x) = x³, f''(2) = 12
    let x = HyperDual64::variable(Dual::variable(2.0));
    let y = x * x * x;
    assert_relative_eq!(y.re.re, 8.0, max_relative = 1e-12);
    assert_relative_eq!(y.re.eps, 12.0, max_relative = 1e-12);
    assert_relative_eq!(y.eps.eps, 12.0, max_relative = 1e-12);
}

#[test]
fn second_derivative_exp_square() {
    // f(x) = exp(x²), f''(x) = (2 + 4x²)·exp(x²)
    let x_val = 0.8_f64;
    let x = HyperDual64::variable(Dual::variable(x_val));
    let y = (x * x).exp();
    let e = (x_val * x_val).exp();
    assert_relative_eq!(y.re.re, e, max_relative = 1e-12);
    assert_relative_eq!(y.eps.re, 2.0 * x_val * e, max_relative = 1e-12);
    assert_relative_eq!(
        y.eps.eps,
        (2.0 + 4.0 * x_val * x_val) * e,
        max_relative = 1e-12
    );
}

#[test]
fn nested_value_reaches_primitive() {
    let x = HyperDual64::new(Dual::new(1.5, 2.0), Dual::new(3.0, 4.0));
    assert_eq!(x.value(), 1.5);
}

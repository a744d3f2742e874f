//! Cross-validate the closed forms against central finite differences.

use approx::assert_relative_eq;
use chainrule::oracle::{forward, grad_l_wrt_x, hvp_l_wrt_h, loss, loss_at};
use chainrule::reversal::{jvp_g, reversal_scale, vjp_g};

/// Central finite difference gradient.
fn finite_diff_grad(f: impl Fn(&[f64]) -> f64, x: &[f64], h: f64) -> Vec<f64> {
    (0..x.len())
        .map(|i| {
            let mut xp = x.to_vec();
            let mut xm = x.to_vec();
            xp[i] += h;
            xm[i] -= h;
            (f(&xp) - f(&xm)) / (2.0 * h)
        })
        .collect()
}

/// Directional finite difference of a vector map: `(f(x + h·p) - f(x - h·p)) / 2h`.
fn finite_diff_jvp(f: impl Fn(&[f64]) -> Vec<f64>, x: &[f64], p: &[f64], h: f64) -> Vec<f64> {
    let xp: Vec<f64> = x.iter().zip(p).map(|(a, b)| a + h * b).collect();
    let xm: Vec<f64> = x.iter().zip(p).map(|(a, b)| a - h * b).collect();
    f(&xp)
        .iter()
        .zip(f(&xm))
        .map(|(a, b)| (a - b) / (2.0 * h))
        .collect()
}

#[test]
fn loss_gradient_matches_finite_differences() {
    let cases: [(&[f64], &[f64]); 3] = [
        (&[1.0, 2.0], &[9.48773584, 518.01282467]),
        (&[0.2, -0.7, 0.5], &[1.0, 2.0, 0.0]),
        (&[-1.1, 0.0], &[3.0, 1.0]),
    ];
    for (x, y) in cases {
        let analytic = grad_l_wrt_x(x, y).unwrap();
        let fd = finite_diff_grad(|p| loss_at(p, y).unwrap(), x, 1e-6);
        for (a, f) in analytic.iter().zip(&fd) {
            let scale = a.abs().max(1.0);
            assert!(
                (a - f).abs() <= 1e-4 * scale,
                "analytic={a}, finite diff={f}"
            );
        }
    }
}

#[test]
fn hessian_of_loss_wrt_h_is_twice_identity() {
    let y = [0.5, -2.0, 1.5];
    let h = forward(&[0.1, 0.4, -0.3]).h;
    let v = [1.0, -1.0, 0.25];
    // H·v = d/dt ∇L(h + t·v)
    let grad = |p: &[f64]| -> Vec<f64> { p.iter().zip(&y).map(|(a, b)| 2.0 * (a - b)).collect() };
    let fd = finite_diff_jvp(&grad, &h, &v, 1e-5);
    for (a, e) in fd.iter().zip(hvp_l_wrt_h(&v)) {
        assert_relative_eq!(*a, e, epsilon = 1e-8);
    }
    // and the loss is consistent with that gradient
    let fd_grad = finite_diff_grad(|p| loss(p, &y).unwrap(), &h, 1e-6);
    let exact = grad(&h);
    for (a, e) in fd_grad.iter().zip(&exact) {
        assert_relative_eq!(*a, *e, epsilon = 1e-6);
    }
}

#[test]
fn reversal_jvp_matches_finite_differences() {
    let v = [0.3, -1.0, 2.0, 0.5];
    let p = [1.0, 0.5, -2.0, 3.0];
    let fd = finite_diff_jvp(|q| reversal_scale(q), &v, &p, 1e-6);
    for (a, e) in fd.iter().zip(jvp_g(&v, &p).unwrap()) {
        assert_relative_eq!(*a, e, epsilon = 1e-6);
    }
}

#[test]
fn reversal_vjp_satisfies_adjoint_identity() {
    // <J·p, w> == <p, Jᵀ·w>
    let v = [0.3, -1.0, 2.0];
    let p = [1.0, 0.5, -2.0];
    let w = [0.7, -0.1, 1.3];
    let jp = jvp_g(&v, &p).unwrap();
    let jtw = vjp_g(&v, &w).unwrap();
    let lhs: f64 = jp.iter().zip(&w).map(|(a, b)| a * b).sum();
    let rhs: f64 = p.iter().zip(&jtw).map(|(a, b)| a * b).sum();
    assert_relative_eq!(lhs, rhs, max_relative = 1e-14);
}

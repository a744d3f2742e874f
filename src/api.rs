use crate::dual::Dual;
use crate::error::{check_len, Result};
use crate::float::Float;
use crate::reverse::Reverse;
use crate::scalar::Scalar;
use crate::tape::{Tape, TapeGuard, TapeThreadLocal};

/// Record `f` on a fresh tape with `x` as inputs.
fn record<F: Float + TapeThreadLocal, R>(
    f: impl FnOnce(&[Reverse<F>]) -> R,
    x: &[F],
) -> (Tape<F>, R) {
    let mut tape = Tape::with_capacity(x.len() * 10);
    let inputs: Vec<Reverse<F>> = x
        .iter()
        .map(|&val| Reverse::from_tape(val, tape.new_variable()))
        .collect();
    let output = {
        let _guard = TapeGuard::new(&mut tape);
        f(&inputs)
    };
    (tape, output)
}

/// Gradient of a scalar function `f : R^n → R` using reverse mode.
///
/// ```
/// let g = chainrule::grad(|x: &[chainrule::Reverse<f64>]| {
///     x[0] * x[0] + x[1] * x[1]
/// }, &[3.0, 4.0]);
/// assert!((g[0] - 6.0).abs() < 1e-10);
/// assert!((g[1] - 8.0).abs() < 1e-10);
/// ```
pub fn grad<F: Float + TapeThreadLocal>(
    f: impl FnOnce(&[Reverse<F>]) -> Reverse<F>,
    x: &[F],
) -> Vec<F> {
    let n = x.len();
    let (tape, output) = record(f, x);
    if output.is_constant() {
        return vec![F::zero(); n];
    }
    let adjoints = tape.reverse(output.index);
    adjoints[..n].to_vec()
}

/// Vector-Jacobian product (reverse mode): `(f(x), Jᵀ·w)`.
///
/// Fails with `InvalidInput` when `w` does not match the output length.
pub fn vjp<F: Float + TapeThreadLocal>(
    f: impl FnOnce(&[Reverse<F>]) -> Vec<Reverse<F>>,
    x: &[F],
    w: &[F],
) -> Result<(Vec<F>, Vec<F>)> {
    let n = x.len();
    let (tape, outputs) = record(f, x);
    check_len("weights", outputs.len(), w.len())?;

    let values: Vec<F> = outputs.iter().map(|r| r.value).collect();
    let seeds: Vec<(u32, F)> = outputs
        .iter()
        .zip(w)
        .map(|(r, &wi)| (r.index, wi))
        .collect();
    let adjoints = tape.reverse_seeded(&seeds);
    Ok((values, adjoints[..n].to_vec()))
}

/// Jacobian-vector product (forward mode): `(f(x), J·v)`.
pub fn jvp<F>(
    f: impl Fn(&[Dual<F>]) -> Vec<Dual<F>>,
    x: &[F],
    v: &[F],
) -> Result<(Vec<F>, Vec<F>)>
where
    F: Float + Scalar<Float = F>,
{
    check_len("tangent", x.len(), v.len())?;
    let inputs: Vec<Dual<F>> = x
        .iter()
        .zip(v)
        .map(|(&xi, &vi)| Dual::new(xi, vi))
        .collect();
    let outputs = f(&inputs);
    let values = outputs.iter().map(|d| d.re).collect();
    let tangents = outputs.iter().map(|d| d.eps).collect();
    Ok((values, tangents))
}

/// Full Jacobian of `f : R^n → R^m`, one forward pass per input.
///
/// Returns `(f(x), J)` where `J[i][j] = ∂f_i/∂x_j`.
pub fn jacobian<F>(f: impl Fn(&[Dual<F>]) -> Vec<Dual<F>>, x: &[F]) -> (Vec<F>, Vec<Vec<F>>)
where
    F: Float + Scalar<Float = F>,
{
    let n = x.len();
    let const_inputs: Vec<Dual<F>> = x.iter().map(|&xi| Dual::constant(xi)).collect();
    let const_outputs = f(&const_inputs);
    let values: Vec<F> = const_outputs.iter().map(|d| d.re).collect();

    let mut jac = vec![vec![F::zero(); n]; values.len()];
    for j in 0..n {
        let inputs: Vec<Dual<F>> = x
            .iter()
            .enumerate()
            .map(|(k, &xi)| {
                if k == j {
                    Dual::variable(xi)
                } else {
                    Dual::constant(xi)
                }
            })
            .collect();
        for (row, out) in jac.iter_mut().zip(f(&inputs)) {
            row[j] = out.eps;
        }
    }
    (values, jac)
}

/// Hessian-vector product via forward-over-forward.
///
/// Pass `i` seeds the outer tangent with `e_i` and the inner tangent with
/// `v`, so the output's `eps.re` is `∂f/∂x_i` and `eps.eps` is `(H·v)_i`.
/// Costs `n` passes and never forms `H`.
///
/// Returns `(gradient, H·v)`.
pub fn hvp<F>(
    f: impl Fn(&[Dual<Dual<F>>]) -> Dual<Dual<F>>,
    x: &[F],
    v: &[F],
) -> Result<(Vec<F>, Vec<F>)>
where
    F: Float + Scalar<Float = F>,
{
    let n = x.len();
    check_len("direction", n, v.len())?;

    let mut gradient = vec![F::zero(); n];
    let mut hv = vec![F::zero(); n];
    for i in 0..n {
        let inputs: Vec<Dual<Dual<F>>> = (0..n)
            .map(|k| {
                let seed = if k == i { F::one() } else { F::zero() };
                Dual::new(Dual::new(x[k], v[k]), Dual::constant(seed))
            })
            .collect();
        let out = f(&inputs);
        gradient[i] = out.eps.re;
        hv[i] = out.eps.eps;
    }
    Ok((gradient, hv))
}

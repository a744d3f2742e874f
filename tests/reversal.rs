use chainrule::reversal::{
    is_symmetric, jvp_g, mat_vec, reversal_jacobian, reversal_scale, transpose, vjp_g,
};
use chainrule::{jacobian, Error};

#[test]
fn vjp_and_jvp_at_reference_point() {
    let v = [1.0, 2.0];
    let p = [1.0, 1.0];
    assert_eq!(vjp_g(&v, &p).unwrap(), vec![2.0, 1.0]);
    assert_eq!(jvp_g(&v, &p).unwrap(), vec![1.0, 2.0]);
}

#[test]
fn asymmetric_jacobian_separates_vjp_from_jvp() {
    for n in 2..6 {
        let v = vec![0.5; n];
        let p = vec![1.0; n];
        assert!(!is_symmetric(&reversal_jacobian::<f64>(n), 0.0));
        assert_ne!(vjp_g(&v, &p).unwrap(), jvp_g(&v, &p).unwrap());
    }
}

#[test]
fn diagonal_jacobian_is_symmetric() {
    // The worked example's stage Jacobians are diagonal.
    let x = [0.5, -1.0, 2.0];
    let diag: Vec<Vec<f64>> = (0..3)
        .map(|i| {
            let mut row = vec![0.0; 3];
            row[i] = 2.0 * x[i];
            row
        })
        .collect();
    assert!(is_symmetric(&diag, 0.0));
    let p = [1.0, 2.0, 3.0];
    assert_eq!(
        mat_vec(&diag, &p).unwrap(),
        mat_vec(&transpose(&diag), &p).unwrap()
    );
}

#[test]
fn closed_forms_match_dense_jacobian() {
    let n = 5;
    let j = reversal_jacobian::<f64>(n);
    let v: Vec<f64> = (0..n).map(|i| i as f64 - 1.5).collect();
    let p: Vec<f64> = (0..n).map(|i| 0.25 * (i * i) as f64 + 1.0).collect();
    assert_eq!(jvp_g(&v, &p).unwrap(), mat_vec(&j, &p).unwrap());
    assert_eq!(vjp_g(&v, &p).unwrap(), mat_vec(&transpose(&j), &p).unwrap());
}

#[test]
fn forward_mode_jacobian_agrees() {
    let v = [1.0, 2.0, 3.0, 4.0];
    let (values, j) = jacobian(|d| reversal_scale(d), &v);
    assert_eq!(values, reversal_scale(&v));
    assert_eq!(j, reversal_jacobian::<f64>(4));
}

#[test]
fn jacobian_is_independent_of_v() {
    let p = [1.0, -2.0, 0.5];
    assert_eq!(
        vjp_g(&[0.0, 0.0, 0.0], &p).unwrap(),
        vjp_g(&[10.0, -3.0, 7.0], &p).unwrap()
    );
}

#[test]
fn empty_and_mismatched() {
    assert!(vjp_g::<f64>(&[], &[]).unwrap().is_empty());
    assert!(reversal_jacobian::<f64>(0).is_empty());
    assert!(matches!(
        jvp_g(&[1.0, 2.0], &[1.0]),
        Err(Error::InvalidInput {
            what: "p",
            expected: 2,
            found: 1
        })
    ));
    assert!(mat_vec(&reversal_jacobian::<f64>(2), &[1.0]).is_err());
}

//! Property-based tests for `Matrix` and `solve_linear` using proptest.

use ndarray as nd;
use numan::{ Matrix, NumError, solve_linear };
use proptest::prelude::*;

fn int_matrix(lo: usize, hi: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    return (lo..=hi).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec((-9_i32..=9).prop_map(f64::from), n),
            n,
        )
    });
}

/// Square matrices whose diagonal dominates each row, hence well-conditioned.
fn dominant_matrix() -> impl Strategy<Value = Matrix> {
    return (1_usize..=5).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(-1.0_f64..1.0, n), n)
            .prop_map(move |mut rows| {
                for (k, row) in rows.iter_mut().enumerate() {
                    row[k] += n as f64 + 1.0;
                }
                Matrix::from_rows(rows).unwrap()
            })
    });
}

proptest! {
    /// Integer matrices have exact determinants, so transposition must not
    /// change a single bit.
    #[test]
    fn det_transpose_invariant_exact(rows in int_matrix(1, 5)) {
        let a = Matrix::from_rows(rows).unwrap();
        prop_assert_eq!(a.det().unwrap(), a.transpose().det().unwrap());
    }

    #[test]
    fn det_transpose_invariant(a in dominant_matrix()) {
        let d = a.det().unwrap();
        let dt = a.transpose().det().unwrap();
        prop_assert!((d - dt).abs() <= 1e-9 * (1.0 + d.abs()));
    }

    #[test]
    fn det_is_pure(a in dominant_matrix()) {
        prop_assert_eq!(a.det().unwrap().to_bits(), a.det().unwrap().to_bits());
    }

    #[test]
    fn inverse_round_trip(a in dominant_matrix()) {
        let eye = Matrix::identity(a.nrows()).unwrap();
        let inv = a.inverse().unwrap();
        prop_assert!(a.mul(&inv).unwrap().approx_eq(&eye, 1e-9));
        prop_assert!(inv.mul(&a).unwrap().approx_eq(&eye, 1e-9));
    }

    #[test]
    fn duplicated_row_is_singular(
        mut rows in int_matrix(2, 5),
        b in prop::collection::vec(-10.0_f64..10.0, 5),
    ) {
        rows[1] = rows[0].clone();
        let n = rows.len();
        let a = Matrix::from_rows(rows).unwrap();
        prop_assert_eq!(a.det().unwrap(), 0.0);
        prop_assert_eq!(a.inverse().unwrap_err(), NumError::SingularMatrix);
        let b: nd::Array1<f64> = b.into_iter().take(n).collect();
        prop_assert_eq!(solve_linear(&a, &b).unwrap_err(), NumError::NoSolution);
    }

    #[test]
    fn cramer_round_trip(
        a in dominant_matrix(),
        x in prop::collection::vec(-10.0_f64..10.0, 5),
    ) {
        let x: nd::Array1<f64> = x.into_iter().take(a.nrows()).collect();
        let b: nd::Array1<f64> = a.as_array().dot(&x);
        let x_solved = solve_linear(&a, &b).unwrap();
        let err: f64 = numan::linalg::norm(&(&x_solved - &x));
        prop_assert!(err < 1e-9, "error {} too large", err);
    }

    #[test]
    fn non_square_is_malformed(n in 1_usize..5, extra in 1_usize..3) {
        let a = Matrix::from_array(nd::Array2::ones((n, n + extra))).unwrap();
        prop_assert!(a.det().unwrap_err().is_malformed());
        prop_assert!(a.inverse().unwrap_err().is_malformed());
        let b = nd::Array1::ones(n);
        prop_assert!(solve_linear(&a, &b).unwrap_err().is_malformed());
    }
}

//! Solve square linear systems `A x = b` by Cramer's rule.

use ndarray::{ self as nd, Axis };
use crate::{
    error::{ NumError, NumResult, ensure },
    linalg::Matrix,
};

/// Solve `a * x = b`, computing each `x[i]` as the ratio `det(a_i) /
/// det(a)` where `a_i` is `a` with its `i`-th column replaced by `b`.
///
/// Fails with `MalformedInput` if `a` is not square or its row count differs
/// from `b.len()`, and with `NoSolution` if `det(a)` is exactly zero. In the
/// latter case the system is singular or underdetermined and another method
/// is needed.
pub fn solve_linear(a: &Matrix, b: &nd::Array1<f64>) -> NumResult<nd::Array1<f64>> {
    ensure!(
        a.nrows() == b.len(),
        "coefficient matrix has {} rows but free-term vector has length {}",
        a.nrows(), b.len(),
    );
    let delta: f64 = a.det()?;
    if delta == 0.0 {
        return Err(NumError::NoSolution);
    }
    let n: usize = b.len();
    let mut x: nd::Array1<f64> = nd::Array1::zeros(n);
    for i in 0..n {
        let mut a_i: nd::Array2<f64> = a.as_array().clone();
        a_i.index_axis_mut(Axis(1), i).assign(b);
        x[i] = Matrix::from_array(a_i)?.det()? / delta;
    }
    return Ok(x);
}

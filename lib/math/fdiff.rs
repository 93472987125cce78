//! Finite-difference estimates of Jacobians, gradients, and Hessians.
//!
//! These take step vectors as given; length and sign checks are left to the
//! solvers that call them.

use ndarray as nd;
use crate::{ error::NumResult, linalg::Matrix };

/// Copy of `x` with `x[k]` shifted by `h`.
fn shifted(x: &nd::Array1<f64>, k: usize, h: f64) -> nd::Array1<f64> {
    let mut xs: nd::Array1<f64> = x.clone();
    xs[k] += h;
    return xs;
}

/// Copy of `x` with `x[i]` shifted by `hi` and `x[j]` shifted by `hj`.
fn shifted2(x: &nd::Array1<f64>, i: usize, hi: f64, j: usize, hj: f64)
    -> nd::Array1<f64>
{
    let mut xs: nd::Array1<f64> = x.clone();
    xs[i] += hi;
    xs[j] += hj;
    return xs;
}

/// Evaluate every equation at `u`.
pub fn residual<F>(f: &[F], u: &nd::Array1<f64>) -> nd::Array1<f64>
where F: Fn(&nd::Array1<f64>) -> f64
{
    return f.iter().map(|fi| fi(u)).collect();
}

/// Forward-difference Jacobian of the system `f` at `u`:
/// ```text
/// J[i][j] = (f_i(u + e_j du_j) - f_i(u)) / du_j
/// ```
/// `f(u)` is passed in as `f0` so that callers who already hold the residual
/// don't pay for it twice.
pub fn jacobian_forward<F>(
    f: &[F],
    u: &nd::Array1<f64>,
    f0: &nd::Array1<f64>,
    du: &nd::Array1<f64>,
) -> NumResult<Matrix>
where F: Fn(&nd::Array1<f64>) -> f64
{
    let m: usize = f.len();
    let n: usize = u.len();
    let mut jac: nd::Array2<f64> = nd::Array2::zeros((m, n));
    for (j, duj) in du.iter().enumerate() {
        let uj: nd::Array1<f64> = shifted(u, j, *duj);
        for (i, fi) in f.iter().enumerate() {
            jac[[i, j]] = (fi(&uj) - f0[i]) / duj;
        }
    }
    log::trace!("forward-difference jacobian:\n{}", jac);
    return Matrix::from_array(jac);
}

/// Central-difference gradient of `f` at `x`:
/// ```text
/// g[i] = (f(x + e_i dx_i) - f(x - e_i dx_i)) / (2 dx_i)
/// ```
pub fn gradient_central<F>(f: &F, x: &nd::Array1<f64>, dx: &nd::Array1<f64>)
    -> nd::Array1<f64>
where F: Fn(&nd::Array1<f64>) -> f64
{
    return dx.iter().enumerate()
        .map(|(i, hi)| {
            (f(&shifted(x, i, *hi)) - f(&shifted(x, i, -*hi))) / (2.0 * hi)
        })
        .collect();
}

/// Central-difference Hessian of `f` at `x`, given `fx = f(x)`.
///
/// Diagonal elements use the three-point second difference and off-diagonal
/// elements the four-point mixed difference
/// ```text
/// H[i][j] = (f(+,+) - f(+,-) - f(-,+) + f(-,-)) / (4 dx_i dx_j)
/// ```
/// mirrored so that the result is exactly symmetric.
pub fn hessian_central<F>(
    f: &F,
    x: &nd::Array1<f64>,
    fx: f64,
    dx: &nd::Array1<f64>,
) -> NumResult<Matrix>
where F: Fn(&nd::Array1<f64>) -> f64
{
    let n: usize = x.len();
    let mut hess: nd::Array2<f64> = nd::Array2::zeros((n, n));
    for i in 0..n {
        let hi: f64 = dx[i];
        hess[[i, i]]
            = (f(&shifted(x, i, hi)) - 2.0 * fx + f(&shifted(x, i, -hi)))
            / (hi * hi);
        for j in i + 1..n {
            let hj: f64 = dx[j];
            let hij: f64
                = (
                    f(&shifted2(x, i, hi, j, hj))
                    - f(&shifted2(x, i, hi, j, -hj))
                    - f(&shifted2(x, i, -hi, j, hj))
                    + f(&shifted2(x, i, -hi, j, -hj))
                ) / (4.0 * hi * hj);
            hess[[i, j]] = hij;
            hess[[j, i]] = hij;
        }
    }
    log::trace!("central-difference hessian:\n{}", hess);
    return Matrix::from_array(hess);
}

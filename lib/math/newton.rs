//! Newton iteration for square systems of nonlinear equations, using a
//! forward-difference Jacobian and Cramer's rule for the linear step.

use ndarray as nd;
use crate::{
    error::{ NumError, NumResult, Violation, check_violation, ensure },
    linalg::{ norm, solve_linear },
    math::fdiff,
};
#[cfg(feature = "config")]
use serde::{ Deserialize, Serialize };

/// A single scalar equation of the full unknown vector.
///
/// Boxing lets a system mix different closures in one slice.
pub type Equation<'a> = Box<dyn Fn(&nd::Array1<f64>) -> f64 + 'a>;

/// Options to control Newton iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NewtonOptions {
    /// Convergence condition on the residual 2-norm (default 1e-6)
    pub epsilon: f64,

    /// Maximum number of steps to take (default 1000)
    pub maxiters: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self { Self { epsilon: 1e-6, maxiters: 1000 } }
}

impl NewtonOptions {
    pub(crate) fn violation(&self) -> Option<Violation> {
        if !(self.epsilon > 0.0) {
            return Some(("epsilon", "> 0", self.epsilon.to_string()));
        }
        if self.maxiters == 0 {
            return Some(("maxiters", "> 0", self.maxiters.to_string()));
        }
        return None;
    }

    pub(crate) fn check(&self) -> NumResult<()> {
        return check_violation("newton", self.violation());
    }
}

/// Find a root of the system `f(u) = 0` by Newton iteration, starting from
/// `u0` and estimating the Jacobian with forward steps `du`.
///
/// Uses the default iteration cap; see [`newton_solve_with`].
pub fn newton_solve<F>(
    f: &[F],
    u0: &nd::Array1<f64>,
    du: &nd::Array1<f64>,
    epsilon: f64,
) -> NumResult<nd::Array1<f64>>
where F: Fn(&nd::Array1<f64>) -> f64
{
    let opts = NewtonOptions { epsilon, ..NewtonOptions::default() };
    return newton_solve_with(f, u0, du, &opts);
}

/// Find a root of the system `f(u) = 0` by Newton iteration.
///
/// Each step evaluates the residual `r = f(u)`, stops if `|r| <
/// opts.epsilon`, and otherwise solves `J du = r` for the forward-difference
/// Jacobian `J` before updating `u <- u - du`.
///
/// # Errors
/// - `MalformedInput` if there are no equations, the number of equations,
///   unknowns, and steps differ, any step is non-positive, or `opts` is
///   invalid.
/// - `NoSolution` if the Jacobian becomes singular; retrying with a
///   different starting point or step vector may help.
/// - `DidNotConverge` if `opts.maxiters` steps are taken without meeting the
///   tolerance.
pub fn newton_solve_with<F>(
    f: &[F],
    u0: &nd::Array1<f64>,
    du: &nd::Array1<f64>,
    opts: &NewtonOptions,
) -> NumResult<nd::Array1<f64>>
where F: Fn(&nd::Array1<f64>) -> f64
{
    ensure!(!f.is_empty(), "system must have at least one equation");
    ensure!(
        f.len() == u0.len(),
        "system has {} equations but {} unknowns", f.len(), u0.len(),
    );
    ensure!(
        du.len() == u0.len(),
        "step vector has length {} but there are {} unknowns",
        du.len(), u0.len(),
    );
    ensure!(
        du.iter().all(|h| *h > 0.0),
        "step vector entries must be positive but got {}", du,
    );
    opts.check()?;

    let mut u: nd::Array1<f64> = u0.clone();
    let mut r: nd::Array1<f64>;
    let mut r_norm: f64;
    for iter in 0..opts.maxiters {
        r = fdiff::residual(f, &u);
        r_norm = norm(&r);
        log::debug!("newton: iter {}: |r| = {:.3e}", iter, r_norm);
        if r_norm < opts.epsilon {
            return Ok(u);
        }
        let jac = fdiff::jacobian_forward(f, &u, &r, du)?;
        let step: nd::Array1<f64> = solve_linear(&jac, &r)
            .map_err(|err| {
                log::warn!("newton: iter {}: linear solve failed: {}", iter, err);
                err
            })?;
        u -= &step;
    }
    log::warn!("newton: no convergence within {} iterations", opts.maxiters);
    return Err(NumError::DidNotConverge { iters: opts.maxiters });
}

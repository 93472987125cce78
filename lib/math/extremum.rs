//! Damped Newton descent toward a local minimum of a scalar function of
//! several variables.
//!
//! Each step solves the regularized system `(H + alpha I) d = -g`, where `g`
//! and `H` are central-difference estimates of the gradient and Hessian. The
//! damping `alpha` shrinks by a factor `c1` after a step that lowers the
//! objective and grows by `1 / c1` otherwise, so that the iteration moves
//! like gradient descent far from the minimum and like Newton's method close
//! to it.

use ndarray as nd;
use crate::{
    error::{ NumError, NumResult, Violation, check_violation, ensure },
    linalg::{ Matrix, norm },
    math::fdiff,
};
#[cfg(feature = "config")]
use serde::{ Deserialize, Serialize };

/// What to do with a candidate point that did not lower the objective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum StepPolicy {
    /// Move to every candidate point; the objective comparison only tunes
    /// the damping.
    #[default]
    Advance,

    /// Stay put when the objective did not decrease.
    AcceptOnDecrease,
}

/// Options to control damped Newton descent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DampedOptions {
    /// Initial damping; must be positive (default 100)
    pub alpha0: f64,

    /// Damping shrink factor, in (0, 1); the grow factor is `1 / c1`
    /// (default 0.5). A run of rejected steps long enough to overflow the
    /// damping ends the descent with `DidNotConverge`.
    pub c1: f64,

    /// Convergence condition on the gradient 2-norm (default 1e-6)
    pub epsilon: f64,

    /// Maximum number of steps to take (default 1000)
    pub maxiters: usize,

    /// Handling of steps that fail to lower the objective (default
    /// `Advance`)
    pub policy: StepPolicy,
}

impl Default for DampedOptions {
    fn default() -> Self {
        Self {
            alpha0: 100.0,
            c1: 0.5,
            epsilon: 1e-6,
            maxiters: 1000,
            policy: StepPolicy::Advance,
        }
    }
}

impl DampedOptions {
    pub(crate) fn violation(&self) -> Option<Violation> {
        if !(self.alpha0 > 0.0) {
            return Some(("alpha0", "> 0", self.alpha0.to_string()));
        }
        if !(self.c1 > 0.0 && self.c1 < 1.0) {
            return Some(("c1", "in (0, 1)", self.c1.to_string()));
        }
        if !(self.epsilon > 0.0) {
            return Some(("epsilon", "> 0", self.epsilon.to_string()));
        }
        if self.maxiters == 0 {
            return Some(("maxiters", "> 0", self.maxiters.to_string()));
        }
        return None;
    }

    pub(crate) fn check(&self) -> NumResult<()> {
        return check_violation("damped", self.violation());
    }
}

/// Find a local minimum of `f` by damped Newton descent from `x0`, with
/// finite-difference steps `dx`, initial damping `alpha0`, damping factor
/// `c1`, and gradient tolerance `epsilon`.
///
/// Uses the default iteration cap and step policy; see
/// [`damped_extremum_with`].
pub fn damped_extremum<F>(
    f: F,
    x0: &nd::Array1<f64>,
    dx: &nd::Array1<f64>,
    alpha0: f64,
    c1: f64,
    epsilon: f64,
) -> NumResult<nd::Array1<f64>>
where F: Fn(&nd::Array1<f64>) -> f64
{
    let opts = DampedOptions { alpha0, c1, epsilon, ..DampedOptions::default() };
    return damped_extremum_with(f, x0, dx, &opts);
}

/// Find a local minimum of `f` by damped Newton descent from `x0`.
///
/// # Errors
/// - `MalformedInput` if `x0` is empty, `dx` has the wrong length or a
///   non-positive entry, or `opts` is invalid.
/// - `SingularMatrix` if the regularized Hessian `H + alpha I` is singular
///   at some step.
/// - `DidNotConverge` if `opts.maxiters` steps are taken without meeting the
///   tolerance, or if the damping grows past the largest finite `f64`.
pub fn damped_extremum_with<F>(
    f: F,
    x0: &nd::Array1<f64>,
    dx: &nd::Array1<f64>,
    opts: &DampedOptions,
) -> NumResult<nd::Array1<f64>>
where F: Fn(&nd::Array1<f64>) -> f64
{
    ensure!(!x0.is_empty(), "starting point must be non-empty");
    ensure!(
        dx.len() == x0.len(),
        "step vector has length {} but there are {} unknowns",
        dx.len(), x0.len(),
    );
    ensure!(
        dx.iter().all(|h| *h > 0.0),
        "step vector entries must be positive but got {}", dx,
    );
    opts.check()?;

    let n: usize = x0.len();
    let eye: Matrix = Matrix::identity(n)?;
    let mut x: nd::Array1<f64> = x0.clone();
    let mut alpha: f64 = opts.alpha0;
    for iter in 0..opts.maxiters {
        let g: nd::Array1<f64> = fdiff::gradient_central(&f, &x, dx);
        let g_norm: f64 = norm(&g);
        log::debug!(
            "damped: iter {}: |g| = {:.3e}, alpha = {:.3e}", iter, g_norm, alpha);
        if g_norm < opts.epsilon {
            return Ok(x);
        }
        let fx: f64 = f(&x);
        let hess: Matrix = fdiff::hessian_central(&f, &x, fx, dx)?;
        let reg_inv: Matrix = hess.add(&eye.scale(alpha))?.inverse()
            .map_err(|err| {
                log::warn!("damped: iter {}: {}", iter, err);
                err
            })?;
        let step: Matrix = reg_inv.mul(&Matrix::column(&g)?)?.scale(-1.0);
        let x_new: nd::Array1<f64> = &x + &step.into_array().column(0);
        let improved: bool = f(&x_new) < fx;
        if improved {
            alpha *= opts.c1;
        } else {
            alpha /= opts.c1;
        }
        if !alpha.is_finite() {
            log::warn!("damped: iter {}: damping overflowed", iter);
            return Err(NumError::DidNotConverge { iters: iter + 1 });
        }
        if improved || opts.policy == StepPolicy::Advance {
            x = x_new;
        }
    }
    log::warn!("damped: no convergence within {} iterations", opts.maxiters);
    return Err(NumError::DidNotConverge { iters: opts.maxiters });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paraboloid(x: &nd::Array1<f64>) -> f64 {
        return (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
    }

    #[test]
    fn paraboloid_minimum() {
        let x = damped_extremum(
            paraboloid,
            &nd::array![5.0, 5.0],
            &nd::array![1e-4, 1e-4],
            100.0,
            0.5,
            1e-6,
        ).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-3);
        assert!((x[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn rosenbrock_minimum_accept_on_decrease() {
        let f = |x: &nd::Array1<f64>| {
            (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
        };
        let opts = DampedOptions {
            alpha0: 10.0,
            epsilon: 1e-5,
            maxiters: 10_000,
            policy: StepPolicy::AcceptOnDecrease,
            ..DampedOptions::default()
        };
        let x = damped_extremum_with(
            f, &nd::array![-1.2, 1.0], &nd::array![1e-5, 1e-5], &opts,
        ).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-3);
        assert!((x[1] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn validation() {
        let x0 = nd::array![5.0, 5.0];
        let dx = nd::array![1e-4, 1e-4];
        let bad = |r: NumResult<nd::Array1<f64>>| r.unwrap_err().is_malformed();
        assert!(bad(damped_extremum(paraboloid, &x0, &dx, 100.0, 1.0, 1e-6)));
        assert!(bad(damped_extremum(paraboloid, &x0, &dx, 100.0, 0.0, 1e-6)));
        assert!(bad(damped_extremum(paraboloid, &x0, &dx, 100.0, 0.5, 0.0)));
        assert!(bad(damped_extremum(paraboloid, &x0, &dx, 0.0, 0.5, 1e-6)));
        assert!(bad(damped_extremum(
            paraboloid, &x0, &nd::array![1e-4, 0.0], 100.0, 0.5, 1e-6)));
        assert!(bad(damped_extremum(
            paraboloid, &x0, &nd::array![1e-4], 100.0, 0.5, 1e-6)));
        assert!(bad(damped_extremum(
            paraboloid, &nd::Array1::zeros(0), &nd::Array1::zeros(0),
            100.0, 0.5, 1e-6)));
    }

    #[test]
    fn singular_regularized_hessian() {
        // H = -2 exactly at these step sizes, cancelled by alpha0 = 2
        let f = |x: &nd::Array1<f64>| -x[0] * x[0];
        assert_eq!(
            damped_extremum(f, &nd::array![1.0], &nd::array![0.5], 2.0, 0.5, 1e-6)
                .unwrap_err(),
            NumError::SingularMatrix,
        );
    }

    #[test]
    fn iteration_cap() {
        let opts = DampedOptions { maxiters: 2, ..DampedOptions::default() };
        assert_eq!(
            damped_extremum_with(
                paraboloid, &nd::array![5.0, 5.0], &nd::array![1e-4, 1e-4], &opts,
            ).unwrap_err(),
            NumError::DidNotConverge { iters: 2 },
        );
    }

    #[test]
    fn rejected_step_still_moves_under_advance() {
        use std::cell::RefCell;
        // f(x) = -x^2 from x = 1 with alpha0 = 1: the first step lands on
        // x = -1, where f is no lower, so it's rejected and alpha doubles to
        // 2, making H + alpha I = 0 on the second step
        let first_probe_of_second_step = |policy: StepPolicy| -> f64 {
            let evals: RefCell<Vec<f64>> = RefCell::new(Vec::new());
            let f = |x: &nd::Array1<f64>| {
                evals.borrow_mut().push(x[0]);
                -x[0] * x[0]
            };
            let opts = DampedOptions {
                alpha0: 1.0,
                maxiters: 2,
                policy,
                ..DampedOptions::default()
            };
            assert_eq!(
                damped_extremum_with(f, &nd::array![1.0], &nd::array![0.5], &opts)
                    .unwrap_err(),
                NumError::SingularMatrix,
            );
            // first step: 2 for the gradient, 1 for f(x), 2 for the
            // Hessian, 1 for the candidate
            let evals = evals.borrow();
            assert_eq!(evals[5], -1.0);
            return evals[6];
        };
        assert_eq!(first_probe_of_second_step(StepPolicy::Advance), -0.5);
        assert_eq!(first_probe_of_second_step(StepPolicy::AcceptOnDecrease), 1.5);
    }

    #[test]
    fn damping_overflow() {
        // every step is rejected, so alpha goes 1 -> 1e300 -> inf
        let f = |x: &nd::Array1<f64>| -x[0] * x[0];
        let opts = DampedOptions {
            alpha0: 1.0,
            c1: 1e-300,
            ..DampedOptions::default()
        };
        assert_eq!(
            damped_extremum_with(f, &nd::array![1.0], &nd::array![0.5], &opts)
                .unwrap_err(),
            NumError::DidNotConverge { iters: 2 },
        );
    }
}

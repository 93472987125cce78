//! Fixed-step integrators for first-order systems of ordinary differential
//! equations
//! ```math
//! \frac{dy_j}{dx} = f_j(x, y), \quad y(x_0) = y_0
//! ```
//! by the explicit Euler, modified Euler (Heun), and classical fourth-order
//! Runge-Kutta methods.
//!
//! Integration marches forward from `x0` in steps of `h` until a stop
//! condition holds at the latest point. A list of marks can be given: a step
//! that would pass over a mark is shortened to land on it, and the regular
//! grid restarts from there.

use ndarray as nd;
use crate::error::{ NumError, NumResult, ensure };

/// Right-hand side of a single equation, `f_j(x, y)`.
pub type Rhs<'a> = Box<dyn Fn(f64, &nd::Array1<f64>) -> f64 + 'a>;

/// Single-step update rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// `y + h f(x, y)`
    Euler,

    /// Average of the slopes at both ends of an Euler step.
    ModifiedEuler,

    /// Classical four-stage Runge-Kutta.
    RungeKutta,
}

/// Options to control ODE integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OdeOptions {
    /// Base step size; must be positive (default 0.1)
    pub h: f64,

    /// Maximum number of steps to take before giving up on the stop
    /// condition (default 1000000)
    pub maxsteps: usize,
}

impl Default for OdeOptions {
    fn default() -> Self { Self { h: 0.1, maxsteps: 1_000_000 } }
}

/// Integration output: `x[k]` is the k-th grid point and `y.row(k)` the
/// solution there.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub x: nd::Array1<f64>,
    pub y: nd::Array2<f64>,
}

impl Trajectory {
    /// Number of points, including the initial one.
    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Values of the `j`-th unknown at every grid point.
    pub fn component(&self, j: usize) -> Option<nd::ArrayView1<f64>> {
        return (j < self.y.ncols()).then(|| self.y.column(j));
    }

    /// The final grid point and the solution there.
    pub fn last(&self) -> (f64, nd::ArrayView1<f64>) {
        let k: usize = self.len() - 1;
        return (self.x[k], self.y.row(k));
    }
}

fn eval<F>(f: &[F], x: f64, y: &nd::Array1<f64>) -> nd::Array1<f64>
where F: Fn(f64, &nd::Array1<f64>) -> f64
{
    return f.iter().map(|fj| fj(x, y)).collect();
}

impl Method {
    /// Advance `y` at `x` by one step of size `h`.
    fn step<F>(self, f: &[F], x: f64, y: &nd::Array1<f64>, h: f64)
        -> nd::Array1<f64>
    where F: Fn(f64, &nd::Array1<f64>) -> f64
    {
        return match self {
            Self::Euler => y + &(eval(f, x, y) * h),
            Self::ModifiedEuler => {
                let k1: nd::Array1<f64> = eval(f, x, y);
                let k2: nd::Array1<f64> = eval(f, x + h, &(y + &(&k1 * h)));
                y + &((k1 + k2) * (h / 2.0))
            },
            Self::RungeKutta => {
                let x_half: f64 = x + h / 2.0;
                let k1: nd::Array1<f64> = eval(f, x, y);
                let k2: nd::Array1<f64>
                    = eval(f, x_half, &(y + &(&k1 * (h / 2.0))));
                let k3: nd::Array1<f64>
                    = eval(f, x_half, &(y + &(&k2 * (h / 2.0))));
                let k4: nd::Array1<f64> = eval(f, x + h, &(y + &(&k3 * h)));
                y + &((k1 + (k2 + k3) * 2.0 + k4) * (h / 6.0))
            },
        };
    }
}

/// Integrate `f` from `(x0, y0)` with `method` until `stop(x, y)` holds at
/// the latest point, landing on every mark in `marks` that lies ahead of
/// `x0`.
///
/// # Errors
/// - `MalformedInput` if the system is empty, `y0` doesn't have one value
///   per equation, `x0` or a mark is not finite, or `opts` is invalid.
/// - `DidNotConverge` if `opts.maxsteps` steps are taken without `stop`
///   holding.
pub fn solve_ode<F, S>(
    method: Method,
    f: &[F],
    x0: f64,
    y0: &nd::Array1<f64>,
    marks: &[f64],
    stop: S,
    opts: &OdeOptions,
) -> NumResult<Trajectory>
where
    F: Fn(f64, &nd::Array1<f64>) -> f64,
    S: Fn(f64, &nd::Array1<f64>) -> bool,
{
    ensure!(!f.is_empty(), "system must have at least one equation");
    ensure!(
        y0.len() == f.len(),
        "got {} initial values for {} equations", y0.len(), f.len(),
    );
    ensure!(x0.is_finite(), "initial point must be finite but got {}", x0);
    ensure!(
        marks.iter().all(|m| m.is_finite()),
        "marks must be finite but got {:?}", marks,
    );
    ensure!(
        opts.h > 0.0 && opts.h.is_finite(),
        "step size must be positive but got {}", opts.h,
    );
    ensure!(opts.maxsteps > 0, "step cap must be positive");

    let n: usize = f.len();
    let mut xs: Vec<f64> = vec![x0];
    let mut ys: Vec<f64> = y0.to_vec();
    let mut x: f64 = x0;
    let mut y: nd::Array1<f64> = y0.clone();
    // grid points are `anchor + k h`, counted from the last mark passed
    let mut anchor: f64 = x0;
    let mut k: usize = 0;
    let mut steps: usize = 0;
    while !stop(x, &y) {
        if steps == opts.maxsteps {
            log::warn!(
                "ode: stop condition not met within {} steps", opts.maxsteps);
            return Err(NumError::DidNotConverge { iters: opts.maxsteps });
        }
        let mut x_next: f64 = anchor + (k + 1) as f64 * opts.h;
        let mark: Option<f64>
            = marks.iter().copied()
            .filter(|m| x < *m && *m < x_next)
            .min_by(|l, r| l.total_cmp(r));
        if let Some(m) = mark {
            x_next = m;
            anchor = m;
            k = 0;
        } else {
            k += 1;
        }
        y = method.step(f, x, &y, x_next - x);
        x = x_next;
        steps += 1;
        log::trace!("ode: step {}: x = {}, y = {}", steps, x, y);
        xs.push(x);
        ys.extend(y.iter());
    }
    let npoints: usize = xs.len();
    let y_all: nd::Array2<f64> = nd::Array2::from_shape_vec((npoints, n), ys)
        .map_err(|err| NumError::malformed(err.to_string()))?;
    return Ok(Trajectory { x: nd::Array1::from(xs), y: y_all });
}

/// Integrate `f` by the explicit Euler method with base step `h`.
///
/// See [`solve_ode`] for the meaning of the other arguments.
pub fn euler<F, S>(
    f: &[F],
    x0: f64,
    y0: &nd::Array1<f64>,
    marks: &[f64],
    h: f64,
    stop: S,
) -> NumResult<Trajectory>
where
    F: Fn(f64, &nd::Array1<f64>) -> f64,
    S: Fn(f64, &nd::Array1<f64>) -> bool,
{
    let opts = OdeOptions { h, ..OdeOptions::default() };
    return solve_ode(Method::Euler, f, x0, y0, marks, stop, &opts);
}

/// Integrate `f` by the modified Euler method with base step `h`.
///
/// See [`solve_ode`] for the meaning of the other arguments.
pub fn modified_euler<F, S>(
    f: &[F],
    x0: f64,
    y0: &nd::Array1<f64>,
    marks: &[f64],
    h: f64,
    stop: S,
) -> NumResult<Trajectory>
where
    F: Fn(f64, &nd::Array1<f64>) -> f64,
    S: Fn(f64, &nd::Array1<f64>) -> bool,
{
    let opts = OdeOptions { h, ..OdeOptions::default() };
    return solve_ode(Method::ModifiedEuler, f, x0, y0, marks, stop, &opts);
}

/// Integrate `f` by the fourth-order Runge-Kutta method with base step `h`.
///
/// See [`solve_ode`] for the meaning of the other arguments.
pub fn runge_kutta<F, S>(
    f: &[F],
    x0: f64,
    y0: &nd::Array1<f64>,
    marks: &[f64],
    h: f64,
    stop: S,
) -> NumResult<Trajectory>
where
    F: Fn(f64, &nd::Array1<f64>) -> f64,
    S: Fn(f64, &nd::Array1<f64>) -> bool,
{
    let opts = OdeOptions { h, ..OdeOptions::default() };
    return solve_ode(Method::RungeKutta, f, x0, y0, marks, stop, &opts);
}

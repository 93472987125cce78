#![allow(clippy::needless_return)]

//! Small dense linear algebra and Newton-family solvers for systems of a
//! handful to a few dozen unknowns in double precision.
//!
//! - [`linalg`]: [`Matrix`] with shape-checked arithmetic, a Laplace-expansion
//!   determinant and a cofactor inverse, plus Cramer's-rule
//!   [`solve_linear`].
//! - [`math`]: Newton iteration for nonlinear systems
//!   ([`newton_solve`][math::newton_solve]), damped Newton descent for
//!   minimization ([`damped_extremum`][math::damped_extremum]), bisection
//!   searches, quadrature, Lagrange interpolation, and fixed-step ODE
//!   integrators.
//! - `config` (feature `config`): solver settings read from TOML or JSON.
//!
//! Every routine reports failure through [`NumError`]; nothing panics on bad
//! input and nothing is shared between calls.

pub mod error;
pub mod linalg;
pub mod math;

#[cfg(feature = "config")]
pub mod config;

pub use error::{ NumError, NumResult };
pub use linalg::{ Matrix, solve_linear };

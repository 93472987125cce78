//! Collection of iterative solvers and other numerical routines built on
//! [`linalg`][crate::linalg].

pub mod fdiff;
pub mod newton;
pub mod extremum;
pub mod search;
pub mod integrate;
pub mod interpolate;
pub mod ode;

pub use newton::{ Equation, NewtonOptions, newton_solve, newton_solve_with };
pub use extremum::{
    DampedOptions,
    StepPolicy,
    damped_extremum,
    damped_extremum_with,
};
pub use search::{ Extremum, SearchOptions, bisection_extremum, bisection_value };
pub use interpolate::lagrange;
pub use ode::{
    Method,
    OdeOptions,
    Rhs,
    Trajectory,
    euler,
    modified_euler,
    runge_kutta,
    solve_ode,
};

//! Dense linear algebra for small systems: [`Matrix`] and Cramer's-rule
//! linear solving.

pub mod matrix;
pub mod cramer;

pub use matrix::{ Matrix, norm };
pub use cramer::solve_linear;

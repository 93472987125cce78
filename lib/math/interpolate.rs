//! Polynomial interpolation through a set of sample points.

use ndarray as nd;
use crate::error::{ NumResult, ensure };

/// Build the Lagrange interpolating polynomial through the points
/// `(x[i], y[i])`,
/// ```math
/// L(t) = \sum_i y_i \prod_{j \neq i} \frac{t - x_j}{x_i - x_j}
/// ```
/// and return it as a closure.
///
/// The nodes must be non-empty, of equal length, and pairwise distinct.
pub fn lagrange(x: &nd::Array1<f64>, y: &nd::Array1<f64>)
    -> NumResult<impl Fn(f64) -> f64>
{
    ensure!(!x.is_empty(), "interpolation needs at least one point");
    ensure!(
        x.len() == y.len(),
        "got {} nodes but {} values", x.len(), y.len(),
    );
    for (i, xi) in x.iter().enumerate() {
        ensure!(
            x.iter().skip(i + 1).all(|xj| xj != xi),
            "interpolation nodes must be distinct but {} is repeated", xi,
        );
    }
    let x: nd::Array1<f64> = x.clone();
    let y: nd::Array1<f64> = y.clone();
    return Ok(move |t: f64| -> f64 {
        x.iter().zip(y.iter()).enumerate()
            .map(|(i, (xi, yi))| {
                x.iter().enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(*yi, |acc, (_, xj)| acc * (t - xj) / (xi - xj))
            })
            .sum()
    });
}

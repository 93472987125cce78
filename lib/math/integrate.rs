//! Provides composite trapezoid and Gauss-Chebyshev quadrature for functions
//! given as closures, and the trapezoid rule for functions given as sampled
//! arrays.
//!
//! The closure-based rules compute
//! ```math
//! \int_a^b f(x) \,dx
//! ```
//! from `n` evaluations of `f`.

use ndarray as nd;
use num_traits::{ Float, FloatConst };
use crate::error::{ NumError, NumResult, ensure };

fn cast<X: Float>(k: usize) -> NumResult<X> {
    return X::from(k)
        .ok_or_else(|| NumError::malformed(format!("cannot represent {}", k)));
}

/// Composite trapezoid rule over `n` equal panels.
pub fn trapezoid<F, X>(f: F, a: X, b: X, n: usize) -> NumResult<X>
where
    F: Fn(X) -> X,
    X: Float,
{
    ensure!(n > 0, "trapezoid rule needs at least one panel");
    let two: X = cast(2)?;
    let h: X = (b - a) / cast(n)?;
    let mut acc: X = (f(a) + f(b)) / two;
    for k in 1..n {
        acc = acc + f(a + cast::<X>(k)? * h);
    }
    return Ok(acc * h);
}

/// Gauss-Chebyshev quadrature with `n` nodes.
///
/// Nodes are `t_i = cos((2i - 1) pi / 2n)` mapped onto `[a, b]`; each node is
/// weighted by `sqrt(1 - t_i^2)` to cancel the Chebyshev weight function, so
/// this integrates `f` itself rather than `f / sqrt(1 - t^2)`.
pub fn chebyshev<F, X>(f: F, a: X, b: X, n: usize) -> NumResult<X>
where
    F: Fn(X) -> X,
    X: Float + FloatConst,
{
    ensure!(n > 0, "Chebyshev quadrature needs at least one node");
    let one: X = X::one();
    let two: X = cast(2)?;
    let nx: X = cast(n)?;
    let mid: X = (a + b) / two;
    let half: X = (b - a) / two;
    let mut acc: X = X::zero();
    for i in 1..=n {
        let t: X = ((two * cast(i)? - one) / (two * nx) * X::PI()).cos();
        acc = acc + f(mid + half * t) * (one - t * t).sqrt();
    }
    return Ok(acc * X::PI() / nx * half);
}

/// Apply the trapezoid rule to samples `y` taken at even intervals `dx`.
pub fn trapz(y: &nd::Array1<f64>, dx: f64) -> NumResult<f64> {
    let n: usize = y.len();
    ensure!(n >= 2, "trapezoid rule needs at least two samples but got {}", n);
    return Ok((
        (y[0] + y[n - 1]) * 0.5
        + y.slice(nd::s![1..n - 1]).sum()
    ) * dx);
}

/// Apply the trapezoid rule to samples `y` taken at the (possibly uneven)
/// points `x`.
pub fn trapz_nonuniform(y: &nd::Array1<f64>, x: &nd::Array1<f64>)
    -> NumResult<f64>
{
    let n: usize = y.len();
    ensure!(n >= 2, "trapezoid rule needs at least two samples but got {}", n);
    ensure!(
        x.len() == n,
        "got {} samples but {} sample points", n, x.len(),
    );
    return Ok(
        y.windows(2).into_iter().zip(x.windows(2))
            .map(|(yk, xk)| (yk[0] + yk[1]) * (xk[1] - xk[0]) * 0.5)
            .sum()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn trapezoid_rule() {
        assert!((trapezoid(|_| 3.0, 0.0_f64, 2.0, 10).unwrap() - 6.0).abs() < 1e-12);
        assert!((trapezoid(|x| 2.0 * x, 0.0_f64, 1.0, 10).unwrap() - 1.0).abs() < 1e-12);
        assert!((trapezoid(|x| x * x, 0.0_f64, 1.0, 1000).unwrap() - 1.0 / 3.0).abs() < 1e-6);
        assert!((trapezoid(f64::sin, 0.0, PI, 1000).unwrap() - 2.0).abs() < 1e-5);
        assert!((trapezoid(|x| x, 1.0_f64, -1.0, 10).unwrap()).abs() < 1e-12);
        let single: f32 = trapezoid(|x: f32| x, 0.0_f32, 2.0, 4).unwrap();
        assert!((single - 2.0).abs() < 1e-6);
        assert!(trapezoid(|x| x, 0.0_f64, 1.0, 0).unwrap_err().is_malformed());
    }

    #[test]
    fn chebyshev_rule() {
        assert!((chebyshev(|_| 1.0, 0.0_f64, 1.0, 200).unwrap() - 1.0).abs() < 1e-4);
        assert!((chebyshev(f64::sin, 0.0, PI, 200).unwrap() - 2.0).abs() < 1e-4);
        assert!((chebyshev(f64::exp, 0.0, 1.0, 500).unwrap() - (1.0_f64.exp() - 1.0)).abs() < 1e-4);
        assert!((chebyshev(|x| x * x * x, -1.0_f64, 1.0, 50).unwrap()).abs() < 1e-12);
        assert!(chebyshev(|x| x, 0.0_f64, 1.0, 0).unwrap_err().is_malformed());
    }

    #[test]
    fn sampled() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 101);
        let y: nd::Array1<f64> = x.mapv(|xk| xk * xk);
        assert!((trapz(&y, 0.01).unwrap() - 1.0 / 3.0).abs() < 1e-4);
        assert!((trapz_nonuniform(&y, &x).unwrap() - 1.0 / 3.0).abs() < 1e-4);

        let xu = nd::array![0.0, 0.5, 2.0];
        let yu = nd::array![1.0, 1.0, 1.0];
        assert!((trapz_nonuniform(&yu, &xu).unwrap() - 2.0).abs() < 1e-12);
        assert!(trapz(&nd::array![1.0], 0.1).unwrap_err().is_malformed());
        assert!(trapz_nonuniform(&yu, &nd::array![0.0, 1.0]).unwrap_err().is_malformed());
    }
}

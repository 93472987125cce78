//! Bisection searches over a bracketed interval of the real line: one for an
//! extremum of a unimodal function, one for where a monotone function takes a
//! given value.

use crate::error::{ NumError, NumResult, Violation, check_violation, ensure };
#[cfg(feature = "config")]
use serde::{ Deserialize, Serialize };

/// Which kind of extremum to look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Options to control bisection searches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SearchOptions {
    /// Target bracket width (default 1e-6)
    pub epsilon: f64,

    /// Maximum number of halvings (default 1000)
    pub maxiters: usize,
}

impl Default for SearchOptions {
    fn default() -> Self { Self { epsilon: 1e-6, maxiters: 1000 } }
}

impl SearchOptions {
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
        return check_violation("search", self.violation());
    }
}

fn check_bracket(a: f64, b: f64) -> NumResult<()> {
    ensure!(
        a.is_finite() && b.is_finite() && a < b,
        "bracket must satisfy a < b with both finite but got [{}, {}]", a, b,
    );
    return Ok(());
}

/// Find an extremum of `f` in `[a, b]` by bisection.
///
/// At each midpoint `x`, `f(x - eps)` and `f(x + eps)` decide which half to
/// keep; `f` should have a single extremum of the requested kind in the
/// bracket.
pub fn bisection_extremum<F>(
    f: F,
    a: f64,
    b: f64,
    kind: Extremum,
    opts: &SearchOptions,
) -> NumResult<f64>
where F: Fn(f64) -> f64
{
    check_bracket(a, b)?;
    opts.check()?;
    let eps: f64 = opts.epsilon;
    let (mut lo, mut hi): (f64, f64) = (a, b);
    let mut x: f64;
    for _ in 0..opts.maxiters {
        if (hi - lo).abs() <= eps {
            return Ok((lo + hi) / 2.0);
        }
        x = (lo + hi) / 2.0;
        // `true` if the extremum lies to the right of `x`
        let rightward: bool = match kind {
            Extremum::Min => f(x - eps) > f(x + eps),
            Extremum::Max => f(x - eps) < f(x + eps),
        };
        if rightward { lo = x; } else { hi = x; }
    }
    return Err(NumError::DidNotConverge { iters: opts.maxiters });
}

/// Find `x` in `[a, b]` such that `f(x) == value` by bisection, for `f`
/// increasing on the bracket (decreasing if `backward` is `true`).
pub fn bisection_value<F>(
    f: F,
    a: f64,
    b: f64,
    value: f64,
    opts: &SearchOptions,
    backward: bool,
) -> NumResult<f64>
where F: Fn(f64) -> f64
{
    check_bracket(a, b)?;
    opts.check()?;
    let (mut lo, mut hi): (f64, f64) = (a, b);
    let mut x: f64;
    for _ in 0..opts.maxiters {
        if (hi - lo).abs() <= opts.epsilon {
            return Ok((lo + hi) / 2.0);
        }
        x = (lo + hi) / 2.0;
        if (f(x) < value) != backward { lo = x; } else { hi = x; }
    }
    return Err(NumError::DidNotConverge { iters: opts.maxiters });
}

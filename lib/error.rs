//! Provides `NumError`, the error type shared by every routine in the crate.

use thiserror::Error;

/// Failure modes of the linear-algebra and solver routines.
///
/// All of these are recoverable: callers are expected to match on the kind
/// and pick a fallback (another starting point, step size, or method).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum NumError {
    /// A structural precondition was violated (shape mismatch, non-positive
    /// tolerance or step, coefficient out of range, ...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("singular matrix")]
    SingularMatrix,

    #[error("no solution: coefficient matrix is singular")]
    NoSolution,

    #[error("did not converge after {iters} iterations")]
    DidNotConverge { iters: usize },
}
pub type NumResult<T> = Result<T, NumError>;

impl NumError {
    pub(crate) fn malformed<S>(msg: S) -> Self
    where S: Into<String>
    {
        return Self::MalformedInput(msg.into());
    }

    /// Return `true` if `self` is `MalformedInput`, regardless of message.
    pub fn is_malformed(&self) -> bool {
        return matches!(self, Self::MalformedInput(_));
    }
}

/// Return `Err(NumError::MalformedInput(msg))` unless `cond` holds.
macro_rules! ensure {
    ( $cond:expr, $( $fmt:tt )+ ) => {
        if !$cond {
            return Err($crate::error::NumError::malformed(format!($( $fmt )+)));
        }
    }
}
pub(crate) use ensure;

/// An option field that fails its constraint, as `(field, constraint, value)`.
pub(crate) type Violation = (&'static str, &'static str, String);

/// `MalformedInput` naming the first violated constraint of an options
/// struct, if there is one.
pub(crate) fn check_violation(owner: &str, violation: Option<Violation>)
    -> NumResult<()>
{
    return match violation {
        Some((field, constraint, value)) => Err(NumError::malformed(format!(
            "{} option '{}' must satisfy '{}' but got {}",
            owner, field, constraint, value,
        ))),
        None => Ok(()),
    };
}

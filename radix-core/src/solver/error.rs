use thiserror::Error;

use crate::expr::EvalError;

/// Errors that abort a solve with no partial result.
///
/// Running out of iterations is not an error; it surfaces as
/// [`Status::Exhausted`](super::Status) on the solution instead.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("invalid bracket [{a}, {b}]: endpoints must be finite with a < b")]
    InvalidBounds { a: f64, b: f64 },

    #[error("no root in bracket: f({a}) = {fa} and f({b}) = {fb} have the same sign")]
    InvalidBracket { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("seed is not finite: x0 = {x0}")]
    InvalidSeed { x0: f64 },

    #[error("derivative vanished at x = {x}: f'(x) = {dfx}")]
    DerivativeZero { x: f64, dfx: f64 },

    #[error("iteration diverged at x = {x}")]
    Diverged { x: f64 },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

//! Iterative root-finding solvers.
//!
//! Both solvers consume a fallible evaluator `Fn(f64) -> Result<f64, EvalError>`
//! and produce a [`Solution`] holding the root estimate and the full
//! per-iteration history consumed by the narrative and plot layers.

pub mod bisection;
pub mod newton;

mod config;
mod error;
mod iteration;
mod solution;

pub use config::{Config, MAX_ITERS_CEILING};
pub use error::Error;
pub use iteration::{BisectionIteration, NewtonIteration};
pub use solution::{Solution, Status};

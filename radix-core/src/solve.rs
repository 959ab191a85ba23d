//! End-to-end orchestration of a single solve request.
//!
//! Parsing, differentiation, solving, and narration happen here; plot
//! rendering stays behind the [`Outcome`] boundary so the rendering
//! backend never touches solver logic.

use thiserror::Error;

use crate::expr::{self, EvalError, Expr, ParseError};
use crate::narrative::{self, BracketSetup, SeedSetup, Step};
use crate::request::{Plan, RequestError, SolveRequest};
use crate::response::Iterations;
use crate::solver::{self, Status};

/// Hard failures that abort a solve with no partial payload.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("invalid expression: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Solver(#[from] solver::Error),
}

/// Everything one solve produces, short of the rendered plot.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The parsed expression, kept so the caller can plot the curve.
    pub expr: Expr,
    pub status: Status,
    pub root: f64,
    pub f_root: f64,
    pub iterations: Iterations,
    pub steps: Vec<Step>,
    /// The bisection bracket, when one was used.
    pub bracket: Option<(f64, f64)>,
    /// Key point of each iteration: `(c, f(c))` or `(x, f(x))`.
    pub points: Vec<(f64, f64)>,
}

/// Runs one request through parse, solve, and narrate.
///
/// # Errors
///
/// Returns the first request, parse, or solver error; an exhausted
/// iteration budget is not an error and surfaces as
/// [`Status::Exhausted`] on the outcome.
pub fn solve(request: &SolveRequest) -> Result<Outcome, Error> {
    let valid = request.validate()?;
    let expr = expr::parse(&valid.function)?;

    match valid.plan {
        Plan::Bisection { a, b } => {
            let solution = solver::bisection::solve(|x| expr.eval(x), a, b, &valid.config)?;
            let setup = BracketSetup {
                a,
                b,
                fa: expr.eval(a)?,
                fb: expr.eval(b)?,
            };
            let steps = narrative::bisection_steps(&setup, &solution, &valid.config);
            let points = solution.iterations.iter().map(|r| (r.c, r.f_c)).collect();

            Ok(Outcome {
                expr,
                status: solution.status,
                root: solution.root,
                f_root: solution.f_root,
                iterations: Iterations::Bisection(solution.iterations),
                steps,
                bracket: Some((a, b)),
                points,
            })
        }
        Plan::Newton { x0 } => {
            let deriv = expr.derivative();
            let solution =
                solver::newton::solve(|x| expr.eval(x), |x| deriv.eval(x), x0, &valid.config)?;
            let setup = SeedSetup {
                x0,
                fx0: expr.eval(x0)?,
                dfx0: deriv.eval(x0)?,
            };
            let steps = narrative::newton_steps(&setup, &solution, &valid.config);
            let points = solution.iterations.iter().map(|r| (r.x, r.f_x)).collect();

            Ok(Outcome {
                expr,
                status: solution.status,
                root: solution.root,
                f_root: solution.f_root,
                iterations: Iterations::Newton(solution.iterations),
                steps,
                bracket: None,
                points,
            })
        }
    }
}

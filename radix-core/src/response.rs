//! The outbound response payload.
//!
//! Pure composition: the assembler packages what the solver, narrative,
//! and plot layers already produced. The consumer performs no validation
//! beyond field presence, so the serialized names here are a contract.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::narrative::Step;
use crate::solve::Outcome;
use crate::solver::{BisectionIteration, NewtonIteration};

/// Iteration rows for either method, serialized with their native fields.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Iterations {
    Bisection(Vec<BisectionIteration>),
    Newton(Vec<NewtonIteration>),
}

impl Iterations {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bisection(rows) => rows.len(),
            Self::Newton(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete response payload consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResponse {
    pub root: f64,
    pub f_root: f64,
    pub iterations: Iterations,
    pub steps: Vec<Step>,
    /// Base64-encoded PNG, no data-URI prefix.
    pub plot: String,
}

/// Packages a solve outcome and its rendered plot into the response.
///
/// Iterations and steps keep the order the solver produced them in.
#[must_use]
pub fn assemble(outcome: Outcome, plot_png: &[u8]) -> SolveResponse {
    SolveResponse {
        root: outcome.root,
        f_root: outcome.f_root,
        iterations: outcome.iterations,
        steps: outcome.steps,
        plot: STANDARD.encode(plot_png),
    }
}

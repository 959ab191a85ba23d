//! Human-readable narration of a solver run.
//!
//! A pure, deterministic transform from iteration history to step
//! records: a synthetic init entry, one entry per iteration, and a
//! synthetic summary. Nothing here computes; it only formats what the
//! solver already recorded, so it unit-tests independently of any
//! rendering concern.

use serde::Serialize;

use crate::solver::{BisectionIteration, Config, NewtonIteration, Solution, Status};

/// Progress state attached to a narrative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Init,
    Calculating,
    Converged,
    Success,
}

/// One narrated phase of the solve, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based position in the narrative.
    pub step: usize,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub details: Vec<String>,
}

/// Initial bracket state narrated by the bisection init step.
#[derive(Debug, Clone, Copy)]
pub struct BracketSetup {
    pub a: f64,
    pub b: f64,
    pub fa: f64,
    pub fb: f64,
}

/// Initial seed state narrated by the Newton init step.
#[derive(Debug, Clone, Copy)]
pub struct SeedSetup {
    pub x0: f64,
    pub fx0: f64,
    pub dfx0: f64,
}

/// Narrates a bisection run: init, one step per iteration, summary.
#[must_use]
pub fn bisection_steps(
    setup: &BracketSetup,
    solution: &Solution<BisectionIteration>,
    config: &Config,
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(solution.iterations.len() + 2);

    steps.push(Step {
        step: 0,
        title: "Initialization".to_string(),
        description: format!(
            "Initial interval: [a, b] = [{:.6}, {:.6}]",
            setup.a, setup.b
        ),
        status: StepStatus::Init,
        details: vec![
            format!("f(a) = {:.6}", setup.fa),
            format!("f(b) = {:.6}", setup.fb),
            format!("f(a)·f(b) = {:.6} ≤ 0", setup.fa * setup.fb),
            "Sign change confirmed: a root lies between a and b.".to_string(),
        ],
    });

    let rows = &solution.iterations;
    for (position, row) in rows.iter().enumerate() {
        let is_last = position + 1 == rows.len();
        let status = if is_last && solution.converged() {
            StepStatus::Converged
        } else {
            StepStatus::Calculating
        };

        let mut details = vec![
            format!(
                "c = (a + b) / 2 = ({:.6} + {:.6}) / 2 = {:.6}",
                row.a, row.b, row.c
            ),
            format!("f(c) = {:.6}", row.f_c),
        ];
        // The narrowing decision is visible in the next row's bracket.
        if let Some(next) = rows.get(position + 1) {
            if next.b == row.c {
                details.push("Root lies in the left half: b = c".to_string());
            } else {
                details.push("Root lies in the right half: a = c".to_string());
            }
            details.push(format!("New interval: [{:.6}, {:.6}]", next.a, next.b));
        }
        details.push(format!("Error: {:.10}", row.error));

        steps.push(Step {
            step: 0,
            title: format!("Iteration {}", row.index),
            description: format!("c = {:.6}, f(c) = {:.6}", row.c, row.f_c),
            status,
            details,
        });
    }

    steps.push(summary(solution.status, solution.root, solution.f_root, config));
    number(steps)
}

/// Narrates a Newton-Raphson run: init, one step per iteration, summary.
#[must_use]
pub fn newton_steps(
    setup: &SeedSetup,
    solution: &Solution<NewtonIteration>,
    config: &Config,
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(solution.iterations.len() + 2);

    steps.push(Step {
        step: 0,
        title: "Initialization".to_string(),
        description: format!("Initial guess: x0 = {:.6}", setup.x0),
        status: StepStatus::Init,
        details: vec![
            format!("f(x0) = {:.6}", setup.fx0),
            format!("f'(x0) = {:.6}", setup.dfx0),
            "Update rule: x_next = x - f(x) / f'(x)".to_string(),
        ],
    });

    let rows = &solution.iterations;
    for (position, row) in rows.iter().enumerate() {
        let is_last = position + 1 == rows.len();
        let status = if is_last && solution.converged() {
            StepStatus::Converged
        } else {
            StepStatus::Calculating
        };

        let delta = row.f_x / row.df_x;
        let x_next = row.x_next();

        steps.push(Step {
            step: 0,
            title: format!("Iteration {}", row.index),
            description: format!("x = {x_next:.6}"),
            status,
            details: vec![
                format!("f(x) = f({:.6}) = {:.6}", row.x, row.f_x),
                format!("f'(x) = {:.6}", row.df_x),
                format!("Δx = f(x) / f'(x) = {delta:.6}"),
                format!("x_next = {:.6} - {:.6} = {:.6}", row.x, delta, x_next),
                format!("|Δx| = {:.10}", row.error),
            ],
        });
    }

    steps.push(summary(solution.status, solution.root, solution.f_root, config));
    number(steps)
}

fn summary(status: Status, root: f64, f_root: f64, config: &Config) -> Step {
    match status {
        Status::Converged => Step {
            step: 0,
            title: "Converged".to_string(),
            description: format!("Root found: x ≈ {root:.6}"),
            status: StepStatus::Success,
            details: vec![
                format!("Tolerance: {}", config.tolerance),
                format!("f(x) = {f_root:.10} ≈ 0"),
            ],
        },
        Status::Exhausted => Step {
            step: 0,
            title: "Iteration limit reached".to_string(),
            description: format!(
                "Tolerance was not met within {} iterations; best estimate x ≈ {root:.6}",
                config.max_iters
            ),
            status: StepStatus::Success,
            details: vec![
                format!("Last estimate: x ≈ {root:.6}"),
                format!("f(x) = {f_root:.10}"),
                "Increase max_iter or adjust the starting input.".to_string(),
            ],
        },
    }
}

fn number(mut steps: Vec<Step>) -> Vec<Step> {
    for (position, step) in steps.iter_mut().enumerate() {
        step.step = position + 1;
    }
    steps
}

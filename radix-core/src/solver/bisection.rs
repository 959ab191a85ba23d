//! Bracketing bisection solver.

use crate::expr::EvalError;

use super::{BisectionIteration, Config, Error, Solution, Status};

/// Finds a root of `f` on the bracket `[a, b]` using bisection.
///
/// The bracket must satisfy `f(a) * f(b) <= 0`; an endpoint that is
/// already an exact root converges immediately with an empty history.
/// Each iteration records the bracket before it narrows, the midpoint
/// `c`, `f(c)`, and the step error: the initial bracket width on the
/// first iteration and `|c - c_prev|` afterwards. Convergence is
/// `error <= tolerance` or `|f(c)| <= tolerance`; an exact `f(c) = 0`
/// stops immediately. Running out of iterations is not an error; the
/// solution carries [`Status::Exhausted`] and the last midpoint as the
/// best-effort root.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the endpoints
/// do not straddle a sign change, or evaluation fails.
pub fn solve<F>(
    f: F,
    a: f64,
    b: f64,
    config: &Config,
) -> Result<Solution<BisectionIteration>, Error>
where
    F: Fn(f64) -> Result<f64, EvalError>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    if !a.is_finite() || !b.is_finite() || a >= b {
        return Err(Error::InvalidBounds { a, b });
    }

    let mut a = a;
    let mut b = b;
    let mut fa = f(a)?;
    let fb = f(b)?;

    if fa == 0.0 {
        return Ok(endpoint_root(a, fa));
    }
    if fb == 0.0 {
        return Ok(endpoint_root(b, fb));
    }
    if fa.signum() == fb.signum() {
        return Err(Error::InvalidBracket { a, b, fa, fb });
    }

    let mut iterations = Vec::new();
    let mut c_prev: Option<f64> = None;
    let mut c = a;
    let mut fc = fa;

    for index in 1..=config.max_iters {
        c = 0.5 * (a + b);
        fc = f(c)?;

        let error = match c_prev {
            Some(prev) => (c - prev).abs(),
            None => (b - a).abs(),
        };

        iterations.push(BisectionIteration {
            index,
            a,
            b,
            c,
            f_c: fc,
            error,
        });

        if fc == 0.0 || error <= config.tolerance || fc.abs() <= config.tolerance {
            return Ok(Solution {
                status: Status::Converged,
                root: c,
                f_root: fc,
                iterations,
            });
        }

        if fa.signum() != fc.signum() {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
        c_prev = Some(c);
    }

    Ok(Solution {
        status: Status::Exhausted,
        root: c,
        f_root: fc,
        iterations,
    })
}

fn endpoint_root(x: f64, fx: f64) -> Solution<BisectionIteration> {
    Solution {
        status: Status::Converged,
        root: x,
        f_root: fx,
        iterations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn quadratic(x: f64) -> Result<f64, EvalError> {
        Ok(x * x - 2.0)
    }

    #[test]
    fn finds_sqrt_two() {
        let config = Config {
            tolerance: 1e-6,
            max_iters: 100,
        };
        let solution = solve(quadratic, 0.0, 2.0, &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, std::f64::consts::SQRT_2, epsilon = 1e-5);
        assert_abs_diff_eq!(solution.f_root, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn records_strictly_increasing_indices() {
        let config = Config {
            tolerance: 1e-10,
            max_iters: 100,
        };
        let solution = solve(quadratic, 0.0, 2.0, &config).expect("should solve");

        for (position, row) in solution.iterations.iter().enumerate() {
            assert_eq!(row.index, position + 1);
        }
    }

    #[test]
    fn first_error_is_initial_bracket_width() {
        let config = Config::default();
        let solution = solve(quadratic, 0.0, 2.0, &config).expect("should solve");

        assert_relative_eq!(solution.iterations[0].error, 2.0);
    }

    #[test]
    fn later_errors_are_midpoint_deltas() {
        let config = Config {
            tolerance: 1e-10,
            max_iters: 100,
        };
        let solution = solve(quadratic, 0.0, 2.0, &config).expect("should solve");

        let rows = &solution.iterations;
        for pair in rows.windows(2) {
            assert_relative_eq!(pair[1].error, (pair[1].c - pair[0].c).abs());
        }
    }

    #[test]
    fn stops_on_exact_zero_midpoint() {
        let config = Config {
            tolerance: 1e-15,
            max_iters: 100,
        };
        let solution =
            solve(|x| Ok(x), -1.0, 1.0, &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iterations.len(), 1);
        assert_eq!(solution.root, 0.0);
    }

    #[test]
    fn endpoint_root_converges_with_empty_history() {
        let solution =
            solve(|x| Ok(x), 0.0, 2.0, &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.root, 0.0);
        assert!(solution.iterations.is_empty());
    }

    #[test]
    fn errors_on_same_sign_bracket() {
        let result = solve(|x| Ok(x * x), 1.0, 2.0, &Config::default());

        assert!(matches!(result, Err(Error::InvalidBracket { .. })));
    }

    #[test]
    fn errors_on_bad_bounds() {
        let result = solve(quadratic, f64::NAN, 2.0, &Config::default());
        assert!(matches!(result, Err(Error::InvalidBounds { .. })));

        let result = solve(quadratic, 2.0, 0.0, &Config::default());
        assert!(matches!(result, Err(Error::InvalidBounds { .. })));
    }

    #[test]
    fn errors_on_invalid_config() {
        let config = Config {
            tolerance: -1.0,
            ..Config::default()
        };
        let result = solve(quadratic, 0.0, 2.0, &config);

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn exhausts_small_iteration_budget() {
        let config = Config {
            tolerance: 1e-15,
            max_iters: 3,
        };
        let solution = solve(quadratic, 0.0, 2.0, &config).expect("should solve");

        assert_eq!(solution.status, Status::Exhausted);
        assert_eq!(solution.iterations.len(), 3);
        // Best-effort root is the last midpoint.
        assert_relative_eq!(solution.root, solution.iterations[2].c);
    }

    #[test]
    fn propagates_evaluation_errors() {
        let result = solve(
            |x| {
                if x < 1.0 {
                    Err(EvalError::LogDomain { x })
                } else {
                    Ok(x.ln() - 0.5)
                }
            },
            0.5,
            2.0,
            &Config::default(),
        );

        assert!(matches!(result, Err(Error::Eval(_))));
    }
}

//! Newton-Raphson solver.

use crate::expr::EvalError;

use super::{Config, Error, NewtonIteration, Solution, Status};

/// Derivative magnitudes below this floor are treated as vanishing;
/// dividing by them is never attempted.
pub const DERIVATIVE_FLOOR: f64 = 1e-12;

/// Estimates beyond this magnitude are reported as divergence.
pub const DIVERGENCE_BOUND: f64 = 1e12;

/// Finds a root of `f` by Newton-Raphson iteration from the seed `x0`.
///
/// Each iteration records the estimate it started from, `f(x)`,
/// `f'(x)`, and the step error `|x_next - x|`. Convergence is
/// `error <= tolerance` or an exact `f(x_next) = 0`, checked after the
/// iteration is recorded. Running out of iterations is not an error;
/// the solution carries [`Status::Exhausted`] and the last estimate as
/// the best-effort root.
///
/// # Errors
///
/// Returns [`Error::DerivativeZero`] when `|f'(x)|` falls below
/// [`DERIVATIVE_FLOOR`], [`Error::Diverged`] when the estimate leaves
/// [`-DIVERGENCE_BOUND`, `DIVERGENCE_BOUND`] or `f` stops being finite
/// along the path, and an evaluation error if `f` or `f'` hits a domain
/// error.
pub fn solve<F, D>(
    f: F,
    df: D,
    x0: f64,
    config: &Config,
) -> Result<Solution<NewtonIteration>, Error>
where
    F: Fn(f64) -> Result<f64, EvalError>,
    D: Fn(f64) -> Result<f64, EvalError>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    if !x0.is_finite() {
        return Err(Error::InvalidSeed { x0 });
    }

    let mut iterations = Vec::new();
    let mut x = x0;
    let mut residual = f64::NAN;

    for index in 1..=config.max_iters {
        let fx = f(x)?;
        let dfx = df(x)?;

        if dfx.abs() < DERIVATIVE_FLOOR {
            return Err(Error::DerivativeZero { x, dfx });
        }

        let x_next = x - fx / dfx;
        if !x_next.is_finite() || x_next.abs() > DIVERGENCE_BOUND {
            return Err(Error::Diverged { x: x_next });
        }

        let error = (x_next - x).abs();
        iterations.push(NewtonIteration {
            index,
            x,
            f_x: fx,
            df_x: dfx,
            error,
        });

        residual = match f(x_next) {
            Ok(value) => value,
            // Non-finite f along the iteration path is divergence, not a
            // caller mistake.
            Err(EvalError::NonFinite { x }) => return Err(Error::Diverged { x }),
            Err(e) => return Err(e.into()),
        };

        if error <= config.tolerance || residual == 0.0 {
            return Ok(Solution {
                status: Status::Converged,
                root: x_next,
                f_root: residual,
                iterations,
            });
        }

        x = x_next;
    }

    Ok(Solution {
        status: Status::Exhausted,
        root: x,
        f_root: residual,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn cubic(x: f64) -> Result<f64, EvalError> {
        Ok(x * x * x - x - 2.0)
    }

    fn cubic_prime(x: f64) -> Result<f64, EvalError> {
        Ok(3.0 * x * x - 1.0)
    }

    #[test]
    fn finds_cubic_root() {
        let config = Config {
            tolerance: 1e-8,
            max_iters: 50,
        };
        let solution = solve(cubic, cubic_prime, 1.5, &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, 1.521_379_706_804_567_6, epsilon = 1e-6);
        assert!(solution.iterations.len() < 10);
    }

    #[test]
    fn finds_sqrt_two() {
        let config = Config {
            tolerance: 1e-6,
            max_iters: 50,
        };
        let solution = solve(
            |x| Ok(x * x - 2.0),
            |x| Ok(2.0 * x),
            1.0,
            &config,
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn records_strictly_increasing_indices() {
        let config = Config {
            tolerance: 1e-12,
            max_iters: 50,
        };
        let solution = solve(cubic, cubic_prime, 1.5, &config).expect("should solve");

        for (position, row) in solution.iterations.iter().enumerate() {
            assert_eq!(row.index, position + 1);
        }
    }

    #[test]
    fn errors_on_zero_derivative_at_seed() {
        let result = solve(
            |x| Ok(x * x),
            |x| Ok(2.0 * x),
            0.0,
            &Config::default(),
        );

        assert!(matches!(
            result,
            Err(Error::DerivativeZero { x, .. }) if x == 0.0
        ));
    }

    #[test]
    fn no_real_root_never_falsely_converges() {
        // x^2 + 1: the Newton step is always at least 1, so the solver
        // can only exhaust its budget or diverge.
        let config = Config {
            tolerance: 1e-10,
            max_iters: 40,
        };
        let result = solve(
            |x| Ok(x * x + 1.0),
            |x| Ok(2.0 * x),
            0.5,
            &config,
        );

        match result {
            Ok(solution) => {
                assert_eq!(solution.status, Status::Exhausted);
                assert_eq!(solution.iterations.len(), 40);
                assert!(solution.root.is_finite());
            }
            Err(error) => {
                assert!(matches!(
                    error,
                    Error::Diverged { .. } | Error::DerivativeZero { .. }
                ));
            }
        }
    }

    #[test]
    fn diverges_on_cube_root() {
        // Newton on cbrt(x) overshoots to -2x every step, so |x| doubles
        // until it crosses the divergence bound.
        let config = Config {
            tolerance: 1e-6,
            max_iters: 100,
        };
        let result = solve(
            |x| Ok(x.cbrt()),
            |x| Ok(1.0 / (3.0 * x.cbrt().powi(2))),
            1.0,
            &config,
        );

        assert!(matches!(result, Err(Error::Diverged { .. })));
    }

    #[test]
    fn errors_on_non_finite_seed() {
        let result = solve(cubic, cubic_prime, f64::INFINITY, &Config::default());

        assert!(matches!(result, Err(Error::InvalidSeed { .. })));
    }

    #[test]
    fn propagates_evaluation_errors_at_seed() {
        let result = solve(
            |x| Err(EvalError::SqrtDomain { x }),
            |_| Ok(1.0),
            -1.0,
            &Config::default(),
        );

        assert!(matches!(result, Err(Error::Eval(_))));
    }
}

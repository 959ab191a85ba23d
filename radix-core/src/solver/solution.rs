/// Indicates whether the solver converged or ran out of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,
    /// Reached the iteration limit; the root is the best estimate seen.
    Exhausted,
}

/// The result of a solver run, generic over the iteration row type.
#[derive(Debug, Clone)]
pub struct Solution<R> {
    /// Final solver status.
    pub status: Status,
    /// Best estimate of the root.
    pub root: f64,
    /// Residual at the reported root estimate.
    pub f_root: f64,
    /// Full iteration history, in execution order.
    pub iterations: Vec<R>,
}

impl<R> Solution<R> {
    /// True when the run satisfied the convergence criterion.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

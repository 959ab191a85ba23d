/// Hard ceiling on the iteration budget, bounding worst-case latency
/// regardless of what a request asks for.
pub const MAX_ITERS_CEILING: usize = 1000;

/// Configuration shared by both solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Convergence tolerance applied to the step error and the residual.
    pub tolerance: f64,
    /// Iteration budget; capped at [`MAX_ITERS_CEILING`].
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iters: 100,
        }
    }
}

impl Config {
    /// Validates the tolerance and iteration budget.
    ///
    /// # Errors
    ///
    /// Returns a reason string if the tolerance is non-positive or
    /// non-finite, or the iteration budget is zero or above the ceiling.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err("tolerance must be finite and positive");
        }
        if self.max_iters == 0 {
            return Err("max_iters must be at least 1");
        }
        if self.max_iters > MAX_ITERS_CEILING {
            return Err("max_iters exceeds the server ceiling");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance() {
        let config = Config {
            tolerance: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            tolerance: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_iteration_budget() {
        let config = Config {
            max_iters: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_iters: MAX_ITERS_CEILING + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}

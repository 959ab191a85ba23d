//! The inbound solve request and its validation.
//!
//! Clients send numeric fields as either JSON numbers or numeric
//! strings, so every numeric field deserializes leniently and is
//! resolved with a field-specific error message during validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solver::{Config, MAX_ITERS_CEILING};

/// Rejections raised while validating a raw request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("field '{field}' must be a number, got '{value}'")]
    NotNumeric { field: &'static str, value: String },

    #[error("tolerance must be a positive number")]
    NonPositiveTolerance,

    #[error("max_iter must be at least 1")]
    ZeroIterations,

    #[error("method must be \"bisection\" or \"newton\", got '{method}'")]
    UnknownMethod { method: String },

    #[error("bisection requires both 'a' and 'b'")]
    MissingBounds,

    #[error("'a' must be less than 'b'")]
    InvertedBounds,

    #[error("newton requires 'x0'")]
    MissingSeed,
}

/// A numeric field that tolerates both JSON numbers and numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn resolve(&self, field: &'static str) -> Result<f64, RequestError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| RequestError::NotNumeric {
                        field,
                        value: text.clone(),
                    })?
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RequestError::NotNumeric {
                field,
                value: value.to_string(),
            })
        }
    }
}

/// The raw solve request, exactly as posted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub function: String,
    pub method: String,
    pub tolerance: Option<Numeric>,
    pub max_iter: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x0: Option<Numeric>,
}

/// Method-specific inputs recovered from a valid request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plan {
    Bisection { a: f64, b: f64 },
    Newton { x0: f64 },
}

/// A request that passed validation and is ready to solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub function: String,
    pub plan: Plan,
    pub config: Config,
}

impl SolveRequest {
    /// Validates field presence, numeric ranges, and method shape.
    ///
    /// The iteration budget is clamped to [`MAX_ITERS_CEILING`] rather
    /// than rejected, bounding worst-case latency server-side.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] naming the first offending field.
    pub fn validate(&self) -> Result<ValidRequest, RequestError> {
        let tolerance = self
            .tolerance
            .as_ref()
            .ok_or(RequestError::MissingField { field: "tolerance" })?
            .resolve("tolerance")?;
        if tolerance <= 0.0 {
            return Err(RequestError::NonPositiveTolerance);
        }

        let max_iter = self
            .max_iter
            .as_ref()
            .ok_or(RequestError::MissingField { field: "max_iter" })?
            .resolve("max_iter")?;
        if max_iter < 1.0 {
            return Err(RequestError::ZeroIterations);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_iters = (max_iter as usize).min(MAX_ITERS_CEILING);

        let plan = match self.method.as_str() {
            "bisection" => {
                let (Some(a), Some(b)) = (self.a.as_ref(), self.b.as_ref()) else {
                    return Err(RequestError::MissingBounds);
                };
                let a = a.resolve("a")?;
                let b = b.resolve("b")?;
                if a >= b {
                    return Err(RequestError::InvertedBounds);
                }
                Plan::Bisection { a, b }
            }
            "newton" => {
                let Some(x0) = self.x0.as_ref() else {
                    return Err(RequestError::MissingSeed);
                };
                Plan::Newton {
                    x0: x0.resolve("x0")?,
                }
            }
            other => {
                return Err(RequestError::UnknownMethod {
                    method: other.to_string(),
                });
            }
        };

        Ok(ValidRequest {
            function: self.function.clone(),
            plan,
            config: Config {
                tolerance,
                max_iters,
            },
        })
    }
}

impl Default for SolveRequest {
    /// A template request, served as the `/schema` document.
    fn default() -> Self {
        Self {
            function: "x**3 - x - 2".to_string(),
            method: "bisection".to_string(),
            tolerance: Some(Numeric::Number(1e-6)),
            max_iter: Some(Numeric::Number(100.0)),
            a: Some(Numeric::Number(1.0)),
            b: Some(Numeric::Number(2.0)),
            x0: None,
        }
    }
}

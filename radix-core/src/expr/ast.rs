use std::fmt;

use thiserror::Error;

/// Whitelisted single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm.
    Log,
    Sqrt,
    Abs,
}

impl Function {
    /// Resolves a whitelisted function name, or `None` for anything else.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "log" | "ln" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }
}

/// A parsed expression tree over the single variable `x`.
///
/// Construction goes through [`parse`](super::parse), which only ever
/// produces nodes from this fixed vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

/// Errors raised while evaluating an expression at a point.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error("log of a non-positive value at x = {x}")]
    LogDomain { x: f64 },

    #[error("square root of a negative value at x = {x}")]
    SqrtDomain { x: f64 },

    #[error("division by zero at x = {x}")]
    DivisionByZero { x: f64 },

    #[error("expression is not finite at x = {x}")]
    NonFinite { x: f64 },
}

impl Expr {
    /// Evaluates the expression at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error when evaluation hits a domain error at `x` (log or
    /// square root of a negative value, division by zero) or when the
    /// result is not a finite number.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = self.eval_node(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite { x })
        }
    }

    fn eval_node(&self, x: f64) -> Result<f64, EvalError> {
        let value = match self {
            Self::Const(c) => *c,
            Self::Var => x,
            Self::Neg(u) => -u.eval_node(x)?,
            Self::Add(u, v) => u.eval_node(x)? + v.eval_node(x)?,
            Self::Sub(u, v) => u.eval_node(x)? - v.eval_node(x)?,
            Self::Mul(u, v) => u.eval_node(x)? * v.eval_node(x)?,
            Self::Div(u, v) => {
                let denominator = v.eval_node(x)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero { x });
                }
                u.eval_node(x)? / denominator
            }
            Self::Pow(u, v) => u.eval_node(x)?.powf(v.eval_node(x)?),
            Self::Call(function, u) => {
                let arg = u.eval_node(x)?;
                match function {
                    Function::Sin => arg.sin(),
                    Function::Cos => arg.cos(),
                    Function::Tan => arg.tan(),
                    Function::Exp => arg.exp(),
                    Function::Log => {
                        if arg <= 0.0 {
                            return Err(EvalError::LogDomain { x });
                        }
                        arg.ln()
                    }
                    Function::Sqrt => {
                        if arg < 0.0 {
                            return Err(EvalError::SqrtDomain { x });
                        }
                        arg.sqrt()
                    }
                    Function::Abs => arg.abs(),
                }
            }
        };
        Ok(value)
    }

    /// Returns true if any node references the variable.
    #[must_use]
    pub fn depends_on_x(&self) -> bool {
        match self {
            Self::Const(_) => false,
            Self::Var => true,
            Self::Neg(u) | Self::Call(_, u) => u.depends_on_x(),
            Self::Add(u, v)
            | Self::Sub(u, v)
            | Self::Mul(u, v)
            | Self::Div(u, v)
            | Self::Pow(u, v) => u.depends_on_x() || v.depends_on_x(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{c}"),
            Self::Var => write!(f, "x"),
            Self::Neg(u) => write!(f, "-({u})"),
            Self::Add(u, v) => write!(f, "({u} + {v})"),
            Self::Sub(u, v) => write!(f, "({u} - {v})"),
            Self::Mul(u, v) => write!(f, "({u} * {v})"),
            Self::Div(u, v) => write!(f, "({u} / {v})"),
            Self::Pow(u, v) => write!(f, "({u} ^ {v})"),
            Self::Call(function, u) => write!(f, "{}({u})", function.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn var() -> Box<Expr> {
        Box::new(Expr::Var)
    }

    #[test]
    fn evaluates_arithmetic() {
        // x * (x + 2)
        let expr = Expr::Mul(
            var(),
            Box::new(Expr::Add(var(), Box::new(Expr::Const(2.0)))),
        );

        assert_relative_eq!(expr.eval(3.0).unwrap(), 15.0);
        assert_relative_eq!(expr.eval(-2.0).unwrap(), 0.0);
    }

    #[test]
    fn evaluates_functions() {
        let expr = Expr::Call(Function::Sin, var());
        assert_relative_eq!(
            expr.eval(std::f64::consts::FRAC_PI_2).unwrap(),
            1.0,
            epsilon = 1e-12
        );

        let expr = Expr::Call(Function::Sqrt, var());
        assert_relative_eq!(expr.eval(9.0).unwrap(), 3.0);
    }

    #[test]
    fn errors_on_log_domain() {
        let expr = Expr::Call(Function::Log, var());
        assert_eq!(expr.eval(-1.0), Err(EvalError::LogDomain { x: -1.0 }));
        assert_eq!(expr.eval(0.0), Err(EvalError::LogDomain { x: 0.0 }));
    }

    #[test]
    fn errors_on_sqrt_domain() {
        let expr = Expr::Call(Function::Sqrt, var());
        assert_eq!(expr.eval(-4.0), Err(EvalError::SqrtDomain { x: -4.0 }));
    }

    #[test]
    fn errors_on_division_by_zero() {
        let expr = Expr::Div(Box::new(Expr::Const(1.0)), var());
        assert_eq!(expr.eval(0.0), Err(EvalError::DivisionByZero { x: 0.0 }));
    }

    #[test]
    fn errors_on_overflow_to_infinity() {
        // exp(x) overflows for large x
        let expr = Expr::Call(Function::Exp, var());
        assert_eq!(expr.eval(1000.0), Err(EvalError::NonFinite { x: 1000.0 }));
    }

    #[test]
    fn reports_variable_dependence() {
        assert!(Expr::Var.depends_on_x());
        assert!(!Expr::Const(4.0).depends_on_x());
        assert!(
            Expr::Pow(Box::new(Expr::Const(2.0)), var()).depends_on_x()
        );
    }
}

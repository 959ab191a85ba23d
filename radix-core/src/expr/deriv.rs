//! Symbolic differentiation of parsed expression trees.
//!
//! The derivative is built structurally from the usual rules with light
//! constant folding, so Newton's method evaluates an exact `f'` rather
//! than a finite-difference approximation.

use super::{Expr, Function};

impl Expr {
    /// Returns the symbolic first derivative with respect to `x`.
    #[must_use]
    pub fn derivative(&self) -> Expr {
        match self {
            Self::Const(_) => Expr::Const(0.0),
            Self::Var => Expr::Const(1.0),
            Self::Neg(u) => neg(u.derivative()),
            Self::Add(u, v) => add(u.derivative(), v.derivative()),
            Self::Sub(u, v) => sub(u.derivative(), v.derivative()),
            Self::Mul(u, v) => add(
                mul(u.derivative(), (**v).clone()),
                mul((**u).clone(), v.derivative()),
            ),
            Self::Div(u, v) => div(
                sub(
                    mul(u.derivative(), (**v).clone()),
                    mul((**u).clone(), v.derivative()),
                ),
                pow((**v).clone(), Expr::Const(2.0)),
            ),
            Self::Pow(u, v) => diff_pow(u, v),
            Self::Call(function, u) => diff_call(*function, u),
        }
    }
}

fn diff_pow(u: &Expr, v: &Expr) -> Expr {
    match (u, v) {
        // u^n with constant n: n * u^(n-1) * u'
        (u, Expr::Const(n)) => mul(
            mul(Expr::Const(*n), pow(u.clone(), Expr::Const(n - 1.0))),
            u.derivative(),
        ),
        // a^v with constant base: a^v * ln(a) * v'
        (Expr::Const(a), v) => mul(
            mul(
                pow(Expr::Const(*a), v.clone()),
                call(Function::Log, Expr::Const(*a)),
            ),
            v.derivative(),
        ),
        // General u^v: u^v * (v' * ln(u) + v * u' / u)
        (u, v) => mul(
            pow(u.clone(), v.clone()),
            add(
                mul(v.derivative(), call(Function::Log, u.clone())),
                div(mul(v.clone(), u.derivative()), u.clone()),
            ),
        ),
    }
}

fn diff_call(function: Function, u: &Expr) -> Expr {
    let inner = u.derivative();
    match function {
        Function::Sin => mul(call(Function::Cos, u.clone()), inner),
        Function::Cos => neg(mul(call(Function::Sin, u.clone()), inner)),
        Function::Tan => div(
            inner,
            pow(call(Function::Cos, u.clone()), Expr::Const(2.0)),
        ),
        Function::Exp => mul(call(Function::Exp, u.clone()), inner),
        Function::Log => div(inner, u.clone()),
        Function::Sqrt => div(
            inner,
            mul(Expr::Const(2.0), call(Function::Sqrt, u.clone())),
        ),
        // d|u|/dx = u * u' / |u|, undefined at u = 0 as it should be
        Function::Abs => div(
            mul(u.clone(), inner),
            call(Function::Abs, u.clone()),
        ),
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Const(c) if *c == 0.0)
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Const(c) if *c == 1.0)
}

// Folding constructors keep derivative trees shallow; without them the
// product and chain rules bury the result under 0*u and u^1 noise.

fn add(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, v) if is_zero(&u) => v,
        (u, v) if is_zero(&v) => u,
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
        (u, v) => Expr::Add(Box::new(u), Box::new(v)),
    }
}

fn sub(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, v) if is_zero(&v) => u,
        (u, v) if is_zero(&u) => neg(v),
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
        (u, v) => Expr::Sub(Box::new(u), Box::new(v)),
    }
}

fn mul(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, _) if is_zero(&u) => Expr::Const(0.0),
        (_, v) if is_zero(&v) => Expr::Const(0.0),
        (u, v) if is_one(&u) => v,
        (u, v) if is_one(&v) => u,
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
        (u, v) => Expr::Mul(Box::new(u), Box::new(v)),
    }
}

fn div(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, v) if is_zero(&u) && !is_zero(&v) => Expr::Const(0.0),
        (u, v) if is_one(&v) => u,
        (u, v) => Expr::Div(Box::new(u), Box::new(v)),
    }
}

fn pow(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, v) if is_one(&v) => u,
        (_, v) if is_zero(&v) => Expr::Const(1.0),
        (u, v) => Expr::Pow(Box::new(u), Box::new(v)),
    }
}

fn neg(u: Expr) -> Expr {
    match u {
        Expr::Const(c) => Expr::Const(-c),
        u => Expr::Neg(Box::new(u)),
    }
}

fn call(function: Function, u: Expr) -> Expr {
    Expr::Call(function, Box::new(u))
}

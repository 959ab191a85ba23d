use serde::Serialize;

/// One row of bisection solver state, captured before the bracket narrows.
///
/// `error` is the initial bracket width `|b - a|` on the first row and
/// the midpoint delta `|c - c_prev|` afterwards, so it is always a
/// number and never null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BisectionIteration {
    /// 1-based iteration index.
    pub index: usize,
    pub a: f64,
    pub b: f64,
    /// Midpoint of the current bracket.
    pub c: f64,
    pub f_c: f64,
    pub error: f64,
}

/// One row of Newton-Raphson solver state.
///
/// `x` is the estimate the iteration started from; `error` is the size
/// of the step it took, `|x_next - x|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewtonIteration {
    /// 1-based iteration index.
    pub index: usize,
    pub x: f64,
    pub f_x: f64,
    pub df_x: f64,
    pub error: f64,
}

impl NewtonIteration {
    /// The estimate this iteration stepped to.
    #[must_use]
    pub fn x_next(&self) -> f64 {
        self.x - self.f_x / self.df_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_contract_field_names() {
        let row = BisectionIteration {
            index: 1,
            a: 0.0,
            b: 2.0,
            c: 1.0,
            f_c: -1.0,
            error: 2.0,
        };
        let json = serde_json::to_value(row).unwrap();
        for field in ["index", "a", "b", "c", "f_c", "error"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }

        let row = NewtonIteration {
            index: 1,
            x: 1.5,
            f_x: -0.125,
            df_x: 5.75,
            error: 0.02,
        };
        let json = serde_json::to_value(row).unwrap();
        for field in ["index", "x", "f_x", "df_x", "error"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}

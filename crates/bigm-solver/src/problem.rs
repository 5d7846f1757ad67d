use crate::error::LpError;

/// A linear program as the caller writes it: any objective sense, mixed
/// constraint relations and per-variable sign restrictions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawLp {
    /// Objective coefficients, one per original variable
    pub cost: Vec<f64>,
    /// Constraint matrix, one row per constraint
    pub constraints: Vec<Vec<f64>>,
    /// Right-hand side, one entry per constraint
    pub rhs: Vec<f64>,
    /// Whether to minimize or maximize
    #[cfg_attr(feature = "serde", serde(default))]
    pub sense: Sense,
    /// Relation of each constraint row; empty means all `<=`
    #[cfg_attr(feature = "serde", serde(default))]
    pub relations: Vec<ConstraintOp>,
    /// Sign class of each variable; empty means all non-negative
    #[cfg_attr(feature = "serde", serde(default))]
    pub signs: Vec<VariableSign>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "min", alias = "minimize"))]
    Minimize,
    #[cfg_attr(feature = "serde", serde(rename = "max", alias = "maximize"))]
    Maximize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "le"))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "ge"))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "=", alias = "eq"))]
    Eq,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableSign {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = ">=0", alias = "nonneg"))]
    NonNegative,
    #[cfg_attr(feature = "serde", serde(rename = "<=0", alias = "nonpos"))]
    NonPositive,
    #[cfg_attr(feature = "serde", serde(rename = "free"))]
    Free,
}

impl Sense {
    /// Factor turning a minimization value into a value in this sense.
    pub fn sign(self) -> f64 {
        match self {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        }
    }
}

impl ConstraintOp {
    /// The relation obtained after multiplying both sides by -1.
    pub fn flipped(self) -> Self {
        match self {
            ConstraintOp::Le => ConstraintOp::Ge,
            ConstraintOp::Ge => ConstraintOp::Le,
            ConstraintOp::Eq => ConstraintOp::Eq,
        }
    }
}

impl RawLp {
    pub fn new(cost: Vec<f64>, constraints: Vec<Vec<f64>>, rhs: Vec<f64>) -> Self {
        Self {
            cost,
            constraints,
            rhs,
            sense: Sense::Minimize,
            relations: Vec::new(),
            signs: Vec::new(),
        }
    }

    pub fn maximize(self) -> Self {
        self.with_sense(Sense::Maximize)
    }

    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    pub fn with_relations(mut self, relations: Vec<ConstraintOp>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_signs(mut self, signs: Vec<VariableSign>) -> Self {
        self.signs = signs;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.cost.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }

    /// Relation of row `i`, falling back to `<=` when none were given.
    pub fn relation(&self, i: usize) -> ConstraintOp {
        self.relations.get(i).copied().unwrap_or_default()
    }

    /// Sign class of variable `j`, falling back to non-negative when none were given.
    pub fn sign(&self, j: usize) -> VariableSign {
        self.signs.get(j).copied().unwrap_or_default()
    }

    /// Checks that every dimension agrees and that all data is finite.
    pub fn validate(&self) -> Result<(), LpError> {
        let n = self.num_variables();
        let m = self.num_constraints();

        if m == 0 {
            return Err(LpError::shape("constraints", 1, 0));
        }
        if self.constraints.len() != m {
            return Err(LpError::shape("constraint rows", m, self.constraints.len()));
        }
        if !self.relations.is_empty() && self.relations.len() != m {
            return Err(LpError::shape("constraint relations", m, self.relations.len()));
        }
        if !self.signs.is_empty() && self.signs.len() != n {
            return Err(LpError::shape("variable signs", n, self.signs.len()));
        }
        for (i, row) in self.constraints.iter().enumerate() {
            if row.len() != n {
                return Err(LpError::shape(format!("constraint row {}", i), n, row.len()));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(LpError::NonFinite {
                    what: format!("constraint row {}", i),
                });
            }
        }
        if self.cost.iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite { what: "cost".to_string() });
        }
        if self.rhs.iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite { what: "rhs".to_string() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_classes() {
        let problem = RawLp::new(vec![1.0, 2.0], vec![vec![1.0, 1.0]], vec![3.0]);

        assert_eq!(problem.sense, Sense::Minimize);
        assert_eq!(problem.relation(0), ConstraintOp::Le);
        assert_eq!(problem.sign(1), VariableSign::NonNegative);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let problem = RawLp::new(vec![1.0, 2.0], vec![vec![1.0, 1.0], vec![1.0]], vec![3.0, 4.0]);

        assert_eq!(
            problem.validate(),
            Err(LpError::ShapeMismatch {
                what: "constraint row 1".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_rhs_and_rows_must_agree() {
        let problem = RawLp::new(vec![1.0], vec![vec![1.0], vec![2.0]], vec![3.0]);
        assert!(matches!(problem.validate(), Err(LpError::ShapeMismatch { .. })));

        let problem = RawLp::new(vec![1.0], vec![vec![1.0]], vec![3.0])
            .with_relations(vec![ConstraintOp::Le, ConstraintOp::Ge]);
        assert!(matches!(problem.validate(), Err(LpError::ShapeMismatch { .. })));

        let problem = RawLp::new(vec![1.0], vec![vec![1.0]], vec![3.0])
            .with_signs(vec![VariableSign::Free, VariableSign::Free]);
        assert!(matches!(problem.validate(), Err(LpError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_problem_without_constraints_is_rejected() {
        let problem = RawLp::new(vec![1.0, 2.0], vec![], vec![]);

        assert_eq!(
            problem.validate(),
            Err(LpError::ShapeMismatch {
                what: "constraints".to_string(),
                expected: 1,
                found: 0,
            })
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let problem = RawLp::new(vec![f64::NAN], vec![vec![1.0]], vec![3.0]);
        assert_eq!(
            problem.validate(),
            Err(LpError::NonFinite { what: "cost".to_string() })
        );
    }

    #[test]
    fn test_flipped_relation() {
        assert_eq!(ConstraintOp::Le.flipped(), ConstraintOp::Ge);
        assert_eq!(ConstraintOp::Ge.flipped(), ConstraintOp::Le);
        assert_eq!(ConstraintOp::Eq.flipped(), ConstraintOp::Eq);
    }
}

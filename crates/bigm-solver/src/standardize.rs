use crate::error::LpError;
use crate::problem::{ConstraintOp, RawLp, Sense, VariableSign};

/// Default Big-M penalty for artificial variables.
///
/// This is a fixed heuristic: if the problem data is scaled so that a
/// penalty of this size no longer dominates the real costs, the solver can
/// report a wrong optimum instead of failing. Pass a larger value through
/// [`standardize`] or `Solver::with_big_m` for such problems.
pub const DEFAULT_BIG_M: f64 = 1e6;

/// Where a canonical column came from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Original variable, negated when it was declared non-positive
    Original { variable: usize, negated: bool },
    /// Negative half of a split free variable
    FreeCompanion { variable: usize },
    /// Surplus of a `>=` row
    Surplus { row: usize },
    /// Slack of a `<=` row
    Slack { row: usize },
    /// Artificial of a `>=` or `=` row, penalized with Big-M
    Artificial { row: usize },
}

/// An LP in canonical form: minimize `cost · x` subject to
/// `constraints · x = rhs`, `x >= 0`, `rhs >= 0`.
///
/// The columns named by `basic` form an identity sub-matrix, so they give an
/// initial basic feasible solution of the Big-M problem.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalLp {
    pub cost: Vec<f64>,
    pub constraints: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    /// Column basic in each row at initialization
    pub basic: Vec<usize>,
    /// Provenance of every column
    pub columns: Vec<ColumnKind>,
    /// Sense of the problem this was derived from, used for reporting
    pub sense: Sense,
    /// Number of variables of the problem this was derived from
    pub num_original: usize,
}

/// Converts `problem` into canonical form.
///
/// Columns are laid out as: original variables, free-variable companions,
/// surplus columns, then one slack or artificial column per row in row order.
/// Rows with a negative right-hand side are negated first, which swaps `<=`
/// and `>=`.
pub fn standardize(problem: &RawLp, big_m: f64) -> Result<CanonicalLp, LpError> {
    problem.validate()?;
    if !big_m.is_finite() || big_m <= 0.0 {
        return Err(LpError::InvalidBigM(big_m));
    }

    let n_orig = problem.num_variables();
    let m = problem.num_constraints();

    // Normalize rows so that every rhs is non-negative
    let mut rows = problem.constraints.clone();
    let mut rhs = problem.rhs.clone();
    let mut relations: Vec<ConstraintOp> = (0..m).map(|i| problem.relation(i)).collect();
    for i in 0..m {
        if rhs[i] < 0.0 {
            rhs[i] = -rhs[i];
            for coef in rows[i].iter_mut() {
                *coef = -*coef;
            }
            relations[i] = relations[i].flipped();
        }
    }

    // Canonical form always minimizes
    let cost: Vec<f64> = match problem.sense {
        Sense::Minimize => problem.cost.clone(),
        Sense::Maximize => problem.cost.iter().map(|c| -c).collect(),
    };

    let n_free = (0..n_orig)
        .filter(|&j| problem.sign(j) == VariableSign::Free)
        .count();
    let n_surplus = relations.iter().filter(|&&op| op == ConstraintOp::Ge).count();
    // Every row gets exactly one slack or artificial column
    let n = n_orig + n_free + n_surplus + m;

    let mut canonical = CanonicalLp {
        cost: vec![0.0; n],
        constraints: vec![vec![0.0; n]; m],
        rhs,
        basic: vec![0; m],
        columns: Vec::with_capacity(n),
        sense: problem.sense,
        num_original: n_orig,
    };

    // Variable sign normalization
    let mut companions = Vec::with_capacity(n_free);
    for j in 0..n_orig {
        let sign = problem.sign(j);
        let factor = if sign == VariableSign::NonPositive { -1.0 } else { 1.0 };
        canonical.cost[j] = factor * cost[j];
        for i in 0..m {
            canonical.constraints[i][j] = factor * rows[i][j];
        }
        canonical.columns.push(ColumnKind::Original {
            variable: j,
            negated: sign == VariableSign::NonPositive,
        });
        if sign == VariableSign::Free {
            companions.push(j);
        }
    }
    for (k, &j) in companions.iter().enumerate() {
        let col = n_orig + k;
        canonical.cost[col] = -cost[j];
        for i in 0..m {
            canonical.constraints[i][col] = -rows[i][j];
        }
        canonical.columns.push(ColumnKind::FreeCompanion { variable: j });
    }

    // Constraint normalization
    let mut surplus_idx = n_orig + n_free;
    let mut basis_idx = surplus_idx + n_surplus;
    let mut block = Vec::with_capacity(m);
    for (i, op) in relations.iter().enumerate() {
        match op {
            ConstraintOp::Le => {
                canonical.constraints[i][basis_idx] = 1.0;
                block.push(ColumnKind::Slack { row: i });
            }
            ConstraintOp::Ge => {
                canonical.constraints[i][surplus_idx] = -1.0;
                canonical.columns.push(ColumnKind::Surplus { row: i });
                surplus_idx += 1;

                canonical.constraints[i][basis_idx] = 1.0;
                canonical.cost[basis_idx] = big_m;
                block.push(ColumnKind::Artificial { row: i });
            }
            ConstraintOp::Eq => {
                canonical.constraints[i][basis_idx] = 1.0;
                canonical.cost[basis_idx] = big_m;
                block.push(ColumnKind::Artificial { row: i });
            }
        }
        canonical.basic[i] = basis_idx;
        basis_idx += 1;
    }
    canonical.columns.extend(block);

    log::trace!(
        "standardized {}x{} problem into {}x{} ({} free, {} surplus, basis {:?})",
        m,
        n_orig,
        m,
        n,
        n_free,
        n_surplus,
        canonical.basic
    );

    Ok(canonical)
}

impl CanonicalLp {
    pub fn num_rows(&self) -> usize {
        self.rhs.len()
    }

    pub fn num_columns(&self) -> usize {
        self.cost.len()
    }

    pub fn is_artificial(&self, col: usize) -> bool {
        matches!(self.columns.get(col), Some(ColumnKind::Artificial { .. }))
    }

    /// The other half of a split free variable, if `col` is one.
    pub fn free_partner(&self, col: usize) -> Option<usize> {
        match self.columns.get(col)? {
            ColumnKind::Original { variable, .. } => self
                .columns
                .iter()
                .position(|k| *k == ColumnKind::FreeCompanion { variable: *variable }),
            ColumnKind::FreeCompanion { variable } => Some(*variable),
            _ => None,
        }
    }

    /// Objective at canonical point `x`, in the sense of the original problem.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        let z: f64 = self.cost.iter().zip(x).map(|(c, v)| c * v).sum();
        self.sense.sign() * z
    }

    /// Maps a canonical point back onto the original variables.
    pub fn recover(&self, x: &[f64]) -> Vec<f64> {
        let mut values = vec![0.0; self.num_original];
        for (kind, &v) in self.columns.iter().zip(x) {
            match *kind {
                ColumnKind::Original { variable, negated } => {
                    values[variable] += if negated { -v } else { v };
                }
                ColumnKind::FreeCompanion { variable } => values[variable] -= v,
                _ => {}
            }
        }
        values
    }
}

use crate::error::LpError;
use crate::problem::RawLp;
use crate::solution::{SolveResult, SolveStatus};
use crate::standardize::{CanonicalLp, DEFAULT_BIG_M, standardize};
use crate::tableau::Tableau;

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Big-M simplex solver for linear programming problems
pub struct Solver {
    /// Penalty on artificial variables
    big_m: f64,
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            big_m: DEFAULT_BIG_M,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Standardizes `problem` and builds an engine for it without solving.
    pub fn engine(&self, problem: &RawLp) -> Result<TableauEngine, LpError> {
        let canonical = standardize(problem, self.big_m)?;
        Ok(TableauEngine::new(canonical)?
            .with_max_iterations(self.max_iterations)
            .with_tolerance(self.tolerance))
    }

    /// Solve the LP problem using the Big-M tableau method
    pub fn solve(&self, problem: &RawLp) -> Result<SolveResult, LpError> {
        Ok(self.engine(problem)?.solve())
    }
}

/// Primal simplex on a dense tableau built from a [`CanonicalLp`].
///
/// The objective row holds the reduced costs `c_j - c_B B^-1 a_j` and, in
/// its last column, `-c_B B^-1 b`. A column improves the objective when its
/// reduced cost is negative. Entering and leaving choices both take the
/// smallest eligible index (Bland's rule).
#[derive(Debug, Clone)]
pub struct TableauEngine {
    canonical: CanonicalLp,
    tableau: Tableau,
    basic: Vec<usize>,
    non_basic: Vec<usize>,
    max_iterations: usize,
    tolerance: f64,
    iterations: usize,
    outcome: Option<SolveResult>,
}

impl TableauEngine {
    pub fn new(canonical: CanonicalLp) -> Result<Self, LpError> {
        let m = canonical.num_rows();
        let n = canonical.num_columns();
        check_shape(&canonical)?;

        let mut tableau = Tableau::zeros(m + 1, n + 1);
        for i in 0..m {
            let row = tableau.row_mut(i);
            row[..n].copy_from_slice(&canonical.constraints[i]);
            row[n] = canonical.rhs[i];
        }
        tableau.row_mut(m)[..n].copy_from_slice(&canonical.cost);

        // Price out basic columns so their reduced cost starts at zero
        for (i, &b) in canonical.basic.iter().enumerate() {
            let cb = canonical.cost[b];
            if cb != 0.0 {
                let row = tableau.row(i).to_vec();
                tableau.sub_scaled(m, &row, cb);
            }
        }

        let basic = canonical.basic.clone();
        let non_basic = complement(&basic, n);

        Ok(Self {
            canonical,
            tableau,
            basic,
            non_basic,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            iterations: 0,
            outcome: None,
        })
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn canonical(&self) -> &CanonicalLp {
        &self.canonical
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Column basic in each constraint row.
    pub fn basic(&self) -> &[usize] {
        &self.basic
    }

    /// Non-basic columns in increasing order.
    pub fn non_basic(&self) -> &[usize] {
        &self.non_basic
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Runs the simplex iterations until a terminal status is reached.
    ///
    /// Once terminal, later calls return the same result without touching
    /// the tableau.
    pub fn solve(&mut self) -> SolveResult {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let outcome = self.iterate();
        log::info!(
            "simplex finished: {} after {} iterations",
            outcome.status,
            outcome.iterations
        );
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn iterate(&mut self) -> SolveResult {
        loop {
            let Some(entering) = self.find_entering_column() else {
                return self.extract_solution();
            };
            if self.iterations >= self.max_iterations {
                log::warn!("iteration limit of {} reached", self.max_iterations);
                return SolveResult::max_iterations(self.iterations);
            }
            let Some((leaving, ratio)) = self.find_leaving_row(entering) else {
                return SolveResult::unbounded(self.iterations);
            };
            self.pivot(leaving, entering, ratio);
        }
    }

    /// Reduced cost of column `j` in the current basis.
    pub fn reduced_cost(&self, j: usize) -> f64 {
        self.tableau[(self.tableau.objective_row(), j)]
    }

    fn find_entering_column(&self) -> Option<usize> {
        self.non_basic
            .iter()
            .copied()
            .find(|&j| -self.reduced_cost(j) > self.tolerance)
    }

    /// Row with the smallest ratio `rhs / a` over positive `a`, and that ratio.
    fn find_leaving_row(&self, col: usize) -> Option<(usize, f64)> {
        let rhs_col = self.tableau.rhs_col();

        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.basic.len() {
            let val = self.tableau[(i, col)];
            if val > self.tolerance {
                let ratio = self.tableau[(i, rhs_col)] / val;
                match best {
                    Some((_, min_ratio)) if ratio >= min_ratio - self.tolerance => {}
                    _ => best = Some((i, ratio)),
                }
            }
        }

        best
    }

    fn pivot(&mut self, row: usize, col: usize, ratio: f64) {
        log::debug!(
            "pivot {}: column {} enters, column {} leaves row {} (ratio {})",
            self.iterations + 1,
            col,
            self.basic[row],
            row,
            ratio
        );

        self.tableau.pivot(row, col);
        self.basic[row] = col;
        self.non_basic = complement(&self.basic, self.canonical.num_columns());
        self.iterations += 1;
    }

    fn extract_solution(&self) -> SolveResult {
        let rhs_col = self.tableau.rhs_col();

        let mut solution = vec![0.0; self.canonical.num_columns()];
        for (i, &b) in self.basic.iter().enumerate() {
            solution[b] = self.tableau[(i, rhs_col)];
        }

        if self
            .basic
            .iter()
            .any(|&b| self.canonical.is_artificial(b) && solution[b] > self.tolerance)
        {
            return SolveResult::infeasible(self.iterations);
        }

        // The corner holds -z for the canonical minimization
        let z = -self.tableau[(self.tableau.objective_row(), rhs_col)];
        // Adding 0.0 turns a -0.0 optimum into 0.0
        let objective_value = self.canonical.sense.sign() * z + 0.0;

        let status = if self.has_alternative_optimum() {
            SolveStatus::Multiple
        } else {
            SolveStatus::Unique
        };

        SolveResult::optimal(status, solution, objective_value, self.iterations)
    }

    /// A non-basic column with zero reduced cost could enter without
    /// changing the objective. Artificial columns and the companion of a
    /// basic free-variable half do not count: neither moves the solution of
    /// the original problem.
    fn has_alternative_optimum(&self) -> bool {
        self.non_basic.iter().any(|&j| {
            if self.canonical.is_artificial(j) {
                return false;
            }
            if let Some(partner) = self.canonical.free_partner(j) {
                if self.basic.contains(&partner) {
                    return false;
                }
            }
            self.reduced_cost(j).abs() < self.tolerance
        })
    }
}

fn complement(basic: &[usize], n: usize) -> Vec<usize> {
    let mut in_basis = vec![false; n];
    for &b in basic {
        in_basis[b] = true;
    }
    (0..n).filter(|&j| !in_basis[j]).collect()
}

fn check_shape(canonical: &CanonicalLp) -> Result<(), LpError> {
    let m = canonical.num_rows();
    let n = canonical.num_columns();

    if canonical.constraints.len() != m {
        return Err(LpError::shape("canonical rows", m, canonical.constraints.len()));
    }
    if canonical.basic.len() != m {
        return Err(LpError::shape("basic indices", m, canonical.basic.len()));
    }
    if canonical.columns.len() != n {
        return Err(LpError::shape("column kinds", n, canonical.columns.len()));
    }
    for (i, row) in canonical.constraints.iter().enumerate() {
        if row.len() != n {
            return Err(LpError::shape(format!("canonical row {}", i), n, row.len()));
        }
        if canonical.rhs[i] < 0.0 {
            return Err(LpError::NegativeRhs(i));
        }
    }
    for (i, &b) in canonical.basic.iter().enumerate() {
        let is_unit = b < n
            && canonical
                .constraints
                .iter()
                .enumerate()
                .all(|(k, row)| row[b] == if k == i { 1.0 } else { 0.0 });
        if !is_unit {
            return Err(LpError::InvalidBasis { row: i, column: b });
        }
    }

    Ok(())
}

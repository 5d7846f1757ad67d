use std::fmt;

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Terminal status
    pub status: SolveStatus,
    /// Canonical solution vector, present only when an optimum was found
    pub solution: Option<Vec<f64>>,
    /// Objective value in the sense of the original problem
    pub objective_value: Option<f64>,
    /// Number of pivots performed
    pub iterations: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A unique optimal solution was found
    #[cfg_attr(feature = "serde", serde(rename = "unique solutions"))]
    Unique,
    /// An optimum was found, but a whole edge or face of optima exists
    #[cfg_attr(feature = "serde", serde(rename = "inf solutions"))]
    Multiple,
    /// The objective improves without bound
    #[cfg_attr(feature = "serde", serde(rename = "unbounded"))]
    Unbounded,
    /// An artificial variable stays positive at the optimum
    #[cfg_attr(feature = "serde", serde(rename = "infeasible"))]
    Infeasible,
    /// Pivot budget exhausted before reaching a terminal basis
    #[cfg_attr(feature = "serde", serde(rename = "max_iterations"))]
    MaxIterations,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolveStatus::Unique | SolveStatus::Multiple)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Unique => "unique solutions",
            SolveStatus::Multiple => "inf solutions",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::MaxIterations => "max_iterations exceeded",
        };
        f.write_str(s)
    }
}

impl SolveResult {
    pub fn optimal(status: SolveStatus, solution: Vec<f64>, objective_value: f64, iterations: usize) -> Self {
        debug_assert!(status.is_optimal());
        Self {
            status,
            solution: Some(solution),
            objective_value: Some(objective_value),
            iterations,
        }
    }

    pub fn unbounded(iterations: usize) -> Self {
        Self::without_solution(SolveStatus::Unbounded, iterations)
    }

    pub fn infeasible(iterations: usize) -> Self {
        Self::without_solution(SolveStatus::Infeasible, iterations)
    }

    pub fn max_iterations(iterations: usize) -> Self {
        Self::without_solution(SolveStatus::MaxIterations, iterations)
    }

    fn without_solution(status: SolveStatus, iterations: usize) -> Self {
        Self {
            status,
            solution: None,
            objective_value: None,
            iterations,
        }
    }
}
